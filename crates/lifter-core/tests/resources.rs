//! Resource operations against a mock API: paths, query strings, the
//! pre-flight checks that keep bad writes off the wire, and the 404
//! explanations.

use anyhow::Result;
use lifter_core::models::{
    AthleteEdit, AthleteOrdering, AttemptPosition, LiftAttempt, LiftEdit, LiftSequence,
    LiftStatus, NewCompetition, NewLift, NewSession, SessionEdit,
};
use lifter_core::ApiError;
use mockito::{Matcher, Server};
use serde_json::json;

mod common;
use common::{
    athlete_json, client, competition_json, lift_json, mock_get, mock_refresh, ACCESS_TOKEN,
    REFRESH_TOKEN,
};

fn sequence(attempts: [(LiftStatus, u32); 3]) -> LiftSequence {
    let [a, b, c] = attempts.map(|(status, weight)| LiftAttempt::new(status, weight));
    LiftSequence::new(a, b, c)
}

fn new_lift(snatch: LiftSequence) -> NewLift {
    NewLift {
        athlete: "ath1".to_string(),
        snatch,
        cnj: sequence([
            (LiftStatus::Lift, 160),
            (LiftStatus::NoLift, 170),
            (LiftStatus::NoLift, 180),
        ]),
        bodyweight: 86.0,
        weight_category: "M102+".to_string(),
        session_number: 1,
        team: "CCW".to_string(),
        lottery_number: 99,
    }
}

fn not_found_message(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::NotFound(detail)) => Some(detail.clone()),
        _ => None,
    }
}

#[tokio::test]
async fn test_athletes_page() -> Result<()> {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/v1/athletes")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [athlete_json("ath1"), athlete_json("ath2")]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, None);
    let page = api.athletes(1).await?;
    assert_eq!(page.count, 2);
    assert!(!page.has_next());
    assert_eq!(page.results[1].reference_id, "ath2");
    assert_eq!(page.results[0].display_name(), "Test USER");

    list.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_find_athlete_query() -> Result<()> {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/v1/athletes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ordering".into(), "-first_name".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("search".into(), "user".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "count": 1,
                "next": null,
                "previous": format!("{}/v1/athletes?page=1", server.url()),
                "results": [athlete_json("ath1")]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, None);
    let page = api
        .find_athlete("user", 2, AthleteOrdering::FirstName, false)
        .await?;
    assert_eq!(page.results.len(), 1);
    assert!(page.previous.is_some());

    search.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_get_athlete_missing() -> Result<()> {
    let mut server = Server::new_async().await;
    let _athlete = mock_get(&mut server, "/v1/athletes/nope", None).await;

    let api = client(&server, None);
    let err = api.get_athlete("nope").await.unwrap_err();
    assert_eq!(not_found_message(&err).as_deref(), Some("Athlete does not exist."));
    Ok(())
}

#[tokio::test]
async fn test_get_competition_with_lifts() -> Result<()> {
    let mut server = Server::new_async().await;
    let mut body = competition_json("comp1");
    body["lift_set"] = json!([lift_json("comp1", "lift1")]);
    let _competition = mock_get(&mut server, "/v1/competitions/comp1", Some(body)).await;

    let api = client(&server, None);
    let detail = api.get_competition("comp1").await?;
    assert_eq!(detail.competition.name, "Test Competition Name");
    assert_eq!(detail.lift_set.len(), 1);
    assert_eq!(detail.lift_set[0].total(), Some(285));
    Ok(())
}

#[tokio::test]
async fn test_get_lift_reports_missing_competition() -> Result<()> {
    let mut server = Server::new_async().await;
    let lift = server
        .mock("GET", "/v1/competitions/gone/lifts/lift1")
        .with_status(404)
        .with_body(r#"{"detail": "Not found."}"#)
        .expect(1)
        .create_async()
        .await;
    let _competition = mock_get(&mut server, "/v1/competitions/gone", None).await;

    let api = client(&server, None);
    let err = api.get_lift("gone", "lift1").await.unwrap_err();
    assert_eq!(
        not_found_message(&err).as_deref(),
        Some("Competition does not exist.")
    );

    // The lift itself is not re-checked once its competition is gone
    lift.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_get_lift_reports_missing_lift() -> Result<()> {
    let mut server = Server::new_async().await;
    let lift = server
        .mock("GET", "/v1/competitions/comp1/lifts/nope")
        .with_status(404)
        .with_body(r#"{"detail": "Not found."}"#)
        .expect(2)
        .create_async()
        .await;
    let _competition = mock_get(&mut server, "/v1/competitions/comp1", Some(competition_json("comp1"))).await;

    let api = client(&server, None);
    let err = api.get_lift("comp1", "nope").await.unwrap_err();
    assert_eq!(not_found_message(&err).as_deref(), Some("Lift does not exist."));

    lift.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_create_lift_rejects_invalid_sequence_offline() -> Result<()> {
    let mut server = Server::new_async().await;
    let refresh = mock_refresh(&mut server, 0).await;
    let create = server
        .mock("POST", "/v1/competitions/comp1/lifts")
        .expect(0)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    // A made lift must be followed by a heavier attempt
    let snatch = sequence([
        (LiftStatus::Lift, 120),
        (LiftStatus::Lift, 120),
        (LiftStatus::Lift, 125),
    ]);
    let err = api.create_lift("comp1", &new_lift(snatch)).await.unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::InvalidLifts { position, .. }) => {
            assert_eq!(*position, AttemptPosition::Second)
        }
        other => panic!("expected InvalidLifts, got {:?}", other),
    }

    refresh.assert_async().await;
    create.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_create_lift() -> Result<()> {
    let mut server = Server::new_async().await;
    let refresh = mock_refresh(&mut server, 1).await;
    let _athlete = mock_get(&mut server, "/v1/athletes/ath1", Some(athlete_json("ath1"))).await;
    let _competition = mock_get(&mut server, "/v1/competitions/comp1", Some(competition_json("comp1"))).await;
    let create = server
        .mock("POST", "/v1/competitions/comp1/lifts")
        .match_header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str())
        .match_body(Matcher::PartialJson(json!({
            "competition": "comp1",
            "athlete": "ath1",
            "snatch_first": "LIFT",
            "snatch_third": "NOLIFT",
            "snatch_third_weight": 131,
            "lottery_number": 99
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(lift_json("comp1", "lift1").to_string())
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let snatch = sequence([
        (LiftStatus::Lift, 120),
        (LiftStatus::Lift, 125),
        (LiftStatus::NoLift, 131),
    ]);
    let lift = api.create_lift("comp1", &new_lift(snatch)).await?;
    assert_eq!(lift.reference_id, "lift1");
    assert_eq!(lift.sequence(lifter_core::models::Discipline::Snatch).best(), Some(125));

    refresh.assert_async().await;
    create.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_create_lift_for_missing_athlete() -> Result<()> {
    let mut server = Server::new_async().await;
    // No token is minted for a lift that cannot be created
    let refresh = mock_refresh(&mut server, 0).await;
    let _athlete = mock_get(&mut server, "/v1/athletes/ath1", None).await;
    let _competition = mock_get(&mut server, "/v1/competitions/comp1", Some(competition_json("comp1"))).await;
    let create = server
        .mock("POST", "/v1/competitions/comp1/lifts")
        .expect(0)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let snatch = sequence([
        (LiftStatus::Lift, 120),
        (LiftStatus::Lift, 125),
        (LiftStatus::Dna, 0),
    ]);
    let err = api.create_lift("comp1", &new_lift(snatch)).await.unwrap_err();
    assert_eq!(not_found_message(&err).as_deref(), Some("Athlete does not exist."));

    refresh.assert_async().await;
    create.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_edit_lift_validates_merged_attempts() -> Result<()> {
    let mut server = Server::new_async().await;
    let refresh = mock_refresh(&mut server, 0).await;
    let _lift = mock_get(
        &mut server,
        "/v1/competitions/comp1/lifts/lift1",
        Some(lift_json("comp1", "lift1")),
    )
    .await;
    let patch = server
        .mock("PATCH", "/v1/competitions/comp1/lifts/lift1")
        .expect(0)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    // Stored snatch opens with a made 120, so a 119 second attempt is a drop
    let edit = LiftEdit {
        snatch_second_weight: Some(119),
        ..Default::default()
    };
    let err = api.edit_lift("comp1", "lift1", &edit).await.unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::InvalidLifts { position, .. }) => {
            assert_eq!(*position, AttemptPosition::Second)
        }
        other => panic!("expected InvalidLifts, got {:?}", other),
    }

    refresh.assert_async().await;
    patch.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_edit_lift_without_attempts_skips_lookup() -> Result<()> {
    let mut server = Server::new_async().await;
    let _refresh = mock_refresh(&mut server, 1).await;
    let lookup = server
        .mock("GET", "/v1/competitions/comp1/lifts/lift1")
        .expect(0)
        .create_async()
        .await;
    let mut updated = lift_json("comp1", "lift1");
    updated["team"] = json!("WLD");
    let patch = server
        .mock("PATCH", "/v1/competitions/comp1/lifts/lift1")
        .match_body(Matcher::Json(json!({ "team": "WLD" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(updated.to_string())
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let edit = LiftEdit {
        team: Some("WLD".to_string()),
        ..Default::default()
    };
    let lift = api.edit_lift("comp1", "lift1", &edit).await?;
    assert_eq!(lift.team, "WLD");

    lookup.assert_async().await;
    patch.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_empty_edit_is_rejected_offline() -> Result<()> {
    let mut server = Server::new_async().await;
    let refresh = mock_refresh(&mut server, 0).await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let err = api
        .edit_athlete("ath1", &AthleteEdit::default())
        .await
        .unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::MissingOrExtraFields(msg)) => assert_eq!(msg, "No values provided."),
        other => panic!("expected MissingOrExtraFields, got {:?}", other),
    }

    refresh.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_create_competition_rejects_bad_date_offline() -> Result<()> {
    let mut server = Server::new_async().await;
    let refresh = mock_refresh(&mut server, 0).await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let competition = NewCompetition {
        date_start: "2022-13-32".to_string(),
        date_end: "2022-03-06".to_string(),
        location: "Test Location".to_string(),
        name: "Test Competition Name".to_string(),
    };
    let err = api.create_competition(&competition).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::InvalidDate(_))
    ));

    refresh.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_delete_athlete() -> Result<()> {
    let mut server = Server::new_async().await;
    let _refresh = mock_refresh(&mut server, 1).await;
    let delete = server
        .mock("DELETE", "/v1/athletes/ath1")
        .match_header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str())
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let detail = api.delete_athlete("ath1").await?;
    assert_eq!(detail.detail, "Athlete entry deleted.");

    delete.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_delete_session_in_missing_competition() -> Result<()> {
    let mut server = Server::new_async().await;
    let _refresh = mock_refresh(&mut server, 1).await;
    let _delete = server
        .mock("DELETE", "/v1/competitions/gone/sessions/s1")
        .with_status(404)
        .with_body(r#"{"detail": "Not found."}"#)
        .create_async()
        .await;
    let _competition = mock_get(&mut server, "/v1/competitions/gone", None).await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let err = api.delete_session("gone", "s1").await.unwrap_err();
    assert_eq!(
        not_found_message(&err).as_deref(),
        Some("Competition does not exist.")
    );
    Ok(())
}

#[tokio::test]
async fn test_next_page_follows_server_url() -> Result<()> {
    let mut server = Server::new_async().await;
    let next = server
        .mock("GET", "/v1/competitions")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "count": 3,
                "next": null,
                "previous": format!("{}/v1/competitions?page=1", server.url()),
                "results": [competition_json("comp3")]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, None);
    let url = format!("{}/v1/competitions?page=2", server.url());
    let page: lifter_core::models::Page<lifter_core::models::Competition> =
        api.next_page(&url).await?;
    assert_eq!(page.results[0].reference_id, "comp3");
    assert!(!page.has_next());

    next.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_create_lift_rejects_invalid_clean_and_jerk_offline() -> Result<()> {
    let mut server = Server::new_async().await;
    let refresh = mock_refresh(&mut server, 0).await;
    let lookup = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/v1/competitions/comp1/lifts")
        .expect(0)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let snatch = sequence([
        (LiftStatus::Lift, 120),
        (LiftStatus::Lift, 125),
        (LiftStatus::NoLift, 131),
    ]);
    let mut lift = new_lift(snatch);
    // A missed attempt may be repeated, never lowered
    lift.cnj = sequence([
        (LiftStatus::NoLift, 160),
        (LiftStatus::NoLift, 160),
        (LiftStatus::NoLift, 155),
    ]);
    let err = api.create_lift("comp1", &lift).await.unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::InvalidLifts { position, .. }) => {
            assert_eq!(*position, AttemptPosition::Third)
        }
        other => panic!("expected InvalidLifts, got {:?}", other),
    }

    refresh.assert_async().await;
    lookup.assert_async().await;
    create.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_lift_writes_without_token_make_no_requests() -> Result<()> {
    let mut server = Server::new_async().await;
    let lookup = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", "/v1/competitions/comp1/lifts/lift1")
        .expect(0)
        .create_async()
        .await;

    let api = client(&server, None);
    let edit = LiftEdit {
        snatch_second_weight: Some(130),
        ..Default::default()
    };
    let err = api.edit_lift("comp1", "lift1", &edit).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::TokenNotProvided)
    ));

    let snatch = sequence([
        (LiftStatus::Lift, 120),
        (LiftStatus::Lift, 125),
        (LiftStatus::NoLift, 131),
    ]);
    let err = api.create_lift("comp1", &new_lift(snatch)).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::TokenNotProvided)
    ));

    lookup.assert_async().await;
    patch.assert_async().await;
    Ok(())
}

fn session_json(id: &str, competition: &str) -> serde_json::Value {
    json!({
        "reference_id": id,
        "competition": competition,
        "session_datetime": "2022-03-05T09:00:00Z",
        "announcer": "Empty",
        "referee_first": "Empty",
        "referee_second": "Empty",
        "referee_third": "Empty",
        "technical_controller": "Empty",
        "marshall": "Empty",
        "timekeeper": "Empty",
        "jury": "Empty"
    })
}

#[tokio::test]
async fn test_create_session_sends_competition() -> Result<()> {
    let mut server = Server::new_async().await;
    let _refresh = mock_refresh(&mut server, 1).await;
    let create = server
        .mock("POST", "/v1/competitions/comp1/sessions")
        .match_header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str())
        .match_body(Matcher::PartialJson(json!({
            "competition": "comp1",
            "session_datetime": "2022-03-05T09:00:00Z",
            "announcer": "Empty",
            "jury": "Empty"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(session_json("s1", "comp1").to_string())
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let session = api
        .create_session("comp1", &NewSession::at("2022-03-05T09:00:00Z"))
        .await?;
    assert_eq!(session.reference_id, "s1");
    assert_eq!(session.competition, "comp1");

    create.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_edit_session_sends_competition() -> Result<()> {
    let mut server = Server::new_async().await;
    let _refresh = mock_refresh(&mut server, 1).await;
    let mut updated = session_json("s1", "comp1");
    updated["announcer"] = json!("Jane");
    let patch = server
        .mock("PATCH", "/v1/competitions/comp1/sessions/s1")
        .match_body(Matcher::Json(json!({
            "announcer": "Jane",
            "competition": "comp1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(updated.to_string())
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, Some(REFRESH_TOKEN));
    let edit = SessionEdit {
        announcer: Some("Jane".to_string()),
        ..Default::default()
    };
    let session = api.edit_session("comp1", "s1", &edit).await?;
    assert_eq!(session.announcer.as_deref(), Some("Jane"));

    patch.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    // Nothing listens on the discard port
    let api = lifter_core::LifterClient::new("http://127.0.0.1:9", "v1", None)
        .expect("client should build");
    let err = api.athletes(1).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::NetworkError(_))
    ));
}
