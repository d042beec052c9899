#![allow(dead_code)]

use lifter_core::LifterClient;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

pub const REFRESH_TOKEN: &str = "refresh-token";
pub const ACCESS_TOKEN: &str = "access-token";

/// Client pointed at the mock server, with or without a refresh token.
pub fn client(server: &ServerGuard, refresh_token: Option<&str>) -> LifterClient {
    LifterClient::new(server.url(), "v1", refresh_token.map(str::to_string))
        .expect("client should build")
}

/// Refresh endpoint minting `ACCESS_TOKEN`, expected `hits` times.
pub async fn mock_refresh(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("POST", "/api/token/refresh/")
        .match_body(Matcher::UrlEncoded("refresh".into(), REFRESH_TOKEN.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "access": ACCESS_TOKEN }).to_string())
        .expect(hits)
        .create_async()
        .await
}

/// Verify endpoint answering for `ACCESS_TOKEN`.
pub async fn mock_verify(server: &mut ServerGuard, valid: bool, hits: usize) -> Mock {
    let (status, body) = if valid {
        (200, json!({}))
    } else {
        (
            401,
            json!({"detail": "Token is invalid or expired", "code": "token_not_valid"}),
        )
    };
    server
        .mock("POST", "/api/token/verify")
        .match_body(Matcher::Json(json!({ "token": ACCESS_TOKEN })))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(hits)
        .create_async()
        .await
}

/// GET `path` answering 200 with `body`, or 404 with the API's default detail.
pub async fn mock_get(server: &mut ServerGuard, path: &str, body: Option<Value>) -> Mock {
    let (status, body) = match body {
        Some(body) => (200, body),
        None => (404, json!({"detail": "Not found."})),
    };
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub fn athlete_json(id: &str) -> Value {
    json!({
        "reference_id": id,
        "url": format!("http://localhost/v1/athletes/{}", id),
        "full_name": "Test USER",
        "first_name": "Test",
        "last_name": "USER",
        "yearborn": 1900,
        "age_categories": {"is_youth": false, "is_junior": false, "is_senior": false, "is_master": true}
    })
}

pub fn competition_json(id: &str) -> Value {
    json!({
        "reference_id": id,
        "date_start": "2022-03-05",
        "date_end": "2022-03-06",
        "location": "Test Location",
        "name": "Test Competition Name",
        "lifts_count": 1,
        "lift_set": []
    })
}

pub fn lift_json(competition: &str, id: &str) -> Value {
    json!({
        "reference_id": id,
        "athlete": "ath1",
        "competition": competition,
        "snatch_first": "LIFT",
        "snatch_first_weight": 120,
        "snatch_second": "LIFT",
        "snatch_second_weight": 125,
        "snatch_third": "NOLIFT",
        "snatch_third_weight": 131,
        "cnj_first": "LIFT",
        "cnj_first_weight": 160,
        "cnj_second": "NOLIFT",
        "cnj_second_weight": 170,
        "cnj_third": "NOLIFT",
        "cnj_third_weight": 180,
        "bodyweight": 86.0,
        "weight_category": "M102+",
        "session_number": 1,
        "team": "CCW",
        "lottery_number": 99
    })
}
