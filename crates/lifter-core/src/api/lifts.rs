use anyhow::{Context, Result};
use reqwest::Method;
use tracing::debug;

use crate::models::{Detail, Discipline, Lift, LiftEdit, NewLift, Page};
use crate::validation::{
    check_create_fields, check_edit_fields, to_fields, validate_sequence, LIFT_FIELDS,
};

use super::guard::ResourceRefs;
use super::LifterClient;

impl LifterClient {
    /// Lifts recorded in a competition.
    pub async fn lifts(&self, competition_id: &str) -> Result<Page<Lift>> {
        let url = self.api_url(&format!("competitions/{}/lifts", competition_id));
        match self.fetch(self.request(Method::GET, &url), "lifts").await {
            Ok(page) => Ok(page),
            Err(e) => Err(self
                .explain_not_found(e, ResourceRefs::competition(competition_id))
                .await),
        }
    }

    pub async fn get_lift(&self, competition_id: &str, lift_id: &str) -> Result<Lift> {
        let url = self.api_url(&format!("competitions/{}/lifts/{}", competition_id, lift_id));
        match self.fetch(self.request(Method::GET, &url), "lift").await {
            Ok(lift) => Ok(lift),
            Err(e) => Err(self
                .explain_not_found(e, ResourceRefs::competition(competition_id).with_lift(lift_id))
                .await),
        }
    }

    /// Record an athlete's lifts in a competition.
    ///
    /// Both attempt sequences are validated, and the athlete and competition
    /// checked for existence, before a token is obtained and the lift sent.
    pub async fn create_lift(&self, competition_id: &str, lift: &NewLift) -> Result<Lift> {
        validate_sequence(&lift.snatch).context("Snatch attempts rejected")?;
        validate_sequence(&lift.cnj).context("Clean & jerk attempts rejected")?;
        let fields = to_fields(&lift.body(competition_id))?;
        check_create_fields(&fields, LIFT_FIELDS)?;

        self.require_credentials()?;

        let refs = ResourceRefs::competition(competition_id).with_athlete(&lift.athlete);
        self.ensure_exists(&refs).await?;

        let url = self.api_url(&format!("competitions/{}/lifts", competition_id));
        let request = self.authenticated(Method::POST, &url).await?.json(&fields);
        self.fetch(request, "create lift").await
    }

    /// Change some of a lift's fields.
    ///
    /// When attempts are touched, the edit is applied to the lift as it
    /// currently stands and the resulting sequence must still be valid.
    pub async fn edit_lift(&self, competition_id: &str, lift_id: &str, edit: &LiftEdit) -> Result<Lift> {
        let fields = to_fields(edit)?;
        check_edit_fields(&fields, LIFT_FIELDS)?;
        self.require_credentials()?;

        let touched: Vec<Discipline> = [Discipline::Snatch, Discipline::CleanAndJerk]
            .into_iter()
            .filter(|d| edit.touches(*d))
            .collect();
        if !touched.is_empty() {
            let current = self.get_lift(competition_id, lift_id).await?;
            for discipline in touched {
                debug!(%discipline, lift_id, "Validating edited attempts");
                let merged = edit.overlay(discipline, &current.sequence(discipline));
                validate_sequence(&merged)
                    .with_context(|| format!("{} attempts rejected", discipline))?;
            }
        }

        let url = self.api_url(&format!("competitions/{}/lifts/{}", competition_id, lift_id));
        let request = self.authenticated(Method::PATCH, &url).await?.json(&fields);
        match self.fetch(request, "edit lift").await {
            Ok(lift) => Ok(lift),
            Err(e) => Err(self
                .explain_not_found(e, ResourceRefs::competition(competition_id).with_lift(lift_id))
                .await),
        }
    }

    pub async fn delete_lift(&self, competition_id: &str, lift_id: &str) -> Result<Detail> {
        let url = self.api_url(&format!("competitions/{}/lifts/{}", competition_id, lift_id));
        let request = self.authenticated(Method::DELETE, &url).await?;
        match self.execute(request, "delete lift").await {
            Ok(()) => Ok(Detail::new("Lift entry deleted.")),
            Err(e) => Err(self
                .explain_not_found(e, ResourceRefs::competition(competition_id).with_lift(lift_id))
                .await),
        }
    }
}
