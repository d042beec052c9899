use anyhow::Result;
use reqwest::Method;

use crate::models::{Competition, CompetitionDetail, CompetitionEdit, Detail, NewCompetition, Page};
use crate::validation::{
    check_create_fields, check_edit_fields, to_fields, verify_date, COMPETITION_FIELDS,
};

use super::guard::{ResourceRefs, COMPETITION_MISSING};
use super::{is_not_found, ApiError, LifterClient};

impl LifterClient {
    pub async fn competitions(&self, page: u32) -> Result<Page<Competition>> {
        let url = self.api_url("competitions");
        self.fetch(self.request(Method::GET, &url).query(&[("page", page)]), "competitions")
            .await
    }

    /// Fetch one competition with its lifts.
    pub async fn get_competition(&self, competition_id: &str) -> Result<CompetitionDetail> {
        let url = self.api_url(&format!("competitions/{}", competition_id));
        self.fetch(self.request(Method::GET, &url), "competition")
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    ApiError::NotFound(COMPETITION_MISSING.to_string()).into()
                } else {
                    e
                }
            })
    }

    pub async fn create_competition(&self, competition: &NewCompetition) -> Result<Competition> {
        verify_date(&competition.date_start)?;
        verify_date(&competition.date_end)?;
        let fields = to_fields(competition)?;
        check_create_fields(&fields, COMPETITION_FIELDS)?;

        let url = self.api_url("competitions");
        let request = self.authenticated(Method::POST, &url).await?.json(&fields);
        self.fetch(request, "create competition").await
    }

    pub async fn edit_competition(
        &self,
        competition_id: &str,
        edit: &CompetitionEdit,
    ) -> Result<Competition> {
        let fields = to_fields(edit)?;
        check_edit_fields(&fields, COMPETITION_FIELDS)?;
        for date in [&edit.date_start, &edit.date_end].into_iter().flatten() {
            verify_date(date)?;
        }

        let url = self.api_url(&format!("competitions/{}", competition_id));
        let request = self.authenticated(Method::PATCH, &url).await?.json(&fields);
        match self.fetch(request, "edit competition").await {
            Ok(competition) => Ok(competition),
            Err(e) => Err(self
                .explain_not_found(e, ResourceRefs::competition(competition_id))
                .await),
        }
    }

    pub async fn delete_competition(&self, competition_id: &str) -> Result<Detail> {
        let url = self.api_url(&format!("competitions/{}", competition_id));
        let request = self.authenticated(Method::DELETE, &url).await?;
        match self.execute(request, "delete competition").await {
            Ok(()) => Ok(Detail::new("Competition entry deleted.")),
            Err(e) => Err(self
                .explain_not_found(e, ResourceRefs::competition(competition_id))
                .await),
        }
    }
}
