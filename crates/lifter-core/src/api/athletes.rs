use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use crate::models::{Athlete, AthleteDetail, AthleteEdit, AthleteOrdering, Detail, NewAthlete, Page};
use crate::validation::{check_create_fields, check_edit_fields, to_fields, ATHLETE_FIELDS};

use super::guard::{ResourceRefs, ATHLETE_MISSING};
use super::{is_not_found, ApiError, LifterClient};

impl LifterClient {
    /// List athletes, one page at a time (pages start at 1).
    pub async fn athletes(&self, page: u32) -> Result<Page<Athlete>> {
        let url = self.api_url("athletes");
        self.fetch(self.request(Method::GET, &url).query(&[("page", page)]), "athletes")
            .await
    }

    /// Search athletes by name.
    pub async fn find_athlete(
        &self,
        search: &str,
        page: u32,
        ordering: AthleteOrdering,
        ascending: bool,
    ) -> Result<Page<Athlete>> {
        let url = self.api_url("athletes");
        let ordering = format!("{}{}", if ascending { "" } else { "-" }, ordering.as_str());
        debug!(search, ordering = %ordering, page, "Searching athletes");

        let page = page.to_string();
        let request = self.request(Method::GET, &url).query(&[
            ("ordering", ordering.as_str()),
            ("page", page.as_str()),
            ("search", search),
        ]);
        self.fetch(request, "athlete search").await
    }

    /// Fetch one athlete with their lifts.
    pub async fn get_athlete(&self, athlete_id: &str) -> Result<AthleteDetail> {
        let url = self.api_url(&format!("athletes/{}", athlete_id));
        self.fetch(self.request(Method::GET, &url), "athlete")
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    ApiError::NotFound(ATHLETE_MISSING.to_string()).into()
                } else {
                    e
                }
            })
    }

    pub async fn create_athlete(&self, athlete: &NewAthlete) -> Result<Athlete> {
        let fields = to_fields(athlete)?;
        check_create_fields(&fields, ATHLETE_FIELDS)?;

        let url = self.api_url("athletes");
        let request = self.authenticated(Method::POST, &url).await?.json(&fields);
        self.fetch(request, "create athlete").await
    }

    /// Change some of an athlete's fields.
    pub async fn edit_athlete(&self, athlete_id: &str, edit: &AthleteEdit) -> Result<Athlete> {
        let fields = to_fields(edit)?;
        check_edit_fields(&fields, ATHLETE_FIELDS)?;

        let url = self.api_url(&format!("athletes/{}", athlete_id));
        let request = self.authenticated(Method::PATCH, &url).await?.json(&fields);
        match self.fetch(request, "edit athlete").await {
            Ok(athlete) => Ok(athlete),
            Err(e) => Err(self.explain_not_found(e, ResourceRefs::athlete(athlete_id)).await),
        }
    }

    pub async fn delete_athlete(&self, athlete_id: &str) -> Result<Detail> {
        let url = self.api_url(&format!("athletes/{}", athlete_id));
        let request = self.authenticated(Method::DELETE, &url).await?;
        match self.execute(request, "delete athlete").await {
            Ok(()) => Ok(Detail::new("Athlete entry deleted.")),
            Err(e) => Err(self.explain_not_found(e, ResourceRefs::athlete(athlete_id)).await),
        }
    }
}
