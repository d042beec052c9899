use anyhow::Result;
use reqwest::Method;
use serde_json::Value;

use crate::models::{Detail, NewSession, Page, Session, SessionEdit};
use crate::validation::{
    check_create_fields, check_edit_fields, to_fields, verify_datetime, SESSION_FIELDS,
};

use super::guard::ResourceRefs;
use super::LifterClient;

impl LifterClient {
    /// Sessions (flights) of a competition.
    pub async fn sessions(&self, competition_id: &str) -> Result<Page<Session>> {
        let url = self.api_url(&format!("competitions/{}/sessions", competition_id));
        match self.fetch(self.request(Method::GET, &url), "sessions").await {
            Ok(page) => Ok(page),
            Err(e) => Err(self
                .explain_not_found(e, ResourceRefs::competition(competition_id))
                .await),
        }
    }

    pub async fn get_session(&self, competition_id: &str, session_id: &str) -> Result<Session> {
        let url = self.api_url(&format!(
            "competitions/{}/sessions/{}",
            competition_id, session_id
        ));
        match self.fetch(self.request(Method::GET, &url), "session").await {
            Ok(session) => Ok(session),
            Err(e) => Err(self
                .explain_not_found(
                    e,
                    ResourceRefs::competition(competition_id).with_session(session_id),
                )
                .await),
        }
    }

    pub async fn create_session(&self, competition_id: &str, session: &NewSession) -> Result<Session> {
        verify_datetime(&session.session_datetime)?;
        let mut fields = to_fields(session)?;
        fields.insert("competition".to_string(), Value::from(competition_id));
        check_create_fields(&fields, SESSION_FIELDS)?;

        let url = self.api_url(&format!("competitions/{}/sessions", competition_id));
        let request = self.authenticated(Method::POST, &url).await?.json(&fields);
        match self.fetch(request, "create session").await {
            Ok(session) => Ok(session),
            Err(e) => Err(self
                .explain_not_found(e, ResourceRefs::competition(competition_id))
                .await),
        }
    }

    pub async fn edit_session(
        &self,
        competition_id: &str,
        session_id: &str,
        edit: &SessionEdit,
    ) -> Result<Session> {
        let mut fields = to_fields(edit)?;
        check_edit_fields(&fields, SESSION_FIELDS)?;
        if let Some(ref datetime) = edit.session_datetime {
            verify_datetime(datetime)?;
        }
        fields.insert("competition".to_string(), Value::from(competition_id));

        let url = self.api_url(&format!(
            "competitions/{}/sessions/{}",
            competition_id, session_id
        ));
        let request = self.authenticated(Method::PATCH, &url).await?.json(&fields);
        match self.fetch(request, "edit session").await {
            Ok(session) => Ok(session),
            Err(e) => Err(self
                .explain_not_found(
                    e,
                    ResourceRefs::competition(competition_id).with_session(session_id),
                )
                .await),
        }
    }

    pub async fn delete_session(&self, competition_id: &str, session_id: &str) -> Result<Detail> {
        let url = self.api_url(&format!(
            "competitions/{}/sessions/{}",
            competition_id, session_id
        ));
        let request = self.authenticated(Method::DELETE, &url).await?;
        match self.execute(request, "delete session").await {
            Ok(()) => Ok(Detail::new("Session entry deleted.")),
            Err(e) => Err(self
                .explain_not_found(
                    e,
                    ResourceRefs::competition(competition_id).with_session(session_id),
                )
                .await),
        }
    }
}
