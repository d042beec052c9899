use serde::{Deserialize, Serialize};

/// Placeholder the API uses for an official who has not been assigned.
pub const UNASSIGNED_OFFICIAL: &str = "Empty";

/// A lifting session (flight) within a competition, with its officials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Session {
    pub reference_id: String,
    #[serde(default)]
    pub url: Option<String>,
    pub competition: String,
    pub session_datetime: String,
    #[serde(default)]
    pub announcer: Option<String>,
    #[serde(default)]
    pub referee_first: Option<String>,
    #[serde(default)]
    pub referee_second: Option<String>,
    #[serde(default)]
    pub referee_third: Option<String>,
    #[serde(default)]
    pub technical_controller: Option<String>,
    #[serde(default)]
    pub marshall: Option<String>,
    #[serde(default)]
    pub timekeeper: Option<String>,
    #[serde(default)]
    pub jury: Option<String>,
}

/// `session_datetime` must be `YYYY-MM-DDTHH:MM:SSZ`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSession {
    pub session_datetime: String,
    pub announcer: String,
    pub referee_first: String,
    pub referee_second: String,
    pub referee_third: String,
    pub technical_controller: String,
    pub marshall: String,
    pub timekeeper: String,
    pub jury: String,
}

impl NewSession {
    /// A session with every official unassigned.
    pub fn at(session_datetime: impl Into<String>) -> Self {
        let empty = || UNASSIGNED_OFFICIAL.to_string();
        Self {
            session_datetime: session_datetime.into(),
            announcer: empty(),
            referee_first: empty(),
            referee_second: empty(),
            referee_third: empty(),
            technical_controller: empty(),
            marshall: empty(),
            timekeeper: empty(),
            jury: empty(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referee_first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referee_second: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referee_third: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_controller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marshall: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timekeeper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jury: Option<String>,
}
