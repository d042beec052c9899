use serde::{Deserialize, Serialize};

use super::Lift;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Competition {
    pub reference_id: String,
    #[serde(default)]
    pub url: Option<String>,
    pub date_start: String,
    pub date_end: String,
    pub location: String,
    pub name: String,
    #[serde(default)]
    pub lifts_count: Option<u32>,
}

impl Competition {
    /// "2022-03-05 to 2022-03-06", or a single date for one-day meets.
    pub fn date_range(&self) -> String {
        if self.date_start == self.date_end {
            self.date_start.clone()
        } else {
            format!("{} to {}", self.date_start, self.date_end)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CompetitionDetail {
    #[serde(flatten)]
    pub competition: Competition,
    #[serde(default)]
    pub lift_set: Vec<Lift>,
}

/// Dates must be `YYYY-MM-DD`; they are checked before the request is sent.
#[derive(Debug, Clone, Serialize)]
pub struct NewCompetition {
    pub date_start: String,
    pub date_end: String,
    pub location: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompetitionEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
