use serde::{Deserialize, Serialize};

use super::{AgeCategories, Lift};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Athlete {
    pub reference_id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub yearborn: i32,
    #[serde(default)]
    pub age_categories: AgeCategories,
}

impl Athlete {
    /// Display name, preferring the server's `full_name`.
    pub fn display_name(&self) -> String {
        match self.full_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Athlete with every lift recorded for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AthleteDetail {
    #[serde(flatten)]
    pub athlete: Athlete,
    #[serde(default)]
    pub lift_set: Vec<Lift>,
}

/// Field an athlete search can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AthleteOrdering {
    #[default]
    LastName,
    FirstName,
}

impl AthleteOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            AthleteOrdering::LastName => "last_name",
            AthleteOrdering::FirstName => "first_name",
        }
    }
}

impl std::str::FromStr for AthleteOrdering {
    type Err = crate::ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_name" => Ok(AthleteOrdering::LastName),
            "first_name" => Ok(AthleteOrdering::FirstName),
            other => Err(crate::ApiError::NotAllowed(format!(
                "'{}' is not a valid ordering. Use 'last_name' or 'first_name'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAthlete {
    pub first_name: String,
    pub last_name: String,
    pub yearborn: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AthleteEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearborn: Option<i32>,
}
