use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::ApiError;

/// Fields accepted when creating or editing an athlete.
pub const ATHLETE_FIELDS: &[&str] = &["first_name", "last_name", "yearborn"];

/// Fields accepted when creating or editing a competition.
pub const COMPETITION_FIELDS: &[&str] = &["date_start", "date_end", "location", "name"];

/// Fields accepted when creating or editing a session.
pub const SESSION_FIELDS: &[&str] = &[
    "session_datetime",
    "competition",
    "announcer",
    "referee_first",
    "referee_second",
    "referee_third",
    "technical_controller",
    "marshall",
    "timekeeper",
    "jury",
];

/// Fields accepted when creating or editing a lift.
pub const LIFT_FIELDS: &[&str] = &[
    "competition",
    "athlete",
    "snatch_first",
    "snatch_first_weight",
    "snatch_second",
    "snatch_second_weight",
    "snatch_third",
    "snatch_third_weight",
    "cnj_first",
    "cnj_first_weight",
    "cnj_second",
    "cnj_second_weight",
    "cnj_third",
    "cnj_third_weight",
    "bodyweight",
    "weight_category",
    "session_number",
    "team",
    "lottery_number",
];

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn unknown_keys<'a>(fields: &'a Map<String, Value>, allowed: &[&str]) -> Vec<&'a str> {
    fields
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed.contains(key))
        .collect()
}

/// A create payload must carry exactly the allowed fields.
pub fn check_create_fields(fields: &Map<String, Value>, required: &[&str]) -> Result<(), ApiError> {
    let unknown = unknown_keys(fields, required);
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| !fields.contains_key(*key))
        .collect();
    if !unknown.is_empty() || !missing.is_empty() {
        return Err(ApiError::MissingOrExtraFields(format!(
            "unknown_keys={:?} missing_keys={:?}",
            unknown, missing
        )));
    }
    Ok(())
}

/// An edit payload must be non-empty and a subset of the allowed fields.
pub fn check_edit_fields(fields: &Map<String, Value>, allowed: &[&str]) -> Result<(), ApiError> {
    if fields.is_empty() {
        return Err(ApiError::MissingOrExtraFields("No values provided.".to_string()));
    }
    let unknown = unknown_keys(fields, allowed);
    if !unknown.is_empty() {
        return Err(ApiError::MissingOrExtraFields(format!("unknown_keys={:?}", unknown)));
    }
    Ok(())
}

/// Serialize a record into the JSON object that will be sent.
pub fn to_fields<T: Serialize>(record: &T) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::MissingOrExtraFields(format!(
            "expected an object of fields, got {}",
            other
        ))),
        Err(e) => Err(ApiError::MissingOrExtraFields(e.to_string())),
    }
}

/// Check a `YYYY-MM-DD` date (e.g. 2022-03-26).
pub fn verify_date(input: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        ApiError::InvalidDate("Incorrect date format. Please use YYYY-MM-DD".to_string())
    })
}

/// Check a `YYYY-MM-DDTHH:MM:SSZ` timestamp (e.g. 2022-03-26T10:00:00Z).
/// The trailing `Z` is optional.
pub fn verify_datetime(input: &str) -> Result<NaiveDateTime, ApiError> {
    let trimmed = input.strip_suffix('Z').unwrap_or(input);
    NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT).map_err(|_| {
        ApiError::InvalidDateTime(
            "Incorrect datetime format. Please use YYYY-MM-DDTHH:mm:ssZ".to_string(),
        )
    })
}
