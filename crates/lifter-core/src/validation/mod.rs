//! Client-side checks run before anything is sent to the API.

pub mod fields;
pub mod lifts;

// Re-export commonly used functions at module level
pub use fields::{
    check_create_fields, check_edit_fields, to_fields, verify_date, verify_datetime,
    ATHLETE_FIELDS, COMPETITION_FIELDS, LIFT_FIELDS, SESSION_FIELDS,
};
pub use lifts::{parse_sequence, validate_lifts, validate_sequence};
