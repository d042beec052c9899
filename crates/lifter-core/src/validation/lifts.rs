//! Competition-rule checks on a discipline's three attempts.
//!
//! After a made lift the next attempt must be heavier. After a missed lift
//! the bar may stay where it was but never come down. An attempt that was
//! not taken (`DNA`) is exempt from comparison with the attempt before it,
//! and a `DNA` places no constraint on the attempt after it.

use crate::api::ApiError;
use crate::models::{AttemptPosition, LiftAttempt, LiftSequence, LiftStatus};

const INVALID_STATUS: &str = "status must be LIFT, NOLIFT, or DNA";
const AFTER_LIFT: &str = "weight must be greater than the previous successful lift";
const AFTER_NOLIFT: &str = "weight cannot be less than the previous missed lift";

/// Build a sequence from raw `(status, weight)` pairs, rejecting unknown
/// status labels before any weight is looked at.
pub fn parse_sequence(raw: [(&str, u32); 3]) -> Result<LiftSequence, ApiError> {
    let mut attempts = [LiftAttempt::new(LiftStatus::Dna, 0); 3];
    for (position, (label, weight)) in AttemptPosition::ALL.into_iter().zip(raw) {
        let status = LiftStatus::parse(label).ok_or_else(|| ApiError::InvalidLifts {
            position,
            reason: format!("{} (got '{}')", INVALID_STATUS, label),
        })?;
        attempts[position.index()] = LiftAttempt::new(status, weight);
    }
    let [first, second, third] = attempts;
    Ok(LiftSequence::new(first, second, third))
}

/// Check weight ordering between consecutive attempts. Stops at the first
/// violation, scanning 1st→2nd then 2nd→3rd.
pub fn validate_sequence(sequence: &LiftSequence) -> Result<(), ApiError> {
    let pairs = [
        (AttemptPosition::First, AttemptPosition::Second),
        (AttemptPosition::Second, AttemptPosition::Third),
    ];
    for (earlier_pos, later_pos) in pairs {
        let earlier = sequence.attempt(earlier_pos);
        let later = sequence.attempt(later_pos);

        if later.status == LiftStatus::Dna {
            continue;
        }

        let violation = match earlier.status {
            LiftStatus::Lift if later.weight <= earlier.weight => Some(AFTER_LIFT),
            LiftStatus::NoLift if later.weight < earlier.weight => Some(AFTER_NOLIFT),
            _ => None,
        };

        if let Some(reason) = violation {
            return Err(ApiError::InvalidLifts {
                position: later_pos,
                reason: format!(
                    "{} ({} {}kg after {} {}kg)",
                    reason, later.status, later.weight, earlier.status, earlier.weight
                ),
            });
        }
    }
    Ok(())
}

/// Parse and validate raw attempts in one step.
pub fn validate_lifts(raw: [(&str, u32); 3]) -> Result<LiftSequence, ApiError> {
    let sequence = parse_sequence(raw)?;
    validate_sequence(&sequence)?;
    Ok(sequence)
}
