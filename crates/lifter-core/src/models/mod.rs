//! Data models for Lifter API entities.
//!
//! This module contains all the data structures used to represent
//! competition data including:
//!
//! - `Athlete`, `AthleteDetail`: Lifters and their recorded lifts
//! - `Competition`, `CompetitionDetail`: Meets with their lift sets
//! - `Session`: A flight within a competition, with its officials
//! - `Lift`, `LiftSequence`, `LiftAttempt`: Snatch and clean & jerk attempts
//! - `Page`, `Detail`: List pagination and message bodies
//!
//! Create payloads are `New*` records; partial updates are `*Edit` records
//! whose absent fields are not sent.

pub mod athlete;
pub mod common;
pub mod competition;
pub mod lift;
pub mod session;

pub use athlete::{Athlete, AthleteDetail, AthleteEdit, AthleteOrdering, NewAthlete};
pub use common::{AgeCategories, Detail, Page};
pub use competition::{Competition, CompetitionDetail, CompetitionEdit, NewCompetition};
pub use lift::{
    AttemptPosition, Discipline, Lift, LiftAttempt, LiftBody, LiftEdit, LiftSequence, LiftStatus,
    NewLift,
};
pub use session::{NewSession, Session, SessionEdit, UNASSIGNED_OFFICIAL};
