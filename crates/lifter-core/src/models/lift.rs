use serde::{Deserialize, Serialize};

use super::AgeCategories;

/// Outcome of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum LiftStatus {
    #[serde(rename = "LIFT")]
    Lift,
    #[serde(rename = "NOLIFT")]
    NoLift,
    #[serde(rename = "DNA")]
    Dna,
}

impl LiftStatus {
    /// Parse the API's status label. Only the exact upper-case labels are accepted.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "LIFT" => Some(LiftStatus::Lift),
            "NOLIFT" => Some(LiftStatus::NoLift),
            "DNA" => Some(LiftStatus::Dna),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LiftStatus::Lift => "LIFT",
            LiftStatus::NoLift => "NOLIFT",
            LiftStatus::Dna => "DNA",
        }
    }
}

impl std::fmt::Display for LiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Position of an attempt within a discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttemptPosition {
    First,
    Second,
    Third,
}

impl AttemptPosition {
    pub const ALL: [AttemptPosition; 3] = [
        AttemptPosition::First,
        AttemptPosition::Second,
        AttemptPosition::Third,
    ];

    pub fn index(&self) -> usize {
        match self {
            AttemptPosition::First => 0,
            AttemptPosition::Second => 1,
            AttemptPosition::Third => 2,
        }
    }
}

impl std::fmt::Display for AttemptPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptPosition::First => write!(f, "1st"),
            AttemptPosition::Second => write!(f, "2nd"),
            AttemptPosition::Third => write!(f, "3rd"),
        }
    }
}

/// The two competition disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Snatch,
    CleanAndJerk,
}

impl Discipline {
    /// Field name prefix used by the API (`snatch_first`, `cnj_first`, ...).
    pub fn prefix(&self) -> &'static str {
        match self {
            Discipline::Snatch => "snatch",
            Discipline::CleanAndJerk => "cnj",
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discipline::Snatch => write!(f, "Snatch"),
            Discipline::CleanAndJerk => write!(f, "Clean & Jerk"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftAttempt {
    pub status: LiftStatus,
    /// Kilograms
    pub weight: u32,
}

impl LiftAttempt {
    pub fn new(status: LiftStatus, weight: u32) -> Self {
        Self { status, weight }
    }
}

/// Three attempts of one discipline, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftSequence {
    attempts: [LiftAttempt; 3],
}

impl LiftSequence {
    pub fn new(first: LiftAttempt, second: LiftAttempt, third: LiftAttempt) -> Self {
        Self {
            attempts: [first, second, third],
        }
    }

    pub fn attempts(&self) -> &[LiftAttempt; 3] {
        &self.attempts
    }

    pub fn attempt(&self, position: AttemptPosition) -> LiftAttempt {
        self.attempts[position.index()]
    }

    pub(crate) fn set(&mut self, position: AttemptPosition, attempt: LiftAttempt) {
        self.attempts[position.index()] = attempt;
    }

    /// Heaviest successful attempt, if any.
    pub fn best(&self) -> Option<u32> {
        self.attempts
            .iter()
            .filter(|a| a.status == LiftStatus::Lift)
            .map(|a| a.weight)
            .max()
    }
}

/// A lift record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Lift {
    #[serde(default)]
    pub url: Option<String>,
    pub reference_id: String,
    pub athlete: String,
    #[serde(default)]
    pub athlete_name: Option<String>,
    #[serde(default)]
    pub athlete_yearborn: Option<i32>,
    pub competition: String,
    #[serde(default)]
    pub competition_name: Option<String>,
    #[serde(default)]
    pub competition_date_start: Option<String>,
    pub snatch_first: LiftStatus,
    pub snatch_first_weight: u32,
    pub snatch_second: LiftStatus,
    pub snatch_second_weight: u32,
    pub snatch_third: LiftStatus,
    pub snatch_third_weight: u32,
    pub cnj_first: LiftStatus,
    pub cnj_first_weight: u32,
    pub cnj_second: LiftStatus,
    pub cnj_second_weight: u32,
    pub cnj_third: LiftStatus,
    pub cnj_third_weight: u32,
    #[serde(default)]
    pub best_snatch_weight: Option<u32>,
    #[serde(default)]
    pub best_cnj_weight: Option<u32>,
    #[serde(default)]
    pub total_lifted: Option<u32>,
    pub bodyweight: f64,
    pub weight_category: String,
    pub session_number: u32,
    pub team: String,
    pub lottery_number: u32,
    #[serde(default)]
    pub placing: Option<String>,
    #[serde(default)]
    pub age_categories: AgeCategories,
}

impl Lift {
    pub fn sequence(&self, discipline: Discipline) -> LiftSequence {
        match discipline {
            Discipline::Snatch => LiftSequence::new(
                LiftAttempt::new(self.snatch_first, self.snatch_first_weight),
                LiftAttempt::new(self.snatch_second, self.snatch_second_weight),
                LiftAttempt::new(self.snatch_third, self.snatch_third_weight),
            ),
            Discipline::CleanAndJerk => LiftSequence::new(
                LiftAttempt::new(self.cnj_first, self.cnj_first_weight),
                LiftAttempt::new(self.cnj_second, self.cnj_second_weight),
                LiftAttempt::new(self.cnj_third, self.cnj_third_weight),
            ),
        }
    }

    /// Best snatch plus best clean & jerk, or `None` if either discipline
    /// has no successful attempt.
    pub fn total(&self) -> Option<u32> {
        let snatch = self.sequence(Discipline::Snatch).best()?;
        let cnj = self.sequence(Discipline::CleanAndJerk).best()?;
        Some(snatch + cnj)
    }
}

/// Payload for creating a lift in a competition.
#[derive(Debug, Clone)]
pub struct NewLift {
    pub athlete: String,
    pub snatch: LiftSequence,
    pub cnj: LiftSequence,
    pub bodyweight: f64,
    pub weight_category: String,
    pub session_number: u32,
    pub team: String,
    pub lottery_number: u32,
}

/// Flat wire form of [`NewLift`].
#[derive(Debug, Serialize)]
pub struct LiftBody<'a> {
    pub competition: &'a str,
    pub athlete: &'a str,
    pub snatch_first: LiftStatus,
    pub snatch_first_weight: u32,
    pub snatch_second: LiftStatus,
    pub snatch_second_weight: u32,
    pub snatch_third: LiftStatus,
    pub snatch_third_weight: u32,
    pub cnj_first: LiftStatus,
    pub cnj_first_weight: u32,
    pub cnj_second: LiftStatus,
    pub cnj_second_weight: u32,
    pub cnj_third: LiftStatus,
    pub cnj_third_weight: u32,
    pub bodyweight: f64,
    pub weight_category: &'a str,
    pub session_number: u32,
    pub team: &'a str,
    pub lottery_number: u32,
}

impl NewLift {
    pub fn body<'a>(&'a self, competition_id: &'a str) -> LiftBody<'a> {
        let [s1, s2, s3] = *self.snatch.attempts();
        let [c1, c2, c3] = *self.cnj.attempts();
        LiftBody {
            competition: competition_id,
            athlete: &self.athlete,
            snatch_first: s1.status,
            snatch_first_weight: s1.weight,
            snatch_second: s2.status,
            snatch_second_weight: s2.weight,
            snatch_third: s3.status,
            snatch_third_weight: s3.weight,
            cnj_first: c1.status,
            cnj_first_weight: c1.weight,
            cnj_second: c2.status,
            cnj_second_weight: c2.weight,
            cnj_third: c3.status,
            cnj_third_weight: c3.weight,
            bodyweight: self.bodyweight,
            weight_category: &self.weight_category,
            session_number: self.session_number,
            team: &self.team,
            lottery_number: self.lottery_number,
        }
    }
}

/// Partial update of a lift. Absent fields are left unchanged on the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LiftEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub athlete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snatch_first: Option<LiftStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snatch_first_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snatch_second: Option<LiftStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snatch_second_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snatch_third: Option<LiftStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snatch_third_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnj_first: Option<LiftStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnj_first_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnj_second: Option<LiftStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnj_second_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnj_third: Option<LiftStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnj_third_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bodyweight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lottery_number: Option<u32>,
}

impl LiftEdit {
    fn attempt_fields(
        &self,
        discipline: Discipline,
    ) -> [(Option<LiftStatus>, Option<u32>); 3] {
        match discipline {
            Discipline::Snatch => [
                (self.snatch_first, self.snatch_first_weight),
                (self.snatch_second, self.snatch_second_weight),
                (self.snatch_third, self.snatch_third_weight),
            ],
            Discipline::CleanAndJerk => [
                (self.cnj_first, self.cnj_first_weight),
                (self.cnj_second, self.cnj_second_weight),
                (self.cnj_third, self.cnj_third_weight),
            ],
        }
    }

    /// Whether any attempt status or weight of `discipline` is being changed.
    pub fn touches(&self, discipline: Discipline) -> bool {
        self.attempt_fields(discipline)
            .iter()
            .any(|(status, weight)| status.is_some() || weight.is_some())
    }

    /// The sequence that results from applying this edit to `current`.
    pub fn overlay(&self, discipline: Discipline, current: &LiftSequence) -> LiftSequence {
        let mut merged = *current;
        for (position, (status, weight)) in AttemptPosition::ALL
            .into_iter()
            .zip(self.attempt_fields(discipline))
        {
            let existing = current.attempt(position);
            merged.set(
                position,
                LiftAttempt::new(
                    status.unwrap_or(existing.status),
                    weight.unwrap_or(existing.weight),
                ),
            );
        }
        merged
    }
}
