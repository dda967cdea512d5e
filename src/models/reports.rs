use serde::{Deserialize, Serialize};

/// Reason emitted for programs outside the user's age window
pub const NOT_AGE_APPROPRIATE: &str = "Not age appropriate";

/// Ranking engine output for one (user, program) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub program_id: String,
    /// Final score in `0.0..=1.0`
    pub score: f64,
    pub reasons: Vec<String>,
    pub safety_score: f64,
    pub age_appropriate: bool,
    pub interest_match: f64,
    pub location_score: f64,
    pub schedule_match: f64,
    pub cost_match: f64,
}

impl MatchScore {
    /// Score for a program the user is not eligible for
    pub fn not_age_appropriate(program_id: impl Into<String>) -> Self {
        Self {
            program_id: program_id.into(),
            score: 0.0,
            reasons: vec![NOT_AGE_APPROPRIATE.to_string()],
            safety_score: 0.0,
            age_appropriate: false,
            interest_match: 0.0,
            location_score: 0.0,
            schedule_match: 0.0,
            cost_match: 0.0,
        }
    }
}

/// The six boolean safety heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyChecks {
    pub age_appropriate: bool,
    pub verified_organization: bool,
    pub background_checked_staff: bool,
    pub safe_location: bool,
    pub appropriate_supervision: bool,
    pub no_inappropriate_content: bool,
}

impl SafetyChecks {
    pub const COUNT: usize = 6;

    pub fn as_array(&self) -> [bool; Self::COUNT] {
        [
            self.age_appropriate,
            self.verified_organization,
            self.background_checked_staff,
            self.safe_location,
            self.appropriate_supervision,
            self.no_inappropriate_content,
        ]
    }

    pub fn passed(&self) -> usize {
        self.as_array().iter().filter(|&&ok| ok).count()
    }
}

/// How a safety report should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyVerdict {
    Verified,
    NeedsReview,
    Concerns,
}

/// Safety validator output for one program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCheck {
    pub program_id: String,
    pub checks: SafetyChecks,
    /// Fraction of checks passed
    pub overall_score: f64,
    pub flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
}

impl SafetyCheck {
    /// Classify the report. `flag_threshold` and `verified_threshold` are
    /// the same values the validator was configured with.
    pub fn verdict(&self, flag_threshold: f64, verified_threshold: f64) -> SafetyVerdict {
        if !self.flagged && self.overall_score >= verified_threshold {
            SafetyVerdict::Verified
        } else if self.flagged || self.overall_score < flag_threshold {
            SafetyVerdict::NeedsReview
        } else {
            SafetyVerdict::Concerns
        }
    }
}
