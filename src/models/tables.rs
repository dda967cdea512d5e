//! Tunable tables for the ranking engine and safety validator.
//!
//! Defaults reproduce the production constants; `config.rs` maps the
//! `[ranking]` and `[safety]` configuration sections onto these.

use serde::{Deserialize, Serialize};

/// Weights of the five sub-scores in the final match score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub interest: f64,
    pub location: f64,
    pub schedule: f64,
    pub cost: f64,
    pub safety: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interest: 0.40,
            location: 0.20,
            schedule: 0.20,
            cost: 0.10,
            safety: 0.10,
        }
    }
}

/// Flat additions to the weighted sum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBonuses {
    pub verified: f64,
    pub scholarship: f64,
    /// Scholarship bonus applies only above this cost
    pub scholarship_min_cost: f64,
}

impl Default for ScoreBonuses {
    fn default() -> Self {
        Self {
            verified: 0.10,
            scholarship: 0.05,
            scholarship_min_cost: 100.0,
        }
    }
}

/// Bonuses added to `safetyRating / 5` for the ranking safety sub-score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyBonuses {
    pub verified: f64,
    pub has_requirements: f64,
    pub has_contact: f64,
    pub small_group: f64,
    /// Capacity strictly below this counts as a small group
    pub small_group_capacity: u32,
}

impl Default for SafetyBonuses {
    fn default() -> Self {
        Self {
            verified: 0.2,
            has_requirements: 0.1,
            has_contact: 0.1,
            small_group: 0.1,
            small_group_capacity: 50,
        }
    }
}

/// One step of the cost table: amounts up to `max_amount` score `score`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostTier {
    pub max_amount: f64,
    pub score: f64,
}

impl CostTier {
    pub const fn new(max_amount: f64, score: f64) -> Self {
        Self { max_amount, score }
    }
}

pub const DEFAULT_COST_TIERS: [CostTier; 4] = [
    CostTier::new(50.0, 0.9),
    CostTier::new(100.0, 0.7),
    CostTier::new(200.0, 0.5),
    CostTier::new(500.0, 0.3),
];

/// Sub-score thresholds above which a reason string is emitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonThresholds {
    pub interest: f64,
    pub location: f64,
    pub schedule: f64,
    pub cost: f64,
    pub safety: f64,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self {
            interest: 0.7,
            location: 0.8,
            schedule: 0.8,
            cost: 0.8,
            safety: 0.9,
        }
    }
}

/// Everything the ranking engine needs beyond the user and the programs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingTables {
    pub weights: ScoringWeights,
    pub bonuses: ScoreBonuses,
    pub safety_bonuses: SafetyBonuses,
    /// Ascending by `max_amount`
    pub cost_tiers: Vec<CostTier>,
    /// Score for paid programs above the last tier
    pub cost_floor: f64,
    pub reasons: ReasonThresholds,
    /// Sub-score used when the user declared no interests or no days
    pub neutral_score: f64,
    /// Location score when either side has no coordinates
    pub neutral_location_score: f64,
    /// Location score beyond the user's max distance
    pub out_of_range_location_score: f64,
    /// Schedule score when no program day overlaps the user's days
    pub no_overlap_schedule_score: f64,
}

impl Default for RankingTables {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            bonuses: ScoreBonuses::default(),
            safety_bonuses: SafetyBonuses::default(),
            cost_tiers: DEFAULT_COST_TIERS.to_vec(),
            cost_floor: 0.1,
            reasons: ReasonThresholds::default(),
            neutral_score: 0.5,
            neutral_location_score: 0.5,
            out_of_range_location_score: 0.2,
            no_overlap_schedule_score: 0.1,
        }
    }
}

pub const DEFAULT_SAFE_VENUES: [&str; 10] = [
    "library",
    "community center",
    "school",
    "park",
    "museum",
    "theater",
    "gym",
    "church",
    "mosque",
    "temple",
];

pub const DEFAULT_BLOCKED_KEYWORDS: [&str; 10] = [
    "alcohol",
    "drinking",
    "smoking",
    "drugs",
    "party",
    "club",
    "adult",
    "mature",
    "explicit",
    "unsupervised",
];

/// Rules for the program safety validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyRules {
    /// Widest acceptable program age span, in years
    pub max_age_span: u8,
    /// Oldest age a program may target
    pub max_age: u8,
    /// Capacity strictly below this passes the staff check
    pub staffed_capacity: u32,
    /// Capacity strictly below this passes the supervision check
    pub supervised_capacity: u32,
    /// Lower-case substrings of venue names considered public and safe
    pub safe_venues: Vec<String>,
    /// Lower-case keywords that fail the content check
    pub blocked_keywords: Vec<String>,
    /// Overall scores below this are flagged
    pub flag_threshold: f64,
    /// Overall scores at or above this (and not flagged) are verified
    pub verified_threshold: f64,
    pub review_note: String,
}

impl Default for SafetyRules {
    fn default() -> Self {
        Self {
            max_age_span: 10,
            max_age: super::domain::MAX_PROGRAM_AGE,
            staffed_capacity: 100,
            supervised_capacity: 50,
            safe_venues: DEFAULT_SAFE_VENUES.iter().map(|s| s.to_string()).collect(),
            blocked_keywords: DEFAULT_BLOCKED_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            flag_threshold: 0.6,
            verified_threshold: 0.8,
            review_note: "Program requires manual review".to_string(),
        }
    }
}
