// Model exports
pub mod domain;
pub mod reports;
pub mod requests;
pub mod responses;
pub mod tables;

pub use domain::{
    AgeRange, Capacity, Contact, Coordinates, Cost, EmergencyContact, Frequency, Program,
    ProgramCategory, ProgramLocation, ProgramSource, SafetySettings, Schedule, TimeOfDay,
    UserLocation, UserPreferences, UserProfile,
};
pub use reports::{MatchScore, SafetyCheck, SafetyChecks, SafetyVerdict, NOT_AGE_APPROPRIATE};
pub use requests::{CostFilter, ProgramFilter, RankRequest, SafetyRequest, ScoreRequest};
pub use responses::{ErrorResponse, HealthResponse, RankResponse, RankedProgram, SafetyReport};
pub use tables::{
    CostTier, RankingTables, ReasonThresholds, SafetyBonuses, SafetyRules, ScoreBonuses,
    ScoringWeights,
};
