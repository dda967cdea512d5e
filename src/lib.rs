//! RUSE Match - youth program recommendation core
//!
//! This library ranks youth activity programs for a user with a multi-factor
//! weighted score, and validates programs against a set of safety heuristics.
//! Both algorithms are pure functions of their inputs; the HTTP service in
//! `main.rs` wraps them for the app.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{rank, score, validate, Ranker, SafetyValidator};
pub use models::{MatchScore, Program, RankingTables, SafetyCheck, SafetyRules, UserProfile};
