// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod ranker;
pub mod safety;
pub mod scoring;

pub use distance::{distance_between, haversine_miles};
pub use filters::{apply_filter, matches_filter};
pub use ranker::{rank, score, Ranker, ScoredProgram};
pub use safety::{validate, SafetyValidator};
