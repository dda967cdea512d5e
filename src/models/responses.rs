use serde::{Deserialize, Serialize};
use crate::models::domain::Program;
use crate::models::reports::{MatchScore, SafetyCheck, SafetyVerdict};

/// Safety check together with its presentation verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyReport {
    #[serde(flatten)]
    pub check: SafetyCheck,
    pub verdict: SafetyVerdict,
}

/// One entry of a ranked list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProgram {
    pub program: Program,
    pub match_score: MatchScore,
    pub safety: SafetyReport,
}

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    pub programs: Vec<RankedProgram>,
    /// Candidates considered before filtering
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog_size: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
