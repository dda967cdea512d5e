use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};
use crate::models::domain::{Program, ProgramCategory, UserProfile};

/// Cost filter chosen in the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostFilter {
    #[default]
    All,
    Free,
    Paid,
}

/// Narrowing applied to the candidate list before ranking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramFilter {
    /// Keep programs sharing at least one of these tags; empty keeps all
    #[serde(default)]
    pub categories: Vec<ProgramCategory>,
    /// Keep only programs whose age range contains the user's age
    #[serde(default)]
    pub age_appropriate_only: bool,
    #[serde(default)]
    pub cost: CostFilter,
}

/// Request to rank programs for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rank_request"))]
pub struct RankRequest {
    pub user: UserProfile,
    /// Candidates to rank; the loaded catalog when absent
    #[serde(default)]
    pub programs: Option<Vec<Program>>,
    #[serde(default)]
    pub filters: ProgramFilter,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
    /// Drop programs the safety validator flags
    #[serde(default)]
    pub hide_flagged: bool,
}

/// Request to score a single catalog program for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_score_request"))]
pub struct ScoreRequest {
    pub user: UserProfile,
    #[validate(length(min = 1))]
    pub program_id: String,
}

/// Request to safety-check a program that is not in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_safety_request"))]
pub struct SafetyRequest {
    pub program: Program,
}

fn validate_rank_request(req: &RankRequest) -> Result<(), ValidationError> {
    check_user(&req.user)?;
    if let Some(programs) = &req.programs {
        for program in programs {
            check_program(program)?;
        }
    }
    Ok(())
}

fn validate_score_request(req: &ScoreRequest) -> Result<(), ValidationError> {
    check_user(&req.user)
}

fn validate_safety_request(req: &SafetyRequest) -> Result<(), ValidationError> {
    check_program(&req.program)
}

fn check_user(user: &UserProfile) -> Result<(), ValidationError> {
    if user.id.trim().is_empty() {
        return Err(invalid("user", "user id is empty".into()));
    }
    let max_distance = user.preferences.max_distance;
    if !max_distance.is_finite() || max_distance < 0.0 {
        return Err(invalid("user", "maxDistance must be a non-negative number".into()));
    }
    Ok(())
}

fn check_program(program: &Program) -> Result<(), ValidationError> {
    match program.quality_issue() {
        Some(issue) => Err(invalid("program", format!("{}: {}", program.id, issue).into())),
        None => Ok(()),
    }
}

fn invalid(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message);
    err
}
