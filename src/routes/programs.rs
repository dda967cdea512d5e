use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{apply_filter, Ranker, SafetyValidator};
use crate::models::{
    ErrorResponse, HealthResponse, RankRequest, RankResponse, RankedProgram, SafetyRequest,
    ScoreRequest,
};
use crate::services::ProgramCatalog;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProgramCatalog>,
    pub ranker: Ranker,
    pub validator: SafetyValidator,
}

/// Configure all program-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/programs", web::get().to(list_programs))
        .route("/programs/rank", web::post().to(rank_programs))
        .route("/programs/score", web::post().to(score_program))
        .route("/programs/safety", web::post().to(check_program_safety))
        .route("/programs/{id}/safety", web::get().to(catalog_program_safety));
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

fn program_not_found(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Program not found".to_string(),
        message: format!("No program with id {}", id),
        status_code: 404,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// List the program catalog
///
/// GET /api/v1/programs
async fn list_programs(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.programs())
}

/// Rank programs for a user
///
/// POST /api/v1/programs/rank
///
/// Request body:
/// ```json
/// {
///   "user": { ... },
///   "programs": [ ... ],
///   "filters": { "categories": ["stem"], "ageAppropriateOnly": true, "cost": "free" },
///   "limit": 20,
///   "hideFlagged": false
/// }
/// ```
///
/// `programs` defaults to the loaded catalog.
async fn rank_programs(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: {}", errors);
        return bad_request(errors.to_string());
    }

    let req = req.into_inner();
    let user = &req.user;

    if user.is_minor() && user.parent_email.is_none() {
        tracing::warn!("User {} is under 18 with no parent contact on file", user.id);
    }

    let candidates = req
        .programs
        .unwrap_or_else(|| state.catalog.programs().to_vec());
    let total_candidates = candidates.len();

    let filtered = apply_filter(candidates, &req.filters, user);
    tracing::debug!(
        "{} of {} candidates pass filters for user {}",
        filtered.len(),
        total_candidates,
        user.id
    );

    let mut programs: Vec<RankedProgram> = state
        .ranker
        .rank_scored(user, filtered)
        .into_iter()
        .map(|entry| {
            let safety = state.validator.report(&entry.program);
            RankedProgram {
                program: entry.program,
                match_score: entry.score,
                safety,
            }
        })
        .filter(|ranked| !(req.hide_flagged && ranked.safety.check.flagged))
        .collect();

    if let Some(limit) = req.limit {
        programs.truncate(limit as usize);
    }

    tracing::info!(
        "Returning {} programs for user {} (from {} candidates)",
        programs.len(),
        user.id,
        total_candidates
    );

    HttpResponse::Ok().json(RankResponse {
        programs,
        total_candidates,
    })
}

/// Score a single catalog program, including match reasons
///
/// POST /api/v1/programs/score
async fn score_program(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request(errors.to_string());
    }

    match state.catalog.get(&req.program_id) {
        Some(program) => HttpResponse::Ok().json(state.ranker.score(&req.user, program)),
        None => program_not_found(&req.program_id),
    }
}

/// Safety report for a catalog program
///
/// GET /api/v1/programs/{id}/safety
async fn catalog_program_safety(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match state.catalog.get(&id) {
        Some(program) => HttpResponse::Ok().json(state.validator.report(program)),
        None => program_not_found(&id),
    }
}

/// Safety report for a program supplied in the request
///
/// POST /api/v1/programs/safety
async fn check_program_safety(
    state: web::Data<AppState>,
    req: web::Json<SafetyRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request(errors.to_string());
    }

    let report = state.validator.report(&req.program);
    if report.check.flagged {
        tracing::info!("Program {} flagged: {:?}", req.program.id, report.check.checks);
    }

    HttpResponse::Ok().json(report)
}
