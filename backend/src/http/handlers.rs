//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the computation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;

use super::dto::{HealthResponse, RoaDuration, SubstanceListResponse, TimelineModel, TimelineRequest};
use super::error::AppError;
use super::state::AppState;
use crate::models::AdministrationRoute;
use crate::services::compute_timeline;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the catalog is usable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let status = if state.repository.health_check() {
        "ok"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        substances: state.repository.substance_names().len(),
    }))
}

// =============================================================================
// Substance Catalog
// =============================================================================

/// GET /v1/substances
///
/// List all substances with documented data.
pub async fn list_substances(State(state): State<AppState>) -> HandlerResult<SubstanceListResponse> {
    let substances = state.repository.substance_names();
    let total = substances.len();
    Ok(Json(SubstanceListResponse { substances, total }))
}

/// GET /v1/substances/{name}/routes/{route}/duration
///
/// Documented durations of one substance taken by one route.
pub async fn get_roa_duration(
    State(state): State<AppState>,
    Path((name, route)): Path<(String, String)>,
) -> HandlerResult<RoaDuration> {
    let route: AdministrationRoute = route.parse()?;
    state
        .repository
        .roa_duration(&name, route)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No duration data for {} ({})", name, route)))
}

// =============================================================================
// Timeline
// =============================================================================

/// POST /v1/timeline
///
/// Compute the drawable timeline for the posted journal entries.
pub async fn compute_timeline_handler(
    State(state): State<AppState>,
    body: Result<Json<TimelineRequest>, JsonRejection>,
) -> HandlerResult<TimelineModel> {
    let Json(request) = body?;

    let mut options = state.options;
    if let Some(width) = request.expected_width_px {
        if !width.is_finite() || width <= 0.0 {
            return Err(AppError::BadRequest(format!(
                "expected_width_px must be positive, got {}",
                width
            )));
        }
        options.axis.expected_width_px = width;
    }
    options.validate()?;

    let now = request.now.unwrap_or_else(Utc::now);
    let repository = state.repository.clone();
    let input = request.input;

    // Use the sync computation wrapped in spawn_blocking for CPU-bound work
    let model = tokio::task::spawn_blocking(move || {
        compute_timeline(&input, repository.as_ref(), now, &options)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    tracing::debug!(
        curves = model.ingestion_drawables.len(),
        skipped = model.skipped_ingestions.len(),
        "timeline computed"
    );

    Ok(Json(model))
}
