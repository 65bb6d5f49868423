use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;
use crate::core::{extract_requirement, MatchError, MatchingEngine};
use crate::models::{
    ErrorResponse, ExtractRequirementRequest, ExtractRequirementResponse, FindMatchesRequest,
    FindMatchesResponse, HealthResponse,
};
use crate::services::CatalogAccess;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogAccess>,
    pub engine: MatchingEngine,
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/requirements/extract", web::post().to(extract));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.catalog.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "vendorId": 12,
///   "requirement": { "productName": "onions", "quantity": 10, "budget": 300 },
///   "message": "10 किलो प्याज चाहिए बजट 300",
///   "limit": 5
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    use actix_web::http::StatusCode;

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let requirement = match (&req.requirement, &req.message) {
        (Some(requirement), _) => requirement.clone(),
        (None, Some(message)) => extract_requirement(message),
        (None, None) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing requirement",
                "Either requirement or message is required".to_string(),
            );
        }
    };

    let vendor_id = req.vendor_id;
    let limit = req
        .limit
        .map(usize::from)
        .unwrap_or(state.default_limit)
        .min(state.max_limit);

    tracing::info!(
        "Finding matches for vendor: {}, product: {}, limit: {}",
        vendor_id,
        requirement.product_name,
        limit
    );

    let buyer = match state.catalog.find_buyer(vendor_id).await {
        Ok(Some(buyer)) => buyer,
        Ok(None) => {
            return error_response(
                StatusCode::NOT_FOUND,
                "Vendor not found",
                format!("No active vendor with id {}", vendor_id),
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch vendor {}: {}", vendor_id, e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch vendor",
                e.to_string(),
            );
        }
    };

    if buyer.coordinates().is_none() {
        tracing::warn!("Vendor {} has no location, distances fall back to default", vendor_id);
    }

    let outcome = match state
        .engine
        .find_best_matches(&requirement, &buyer, state.catalog.as_ref(), limit)
        .await
    {
        Ok(outcome) => outcome,
        Err(e @ MatchError::InvalidRequirement(_)) => {
            return error_response(StatusCode::BAD_REQUEST, "Invalid requirement", e.to_string());
        }
        Err(e @ MatchError::Catalog(_)) => {
            tracing::error!("Failed to query catalog for vendor {}: {}", vendor_id, e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to query catalog",
                e.to_string(),
            );
        }
    };

    tracing::info!(
        "Returning {} matches for vendor {} (from {} candidates)",
        outcome.matches.len(),
        vendor_id,
        outcome.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
        requirement,
    })
}

/// Requirement extraction endpoint
///
/// POST /api/v1/requirements/extract
async fn extract(req: web::Json<ExtractRequirementRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    HttpResponse::Ok().json(ExtractRequirementResponse {
        requirement: extract_requirement(&req.message),
    })
}
