use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;

use crate::models::{HealthResponse, MatchRidesRequest, MatchRidesResponse};
use crate::services::{MatchError, RideMatchService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub rides: Arc<RideMatchService>,
}

/// Configure all ride-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/rides/match", web::post().to(match_rides));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match rides endpoint
///
/// POST /api/v1/rides/match
///
/// Request body:
/// ```json
/// {
///   "fromLatitude": 52.52,
///   "fromLongitude": 13.405,
///   "toLatitude": 52.39,
///   "toLongitude": 13.06,
///   "limit": 10,
///   "offset": 0
/// }
/// ```
///
/// Responds with `{ rides, total, limit, offset }` or `{ error }`.
async fn match_rides(
    state: web::Data<AppState>,
    req: web::Json<MatchRidesRequest>,
) -> impl Responder {
    let result = state.rides.find_rides(&req).await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(MatchError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
        Err(MatchError::Store(_)) => StatusCode::BAD_GATEWAY,
    };

    HttpResponse::build(status).json(MatchRidesResponse::from(result))
}
