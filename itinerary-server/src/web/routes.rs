//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::domain::LocationCode;
use crate::planner::{SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/itineraries", get(search_itineraries))
        .route("/topology/refresh", post(refresh_topology))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search for itineraries between two locations.
async fn search_itineraries(
    State(state): State<AppState>,
    Query(query): Query<ItineraryQuery>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let request = build_request(&query)?;
    let result = state.planner.search(&request).await?;
    Ok(Json(ItineraryResponse::from_result(&result)))
}

/// Rebuild the topology from storage.
async fn refresh_topology(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let topology = state.refresh().await?;
    Ok(Json(RefreshResponse::from_topology(&topology)))
}

/// Parse and validate the query string into a search request.
fn build_request(query: &ItineraryQuery) -> Result<SearchRequest, AppError> {
    let origin = LocationCode::parse_normalized(&query.origin).map_err(|_| AppError::BadRequest {
        message: format!("Invalid origin code: {}", query.origin),
    })?;

    let destination =
        LocationCode::parse_normalized(&query.destination).map_err(|_| AppError::BadRequest {
            message: format!("Invalid destination code: {}", query.destination),
        })?;

    let departure = DateTime::parse_from_rfc3339(query.departure.trim())
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| AppError::BadRequest {
            message: format!("Invalid departure time: {}", query.departure),
        })?;

    let mut request = SearchRequest::new(origin, destination, departure);
    if let Some(mins) = query.window_mins {
        let span = Duration::try_minutes(mins).ok_or_else(|| AppError::BadRequest {
            message: format!("Invalid window: {mins} minutes"),
        })?;
        request = request.with_window_span(span);
    }
    if let Some(max_hops) = query.max_hops {
        request = request.with_max_hops(max_hops);
    }

    request.validate()?;
    Ok(request)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        match e {
            SearchError::InvalidRequest(_) => AppError::BadRequest { message },
            SearchError::NotFound(_) => AppError::NotFound { message },
            SearchError::Cancelled => AppError::Timeout { message },
            SearchError::GraphBuild(_) | SearchError::Store(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
