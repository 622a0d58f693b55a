use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::warn;

use super::query::QueryParams;
use super::repository::OfferingStore;
use super::service::{CollegeFinderService, FinderServiceError};

/// Router builder exposing the college search and catalog statistics endpoints.
pub fn finder_router<S>(service: Arc<CollegeFinderService<S>>) -> Router
where
    S: OfferingStore + 'static,
{
    Router::new()
        .route("/colleges", get(colleges_handler::<S>))
        .route("/stats", get(stats_handler::<S>))
        .with_state(service)
}

pub(crate) async fn colleges_handler<S>(
    State(service): State<Arc<CollegeFinderService<S>>>,
    Query(params): Query<QueryParams>,
) -> Response
where
    S: OfferingStore + 'static,
{
    match service.find(&params) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<S>(State(service): State<Arc<CollegeFinderService<S>>>) -> Response
where
    S: OfferingStore + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: FinderServiceError) -> Response {
    let status = match &error {
        FinderServiceError::Query(_) => StatusCode::BAD_REQUEST,
        FinderServiceError::Store(_) => {
            warn!(%error, "record store failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
