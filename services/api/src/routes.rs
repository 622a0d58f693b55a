use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use college_finder::admissions::{finder_router, CollegeFinderService, OfferingStore};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_finder_routes<S>(service: Arc<CollegeFinderService<S>>) -> axum::Router
where
    S: OfferingStore + 'static,
{
    finder_router(service)
        .route("/", axum::routing::get(index))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn index() -> &'static str {
    "college finder backend is running"
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "loading catalog" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryOfferingStore;
    use axum::body::Body;
    use axum::http::Request;
    use college_finder::admissions::{CategoryKey, Offering, RankingEngine};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let store = InMemoryOfferingStore::new(vec![
            Offering::new("SVUC", "CSE", "TPT", "SVU").with_cutoff(CategoryKey::OcGirls, 2_500),
            Offering::new("SVEC", "CSE", "TPT", "SVU").with_cutoff(CategoryKey::OcGirls, 14_200),
        ]);
        let service = Arc::new(CollegeFinderService::new(
            Arc::new(store),
            RankingEngine::default(),
        ));
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        };
        with_finder_routes(service).layer(Extension(state))
    }

    async fn get(router: axum::Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router responds")
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        assert_eq!(
            get(app(false), "/ready").await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(get(app(true), "/ready").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_and_index_respond() {
        assert_eq!(get(app(true), "/health").await.status(), StatusCode::OK);
        assert_eq!(get(app(true), "/").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let response = get(app(true), "/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn colleges_are_served_alongside_operational_routes() {
        let response = get(app(true), "/colleges?rank=2000&category=OC_GIRLS").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        let results = body.as_array().expect("array");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["INSTCODE"], "SVUC");
        assert_eq!(results[0]["chance"], "moderate");
    }
}
