use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use job_alert::profiles::{profile_router, HealthStatus, ProfileRepository, ProfileService};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub(crate) fn with_profile_routes<R>(service: Arc<ProfileService<R>>) -> axum::Router
where
    R: ProfileRepository + 'static,
{
    profile_router(service)
        .route("/api/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(CorsLayer::permissive())
}

pub(crate) async fn healthcheck() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
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
        json!({ "status": "initializing" })
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
