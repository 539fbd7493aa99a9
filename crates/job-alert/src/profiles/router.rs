use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::ProfileList;
use super::repository::{ProfileRepository, RepositoryError};
use super::service::{ProfileService, ProfileServiceError};
use crate::form::ConfigPayload;

/// Router builder exposing the configuration and profile endpoints.
pub fn profile_router<R>(service: Arc<ProfileService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/config",
            get(config_handler::<R>).post(update_config_handler::<R>),
        )
        .route("/api/profiles", get(profiles_handler::<R>))
        .route("/api/profiles/:email", get(profile_handler::<R>))
        .with_state(service)
}

pub(crate) async fn update_config_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    payload: Result<Json<ConfigPayload>, JsonRejection>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    match service.apply_config(payload) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(ProfileServiceError::MissingReceiver) => error_response(
            StatusCode::BAD_REQUEST,
            ProfileServiceError::MissingReceiver.to_string(),
        ),
        Err(other) => internal_error("updating config", other),
    }
}

pub(crate) async fn config_handler<R>(State(service): State<Arc<ProfileService<R>>>) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.snapshot() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(err) => internal_error("getting config", err),
    }
}

pub(crate) async fn profiles_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.active_profiles() {
        Ok(profiles) => (StatusCode::OK, Json(ProfileList { profiles })).into_response(),
        Err(err) => internal_error("getting profiles", err),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(email): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.get(&email) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(ProfileServiceError::Repository(RepositoryError::NotFound)) => {
            error_response(StatusCode::NOT_FOUND, "Profile not found".to_string())
        }
        Err(err) => internal_error("getting profile", err),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn internal_error(action: &str, err: ProfileServiceError) -> Response {
    error!(error = %err, "error {action}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
