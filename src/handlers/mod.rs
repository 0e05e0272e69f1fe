// Handlers module
// HTTP handlers for the game API

pub mod characters;
pub mod config;
pub mod users;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::de::DeserializeOwned;

use crate::{
    error::{ApiError, ApiResult},
    routes::AppState,
};

/// Health check handler
/// Returns "OK" with 200 status when the store answers
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    state
        .store
        .health_check()
        .await
        .map_err(|e| ApiError::Unavailable(e.to_string()))?;

    Ok((StatusCode::OK, "OK"))
}

/// Decodes a raw request body. Any content type is accepted; anything that
/// is not valid JSON for `T` becomes `ApiError::InvalidBody`.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(ApiError::from)
}
