use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::routes::AppState;

/// Serve the client configuration
/// GET /config.json
pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.client))
}
