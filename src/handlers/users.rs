// User handlers
// HTTP handlers for account creation, lookup and login

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};

use super::decode_json;
use crate::{
    error::{ApiError, ApiResult},
    models::{Credentials, User},
    routes::AppState,
};

fn user_exists(reason: &str) -> ApiError {
    ApiError::conflict(format!("user already exists. error: {}", reason))
}

/// Runs bcrypt off the async worker threads.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.into()))
}

/// Create a new user
/// POST /users/create
///
/// The username is checked before inserting. Two identical requests can both
/// pass the check; the UNIQUE constraint on `Users.username` then rejects the
/// second insert and it is reported as the same conflict.
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let user: User = decode_json(&body)?;
    if user.username.trim().is_empty() {
        return Err(ApiError::Validation("Username cannot be empty".to_string()));
    }
    info!("Creating new user with username: {}", user.username);

    match state.store.find_user_id(&user.username).await {
        Ok(None) => {}
        Ok(Some(id)) => {
            info!("Username {} already taken by user id: {}", user.username, id);
            return Err(user_exists("<nil>"));
        }
        Err(err) => {
            warn!("User existence check failed for {}: {}", user.username, err);
            return Err(user_exists(err.kind()));
        }
    }

    let hasher = state.hasher;
    let password = user.password.clone();
    let password_hash = run_blocking(move || hasher.hash_password(&password)).await??;

    let id = match state.store.insert_user(&user.into_new(password_hash)).await {
        Ok(id) => id,
        Err(err @ ApiError::Conflict(_)) => return Err(user_exists(err.kind())),
        Err(err) => return Err(err),
    };

    info!("Successfully created user with id: {}", id);
    Ok((StatusCode::CREATED, "Successfully created user"))
}

/// Get user by username
/// GET /users/:username
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<impl IntoResponse> {
    lookup_user(&state, username).await
}

/// GET on `/users/create` and `/users/login`: the last segment is a username
/// there as well, so those accounts stay reachable.
pub async fn get_user_by_static_segment(
    State(state): State<AppState>,
    uri: Uri,
) -> ApiResult<impl IntoResponse> {
    let username = uri.path().rsplit('/').next().unwrap_or_default().to_string();
    lookup_user(&state, username).await
}

async fn lookup_user(state: &AppState, username: String) -> ApiResult<(StatusCode, Json<User>)> {
    info!("Fetching user with username: {}", username);

    let user = state
        .store
        .find_user_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {}", username)))?;

    Ok((StatusCode::OK, Json(user)))
}

/// Check a username/password pair
/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let credentials: Credentials = decode_json(&body)?;
    info!("Login attempt for username: {}", credentials.username);

    let Some((user, stored_hash)) = state.store.find_password_hash(&credentials.username).await? else {
        return Err(ApiError::Unauthorized);
    };

    let hasher = state.hasher;
    let password = credentials.password;
    let matches = run_blocking(move || hasher.verify_password(&password, &stored_hash)).await?;

    if !matches {
        return Err(ApiError::Unauthorized);
    }

    info!("User {} logged in", user.id);
    Ok((StatusCode::OK, Json(user)))
}
