use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{
    config::ClientConfig,
    handlers::{
        characters::create_character,
        config::get_config,
        health_check,
        users::{create_user, get_user_by_static_segment, get_user_by_username, login},
    },
    error::ApiResult,
    middleware::create_middleware_stack,
    password::PasswordHasher,
    store::Store,
};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub client: ClientConfig,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, client: ClientConfig) -> Self {
        Self {
            store,
            client,
            hasher: PasswordHasher::new(),
        }
    }

    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }
}

/// Create the Axum router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/config.json", get(get_config))
        .route("/characters/create", post(create_character))
        .route("/users/create", post(create_user).get(get_user_by_static_segment))
        .route("/users/login", post(login).get(get_user_by_static_segment))
        .route("/users/:username", get(get_user_by_username))
        .with_state(state)
        .layer(create_middleware_stack())
}

/// Prepares the store schema, then builds the router.
pub async fn build_app(state: AppState) -> ApiResult<Router> {
    state.store.ensure_schema().await?;
    Ok(create_router(state))
}
