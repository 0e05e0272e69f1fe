// Library root for the battle arena API

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;
pub mod store;

// Re-export commonly used types
pub use error::ApiError;
pub use models::{Character, User};
pub use routes::{create_router, AppState};
pub use store::{PgStore, Store};
