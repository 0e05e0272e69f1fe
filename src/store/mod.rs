//! Data access for users and characters.
//!
//! Handlers only see the `Store` trait so tests can swap in `MockStore`.
//! Every method issues exactly one statement.

pub mod postgres;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{NewCharacter, NewUser, User};

pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Creates the `Users` and `Characters` tables when missing.
    async fn ensure_schema(&self) -> Result<(), ApiError>;

    async fn health_check(&self) -> Result<(), ApiError>;

    /// Returns the id assigned by the store.
    async fn insert_character(&self, character: &NewCharacter) -> Result<i64, ApiError>;

    async fn find_user_id(&self, username: &str) -> Result<Option<i64>, ApiError>;

    /// Returns the id assigned by the store.
    async fn insert_user(&self, user: &NewUser) -> Result<i64, ApiError>;

    /// Id, username and full name only; the password stays empty.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// The public user fields together with the stored password hash.
    async fn find_password_hash(&self, username: &str) -> Result<Option<(User, String)>, ApiError>;
}
