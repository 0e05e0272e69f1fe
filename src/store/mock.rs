//! `MockStore`: an in-memory test double for `Store`.
//!
//! Records every call in order so tests can assert exactly which statements
//! a handler issued, and can be told to fail lookups or inserts.

use async_trait::async_trait;
use std::sync::Mutex;

use super::Store;
use crate::error::ApiError;
use crate::models::{NewCharacter, NewUser, User};

/// One recorded store call.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    EnsureSchema,
    HealthCheck,
    InsertCharacter(NewCharacter),
    FindUserId(String),
    InsertUser(NewUser),
    FindUserByUsername(String),
    FindPasswordHash(String),
}

/// Failure injected into `MockStore` at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure {
    None,
    /// Every read fails with a database error.
    Lookup,
    /// Inserts fail with a unique-constraint conflict.
    UniqueViolation,
    /// Health checks fail.
    Unreachable,
}

#[derive(Debug, Clone)]
struct StoredUser {
    id: i64,
    username: String,
    password_hash: String,
    full_name: String,
}

pub struct MockStore {
    users: Mutex<Vec<StoredUser>>,
    characters: Mutex<Vec<NewCharacter>>,
    calls: Mutex<Vec<StoreCall>>,
    failure: Failure,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            characters: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            failure: Failure::None,
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure,
            ..Self::new()
        }
    }

    /// Seeds an existing user without recording a call.
    pub fn with_user(self, id: i64, username: &str, password_hash: &str, full_name: &str) -> Self {
        self.users.lock().unwrap().push(StoredUser {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            full_name: full_name.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored_password_hash(&self, username: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username)
            .map(|user| user.password_hash.clone())
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_lookup(&self) -> Result<(), ApiError> {
        if self.failure == Failure::Lookup {
            return Err(ApiError::Database("connection reset by peer at 10.0.0.5:5432".to_string()));
        }
        Ok(())
    }

    fn find(&self, username: &str) -> Option<StoredUser> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn public_user(user: &StoredUser) -> User {
    User {
        id: user.id,
        username: user.username.clone(),
        password: String::new(),
        full_name: user.full_name.clone(),
    }
}

#[async_trait]
impl Store for MockStore {
    async fn ensure_schema(&self) -> Result<(), ApiError> {
        self.record(StoreCall::EnsureSchema);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), ApiError> {
        self.record(StoreCall::HealthCheck);
        if self.failure == Failure::Unreachable {
            return Err(ApiError::Database("Database connection unavailable".to_string()));
        }
        Ok(())
    }

    async fn insert_character(&self, character: &NewCharacter) -> Result<i64, ApiError> {
        self.record(StoreCall::InsertCharacter(character.clone()));
        let mut characters = self.characters.lock().unwrap();
        characters.push(character.clone());
        Ok(characters.len() as i64)
    }

    async fn find_user_id(&self, username: &str) -> Result<Option<i64>, ApiError> {
        self.record(StoreCall::FindUserId(username.to_string()));
        self.check_lookup()?;
        Ok(self.find(username).map(|user| user.id))
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, ApiError> {
        self.record(StoreCall::InsertUser(user.clone()));
        if self.failure == Failure::UniqueViolation {
            return Err(ApiError::conflict("Resource already exists"));
        }

        let mut users = self.users.lock().unwrap();
        let id = users.len() as i64 + 1;
        users.push(StoredUser {
            id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            full_name: user.full_name.clone(),
        });
        Ok(id)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        self.record(StoreCall::FindUserByUsername(username.to_string()));
        self.check_lookup()?;
        Ok(self.find(username).as_ref().map(public_user))
    }

    async fn find_password_hash(&self, username: &str) -> Result<Option<(User, String)>, ApiError> {
        self.record(StoreCall::FindPasswordHash(username.to_string()));
        self.check_lookup()?;
        Ok(self
            .find(username)
            .map(|user| (public_user(&user), user.password_hash)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let store = MockStore::new().with_user(420, "ilon", "hash", "ilonmask");

        tokio_test::block_on(async {
            assert_eq!(store.find_user_id("ilon").await.unwrap(), Some(420));
            assert_eq!(store.find_user_id("ghost").await.unwrap(), None);
        });

        assert_eq!(
            store.calls(),
            vec![
                StoreCall::FindUserId("ilon".to_string()),
                StoreCall::FindUserId("ghost".to_string()),
            ]
        );
    }

    #[test]
    fn test_lookup_failure() {
        let store = MockStore::failing(Failure::Lookup);

        let result = tokio_test::block_on(store.find_user_by_username("ilon"));
        assert!(matches!(result, Err(ApiError::Database(_))));
    }
}
