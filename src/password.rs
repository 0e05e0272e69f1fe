// Password hashing
// bcrypt wrappers used by user creation and login

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::ApiError;

/// Hashes and verifies user passwords with bcrypt.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Cost must be between 4 and 31. Tests use the minimum to stay fast.
    pub fn with_cost(cost: u32) -> Result<Self, ApiError> {
        if !(4..=31).contains(&cost) {
            return Err(ApiError::Internal(anyhow::anyhow!(
                "bcrypt cost must be between 4 and 31, got {}",
                cost
            )));
        }

        Ok(Self { cost })
    }

    pub fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        hash(password, self.cost)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))
    }

    /// A stored value that is not a bcrypt hash never matches.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        match verify(password, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Stored password hash could not be verified: {}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
