// Models module

pub mod character;
pub mod user;

use serde::{Deserialize, Deserializer};

// Re-export commonly used types
pub use character::{Character, NewCharacter};
pub use user::{Credentials, NewUser, User};

/// Treats an explicit JSON `null` like a missing field: the zero value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
