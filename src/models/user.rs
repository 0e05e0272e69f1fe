use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A registered player account.
/// `password` carries the plaintext only on the way in; responses never
/// include it because it is cleared before serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct User {
    #[serde(alias = "id", alias = "ID", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(alias = "username", alias = "userName", alias = "UserName", deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(
        alias = "password",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub password: String,
    #[serde(alias = "fullname", alias = "fullName", alias = "Fullname", deserialize_with = "null_as_default")]
    pub full_name: String,
}

/// Column values for a `Users` insert. The password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
}

/// Login payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Credentials {
    #[serde(alias = "username", alias = "userName", alias = "UserName", deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(alias = "password", deserialize_with = "null_as_default")]
    pub password: String,
}

impl User {
    pub fn into_new(self, password_hash: String) -> NewUser {
        NewUser {
            username: self.username,
            password_hash,
            full_name: self.full_name,
        }
    }
}
