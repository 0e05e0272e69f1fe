use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A fighter owned by a user.
/// Missing fields decode to zero values so partially filled forms from the
/// client still go through; only malformed JSON is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Character {
    #[serde(alias = "characterId", alias = "characterid", deserialize_with = "null_as_default")]
    pub character_id: i64,
    #[serde(alias = "characterName", alias = "charactername", deserialize_with = "null_as_default")]
    pub character_name: String,
    #[serde(alias = "attack", deserialize_with = "null_as_default")]
    pub attack: i64,
    #[serde(alias = "defense", deserialize_with = "null_as_default")]
    pub defense: i64,
    #[serde(alias = "health", deserialize_with = "null_as_default")]
    pub health: i64,
    #[serde(alias = "userId", alias = "userid", alias = "UserID", deserialize_with = "null_as_default")]
    pub user_id: i64,
}

/// Column values for a `Characters` insert, in statement order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCharacter {
    pub name: String,
    pub attack: i64,
    pub defense: i64,
    pub health: i64,
    pub user_id: i64,
}

impl Character {
    /// Drops the client-supplied id; the store assigns its own.
    pub fn into_new(self) -> NewCharacter {
        NewCharacter {
            name: self.character_name,
            attack: self.attack,
            defense: self.defense,
            health: self.health,
            user_id: self.user_id,
        }
    }
}
