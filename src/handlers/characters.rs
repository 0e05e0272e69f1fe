// Character handlers

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use super::decode_json;
use crate::{
    error::{ApiError, ApiResult},
    models::Character,
    routes::AppState,
};

/// Create a new character
/// POST /characters/create
pub async fn create_character(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let character: Character = decode_json(&body)?;
    info!(
        "Creating character '{}' for user_id: {}",
        character.character_name, character.user_id
    );

    let id = state.store.insert_character(&character.into_new()).await?;

    info!("Successfully created character with id: {}", id);
    Ok((StatusCode::CREATED, "Successfully created character"))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::handlers::test_support::{app, send};
    use crate::models::{Character, NewCharacter};
    use crate::store::mock::{MockStore, StoreCall};

    #[tokio::test]
    async fn test_bad_body() {
        let (router, store) = app(MockStore::new());

        let (status, body) = send(router, Method::POST, "/characters/create", "{zz}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Could not process JSON body!");
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_creation() {
        let (router, store) = app(MockStore::new());
        let character = Character {
            character_id: 1,
            character_name: "elon".to_string(),
            attack: 420,
            defense: 100,
            health: 100,
            user_id: 420,
        };
        let payload = serde_json::to_string(&character).unwrap();

        let (status, body) = send(router, Method::POST, "/characters/create", &payload).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "Successfully created character");
        assert_eq!(
            store.calls(),
            vec![StoreCall::InsertCharacter(NewCharacter {
                name: "elon".to_string(),
                attack: 420,
                defense: 100,
                health: 100,
                user_id: 420,
            })]
        );
    }
}
