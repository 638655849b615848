use axum::extract::{Query, State};
use std::sync::Arc;

use super::form::CatalogForm;
use super::validation::{CharacterRequest, EntityId, ListParams};
use super::{ApiError, ApiResponse, AppState};
use crate::entities::characters;
use crate::models::{CharacterDetail, CharacterSummary};

/// `GET /characters?name=&age=&movies=`
///
/// `movies` may repeat, use the `movies[]` form, or hold a comma list.
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiResponse<Vec<CharacterSummary>>, ApiError> {
    let filter = ListParams(&params).character_filter()?;
    let characters = state.character_service().list_characters(filter).await?;
    Ok(ApiResponse::success(characters))
}

pub async fn get_character(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<ApiResponse<CharacterDetail>, ApiError> {
    let character = state.character_service().get_character(id).await?;
    Ok(ApiResponse::success(character))
}

pub async fn create_character(
    State(state): State<Arc<AppState>>,
    mut form: CatalogForm,
) -> Result<ApiResponse<characters::Model>, ApiError> {
    let character = CharacterRequest::parse_new(&form.fields)?;
    let image = form.take_image(&state.config().uploads)?;

    let created = state
        .character_service()
        .create_character(character, image)
        .await?;
    Ok(ApiResponse::created("Character created", created))
}

pub async fn update_character(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    mut form: CatalogForm,
) -> Result<ApiResponse<()>, ApiError> {
    let changes = CharacterRequest::parse_changes(&form.fields)?;
    let image = form.take_image(&state.config().uploads)?;

    let outcome = state
        .character_service()
        .update_character(id, changes, image)
        .await?;

    Ok(ApiResponse::message(if outcome.is_modified() {
        "Character modified"
    } else {
        "Character not modified"
    }))
}

pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<ApiResponse<i32>, ApiError> {
    let deleted = state.character_service().delete_character(id).await?;
    Ok(ApiResponse::with_message("Character deleted", deleted))
}
