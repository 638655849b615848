use axum::extract::{Query, State};
use std::sync::Arc;

use super::form::CatalogForm;
use super::validation::{EntityId, GenreRequest, ListParams};
use super::{ApiError, ApiResponse, AppState};
use crate::entities::genres;
use crate::models::{GenreDetail, GenreSummary};

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiResponse<Vec<GenreSummary>>, ApiError> {
    let filter = ListParams(&params).genre_filter();
    let genres = state.genre_service().list_genres(filter).await?;
    Ok(ApiResponse::success(genres))
}

pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<ApiResponse<GenreDetail>, ApiError> {
    let genre = state.genre_service().get_genre(id).await?;
    Ok(ApiResponse::success(genre))
}

pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    mut form: CatalogForm,
) -> Result<ApiResponse<genres::Model>, ApiError> {
    let genre = GenreRequest::parse_new(&form.fields)?;
    let image = form.take_image(&state.config().uploads)?;

    let created = state.genre_service().create_genre(genre, image).await?;
    Ok(ApiResponse::created("Genre created", created))
}

pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    mut form: CatalogForm,
) -> Result<ApiResponse<()>, ApiError> {
    let changes = GenreRequest::parse_changes(&form.fields)?;
    let image = form.take_image(&state.config().uploads)?;

    let outcome = state
        .genre_service()
        .update_genre(id, changes, image)
        .await?;

    Ok(ApiResponse::message(if outcome.is_modified() {
        "Genre modified"
    } else {
        "Genre not modified"
    }))
}

pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<ApiResponse<i32>, ApiError> {
    let deleted = state.genre_service().delete_genre(id).await?;
    Ok(ApiResponse::with_message("Genre deleted", deleted))
}
