use axum::extract::{Query, State};
use std::sync::Arc;

use super::form::CatalogForm;
use super::validation::{EntityId, ListParams, MovieRequest};
use super::{ApiError, ApiResponse, AppState};
use crate::entities::movies;
use crate::models::{MovieDetail, MovieSummary};

/// `GET /movies?title=&genre=&order=`
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiResponse<Vec<MovieSummary>>, ApiError> {
    let filter = ListParams(&params).movie_filter()?;
    let movies = state.movie_service().list_movies(filter).await?;
    Ok(ApiResponse::success(movies))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<ApiResponse<MovieDetail>, ApiError> {
    let movie = state.movie_service().get_movie(id).await?;
    Ok(ApiResponse::success(movie))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    mut form: CatalogForm,
) -> Result<ApiResponse<movies::Model>, ApiError> {
    let movie = MovieRequest::parse_new(&form.fields)?;
    let image = form.take_image(&state.config().uploads)?;

    let created = state.movie_service().create_movie(movie, image).await?;
    Ok(ApiResponse::created("Movie created", created))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    mut form: CatalogForm,
) -> Result<ApiResponse<()>, ApiError> {
    let changes = MovieRequest::parse_changes(&form.fields)?;
    let image = form.take_image(&state.config().uploads)?;

    let outcome = state
        .movie_service()
        .update_movie(id, changes, image)
        .await?;

    Ok(ApiResponse::message(if outcome.is_modified() {
        "Movie modified"
    } else {
        "Movie not modified"
    }))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<ApiResponse<i32>, ApiError> {
    let deleted = state.movie_service().delete_movie(id).await?;
    Ok(ApiResponse::with_message("Movie deleted", deleted))
}
