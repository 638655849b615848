//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::Store;
use crate::domain::{CatalogError, EntityKind};
use crate::entities::movies;
use crate::models::{
    MovieChanges, MovieDetail, MovieFilter, MovieSummary, NewMovie, UpdateOutcome, UploadedImage,
};
use crate::services::image::ImageStore;
use crate::services::movie_service::MovieService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub struct SeaOrmMovieService {
    store: Store,
    images: Arc<ImageStore>,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store, images: Arc<ImageStore>) -> Self {
        Self { store, images }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list_movies(&self, filter: MovieFilter) -> Result<Vec<MovieSummary>, CatalogError> {
        self.store.movies().list(&filter).await
    }

    async fn get_movie(&self, id: i32) -> Result<MovieDetail, CatalogError> {
        self.store
            .movies()
            .get_detail(id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Movie, id))
    }

    async fn create_movie(
        &self,
        movie: NewMovie,
        image: Option<UploadedImage>,
    ) -> Result<movies::Model, CatalogError> {
        let stored = self
            .images
            .save_optional(EntityKind::Movie, image.as_ref())
            .await?;

        let model = match self.store.movies().create(movie, stored.clone()).await {
            Ok(model) => model,
            Err(e) => {
                if let Some(name) = stored.as_deref() {
                    self.images.discard(EntityKind::Movie, name).await;
                }
                return Err(e);
            }
        };

        info!(movie_id = model.id, title = %model.title, "Movie created");
        Ok(model)
    }

    async fn update_movie(
        &self,
        id: i32,
        changes: MovieChanges,
        image: Option<UploadedImage>,
    ) -> Result<UpdateOutcome, CatalogError> {
        if self.store.movies().get(id).await?.is_none() {
            return Err(CatalogError::not_found(EntityKind::Movie, id));
        }

        let stored = self
            .images
            .save_optional(EntityKind::Movie, image.as_ref())
            .await?;

        let update = match self.store.movies().update(id, changes, stored.clone()).await {
            Ok(update) => update,
            Err(e) => {
                if let Some(name) = stored.as_deref() {
                    self.images.discard(EntityKind::Movie, name).await;
                }
                return Err(e);
            }
        };

        if let Some(old) = update.replaced_image.as_deref() {
            self.images.discard(EntityKind::Movie, old).await;
        }

        if update.outcome.is_modified() {
            info!(movie_id = id, "Movie modified");
        }
        Ok(update.outcome)
    }

    async fn delete_movie(&self, id: i32) -> Result<i32, CatalogError> {
        let deleted = self.store.movies().delete(id).await?;

        if let Some(image) = deleted.image.as_deref() {
            self.images.discard(EntityKind::Movie, image).await;
        }

        info!(movie_id = id, title = %deleted.title, "Movie deleted");
        Ok(deleted.id)
    }
}
