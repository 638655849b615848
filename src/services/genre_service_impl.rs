use crate::db::Store;
use crate::domain::{CatalogError, EntityKind};
use crate::entities::genres;
use crate::models::{
    GenreChanges, GenreDetail, GenreFilter, GenreSummary, NewGenre, UpdateOutcome, UploadedImage,
};
use crate::services::genre_service::GenreService;
use crate::services::image::ImageStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub struct SeaOrmGenreService {
    store: Store,
    images: Arc<ImageStore>,
}

impl SeaOrmGenreService {
    #[must_use]
    pub const fn new(store: Store, images: Arc<ImageStore>) -> Self {
        Self { store, images }
    }
}

#[async_trait]
impl GenreService for SeaOrmGenreService {
    async fn list_genres(&self, filter: GenreFilter) -> Result<Vec<GenreSummary>, CatalogError> {
        self.store.genres().list(&filter).await
    }

    async fn get_genre(&self, id: i32) -> Result<GenreDetail, CatalogError> {
        self.store
            .genres()
            .get_detail(id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Genre, id))
    }

    async fn create_genre(
        &self,
        genre: NewGenre,
        image: Option<UploadedImage>,
    ) -> Result<genres::Model, CatalogError> {
        let stored = self
            .images
            .save_optional(EntityKind::Genre, image.as_ref())
            .await?;

        let model = match self.store.genres().create(genre, stored.clone()).await {
            Ok(model) => model,
            Err(e) => {
                if let Some(name) = stored.as_deref() {
                    self.images.discard(EntityKind::Genre, name).await;
                }
                return Err(e);
            }
        };

        info!(genre_id = model.id, name = %model.name, "Genre created");
        Ok(model)
    }

    async fn update_genre(
        &self,
        id: i32,
        changes: GenreChanges,
        image: Option<UploadedImage>,
    ) -> Result<UpdateOutcome, CatalogError> {
        if self.store.genres().get(id).await?.is_none() {
            return Err(CatalogError::not_found(EntityKind::Genre, id));
        }

        let stored = self
            .images
            .save_optional(EntityKind::Genre, image.as_ref())
            .await?;

        let update = match self.store.genres().update(id, changes, stored.clone()).await {
            Ok(update) => update,
            Err(e) => {
                if let Some(name) = stored.as_deref() {
                    self.images.discard(EntityKind::Genre, name).await;
                }
                return Err(e);
            }
        };

        if let Some(old) = update.replaced_image.as_deref() {
            self.images.discard(EntityKind::Genre, old).await;
        }

        if update.outcome.is_modified() {
            info!(genre_id = id, "Genre modified");
        }
        Ok(update.outcome)
    }

    async fn delete_genre(&self, id: i32) -> Result<i32, CatalogError> {
        let deleted = self.store.genres().delete(id).await?;

        if let Some(image) = deleted.image.as_deref() {
            self.images.discard(EntityKind::Genre, image).await;
        }

        info!(genre_id = id, name = %deleted.name, "Genre deleted");
        Ok(deleted.id)
    }
}
