//! `SeaORM` implementation of the `CharacterService` trait.

use crate::db::Store;
use crate::domain::{CatalogError, EntityKind};
use crate::entities::characters;
use crate::models::{
    CharacterChanges, CharacterDetail, CharacterFilter, CharacterSummary, NewCharacter,
    UpdateOutcome, UploadedImage,
};
use crate::services::character_service::CharacterService;
use crate::services::image::ImageStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub struct SeaOrmCharacterService {
    store: Store,
    images: Arc<ImageStore>,
}

impl SeaOrmCharacterService {
    #[must_use]
    pub const fn new(store: Store, images: Arc<ImageStore>) -> Self {
        Self { store, images }
    }
}

#[async_trait]
impl CharacterService for SeaOrmCharacterService {
    async fn list_characters(
        &self,
        filter: CharacterFilter,
    ) -> Result<Vec<CharacterSummary>, CatalogError> {
        self.store.characters().list(&filter).await
    }

    async fn get_character(&self, id: i32) -> Result<CharacterDetail, CatalogError> {
        self.store
            .characters()
            .get_detail(id)
            .await?
            .ok_or(CatalogError::not_found(EntityKind::Character, id))
    }

    async fn create_character(
        &self,
        character: NewCharacter,
        image: Option<UploadedImage>,
    ) -> Result<characters::Model, CatalogError> {
        let stored = self
            .images
            .save_optional(EntityKind::Character, image.as_ref())
            .await?;

        let model = match self.store.characters().create(character, stored.clone()).await {
            Ok(model) => model,
            Err(e) => {
                if let Some(name) = stored.as_deref() {
                    self.images.discard(EntityKind::Character, name).await;
                }
                return Err(e);
            }
        };

        info!(character_id = model.id, name = %model.name, "Character created");
        Ok(model)
    }

    async fn update_character(
        &self,
        id: i32,
        changes: CharacterChanges,
        image: Option<UploadedImage>,
    ) -> Result<UpdateOutcome, CatalogError> {
        if self.store.characters().get(id).await?.is_none() {
            return Err(CatalogError::not_found(EntityKind::Character, id));
        }

        let stored = self
            .images
            .save_optional(EntityKind::Character, image.as_ref())
            .await?;

        let update = match self.store.characters().update(id, changes, stored.clone()).await {
            Ok(update) => update,
            Err(e) => {
                if let Some(name) = stored.as_deref() {
                    self.images.discard(EntityKind::Character, name).await;
                }
                return Err(e);
            }
        };

        if let Some(old) = update.replaced_image.as_deref() {
            self.images.discard(EntityKind::Character, old).await;
        }

        if update.outcome.is_modified() {
            info!(character_id = id, "Character modified");
        }
        Ok(update.outcome)
    }

    async fn delete_character(&self, id: i32) -> Result<i32, CatalogError> {
        let deleted = self.store.characters().delete(id).await?;

        if let Some(image) = deleted.image.as_deref() {
            self.images.discard(EntityKind::Character, image).await;
        }

        info!(character_id = id, name = %deleted.name, "Character deleted");
        Ok(deleted.id)
    }
}
