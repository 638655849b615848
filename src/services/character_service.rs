//! Domain service for characters.

use crate::domain::CatalogError;
use crate::entities::characters;
use crate::models::{
    CharacterChanges, CharacterDetail, CharacterFilter, CharacterSummary, NewCharacter,
    UpdateOutcome, UploadedImage,
};

#[async_trait::async_trait]
pub trait CharacterService: Send + Sync {
    async fn list_characters(
        &self,
        filter: CharacterFilter,
    ) -> Result<Vec<CharacterSummary>, CatalogError>;

    /// Gets a character with the movies it appears in.
    async fn get_character(&self, id: i32) -> Result<CharacterDetail, CatalogError>;

    async fn create_character(
        &self,
        character: NewCharacter,
        image: Option<UploadedImage>,
    ) -> Result<characters::Model, CatalogError>;

    async fn update_character(
        &self,
        id: i32,
        changes: CharacterChanges,
        image: Option<UploadedImage>,
    ) -> Result<UpdateOutcome, CatalogError>;

    async fn delete_character(&self, id: i32) -> Result<i32, CatalogError>;
}
