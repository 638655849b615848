use crate::domain::CatalogError;
use crate::entities::genres;
use crate::models::{
    GenreChanges, GenreDetail, GenreFilter, GenreSummary, NewGenre, UpdateOutcome, UploadedImage,
};

#[async_trait::async_trait]
pub trait GenreService: Send + Sync {
    async fn list_genres(&self, filter: GenreFilter) -> Result<Vec<GenreSummary>, CatalogError>;

    async fn get_genre(&self, id: i32) -> Result<GenreDetail, CatalogError>;

    async fn create_genre(
        &self,
        genre: NewGenre,
        image: Option<UploadedImage>,
    ) -> Result<genres::Model, CatalogError>;

    async fn update_genre(
        &self,
        id: i32,
        changes: GenreChanges,
        image: Option<UploadedImage>,
    ) -> Result<UpdateOutcome, CatalogError>;

    async fn delete_genre(&self, id: i32) -> Result<i32, CatalogError>;
}
