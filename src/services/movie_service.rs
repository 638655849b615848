//! Domain service for movies.
//!
//! Movies own both association sets: the characters appearing in them and
//! the genres they belong to.

use crate::domain::CatalogError;
use crate::entities::movies;
use crate::models::{
    MovieChanges, MovieDetail, MovieFilter, MovieSummary, NewMovie, UpdateOutcome, UploadedImage,
};

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Lists movies matching the filter, ordered by creation date.
    async fn list_movies(&self, filter: MovieFilter) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Gets a movie with its characters and genres.
    async fn get_movie(&self, id: i32) -> Result<MovieDetail, CatalogError>;

    /// Creates a movie, storing its image first when one is supplied.
    async fn create_movie(
        &self,
        movie: NewMovie,
        image: Option<UploadedImage>,
    ) -> Result<movies::Model, CatalogError>;

    /// Applies a partial update. A new image replaces the stored one.
    async fn update_movie(
        &self,
        id: i32,
        changes: MovieChanges,
        image: Option<UploadedImage>,
    ) -> Result<UpdateOutcome, CatalogError>;

    /// Deletes a movie, its links and its image. Returns the deleted id.
    async fn delete_movie(&self, id: i32) -> Result<i32, CatalogError>;
}
