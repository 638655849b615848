pub use super::characters::Entity as Characters;
pub use super::characters_movies::Entity as CharactersMovies;
pub use super::genres::Entity as Genres;
pub use super::genres_movies::Entity as GenresMovies;
pub use super::movies::Entity as Movies;
