pub mod prelude;

pub mod characters;
pub mod characters_movies;
pub mod genres;
pub mod genres_movies;
pub mod movies;
