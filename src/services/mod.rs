pub mod image;
pub use image::ImageStore;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::MovieService;
pub use movie_service_impl::SeaOrmMovieService;

pub mod character_service;
pub mod character_service_impl;
pub use character_service::CharacterService;
pub use character_service_impl::SeaOrmCharacterService;

pub mod genre_service;
pub mod genre_service_impl;
pub use genre_service::GenreService;
pub use genre_service_impl::SeaOrmGenreService;
