use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CharacterService, GenreService, ImageStore, MovieService, SeaOrmCharacterService,
    SeaOrmGenreService, SeaOrmMovieService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub images: Arc<ImageStore>,

    pub movie_service: Arc<dyn MovieService>,

    pub character_service: Arc<dyn CharacterService>,

    pub genre_service: Arc<dyn GenreService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let images = Arc::new(ImageStore::from_config(&config.uploads));

        let movie_service = Arc::new(SeaOrmMovieService::new(store.clone(), images.clone()))
            as Arc<dyn MovieService>;
        let character_service =
            Arc::new(SeaOrmCharacterService::new(store.clone(), images.clone()))
                as Arc<dyn CharacterService>;
        let genre_service = Arc::new(SeaOrmGenreService::new(store.clone(), images.clone()))
            as Arc<dyn GenreService>;

        Self {
            config: Arc::new(config),
            store,
            images,
            movie_service,
            character_service,
            genre_service,
        }
    }
}
