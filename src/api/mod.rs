use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod characters;
mod error;
pub mod form;
mod genres;
mod movies;
mod observability;
mod system;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

use crate::services::{CharacterService, GenreService, MovieService};
use metrics_exporter_prometheus::PrometheusHandle;

/// Room for the text parts of a multipart body on top of the image itself.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn character_service(&self) -> &Arc<dyn CharacterService> {
        &self.shared.character_service
    }

    #[must_use]
    pub fn genre_service(&self) -> &Arc<dyn GenreService> {
        &self.shared.genre_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let (uploads_root, body_limit, cors_origins) = {
        let config = state.config();
        (
            config.uploads.root.clone(),
            config
                .uploads
                .max_image_bytes
                .saturating_add(FORM_OVERHEAD_BYTES),
            config.server.cors_allowed_origins.clone(),
        )
    };

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .route("/movies", get(movies::list_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/characters", get(characters::list_characters))
        .route("/characters/{id}", get(characters::get_character))
        .route("/genres", get(genres::list_genres))
        .route("/genres/{id}", get(genres::get_genre))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .merge(protected_routes)
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .merge(api_router)
        .nest_service("/uploads", ServeDir::new(uploads_root))
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", post(movies::create_movie))
        .route(
            "/movies/{id}",
            patch(movies::update_movie).delete(movies::delete_movie),
        )
        .route("/characters", post(characters::create_character))
        .route(
            "/characters/{id}",
            patch(characters::update_character).delete(characters::delete_character),
        )
        .route("/genres", post(genres::create_genre))
        .route(
            "/genres/{id}",
            patch(genres::update_genre).delete(genres::delete_genre),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

async fn route_not_found() -> ApiResponse<()> {
    ApiResponse::error(
        StatusCode::NOT_FOUND,
        ErrorBody::Message("Route not found".to_string()),
    )
}
