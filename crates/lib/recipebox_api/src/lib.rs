//! # recipebox_api
//!
//! HTTP API library for Recipebox.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use recipebox_core::completion::RecipeGenerator;
use recipebox_core::completion::openai::OpenAiClient;
use recipebox_core::storage::recipes::RecipeStore;
use recipebox_core::storage::texts::TextStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ApiConfig;
use crate::handlers::{generate, recipes, texts};

pub const GET_API_TEXTS: &str = "/api/texts";
pub const GET_API_RECIPES: &str = "/api/recipes";
pub const DELETE_API_RECIPES_ID: &str = "/api/recipes/{id}";
pub const POST_API_GENERATE_RECIPE: &str = "/api/generate-recipe";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Text blob store.
    pub texts: Arc<TextStore>,
    /// Recipe collection store.
    pub recipes: Arc<RecipeStore>,
    /// Recipe generator; `None` when no API key is configured.
    pub generator: Option<Arc<dyn RecipeGenerator>>,
}

impl AppState {
    /// Build stores under `config.data_dir` and, if a key is configured, an
    /// OpenAI client.
    pub fn from_config(config: ApiConfig) -> Result<Self, url::ParseError> {
        let generator = match &config.openai_api_key {
            Some(key) => {
                let client = OpenAiClient::new(
                    key.clone(),
                    config.openai_model.clone(),
                    &config.openai_base_url,
                )?;
                Some(Arc::new(client) as Arc<dyn RecipeGenerator>)
            }
            None => {
                warn!("OPENAI_API_KEY not set; recipe generation will fail");
                None
            }
        };

        Ok(Self {
            texts: Arc::new(TextStore::new(config.texts_path())),
            recipes: Arc::new(RecipeStore::new(config.recipes_path())),
            generator,
            config,
        })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.static_dir.clone();

    // HTML pages and their assets
    let pages = Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/add", ServeFile::new(static_dir.join("add.html")))
        .route_service("/search", ServeFile::new(static_dir.join("search.html")))
        .nest_service("/static", ServeDir::new(&static_dir));

    let api = Router::new()
        .route(
            GET_API_TEXTS,
            get(texts::get_texts_handler).post(texts::save_texts_handler),
        )
        .route(
            GET_API_RECIPES,
            get(recipes::list_recipes_handler).post(recipes::create_recipe_handler),
        )
        .route(DELETE_API_RECIPES_ID, delete(recipes::delete_recipe_handler))
        .route(
            POST_API_GENERATE_RECIPE,
            post(generate::generate_recipe_handler),
        );

    Router::new()
        .merge(pages)
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
