//! API server configuration.

use std::path::PathBuf;

use recipebox_core::storage::recipes::DEFAULT_RECIPES_FILE;
use recipebox_core::storage::texts::DEFAULT_TEXTS_FILE;
use url::Url;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:5000").
    pub bind_addr: String,
    /// Directory holding `data.json` and `recipes.json`.
    pub data_dir: PathBuf,
    /// Directory holding the HTML pages and their assets.
    pub static_dir: PathBuf,
    /// Completion API key. Generation is disabled when unset.
    pub openai_api_key: Option<String>,
    /// Chat model used for generation.
    pub openai_model: String,
    /// Base URL of the OpenAI-compatible API.
    pub openai_base_url: Url,
}

impl ApiConfig {
    pub fn texts_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_TEXTS_FILE)
    }

    pub fn recipes_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_RECIPES_FILE)
    }
}
