//! Recipebox HTTP server binary.
//!
//! Loads `.env`, reads configuration from flags and environment, and serves
//! the API plus the static pages until interrupted.

use std::path::PathBuf;

use clap::Parser;
use recipebox_api::AppState;
use recipebox_api::config::ApiConfig;
use recipebox_core::completion::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use tracing::info;
use url::Url;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "recipebox_server", about = "Recipebox HTTP server", version)]
struct Args {
    /// Interface to listen on.
    #[arg(long, env = "RECIPEBOX_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "RECIPEBOX_PORT", default_value_t = 5000)]
    port: u16,

    /// Directory holding `data.json` and `recipes.json`.
    #[arg(long, env = "RECIPEBOX_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Directory holding `index.html`, `add.html`, `search.html` and assets.
    #[arg(long, env = "RECIPEBOX_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// API key for the chat-completion service. Generation returns 500 without it.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Chat model used for recipe generation.
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    openai_model: String,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    openai_base_url: Url,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,recipebox_api=debug,recipebox_core=debug,tower_http=info",
                )
            }),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        data_dir: args.data_dir,
        static_dir: args.static_dir,
        openai_api_key: args.openai_api_key.filter(|k| !k.trim().is_empty()),
        openai_model: args.openai_model,
        openai_base_url: args.openai_base_url,
    };

    info!(
        data_dir = %config.data_dir.display(),
        static_dir = %config.static_dir.display(),
        model = %config.openai_model,
        generation_enabled = config.openai_api_key.is_some(),
        "starting recipebox_server"
    );

    let state = AppState::from_config(config.clone())?;
    let app = recipebox_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
