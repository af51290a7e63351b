mod catalog;
mod config;
mod error;
mod gemini;
mod generative;
mod handlers;
mod models;
mod prompt;
mod response;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::Config;
pub use error::{AppError, Result};

use catalog::CategoryCatalog;
use gemini::GeminiClient;
use generative::GenerativeModel;

pub struct AppState {
    pub config: Config,
    pub catalog: CategoryCatalog,
    // None when GEMINI_API_KEY is missing; reported per request
    pub model: Option<Arc<dyn GenerativeModel>>,
}

impl AppState {
    pub fn model(&self) -> Result<&dyn GenerativeModel> {
        self.model.as_deref().ok_or_else(AppError::missing_api_key)
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Model-backed API
        .route("/api/recommend", post(handlers::recommend::recommend))
        .route("/api/analyze", post(handlers::analyze::analyze))
        // Static site
        .route_service("/", ServeFile::new(state.config.index_path()))
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(DefaultBodyLimit::max(state.config.max_request_body_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let config = Config::from_env()?;

    let catalog = config.catalog();
    tracing::info!("Loaded {} clinic categories", catalog.ids().len());

    let model = GeminiClient::from_config(&config).map(|client| {
        tracing::info!("Using Gemini model {}", config.gemini_model);
        Arc::new(client) as Arc<dyn GenerativeModel>
    });
    if model.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; API requests will fail until it is configured");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        catalog,
        model,
    });

    let app = build_router(state);

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
