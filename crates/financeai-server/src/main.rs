//! FinanceAI Server
//!
//! HTTP JSON API for the FinanceAI content platform: blog posts, AI-backed
//! financial calculators, newsletter subscriptions and market figures.

mod config;
mod error;
mod extractors;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use financeai_core::ports::{ContentGenerator, Storage};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::Config;
use services::{ContentService, GeminiClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub content: Arc<ContentService>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting FinanceAI Server v{}", env!("CARGO_PKG_VERSION"));
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, storage={:?}, model={}",
        config.server.bind_address, config.storage.backend, config.ai.model
    );

    let store = storage::open(&config.storage)
        .await
        .context("Failed to initialize storage")?;

    let generator: Arc<dyn ContentGenerator> =
        Arc::new(GeminiClient::new(&config.ai).context("Failed to initialize AI client")?);
    let content = Arc::new(ContentService::new(store.clone(), generator));

    let state = AppState { store, content };

    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server ready to accept connections");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Build the router with all routes and layers
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/blogs",
            get(handlers::blogs::list).post(handlers::blogs::create),
        )
        // GET takes a slug, PUT and DELETE an id
        .route(
            "/blogs/:key",
            get(handlers::blogs::get)
                .put(handlers::blogs::update)
                .delete(handlers::blogs::delete),
        )
        .route("/ai/generate-blog", post(handlers::ai::generate_blog))
        .route("/ai/finance-advice", post(handlers::ai::finance_advice))
        .route("/ai/stock-analysis", post(handlers::ai::stock_analysis))
        .route("/ai/stock-analyses", get(handlers::ai::stock_analyses))
        .route("/ai/budget-plan", post(handlers::ai::budget_plan))
        .route(
            "/newsletter/subscribe",
            post(handlers::newsletter::subscribe),
        )
        .route(
            "/newsletter/unsubscribe",
            post(handlers::newsletter::unsubscribe),
        )
        .route("/newsletter/count", get(handlers::newsletter::count))
        .route("/market/indices", get(handlers::market::indices))
        .route("/market/top-gainers", get(handlers::market::top_gainers))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
