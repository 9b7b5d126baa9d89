mod api;
mod config;
mod pipeline;
mod render;
mod storage;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::pipeline::{CanvasSize, WordCloudService};
use crate::render::{BitmapCloudRenderer, CloudOptions};
use crate::storage::Corpus;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Paper Word Cloud Dashboard");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Corpus: {:?}", config.corpus.path);
    info!("   - Canvas: {}x{}", config.render.width, config.render.height);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Load corpus once; it stays read-only for the life of the process
    info!("📚 Loading corpus...");
    let corpus = Arc::new(Corpus::load_or_empty(&config.corpus.path));
    info!("✅ Corpus ready ({} documents)", corpus.len());

    // Initialize word cloud pipeline
    let renderer = Arc::new(BitmapCloudRenderer::new(CloudOptions::from(&config.render)));
    let wordcloud = Arc::new(WordCloudService::new(
        corpus.clone(),
        renderer,
        CanvasSize {
            width: config.render.width,
            height: config.render.height,
        },
    ));
    info!("✅ Word cloud pipeline ready");

    // Create application state
    let state = AppState { corpus, wordcloud };
    let app = api::router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /           - Dashboard");
    info!("   GET  /health     - Health check");
    info!("   GET  /stats      - Corpus summary");
    info!("   POST /wordcloud  - Generate word cloud (form field: word)");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
