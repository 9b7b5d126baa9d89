pub mod dashboard;
pub mod models;
pub mod wordcloud;

#[cfg(test)]
mod tests;

// Re-exports
pub use models::*;

use axum::{extract::State, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

// Health handler (simple, keep here)
pub async fn health_handler(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    Json(models::HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_documents: state.corpus.len(),
    })
}

/// Full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(dashboard::routes())
        .merge(wordcloud::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
