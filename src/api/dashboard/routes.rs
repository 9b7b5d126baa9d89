use crate::api::dashboard::handlers::{index_handler, stats_handler};
use crate::api::models::AppState;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/stats", get(stats_handler))
}
