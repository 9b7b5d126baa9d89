use crate::api::models::AppState;
use crate::api::wordcloud::handlers::wordcloud_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wordcloud", post(wordcloud_handler))
}
