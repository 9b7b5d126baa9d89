use crate::pipeline::{QueryError, WordCloudService};
use crate::storage::Corpus;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Corpus>,
    pub wordcloud: Arc<WordCloudService>,
}

/// Form body of `POST /wordcloud`
#[derive(Debug, Default, Deserialize)]
pub struct WordCloudForm {
    #[serde(default)]
    pub word: String,
}

/// Rendered word cloud
#[derive(Debug, Serialize)]
pub struct WordCloudResponse {
    pub image: String,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_documents: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Corpus summary for the dashboard
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_documents: usize,
    pub top_categories: Vec<CategoryCount>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::EmptyQuery => AppError::BadRequest(err.to_string()),
            QueryError::NoMatches(_) => AppError::NotFound(err.to_string()),
            QueryError::Render(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
