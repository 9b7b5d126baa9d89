use crate::api::models::*;
use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request, State},
    http::header,
    Form, Json,
};
use tracing::{debug, info};

/// `word` from a urlencoded or multipart form body
async fn read_word(request: Request, state: &AppState) -> String {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    // A body that is not a form carries no word
    if is_multipart {
        let multipart = match Multipart::from_request(request, state).await {
            Ok(multipart) => multipart,
            Err(rejection) => {
                debug!(error = %rejection, "Unreadable multipart body");
                return String::new();
            }
        };
        match multipart_word(multipart).await {
            Ok(word) => word.unwrap_or_default(),
            Err(e) => {
                debug!(error = %e, "Malformed multipart body");
                String::new()
            }
        }
    } else {
        match Form::<WordCloudForm>::from_request(request, state).await {
            Ok(Form(form)) => form.word,
            Err(rejection) => {
                debug!(error = %rejection, "Unreadable form body");
                String::new()
            }
        }
    }
}

async fn multipart_word(mut multipart: Multipart) -> Result<Option<String>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("word") {
            return Ok(Some(field.text().await?));
        }
    }
    Ok(None)
}

pub async fn wordcloud_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<WordCloudResponse>, AppError> {
    let word = read_word(request, &state).await;

    // Rendering is CPU-bound; keep it off the async workers
    let service = state.wordcloud.clone();
    let result = tokio::task::spawn_blocking(move || service.query(&word))
        .await
        .map_err(|e| AppError::Internal(format!("Render task failed: {}", e)))??;

    info!(count = result.count, "Word cloud served");

    Ok(Json(WordCloudResponse {
        image: result.image,
        count: result.count,
    }))
}
