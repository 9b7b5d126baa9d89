//! HTTP surface tests
//!
//! Drive the full router with `oneshot` requests and check status codes and
//! JSON bodies. Most tests use a blank-image renderer so no layout runs.

use crate::api::{router, AppState};
use crate::pipeline::{CanvasSize, WordCloudService};
use crate::render::{BitmapCloudRenderer, CloudRenderer, RenderError, StopWords};
use crate::storage::{Corpus, Document};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::Value;
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;

/// Returns a white PNG of the requested size without laying out any words
struct BlankRenderer;

impl CloudRenderer for BlankRenderer {
    fn render(
        &self,
        _text: &str,
        _stop_words: &StopWords,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let canvas = RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(canvas).write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }
}

fn example_corpus() -> Corpus {
    Corpus::new(vec![
        Document::with_categories(
            "Deep learning for cats",
            "We study cats.",
            vec!["cs.LG".into(), "q-bio".into()],
        ),
        Document::with_categories(
            "Dogs only",
            "No cats here... wait yes cats.",
            vec!["cs.LG".into()],
        ),
    ])
}

fn app_with(corpus: Corpus, renderer: Arc<dyn CloudRenderer>) -> Router {
    let corpus = Arc::new(corpus);
    let wordcloud = Arc::new(WordCloudService::new(
        corpus.clone(),
        renderer,
        CanvasSize::default(),
    ));
    router(AppState { corpus, wordcloud })
}

fn app() -> Router {
    app_with(example_corpus(), Arc::new(BlankRenderer))
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/wordcloud")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn decode_data_uri(uri: &str) -> image::DynamicImage {
    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    let png = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .unwrap();
    image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap()
}

// ============================================================
// POST /wordcloud
// ============================================================

#[tokio::test]
async fn matching_word_returns_image_and_count() {
    let (status, body) = send(app(), form_request("word=cats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    let image = decode_data_uri(body["image"].as_str().unwrap());
    assert_eq!((image.width(), image.height()), (800, 400));
}

#[tokio::test]
async fn word_is_trimmed_and_lowercased() {
    let (status, body) = send(app(), form_request("word=%20%20DOGS%20")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn empty_word_is_bad_request() {
    for body in ["word=", "word=%20%20", "other=cats", ""] {
        let (status, json) = send(app(), form_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(json["error"], "Please enter a word (w1).");
    }
}

#[tokio::test]
async fn non_form_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/wordcloud")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"word": "cats"}"#))
        .unwrap();

    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please enter a word (w1).");
}

#[tokio::test]
async fn multipart_form_is_accepted() {
    let body = "--BOUNDARY\r\n\
                Content-Disposition: form-data; name=\"other\"\r\n\r\n\
                dogs\r\n\
                --BOUNDARY\r\n\
                Content-Disposition: form-data; name=\"word\"\r\n\r\n\
                Cats\r\n\
                --BOUNDARY--\r\n";
    let request = Request::builder()
        .method("POST")
        .uri("/wordcloud")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
}

#[tokio::test]
async fn multipart_without_word_is_bad_request() {
    let body = "--BOUNDARY\r\n\
                Content-Disposition: form-data; name=\"other\"\r\n\r\n\
                cats\r\n\
                --BOUNDARY--\r\n";
    let request = Request::builder()
        .method("POST")
        .uri("/wordcloud")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
        .body(Body::from(body))
        .unwrap();

    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please enter a word (w1).");
}

#[tokio::test]
async fn very_long_word_is_not_found() {
    let body = format!("word={}", "a".repeat(200_000));
    let (status, json) = send(app(), form_request(&body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().starts_with("No papers found"));
}

#[tokio::test]
async fn unmatched_word_is_not_found() {
    let (status, json) = send(app(), form_request("word=Bird")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No papers found containing the word \"bird\".");
    assert!(json.get("image").is_none());
}

#[tokio::test]
async fn partial_word_is_not_found() {
    let (status, _) = send(app(), form_request("word=dog")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_corpus_reports_no_matches() {
    let app = app_with(Corpus::empty(), Arc::new(BlankRenderer));

    let (status, _) = send(app.clone(), form_request("word=cats")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app, form_request("word=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn real_renderer_serves_word_cloud() {
    let app = app_with(example_corpus(), Arc::new(BitmapCloudRenderer::default()));

    let (status, body) = send(app, form_request("word=cats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let image = decode_data_uri(body["image"].as_str().unwrap()).to_rgb8();
    assert_eq!(image.dimensions(), (800, 400));
    assert!(image.pixels().any(|p| p.0 != [255, 255, 255]));
}

// ============================================================
// Dashboard, stats and health
// ============================================================

#[tokio::test]
async fn index_serves_dashboard_shell() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/wordcloud"));
}

#[tokio::test]
async fn stats_lists_top_categories() {
    let request = Request::builder().uri("/stats").body(Body::empty()).unwrap();
    let (status, json) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_documents"], 2);
    assert_eq!(json["top_categories"][0]["category"], "cs.LG");
    assert_eq!(json["top_categories"][0]["count"], 2);
    assert_eq!(json["top_categories"][1]["category"], "q-bio");
}

#[tokio::test]
async fn health_reports_document_count() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, json) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["total_documents"], 2);
}
