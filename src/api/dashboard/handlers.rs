use crate::api::models::*;
use axum::{extract::State, response::Html, Json};

const TOP_CATEGORIES: usize = 10;

pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../../templates/index.html"))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let top_categories = state
        .corpus
        .top_categories(TOP_CATEGORIES)
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    Json(StatsResponse {
        total_documents: state.corpus.len(),
        top_categories,
    })
}
