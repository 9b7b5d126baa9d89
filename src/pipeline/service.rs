use crate::pipeline::matcher::{normalize_query, WordMatcher};
use crate::render::{png_data_uri, CloudRenderer, RenderError, StopWords};
use crate::storage::{Corpus, Document};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Please enter a word (w1).")]
    EmptyQuery,

    #[error("No papers found containing the word \"{0}\".")]
    NoMatches(String),

    #[error("Word cloud rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// Rendered cloud for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// `data:image/png;base64,...`, or empty when no word survived stop-word filtering
    pub image: String,
    /// Number of matching documents
    pub count: usize,
}

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

/// Filter -> aggregate -> render -> encode over an immutable corpus
pub struct WordCloudService {
    corpus: Arc<Corpus>,
    renderer: Arc<dyn CloudRenderer>,
    stop_words: StopWords,
    canvas: CanvasSize,
}

impl WordCloudService {
    pub fn new(corpus: Arc<Corpus>, renderer: Arc<dyn CloudRenderer>, canvas: CanvasSize) -> Self {
        Self {
            corpus,
            renderer,
            stop_words: StopWords::default(),
            canvas,
        }
    }

    /// Documents containing `word` as a whole word, in corpus order
    pub fn matching_documents(&self, word: &str) -> Vec<&Document> {
        let matcher = WordMatcher::new(word);
        self.corpus
            .documents()
            .iter()
            .filter(|doc| matcher.is_match(&doc.text_content))
            .collect()
    }

    pub fn query(&self, raw_word: &str) -> Result<QueryResult, QueryError> {
        let word = normalize_query(raw_word).ok_or(QueryError::EmptyQuery)?;

        let matches = self.matching_documents(&word);
        if matches.is_empty() {
            return Err(QueryError::NoMatches(word));
        }

        let combined_text = matches
            .iter()
            .map(|doc| doc.text_content.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        info!(word = %word, count = matches.len(), chars = combined_text.len(), "Rendering word cloud");

        let image = match self.renderer.render(
            &combined_text,
            &self.stop_words,
            self.canvas.width,
            self.canvas.height,
        ) {
            Ok(png) => png_data_uri(&png),
            Err(RenderError::NoWords) => {
                warn!(word = %word, "Matched text has no plottable words");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(QueryResult {
            image,
            count: matches.len(),
        })
    }
}
