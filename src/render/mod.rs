pub mod cloud;
pub mod frequency;
pub mod glyphs;
pub mod layout;
pub mod palette;

pub use cloud::{BitmapCloudRenderer, CloudOptions};

use base64::Engine as _;
use std::collections::HashSet;
use thiserror::Error;

/// Common English function words and generic academic vocabulary left out of every cloud
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "and", "of", "to", "in", "a", "is", "that", "for", "on", "with", "this", "paper",
    "analysis", "using", "which", "from", "study", "research", "novel", "technique", "approach",
];

#[derive(Debug, Error)]
pub enum RenderError {
    /// Every token was a stop word or a number
    #[error("no words left to plot after stop-word filtering")]
    NoWords,

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Case-insensitive stop-word set
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS)
    }
}

/// Word-cloud rendering backend. Implementations build all drawing state per
/// call so one renderer can serve concurrent requests.
pub trait CloudRenderer: Send + Sync {
    /// Render `text` on a `width` x `height` canvas and return PNG bytes
    fn render(
        &self,
        text: &str,
        stop_words: &StopWords,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError>;
}

/// Wrap PNG bytes as an inline `data:` URI
pub fn png_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_match_any_case() {
        let stop_words = StopWords::default();
        assert!(DEFAULT_STOP_WORDS.iter().all(|w| stop_words.contains(w)));
        assert!(stop_words.contains("The"));
        assert!(stop_words.contains("RESEARCH"));
        assert!(!stop_words.contains("cats"));
    }

    #[test]
    fn data_uri_carries_base64_payload() {
        let uri = png_data_uri(&[0x89, b'P', b'N', b'G']);
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }
}
