use crate::storage::delimited::read_csv;
use crate::storage::jsonl::read_jsonl;
use crate::storage::record::Document;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("processed data not found at {0:?}")]
    DataUnavailable(PathBuf),

    #[error("unsupported corpus format {0:?}, expected .csv or .jsonl")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read CSV corpus: {0}")]
    Csv(#[from] csv::Error),
}

/// Documents accepted from a source plus the number of rows dropped on the way.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub documents: Vec<Document>,
    pub rejected: usize,
}

impl LoadReport {
    pub(crate) fn push(&mut self, document: Option<Document>) {
        match document {
            Some(doc) => self.documents.push(doc),
            None => self.rejected += 1,
        }
    }
}

/// Read-only, ordered document table held for the life of the process
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the processed dataset; the format follows the file extension.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        if !path.exists() {
            return Err(CorpusError::DataUnavailable(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let reader = BufReader::new(File::open(path)?);
        let report = match extension.as_deref() {
            Some("csv") => read_csv(reader)?,
            Some("jsonl") | Some("ndjson") => read_jsonl(reader)?,
            _ => return Err(CorpusError::UnsupportedFormat(path.to_path_buf())),
        };

        if report.rejected > 0 {
            warn!(
                rejected = report.rejected,
                "Dropped malformed rows while loading corpus"
            );
        }
        info!(documents = report.documents.len(), path = ?path, "Corpus loaded");

        Ok(Self::new(report.documents))
    }

    /// Startup entry point: a corpus that cannot be loaded degrades to an empty
    /// one so the service stays up and every query reports no matches.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(corpus) => corpus,
            Err(e @ CorpusError::DataUnavailable(_)) => {
                warn!("⚠️  {}. Dashboard functionality will be limited.", e);
                Self::empty()
            }
            Err(e) => {
                error!("Failed to load corpus: {}. Serving an empty corpus.", e);
                Self::empty()
            }
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Most frequent categories, count descending then name ascending
    pub fn top_categories(&self, limit: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for category in self.documents.iter().flat_map(|doc| doc.categories.iter()) {
            *counts.entry(category.as_str()).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(category, count)| (category.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }
}
