//! Query-and-render pipeline: one word in, one word cloud and match count out.

pub mod matcher;
pub mod service;

pub use service::{CanvasSize, QueryError, WordCloudService};
