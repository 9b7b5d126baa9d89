pub mod corpus;
pub mod delimited;
pub mod jsonl;
pub mod record;

pub use corpus::Corpus;
pub use record::Document;
