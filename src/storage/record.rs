use serde::Deserialize;

/// One paper from the processed dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub abstract_text: String,
    /// `title + " " + abstract`, the text queries are matched against
    pub text_content: String,
    pub categories: Vec<String>,
}

impl Document {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, abstract_text: impl Into<String>) -> Self {
        Self::with_categories(title, abstract_text, Vec::new())
    }

    pub fn with_categories(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        categories: Vec<String>,
    ) -> Self {
        let title = title.into();
        let abstract_text = abstract_text.into();
        let text_content = format!("{} {}", title, abstract_text);
        Self {
            title,
            abstract_text,
            text_content,
            categories,
        }
    }
}

/// Row shape shared by the CSV and JSONL sources. Every column is optional so a
/// malformed row is rejected by [`RawRecord::into_document`] instead of failing the load.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub main_categories: Option<CategoryField>,
}

/// `main_categories` is a real list in JSONL exports and a list literal
/// (`"['cs.AI', 'cs.LG']"`) in CSV exports.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoryField {
    List(Vec<String>),
    Literal(String),
}

impl CategoryField {
    pub fn into_categories(self) -> Vec<String> {
        match self {
            CategoryField::List(items) => items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            CategoryField::Literal(raw) => parse_category_literal(&raw),
        }
    }
}

impl RawRecord {
    /// Validate into a [`Document`]. Rows without a title or abstract never
    /// contribute text, so they are dropped here.
    pub fn into_document(self) -> Option<Document> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let abstract_text = self.abstract_text.filter(|a| !a.is_empty())?;
        let categories = self
            .main_categories
            .map(CategoryField::into_categories)
            .unwrap_or_default();

        Some(Document::with_categories(title, abstract_text, categories))
    }
}

/// Parse a list literal such as `['cs.AI', "cs.LG"]`. A bare value becomes a
/// single category.
pub fn parse_category_literal(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
