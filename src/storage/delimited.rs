use crate::storage::corpus::{CorpusError, LoadReport};
use crate::storage::record::{CategoryField, RawRecord};
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

/// CSV row as pandas writes it; categories arrive as a list literal string.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    main_categories: Option<String>,
}

impl From<CsvRow> for RawRecord {
    fn from(row: CsvRow) -> Self {
        RawRecord {
            title: row.title,
            abstract_text: row.abstract_text,
            main_categories: row.main_categories.map(CategoryField::Literal),
        }
    }
}

/// Read a headered CSV export. Extra columns are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<LoadReport, CorpusError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut report = LoadReport::default();
    for (row_number, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        match row {
            Ok(row) => report.push(RawRecord::from(row).into_document()),
            Err(e) if e.is_io_error() => return Err(CorpusError::Csv(e)),
            Err(e) => {
                debug!(row = row_number + 1, error = %e, "Skipping undecodable CSV row");
                report.rejected += 1;
            }
        }
    }

    Ok(report)
}
