use crate::storage::corpus::{CorpusError, LoadReport};
use crate::storage::record::RawRecord;
use std::io::BufRead;
use tracing::debug;

/// Read a JSON Lines export, one paper object per line. Blank lines are skipped.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<LoadReport, CorpusError> {
    let mut report = LoadReport::default();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<RawRecord>(&line) {
            Ok(record) => report.push(record.into_document()),
            Err(e) => {
                debug!(line = line_number + 1, error = %e, "Skipping undecodable JSONL line");
                report.rejected += 1;
            }
        }
    }

    Ok(report)
}
