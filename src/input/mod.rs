use std::path::Path;

use thiserror::Error;

pub mod dedup;
pub mod reader;
pub mod table;

use dedup::{DuplicatePolicy, resolve_duplicates};
use reader::{detect_format, open_maybe_gz};
use table::read_records;

use crate::model::labels::LabelSet;
use crate::model::record::Record;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported input format: {0} (use .csv, .tsv or .txt, optionally .gz)")]
    UnsupportedFormat(String),
    #[error("input file {0} has no data rows")]
    Empty(String),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("invalid input at line {line}: {message}")]
    InvalidInput { line: u64, message: String },
    #[error("duplicate team names: {}", .0.join(", "))]
    DuplicateTeams(Vec<String>),
}

#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// `None` skips the category/station membership check.
    pub labels: Option<LabelSet>,
    pub duplicates: DuplicatePolicy,
}

/// Loads a score sheet and returns validated, deduplicated records.
pub fn load_records(path: &Path, opts: &IngestOptions) -> Result<Vec<Record>, InputError> {
    let format = detect_format(path)?;
    let reader = open_maybe_gz(path)?;
    let records = read_records(reader, format, opts.labels.as_ref())?;
    if records.is_empty() {
        return Err(InputError::Empty(path.display().to_string()));
    }
    let n_read = records.len();
    let records = resolve_duplicates(records, opts.duplicates)?;

    tracing::info!(
        path = %path.display(),
        n_read,
        n_kept = records.len(),
        "loaded score sheet"
    );
    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
