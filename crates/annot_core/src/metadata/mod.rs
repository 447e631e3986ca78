//! Per-document metadata loaded from a `filename,key,value` CSV.
//!
//! Keys become identifier-safe so the grouped documents can be stored and queried
//! as ordinary fields downstream.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::AnnotationWarning;
use crate::error::AppError;

const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Metadata grouped by document filename, then by sanitized key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub documents: BTreeMap<String, BTreeMap<String, String>>,
    pub rows_loaded: usize,
    pub warnings: Vec<AnnotationWarning>,
}

/// Only `.csv` files (any case) carry metadata.
pub fn is_metadata_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Replace anything that is not alphanumeric or `_` with `_`, then prefix `_` when
/// the result starts with a digit or is a reserved word.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if RESERVED_WORDS.contains(&out.as_str()) {
        out.insert(0, '_');
    }
    out
}

/// Group a metadata CSV by filename. The first row is a header. Rows without
/// exactly three columns are skipped with a warning; a repeated key for the same
/// file keeps the last value.
pub fn group_metadata_csv(csv_text: &str) -> Result<DocumentMetadata, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut out = DocumentMetadata::default();
    for result in rdr.records() {
        let row = result.map_err(|e| {
            AppError::new("METADATA_CSV_PARSE_FAILED", "Failed to parse metadata CSV row")
                .with_details(e.to_string())
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() != 3 {
            tracing::warn!(line, columns = row.len(), "skipping metadata row");
            out.warnings.push(
                AnnotationWarning::new(
                    "METADATA_ROW_SKIPPED",
                    "Metadata row must have filename, key and value columns",
                )
                .with_details(format!("line={line}; columns={}", row.len())),
            );
            continue;
        }

        out.documents
            .entry(row[0].to_string())
            .or_default()
            .insert(sanitize_identifier(&row[1]), row[2].to_string());
        out.rows_loaded += 1;
    }

    tracing::debug!(
        documents = out.documents.len(),
        rows = out.rows_loaded,
        skipped = out.warnings.len(),
        "grouped metadata"
    );
    Ok(out)
}
