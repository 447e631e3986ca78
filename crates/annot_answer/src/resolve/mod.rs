//! Citation resolution: candidate keys in, citation lists and inline nodes out.
//!
//! A [`CitationResolver`] lives for exactly one annotation run. It owns the
//! accumulating [`CitationLedger`] and borrows both lookup tables.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use annot_core::config::AnnotatorConfig;
use annot_core::domain::{AnnotationWarning, CitationLookup, CitationLookupEntry, WorkCitation};
use regex::Regex;

mod web;
mod work;

/// Maps a work citation's storage path to the path the click handler should open.
pub trait FilePathResolver {
    fn citation_file_path(&self, citation: &str) -> String;
}

impl<F> FilePathResolver for F
where
    F: Fn(&str) -> String,
{
    fn citation_file_path(&self, citation: &str) -> String {
        self(citation)
    }
}

/// Hands the storage path through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughPaths;

impl FilePathResolver for PassthroughPaths {
    fn citation_file_path(&self, citation: &str) -> String {
        citation.to_string()
    }
}

/// Word characters ending in a digit: the only shape treated as a moniker in
/// single-source answers.
static MONIKER_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+[0-9]$").expect("moniker shape pattern"));

pub fn looks_like_moniker(candidate: &str) -> bool {
    MONIKER_SHAPE.is_match(candidate)
}

/// Rewrite whatever word the model used (`source1`, `doc1`) onto `prefix`,
/// keeping the trailing number.
///
/// The whole digit run is kept, so `source12` maps to `File12`. The upstream
/// answer parser captured a single digit and would have looked up `File2`.
pub fn normalize_moniker(candidate: &str, prefix: &str) -> String {
    let word_len = candidate
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .len();
    format!("{prefix}{}", &candidate[word_len..])
}

/// Citations collected so far in one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitationLedger {
    pub work_citations: Vec<WorkCitation>,
    pub web_citations: Vec<String>,
    pub work_source_files: BTreeMap<String, String>,
    pub web_source_files: BTreeMap<String, String>,
    pub warnings: Vec<AnnotationWarning>,
}

pub struct CitationResolver<'a> {
    config: &'a AnnotatorConfig,
    paths: &'a dyn FilePathResolver,
    work_lookup: &'a CitationLookup,
    web_lookup: &'a CitationLookup,
    ledger: CitationLedger,
}

impl<'a> CitationResolver<'a> {
    pub fn new(
        config: &'a AnnotatorConfig,
        paths: &'a dyn FilePathResolver,
        work_lookup: &'a CitationLookup,
        web_lookup: &'a CitationLookup,
    ) -> Self {
        Self {
            config,
            paths,
            work_lookup,
            web_lookup,
            ledger: CitationLedger::default(),
        }
    }

    pub fn into_ledger(self) -> CitationLedger {
        self.ledger
    }

    /// Comparison streams cite `[source1]` loosely; swap the first occurrence of
    /// the configured token for `moniker`. An empty token leaves keys untouched.
    fn comparison_key(&self, candidate: &str, moniker: &str) -> String {
        let token = self.config.compare_source_token.as_str();
        if token.is_empty() {
            return candidate.to_string();
        }
        candidate.replacen(token, moniker, 1)
    }

    fn lookup<'t>(
        &mut self,
        table: &'t CitationLookup,
        kind: &str,
        key: &str,
    ) -> Option<&'t CitationLookupEntry> {
        let entry = table.get(key);
        if entry.is_none() {
            tracing::debug!(kind, key, "citation not found");
            self.ledger.warnings.push(
                AnnotationWarning::new(
                    "ANNOTATE_CITATION_NOT_FOUND",
                    "Answer references a citation missing from the lookup table",
                )
                .with_details(format!("kind={kind}; key={key}")),
            );
        }
        entry
    }
}
