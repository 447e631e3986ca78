use annot_core::domain::{short_name, AnnotationWarning, CitationLookupEntry, WorkCitation};

use super::{looks_like_moniker, normalize_moniker, CitationResolver};
use crate::fragments::{split_citations, Fragment};
use crate::linkify::link_urls;
use crate::model::{AnswerNode, CitationClick};

/// Page numbers follow JavaScript `Number()` rules: surrounding whitespace is
/// ignored, an empty value is page 0, `0x`/`0o`/`0b` prefixes are integers and
/// the only accepted infinities are spelled `Infinity`.
pub(crate) fn parse_page_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(n) = parse_radix_integer(trimmed) {
        return n;
    }
    // Rust also accepts `inf`, `infinity` and `nan` in any case.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

// `None` when `text` has no radix prefix; `Some(None)` when the digits after it
// are invalid. Signs are not allowed after a prefix.
fn parse_radix_integer(text: &str) -> Option<Option<f64>> {
    let prefix = text.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(None);
    }
    Some(digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    }))
}

impl CitationResolver<'_> {
    /// Resolve a bracket candidate in a work-document answer.
    ///
    /// Candidates that do not look like monikers come back as plain text; unknown
    /// monikers resolve to nothing.
    pub fn resolve_work_candidate(&mut self, candidate: &str) -> Option<AnswerNode> {
        if !looks_like_moniker(candidate) {
            return Some(AnswerNode::text(candidate));
        }
        let key = normalize_moniker(candidate, &self.config.work_moniker);
        let entry = self.lookup(self.work_lookup, "work", &key)?;
        let (index, short) = self.record_work(&key, entry);

        Some(AnswerNode::WorkCitation {
            index,
            title: short,
            click: CitationClick {
                file_path: self.paths.citation_file_path(&entry.citation),
                source_path: entry.source_path.clone(),
                page_number: entry.page_number.clone(),
            },
        })
    }

    /// Collect work citations from the `work_response` text of a comparison
    /// answer. Every bracket is a key here; the text itself is discarded.
    pub fn harvest_work_stream(&mut self, text: &str) {
        for fragment in split_citations(text) {
            let Fragment::Candidate(candidate) = fragment else {
                continue;
            };
            let key = self.comparison_key(candidate, &self.config.work_moniker);
            if let Some(entry) = self.lookup(self.work_lookup, "work", &key) {
                self.record_work(&key, entry);
            }
        }
    }

    /// Add `entry` to the work list unless its short name is already there.
    /// Returns the 1-based display index and the short name.
    fn record_work(&mut self, key: &str, entry: &CitationLookupEntry) -> (usize, String) {
        let short = short_name(&entry.citation, self.config.short_name_skip_segments);
        let ledger = &mut self.ledger;

        if let Some(pos) = ledger
            .work_citations
            .iter()
            .position(|c| c.short_name == short)
        {
            return (pos + 1, short);
        }

        ledger
            .work_source_files
            .insert(short.clone(), entry.source_path.clone());
        let index = ledger.work_citations.len() + 1;

        let page_number = parse_page_number(&entry.page_number);
        if page_number.is_none() {
            tracing::debug!(key, page = %entry.page_number, "page not found");
            ledger.warnings.push(
                AnnotationWarning::new(
                    "ANNOTATE_PAGE_NUMBER_INVALID",
                    "Citation page number is not numeric",
                )
                .with_details(format!("key={key}; page_number={}", entry.page_number)),
            );
        }

        let content = match entry.citation_content.as_deref() {
            Some(content) if !content.is_empty() => link_urls(content),
            _ => short.clone(),
        };
        let label = Some(entry.source_folder.clone()).filter(|f| !f.is_empty());

        ledger.work_citations.push(WorkCitation {
            content,
            label,
            index,
            short_name: short.clone(),
            page_number,
        });
        (index, short)
    }
}
