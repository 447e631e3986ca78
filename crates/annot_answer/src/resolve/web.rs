use annot_core::domain::CitationLookupEntry;

use super::{looks_like_moniker, normalize_moniker, CitationResolver};
use crate::fragments::{split_citations, Fragment};
use crate::model::AnswerNode;

impl CitationResolver<'_> {
    /// Resolve a bracket candidate in a web-retrieval answer.
    pub fn resolve_web_candidate(&mut self, candidate: &str) -> Option<AnswerNode> {
        if !looks_like_moniker(candidate) {
            return Some(AnswerNode::text(candidate));
        }
        let key = normalize_moniker(candidate, &self.config.web_moniker);
        let entry = self.lookup(self.web_lookup, "web", &key)?;
        let index = self.record_web(entry);

        Some(AnswerNode::WebCitation {
            index,
            url: entry.citation.clone(),
        })
    }

    /// Collect web citations from the `web_response` text of a comparison answer.
    pub fn harvest_web_stream(&mut self, text: &str) {
        for fragment in split_citations(text) {
            let Fragment::Candidate(candidate) = fragment else {
                continue;
            };
            let key = self.comparison_key(candidate, &self.config.web_moniker);
            if let Some(entry) = self.lookup(self.web_lookup, "web", &key) {
                self.record_web(entry);
            }
        }
    }

    // URLs are their own identity; the 1-based position is the display index.
    fn record_web(&mut self, entry: &CitationLookupEntry) -> usize {
        let ledger = &mut self.ledger;
        if let Some(pos) = ledger.web_citations.iter().position(|u| *u == entry.citation) {
            return pos + 1;
        }
        ledger.web_citations.push(entry.citation.clone());
        ledger
            .web_source_files
            .insert(entry.citation.clone(), entry.source_path.clone());
        ledger.web_citations.len()
    }
}
