use annot_core::config::AnnotatorConfig;
use annot_core::domain::{Approach, ThoughtChain, WEB_RESPONSE_KEY, WORK_RESPONSE_KEY};
use annot_core::error::AppError;

use crate::fragments::{split_citations, Fragment};
use crate::markers::extract_followups;
use crate::model::{AnnotateInput, AnnotateRequest, AnnotatedAnswer, AnswerNode};
use crate::render::render_html;
use crate::resolve::{CitationResolver, FilePathResolver};

/// Turn a raw model answer into display-ready nodes, citation lists and follow-up
/// questions.
///
/// Unknown citation keys and unparsable page numbers are not errors: the marker is
/// dropped and a warning is recorded. A comparison answer without both thought
/// chain responses is rejected before any text is processed.
pub fn annotate(
    input: &AnnotateInput<'_>,
    config: &AnnotatorConfig,
    paths: &dyn FilePathResolver,
) -> Result<AnnotatedAnswer, AppError> {
    let streams = if input.approach.is_comparison() {
        Some((
            thought_chain_entry(input.thought_chain, WORK_RESPONSE_KEY)?,
            thought_chain_entry(input.thought_chain, WEB_RESPONSE_KEY)?,
        ))
    } else {
        None
    };

    let (text, followup_questions) = extract_followups(input.answer);
    let mut resolver = CitationResolver::new(
        config,
        paths,
        input.work_citation_lookup,
        input.web_citation_lookup,
    );

    let mut nodes: Vec<AnswerNode> = Vec::new();
    match input.approach {
        Approach::DirectAnswer => nodes.push(AnswerNode::text(text)),
        Approach::RetrievalAnswer | Approach::WebRetrievalAnswer => {
            for fragment in split_citations(&text) {
                let node = match fragment {
                    Fragment::Text(prose) => Some(AnswerNode::text(prose)),
                    Fragment::Candidate(c) if input.approach == Approach::RetrievalAnswer => {
                        resolver.resolve_work_candidate(c)
                    }
                    Fragment::Candidate(c) => resolver.resolve_web_candidate(c),
                };
                push_node(&mut nodes, node);
            }
        }
        Approach::CompareWorkWithWeb | Approach::CompareWebWithWork => {
            // Comparison answers show no inline markers; citations come from the
            // two thought chain responses instead.
            for fragment in split_citations(&text) {
                if let Fragment::Text(prose) = fragment {
                    push_node(&mut nodes, Some(AnswerNode::text(prose)));
                }
            }
            if let Some((work_response, web_response)) = streams {
                resolver.harvest_work_stream(work_response);
                resolver.harvest_web_stream(web_response);
            }
        }
    }

    let ledger = resolver.into_ledger();
    tracing::debug!(
        approach = %input.approach,
        work = ledger.work_citations.len(),
        web = ledger.web_citations.len(),
        followups = followup_questions.len(),
        warnings = ledger.warnings.len(),
        "annotated answer"
    );

    Ok(AnnotatedAnswer {
        answer_html: render_html(&nodes),
        nodes,
        work_citations: ledger.work_citations,
        web_citations: ledger.web_citations,
        work_source_files: ledger.work_source_files,
        web_source_files: ledger.web_source_files,
        followup_questions,
        approach: input.approach,
        warnings: ledger.warnings,
    })
}

/// Resolve the wire approach tag, then annotate.
pub fn annotate_request(
    request: &AnnotateRequest,
    config: &AnnotatorConfig,
    paths: &dyn FilePathResolver,
) -> Result<AnnotatedAnswer, AppError> {
    let input = request.as_input()?;
    annotate(&input, config, paths)
}

fn thought_chain_entry<'a>(chain: &'a ThoughtChain, key: &str) -> Result<&'a str, AppError> {
    chain
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| AppError::missing_thought_chain(key))
}

// Adjacent text is merged so the node list mirrors what a reader sees.
fn push_node(nodes: &mut Vec<AnswerNode>, node: Option<AnswerNode>) {
    match node {
        Some(AnswerNode::Text { text }) => {
            if text.is_empty() {
                return;
            }
            if let Some(AnswerNode::Text { text: last }) = nodes.last_mut() {
                last.push_str(&text);
            } else {
                nodes.push(AnswerNode::Text { text });
            }
        }
        Some(other) => nodes.push(other),
        None => {}
    }
}
