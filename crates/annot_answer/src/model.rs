use std::collections::BTreeMap;

use annot_core::domain::{
    AnnotationWarning, Approach, ApproachTag, CitationLookup, ThoughtChain, WorkCitation,
};
use annot_core::error::AppError;
use serde::{Deserialize, Serialize};

/// Everything a click on a work citation marker hands to the click handler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CitationClick {
    pub file_path: String,
    pub source_path: String,
    /// Raw page number from the lookup entry.
    pub page_number: String,
}

/// Format-agnostic piece of an annotated answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerNode {
    Text {
        text: String,
    },
    WorkCitation {
        index: usize,
        /// Short name shown on hover.
        title: String,
        click: CitationClick,
    },
    WebCitation {
        index: usize,
        url: String,
    },
}

impl AnswerNode {
    pub fn text(text: impl Into<String>) -> Self {
        AnswerNode::Text { text: text.into() }
    }

    pub fn citation_index(&self) -> Option<usize> {
        match self {
            AnswerNode::Text { .. } => None,
            AnswerNode::WorkCitation { index, .. } | AnswerNode::WebCitation { index, .. } => {
                Some(*index)
            }
        }
    }
}

/// Borrowed inputs of one annotation run.
#[derive(Debug, Clone, Copy)]
pub struct AnnotateInput<'a> {
    pub answer: &'a str,
    pub approach: Approach,
    pub work_citation_lookup: &'a CitationLookup,
    pub web_citation_lookup: &'a CitationLookup,
    pub thought_chain: &'a ThoughtChain,
}

/// Owned request as received over JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotateRequest {
    pub answer: String,
    pub approach: ApproachTag,
    #[serde(default)]
    pub work_citation_lookup: CitationLookup,
    #[serde(default)]
    pub web_citation_lookup: CitationLookup,
    #[serde(default)]
    pub thought_chain: ThoughtChain,
}

impl AnnotateRequest {
    pub fn as_input(&self) -> Result<AnnotateInput<'_>, AppError> {
        Ok(AnnotateInput {
            answer: &self.answer,
            approach: Approach::from_tag(&self.approach)?,
            work_citation_lookup: &self.work_citation_lookup,
            web_citation_lookup: &self.web_citation_lookup,
            thought_chain: &self.thought_chain,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotatedAnswer {
    pub nodes: Vec<AnswerNode>,
    /// `nodes` serialized as static markup.
    pub answer_html: String,
    pub work_citations: Vec<WorkCitation>,
    pub web_citations: Vec<String>,
    pub work_source_files: BTreeMap<String, String>,
    pub web_source_files: BTreeMap<String, String>,
    pub followup_questions: Vec<String>,
    pub approach: Approach,
    pub warnings: Vec<AnnotationWarning>,
}
