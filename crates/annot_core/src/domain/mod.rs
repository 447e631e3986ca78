use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Thought chain entry holding the work-document half of a comparison answer.
pub const WORK_RESPONSE_KEY: &str = "work_response";
/// Thought chain entry holding the web half of a comparison answer.
pub const WEB_RESPONSE_KEY: &str = "web_response";

/// Generation mode that produced an answer. Decides which citation path runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    DirectAnswer,
    RetrievalAnswer,
    WebRetrievalAnswer,
    CompareWorkWithWeb,
    CompareWebWithWork,
}

impl Approach {
    pub fn as_str(self) -> &'static str {
        match self {
            Approach::DirectAnswer => "direct_answer",
            Approach::RetrievalAnswer => "retrieval_answer",
            Approach::WebRetrievalAnswer => "web_retrieval_answer",
            Approach::CompareWorkWithWeb => "compare_work_with_web",
            Approach::CompareWebWithWork => "compare_web_with_work",
        }
    }

    /// Map the numeric approach code used by the chat API.
    ///
    /// Codes 0 and 2 name retrieval pipelines whose answers this annotator never
    /// renders, so they are rejected alongside unknown codes.
    pub fn from_code(code: i64) -> Result<Self, AppError> {
        match code {
            1 => Ok(Approach::RetrievalAnswer),
            3 => Ok(Approach::DirectAnswer),
            4 => Ok(Approach::WebRetrievalAnswer),
            5 => Ok(Approach::CompareWorkWithWeb),
            6 => Ok(Approach::CompareWebWithWork),
            other => Err(AppError::unsupported_approach(other)),
        }
    }

    pub fn from_tag(tag: &ApproachTag) -> Result<Self, AppError> {
        match tag {
            ApproachTag::Code(code) => Self::from_code(*code),
            ApproachTag::Name(name) => name.parse(),
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Approach::CompareWorkWithWeb | Approach::CompareWebWithWork
        )
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Approach {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "direct_answer" => Ok(Approach::DirectAnswer),
            "retrieval_answer" => Ok(Approach::RetrievalAnswer),
            "web_retrieval_answer" => Ok(Approach::WebRetrievalAnswer),
            "compare_work_with_web" => Ok(Approach::CompareWorkWithWeb),
            "compare_web_with_work" => Ok(Approach::CompareWebWithWork),
            other => Err(AppError::unsupported_approach(other)),
        }
    }
}

/// Approach as it arrives on the wire: either the API's numeric code or a name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ApproachTag {
    Code(i64),
    Name(String),
}

/// One entry of a citation lookup table, keyed by the moniker the model was given
/// (`File1`, `url2`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CitationLookupEntry {
    #[serde(default)]
    pub source_folder: String,
    #[serde(default)]
    pub citation_content: Option<String>,
    /// Storage path or URL of the cited document.
    pub citation: String,
    pub source_path: String,
    // Not guaranteed numeric.
    #[serde(default)]
    pub page_number: String,
}

pub type CitationLookup = BTreeMap<String, CitationLookupEntry>;

/// Auxiliary texts supplied alongside comparison answers.
pub type ThoughtChain = BTreeMap<String, String>;

/// A de-duplicated work-document citation ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkCitation {
    pub content: String,
    pub label: Option<String>,
    /// 1-based display number.
    pub index: usize,
    pub short_name: String,
    /// `None` when the lookup entry's page number is not numeric.
    pub page_number: Option<f64>,
}

/// Non-fatal finding recorded while annotating an answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotationWarning {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl AnnotationWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Trailing portion of a storage path used as a work citation's display name and
/// de-duplication key. The leading segments hold scheme, host and container.
pub fn short_name(citation: &str, skip_segments: usize) -> String {
    citation
        .split('/')
        .skip(skip_segments)
        .collect::<Vec<_>>()
        .join("/")
}
