use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Knobs for citation resolution. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Moniker prefix of work-document lookup keys (`File1`).
    pub work_moniker: String,
    /// Moniker prefix of web lookup keys (`url1`).
    pub web_moniker: String,
    /// Leading `/` segments of a storage path hidden from the short name.
    pub short_name_skip_segments: usize,
    /// Word the model sometimes uses instead of the moniker in comparison streams.
    pub compare_source_token: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            work_moniker: "File".to_string(),
            web_moniker: "url".to_string(),
            short_name_skip_segments: 4,
            compare_source_token: "source".to_string(),
        }
    }
}

/// Behaviour of the author/year tag suggestion catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Whether typed text may be offered and accepted as a brand new tag.
    pub allow_new: bool,
    pub item_limit: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            allow_new: false,
            item_limit: 10,
        }
    }
}

/// Top-level configuration document read by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub annotator: AnnotatorConfig,
    pub suggestions: SuggestionConfig,
}

impl Settings {
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::new("CONFIG_PARSE_FAILED", "Failed to parse configuration")
                .with_details(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let settings =
            Settings::from_json_str(r#"{"suggestions":{"allow_new":true}}"#).expect("parse");
        assert!(settings.suggestions.allow_new);
        assert_eq!(settings.suggestions.item_limit, 10);
        assert_eq!(settings.annotator, AnnotatorConfig::default());
    }

    #[test]
    fn malformed_document_is_structured_error() {
        let err = Settings::from_json_str("{not json").unwrap_err();
        assert_eq!(err.code, "CONFIG_PARSE_FAILED");
        assert!(err.details.is_some());
    }
}
