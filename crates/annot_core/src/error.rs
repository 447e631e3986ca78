use serde::{Deserialize, Serialize};
use std::fmt;

/// Single structured error shape returned by the annotator and the CLI surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn unsupported_approach(tag: impl fmt::Display) -> Self {
        Self::new(
            "ANNOTATE_APPROACH_UNSUPPORTED",
            "Approach is not supported by the answer annotator",
        )
        .with_details(format!("approach={tag}"))
    }

    pub fn missing_thought_chain(key: &str) -> Self {
        Self::new(
            "ANNOTATE_THOUGHT_CHAIN_MISSING",
            "Comparison answers require both thought chain responses",
        )
        .with_details(format!("key={key}"))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}
