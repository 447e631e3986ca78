pub mod config;
pub mod domain;
pub mod error;
pub mod metadata;
pub mod suggest;

#[cfg(test)]
mod tests {
    use super::error::AppError;

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new("ANNOTATE_TEST", "annotate failed").with_retryable(false);
        assert_eq!(err.code, "ANNOTATE_TEST");
        assert_eq!(err.message, "annotate failed");
        assert_eq!(err.retryable, false);
    }

    #[test]
    fn app_error_display_includes_details() {
        let err = AppError::missing_thought_chain("web_response");
        assert_eq!(
            err.to_string(),
            "[ANNOTATE_THOUGHT_CHAIN_MISSING] Comparison answers require both thought chain responses (key=web_response)"
        );
    }

    #[test]
    fn app_error_serializes_with_stable_field_names() {
        let err = AppError::unsupported_approach("read_decompose_ask");
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json["code"], "ANNOTATE_APPROACH_UNSUPPORTED");
        assert_eq!(json["details"], "approach=read_decompose_ask");
        assert_eq!(json["retryable"], false);
    }
}
