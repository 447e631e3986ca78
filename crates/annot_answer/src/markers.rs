use std::sync::LazyLock;

use regex::Regex;

/// `<<<question>>>`; the question itself never contains `>`.
static FOLLOWUP_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<<<([^>]+)>>>").expect("follow-up marker pattern"));

/// Remove follow-up question markers from an answer.
///
/// Returns the trimmed remaining text and the questions in order of appearance.
pub fn extract_followups(answer: &str) -> (String, Vec<String>) {
    let mut questions = Vec::new();
    let stripped = FOLLOWUP_MARKER.replace_all(answer, |caps: &regex::Captures<'_>| {
        questions.push(caps[1].to_string());
        ""
    });
    (stripped.trim().to_string(), questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markers_in_order() {
        let (text, questions) = extract_followups("Answer. <<<Q1>>><<<Q2>>>");
        assert_eq!(text, "Answer.");
        assert_eq!(questions, vec!["Q1".to_string(), "Q2".to_string()]);
    }

    #[test]
    fn markers_mid_text_are_removed_without_rejoining_whitespace() {
        let (text, questions) = extract_followups("  A <<<What next?>>> B  ");
        assert_eq!(text, "A  B");
        assert_eq!(questions, vec!["What next?".to_string()]);
    }

    #[test]
    fn text_without_markers_is_only_trimmed() {
        let (text, questions) = extract_followups("\n plain [File1] text \n");
        assert_eq!(text, "plain [File1] text");
        assert!(questions.is_empty());
        let (again, _) = extract_followups(&text);
        assert_eq!(again, text);
    }

    #[test]
    fn marker_inside_citation_brackets_still_counts() {
        let (text, questions) = extract_followups("x [<<<inner>>>] y");
        assert_eq!(text, "x [] y");
        assert_eq!(questions, vec!["inner".to_string()]);
    }
}
