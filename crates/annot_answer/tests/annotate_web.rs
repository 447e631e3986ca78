use annot_answer::{annotate_request, AnnotateRequest, AnswerNode, PassthroughPaths};
use annot_core::config::AnnotatorConfig;
use annot_core::domain::Approach;
use pretty_assertions::assert_eq;

const BLOG: &str = "https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html";
const DOCS: &str = "https://doc.rust-lang.org/std/sync/struct.LazyLock.html";

fn load_request() -> AnnotateRequest {
    let raw = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../fixtures/demo/web_request.json"
    ));
    serde_json::from_str(raw).expect("fixture parses")
}

#[test]
fn web_citations_are_indexed_by_first_appearance() {
    let out = annotate_request(&load_request(), &AnnotatorConfig::default(), &PassthroughPaths)
        .expect("annotate");

    assert_eq!(out.approach, Approach::WebRetrievalAnswer);
    assert_eq!(out.web_citations, vec![BLOG.to_string(), DOCS.to_string()]);
    let inline: Vec<(usize, &str)> = out
        .nodes
        .iter()
        .filter_map(|n| match n {
            AnswerNode::WebCitation { index, url } => Some((*index, url.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(inline, vec![(1, BLOG), (2, DOCS), (1, BLOG)]);

    assert!(out.work_citations.is_empty());
    assert_eq!(out.web_source_files.len(), 2);
    assert_eq!(out.web_source_files[DOCS], DOCS);
    assert_eq!(
        out.followup_questions,
        vec!["What replaced once_cell?".to_string()]
    );
}

#[test]
fn web_markers_open_without_referrer_and_misses_vanish() {
    let out = annotate_request(&load_request(), &AnnotatorConfig::default(), &PassthroughPaths)
        .expect("annotate");

    let marker = |index: usize, url: &str| {
        format!(
            r#"<a class="supContainerWeb" title="{url}" href="{url}" target="_blank" rel="noopener noreferrer"><sup>{index}</sup></a>"#
        )
    };
    let expected = format!(
        "Rust 1.80 stabilized LazyLock {}. The standard library docs {} describe it, as does the announcement {}. Ignore .",
        marker(1, BLOG),
        marker(2, DOCS),
        marker(1, BLOG)
    );
    assert_eq!(out.answer_html, expected);
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.warnings[0].details.as_deref(), Some("kind=web; key=url7"));
}
