//! Static HTML serialization of annotated answer nodes.
//!
//! Work citation markers carry their click payload as `data-*` attributes; the
//! host page attaches one delegated listener to the answer container and reads
//! them back.

use std::fmt::Write;

use crate::model::AnswerNode;

pub const WORK_CITATION_CLASS: &str = "supContainerWork";
pub const WEB_CITATION_CLASS: &str = "supContainerWeb";

/// Serialize nodes in order. Text is model-authored markup and is written as is.
pub fn render_html(nodes: &[AnswerNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            AnswerNode::Text { text } => out.push_str(text),
            AnswerNode::WorkCitation {
                index,
                title,
                click,
            } => {
                let _ = write!(
                    out,
                    r#"<a class="{WORK_CITATION_CLASS}" title="{}" data-citation-path="{}" data-source-path="{}" data-page-number="{}"><sup>{index}</sup></a>"#,
                    escape_attr(title),
                    escape_attr(&click.file_path),
                    escape_attr(&click.source_path),
                    escape_attr(&click.page_number),
                );
            }
            AnswerNode::WebCitation { index, url } => {
                let url = escape_attr(url);
                let _ = write!(
                    out,
                    r#"<a class="{WEB_CITATION_CLASS}" title="{url}" href="{url}" target="_blank" rel="noopener noreferrer"><sup>{index}</sup></a>"#,
                );
            }
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
