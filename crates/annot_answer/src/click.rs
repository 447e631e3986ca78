use crate::model::{AnnotatedAnswer, AnswerNode};

/// Receives activations of rendered work citation markers.
pub trait CitationClickHandler {
    fn on_citation_clicked(&self, file_path: &str, source_path: &str, page_number: &str);
}

impl<F> CitationClickHandler for F
where
    F: Fn(&str, &str, &str),
{
    fn on_citation_clicked(&self, file_path: &str, source_path: &str, page_number: &str) {
        self(file_path, source_path, page_number)
    }
}

impl AnnotatedAnswer {
    /// Forward an activation of the node at `position` to `handler`.
    ///
    /// Returns `false` when that node is not a work citation; web citations are
    /// plain links and text is inert.
    pub fn activate_citation(&self, position: usize, handler: &dyn CitationClickHandler) -> bool {
        match self.nodes.get(position) {
            Some(AnswerNode::WorkCitation { click, .. }) => {
                handler.on_citation_clicked(&click.file_path, &click.source_path, &click.page_number);
                true
            }
            _ => false,
        }
    }
}
