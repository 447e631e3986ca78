use std::sync::LazyLock;

use regex::Regex;

/// `[content]` with at least one character that is not `]`.
static CITATION_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("citation bracket pattern"));

/// One piece of answer text after splitting on bracket markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Literal prose, possibly empty.
    Text(&'a str),
    /// Bracket contents without the brackets.
    Candidate(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitState {
    Text,
    CandidateCitation,
}

/// Iterator over alternating text and candidate-citation fragments.
///
/// Always starts and ends with a `Text` fragment, so `"[a][b]"` yields
/// `Text(""), Candidate("a"), Text(""), Candidate("b"), Text("")`.
pub struct Fragments<'a> {
    text: &'a str,
    captures: regex::CaptureMatches<'static, 'a>,
    state: SplitState,
    cursor: usize,
    pending: Option<(usize, &'a str)>,
    done: bool,
}

pub fn split_citations(text: &str) -> Fragments<'_> {
    Fragments {
        text,
        captures: CITATION_BRACKET.captures_iter(text),
        state: SplitState::Text,
        cursor: 0,
        pending: None,
        done: false,
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.state {
            SplitState::Text => {
                let next_marker = self.captures.next().and_then(|caps| {
                    let whole = caps.get(0)?;
                    let inner = caps.get(1)?;
                    Some((whole.start(), whole.end(), inner.as_str()))
                });
                match next_marker {
                    Some((start, end, inner)) => {
                        let prose = &self.text[self.cursor..start];
                        self.pending = Some((end, inner));
                        self.state = SplitState::CandidateCitation;
                        Some(Fragment::Text(prose))
                    }
                    None => {
                        self.done = true;
                        Some(Fragment::Text(&self.text[self.cursor..]))
                    }
                }
            }
            SplitState::CandidateCitation => {
                let (end, inner) = self.pending.take()?;
                self.cursor = end;
                self.state = SplitState::Text;
                Some(Fragment::Candidate(inner))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<Fragment<'_>> {
        split_citations(text).collect()
    }

    #[test]
    fn alternates_text_and_candidates() {
        assert_eq!(
            collect("See [File1] and [note]."),
            vec![
                Fragment::Text("See "),
                Fragment::Candidate("File1"),
                Fragment::Text(" and "),
                Fragment::Candidate("note"),
                Fragment::Text("."),
            ]
        );
    }

    #[test]
    fn adjacent_markers_keep_empty_text_between() {
        assert_eq!(
            collect("[a][b]"),
            vec![
                Fragment::Text(""),
                Fragment::Candidate("a"),
                Fragment::Text(""),
                Fragment::Candidate("b"),
                Fragment::Text(""),
            ]
        );
    }

    #[test]
    fn plain_text_is_single_fragment() {
        assert_eq!(collect("no markers"), vec![Fragment::Text("no markers")]);
        assert_eq!(collect(""), vec![Fragment::Text("")]);
        assert_eq!(collect("empty [] brackets"), vec![Fragment::Text("empty [] brackets")]);
    }

    #[test]
    fn opening_bracket_may_appear_inside_candidate() {
        assert_eq!(
            collect("x [[y] z"),
            vec![Fragment::Text("x "), Fragment::Candidate("[y"), Fragment::Text(" z")]
        );
    }
}
