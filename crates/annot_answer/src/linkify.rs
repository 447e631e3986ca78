use std::sync::LazyLock;

use regex::Regex;

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("bare url pattern"));

/// Wrap every bare `http(s)://` URL in an anchor that opens a new browsing context.
///
/// A single trailing period is treated as sentence punctuation: it is dropped from
/// the link target but stays in the visible text.
pub fn link_urls(text: &str) -> String {
    BARE_URL
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let url = &caps[0];
            let target = url.strip_suffix('.').unwrap_or(url);
            format!(r#"<a href="{target}" target="_blank">{url}</a>"#)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_period_stays_out_of_target() {
        assert_eq!(
            link_urls("See https://example.com/a. More text"),
            r#"See <a href="https://example.com/a" target="_blank">https://example.com/a.</a> More text"#
        );
    }

    #[test]
    fn links_every_url_and_leaves_other_text() {
        assert_eq!(
            link_urls("http://a.test/x and https://b.test"),
            r#"<a href="http://a.test/x" target="_blank">http://a.test/x</a> and <a href="https://b.test" target="_blank">https://b.test</a>"#
        );
        assert_eq!(link_urls("no links here"), "no links here");
        assert_eq!(link_urls("ftp://a.test"), "ftp://a.test");
    }

    #[test]
    fn only_one_period_is_dropped() {
        assert_eq!(
            link_urls("https://x.test.."),
            r#"<a href="https://x.test." target="_blank">https://x.test..</a>"#
        );
    }
}
