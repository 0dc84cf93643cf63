//! Docref extraction: the abstract + discussion prose attached to one
//! declaration node, flattened into a single documentation line.
//!
//! The discussion subtree may embed an inline code sample
//! (`codesample clear`); it is excluded before text extraction, and the
//! literal `Discussion` label the markup prepends is stripped. Internal
//! newlines collapse to single spaces so one declaration yields one
//! comment line. Empty prose yields an empty string; the renderer emits
//! zero lines for it, never a marker-only block.

use crate::pipeline::dom::{collect_text, text_excluding};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

static ABSTRACT: Lazy<Selector> = Lazy::new(|| Selector::parse("p.abstract").unwrap());
static DISCUSSION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.api.discussion").unwrap());

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// Collapse internal newlines to single spaces and trim.
///
/// Also used wherever the upstream markup supplies multi-line `dd`
/// description text that must land on one comment line.
pub(crate) fn collapse_lines(s: &str) -> String {
    LINE_BREAKS.replace_all(s, " ").trim().to_string()
}

/// Extract the documentation prose for one declaration node.
pub fn extract_docref(node: ElementRef<'_>) -> String {
    let mut prose = node
        .select(&ABSTRACT)
        .next()
        .map(collect_text)
        .unwrap_or_default();

    if let Some(discussion) = node.select(&DISCUSSION).next() {
        let text = text_excluding(discussion, "codesample");
        let text = text.trim_start();
        let text = text.strip_prefix("Discussion").unwrap_or(text);
        prose.push('\n');
        prose.push_str(text);
    }

    collapse_lines(&prose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    static NODE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.api.method").unwrap());

    fn docref_of(body: &str) -> String {
        let html = Html::parse_fragment(&format!(r#"<div class="api method">{body}</div>"#));
        let node = html.select(&NODE).next().unwrap();
        extract_docref(node)
    }

    #[test]
    fn abstract_only() {
        assert_eq!(docref_of(r#"<p class="abstract">Returns the length.</p>"#), "Returns the length.");
    }

    #[test]
    fn abstract_and_discussion() {
        let got = docref_of(concat!(
            r#"<p class="abstract">Returns the length.</p>"#,
            r#"<div class="api discussion">Discussion
The length is counted in UTF-16 units.</div>"#,
        ));
        assert_eq!(
            got,
            "Returns the length. The length is counted in UTF-16 units."
        );
    }

    #[test]
    fn code_sample_is_removed() {
        let got = docref_of(concat!(
            r#"<p class="abstract">Draws the view.</p>"#,
            r#"<div class="api discussion">Discussion
Override this.<div class="codesample clear"><pre>[view draw];</pre></div></div>"#,
        ));
        assert_eq!(got, "Draws the view. Override this.");
    }

    #[test]
    fn newlines_collapse_to_single_spaces() {
        let got = docref_of(
            "<p class=\"abstract\">First line.\nSecond line.\nThird.</p>",
        );
        assert_eq!(got, "First line. Second line. Third.");
    }

    #[test]
    fn empty_prose_yields_empty_string() {
        assert_eq!(docref_of(""), "");
        assert_eq!(docref_of(r#"<p class="abstract">   </p>"#), "");
    }
}
