//! Shared DOM traversal helpers over `scraper`.
//!
//! The source markup leans heavily on *positional sibling lists*: the i-th
//! `<h3>` heading pairs with the i-th `<p class="abstract">` and the i-th
//! `<pre class="declaration">` under the same parent. CSS selectors cannot
//! express the parent/sibling axes the upstream layout assumes, so the
//! extractors collect direct-child element lists here and index into them.
//!
//! The upstream generator unlinked DOM nodes mid-traversal to stop a second
//! pass from re-emitting consumed struct headings. The document tree here is
//! immutable; [`SectionState`] carries the consumed-marker set (and the flat
//! positional description counter the struct extractor shares across blocks)
//! alongside it instead.

use ego_tree::NodeId;
use scraper::{ElementRef, Selector};
use std::collections::HashSet;

/// Concatenated descendant text of an element.
pub(crate) fn collect_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Text of the first selector match under `scope`, if any.
pub(crate) fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(collect_text)
}

/// True when the element carries every class in `required`.
pub(crate) fn has_classes(el: ElementRef<'_>, required: &[&str]) -> bool {
    required
        .iter()
        .all(|c| el.value().classes().any(|k| k == *c))
}

/// Direct child elements of `scope`, skipping text and comment nodes.
pub(crate) fn child_elements<'a>(
    scope: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> {
    scope.children().filter_map(ElementRef::wrap)
}

/// Direct children matching a tag name and class set, in document order.
/// This is the positional-sibling-list primitive described above.
pub(crate) fn direct_children<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    classes: &[&str],
) -> Vec<ElementRef<'a>> {
    child_elements(scope)
        .filter(|el| el.value().name() == tag && has_classes(*el, classes))
        .collect()
}

/// Descendant text of `scope`, excluding any subtree whose root element
/// carries `excluded_class`. Used to drop inline code samples from
/// discussion prose without mutating the tree.
pub(crate) fn text_excluding(scope: ElementRef<'_>, excluded_class: &str) -> String {
    let mut out = String::new();
    for node in scope.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let excluded = node
            .ancestors()
            .take_while(|a| a.id() != scope.id())
            .filter_map(ElementRef::wrap)
            .any(|el| el.value().classes().any(|c| c == excluded_class));
        if !excluded {
            out.push_str(&text.text);
        }
    }
    out
}

/// Traversal state scoped to one constants / data-types section.
///
/// `consumed` replaces the upstream node-unlinking trick: a heading marker
/// processed (or deliberately skipped) once is never revisited, so invoking
/// the struct extractor a second time over the same subtree emits nothing.
/// `member_pos` is the running index into the section's flat description
/// list; it is shared across every struct block in the section and never
/// resets mid-section.
#[derive(Debug, Default)]
pub(crate) struct SectionState {
    pub(crate) consumed: HashSet<NodeId>,
    pub(crate) member_pos: usize,
}

impl SectionState {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use scraper::Html;

    static DIV: Lazy<Selector> = Lazy::new(|| Selector::parse("div.outer").unwrap());

    #[test]
    fn text_excluding_drops_tagged_subtree() {
        let html = Html::parse_fragment(
            r#"<div class="outer">keep <div class="codesample clear"><code>drop()</code></div> tail</div>"#,
        );
        let el = html.select(&DIV).next().unwrap();
        assert_eq!(text_excluding(el, "codesample"), "keep  tail");
    }

    #[test]
    fn direct_children_filters_tag_and_classes() {
        let html = Html::parse_fragment(
            r#"<div class="outer"><p class="abstract">a</p><p>b</p><span class="abstract">c</span><p class="abstract">d</p></div>"#,
        );
        let el = html.select(&DIV).next().unwrap();
        let found = direct_children(el, "p", &["abstract"]);
        let texts: Vec<String> = found.into_iter().map(collect_text).collect();
        assert_eq!(texts, vec!["a", "d"]);
    }

    #[test]
    fn direct_children_ignores_nested_matches() {
        let html = Html::parse_fragment(
            r#"<div class="outer"><div><p class="abstract">nested</p></div></div>"#,
        );
        let el = html.select(&DIV).next().unwrap();
        assert!(direct_children(el, "p", &["abstract"]).is_empty());
    }

    #[test]
    fn section_state_tracks_consumed_ids() {
        let html = Html::parse_fragment(r#"<div class="outer"><h3>S</h3></div>"#);
        let el = html.select(&DIV).next().unwrap();
        let h3 = child_elements(el).next().unwrap();
        let mut state = SectionState::new();
        assert!(state.consumed.insert(h3.id()));
        assert!(!state.consumed.insert(h3.id()));
    }
}
