//! Page classification and per-page orchestration.
//!
//! The page kind is decided once from the `<title>` suffix and carried as a
//! closed enum; the orchestrator matches on it exhaustively, so an
//! unrecognized page is an ordinary, testable outcome rather than a
//! fallthrough. Class pages additionally require a resolvable superclass
//! from the spec-sheet table, protocol pages require an abstract paragraph,
//! and the `NSObject` protocol page is skipped unconditionally so it cannot
//! shadow the root class definition of the same name.

use crate::pipeline::constant::extract_constants;
use crate::pipeline::docref::collapse_lines;
use crate::pipeline::dom::{child_elements, collect_text, SectionState};
use crate::pipeline::function::extract_functions;
use crate::pipeline::method::extract_methods;
use crate::pipeline::property::extract_properties;
use crate::pipeline::structs::extract_structs_in;
use crate::render::render_page;
use crate::symbol::{ApiClass, ApiProtocol, PageBody, PageKind, PageStub, ReferenceBody};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("html > head > title").unwrap());
static ABSTRACT: Lazy<Selector> = Lazy::new(|| Selector::parse("p.abstract").unwrap());
// html5ever inserts tbody, so specbox rows need the descendant axis.
static SPECBOX_ROWS: Lazy<Selector> = Lazy::new(|| Selector::parse("table.specbox tr").unwrap());
static FRAMEWORK_PATH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.FrameworkPath").unwrap());
static FUNCTIONS_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"section > a[title="Functions"]"#).unwrap());
static DATA_TYPES_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"section > a[title="Data Types"]"#).unwrap());

static CLASS_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s*Class Reference$").unwrap());
static PROTOCOL_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*Protocol Reference$").unwrap());
static REFERENCE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s+Reference$").unwrap());

static INHERITS_FROM: Lazy<Regex> = Lazy::new(|| Regex::new(r"Inherits from\s*(\S+)").unwrap());

/// Classify one parsed document from its title suffix. Class and protocol
/// titles are tried before the bare reference suffix they both end in.
pub fn classify(doc: &Html) -> PageKind {
    let Some(title) = doc.select(&TITLE).next().map(collect_text) else {
        return PageKind::Unrecognized;
    };
    let title = title.trim();

    if let Some(caps) = CLASS_TITLE.captures(title) {
        return PageKind::Class {
            name: caps[1].trim().to_string(),
        };
    }
    if let Some(caps) = PROTOCOL_TITLE.captures(title) {
        return PageKind::Protocol {
            name: caps[1].trim().to_string(),
        };
    }
    if let Some(caps) = REFERENCE_TITLE.captures(title) {
        return PageKind::Reference {
            name: caps[1].trim().to_string(),
        };
    }
    PageKind::Unrecognized
}

/// Extract the whole typed symbol model for one parsed document, or `None`
/// when the page produces no stub.
pub fn extract_page(doc: &Html) -> Option<PageStub> {
    let body = match classify(doc) {
        PageKind::Class { name } => PageBody::Class(build_class(name, doc)?),
        PageKind::Protocol { name } => PageBody::Protocol(build_protocol(name, doc)?),
        PageKind::Reference { .. } => PageBody::Reference(build_reference(doc)),
        PageKind::Unrecognized => {
            debug!("unrecognized page title shape, skipping");
            return None;
        }
    };
    Some(PageStub {
        framework_path: find_framework_path(doc),
        body,
    })
}

/// Parse raw HTML and render its stub text. `None` means the page is
/// skipped, not that an error occurred.
pub fn generate_stub(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    extract_page(&doc).map(|stub| render_page(&stub))
}

fn build_class(name: String, doc: &Html) -> Option<ApiClass> {
    // The superclass is mandatory. A page without an "Inherits from" row
    // cannot be safely stubbed; the literal "none" marks a root class.
    let inherits = doc
        .select(&SPECBOX_ROWS)
        .find_map(|row| {
            let text = collect_text(row);
            INHERITS_FROM
                .captures(&text)
                .map(|caps| caps[1].to_string())
        })?;
    let superclass = (inherits != "none").then_some(inherits);

    let constants = extract_constants(doc);
    Some(ApiClass {
        name,
        superclass,
        abstract_text: page_abstract(doc),
        properties: extract_properties(doc),
        methods: extract_methods(doc),
        constants: constants.constants,
        structs: constants.structs,
    })
}

fn build_protocol(name: String, doc: &Html) -> Option<ApiProtocol> {
    if doc.select(&ABSTRACT).next().is_none() {
        debug!("protocol page {name:?} has no abstract, skipping");
        return None;
    }
    // The root object type's canonical class page must win over the
    // protocol of the same name.
    if name == "NSObject" {
        debug!("skipping NSObject protocol page");
        return None;
    }

    let constants = extract_constants(doc);
    Some(ApiProtocol {
        name,
        abstract_text: page_abstract(doc),
        properties: extract_properties(doc),
        methods: extract_methods(doc),
        constants: constants.constants,
        structs: constants.structs,
    })
}

fn build_reference(doc: &Html) -> ReferenceBody {
    let mut body = ReferenceBody::default();
    if let Some(scope) = anchored_section(doc, &FUNCTIONS_ANCHOR) {
        body.functions = extract_functions(scope);
    }
    if let Some(scope) = anchored_section(doc, &DATA_TYPES_ANCHOR) {
        let mut state = SectionState::new();
        body.structs = extract_structs_in(scope, &mut state);
    }
    body
}

/// The section element owning a heading anchor; sibling headings and
/// declarations under it form the extraction scope.
fn anchored_section<'a>(doc: &'a Html, anchor: &Selector) -> Option<ElementRef<'a>> {
    let a = doc.select(anchor).next()?;
    a.parent().and_then(ElementRef::wrap)
}

fn page_abstract(doc: &Html) -> String {
    doc.select(&ABSTRACT)
        .next()
        .map(|p| collapse_lines(&collect_text(p)))
        .unwrap_or_default()
}

/// The framework path lives in a spec-sheet row: the marker span's
/// grandparent row holds the value in its second cell.
fn find_framework_path(doc: &Html) -> Option<String> {
    let span = doc.select(&FRAMEWORK_PATH).next()?;
    let row = span
        .ancestors()
        .filter_map(ElementRef::wrap)
        .nth(2)?;
    let cell = child_elements(row).nth(1)?;
    let path = collect_text(cell).trim().to_string();
    (!path.is_empty()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::TypeCategory;

    fn doc(title: &str, body: &str) -> Html {
        Html::parse_document(&format!(
            "<html><head><title>{title}</title></head><body>{body}</body></html>"
        ))
    }

    const SPECBOX: &str = concat!(
        r#"<table class="specbox">"#,
        r#"<tr><td>Inherits from</td><td>Bar</td></tr>"#,
        r#"<tr><td>Availability</td><td>Available always.</td></tr>"#,
        "</table>"
    );

    #[test]
    fn titles_classify_into_the_closed_enum() {
        let cases = [
            ("Foo Class Reference", PageKind::Class { name: "Foo".into() }),
            (
                "NSCoding Protocol Reference",
                PageKind::Protocol {
                    name: "NSCoding".into(),
                },
            ),
            (
                "Foundation Functions Reference",
                PageKind::Reference {
                    name: "Foundation Functions".into(),
                },
            ),
            ("Release Notes", PageKind::Unrecognized),
        ];
        for (title, expected) in cases {
            assert_eq!(classify(&doc(title, "")), expected, "title {title:?}");
        }
    }

    #[test]
    fn class_page_with_property() {
        // A read-only String property on a class extending Bar.
        let html = doc(
            "Foo Class Reference",
            &format!(
                r#"{SPECBOX}<p class="abstract">A foo.</p><div class="api propertyObjC"><p class="abstract">The name.</p><div class="declaration"><div class="declaration">@property(readonly) NSString *name;</div></div></div>"#
            ),
        );
        let stub = extract_page(&html).unwrap();
        let PageBody::Class(class) = &stub.body else {
            panic!("expected a class body");
        };
        assert_eq!(class.name, "Foo");
        assert_eq!(class.superclass.as_deref(), Some("Bar"));
        assert_eq!(class.abstract_text, "A foo.");
        assert_eq!(class.properties.len(), 1);
        assert_eq!(class.properties[0].ty, TypeCategory::String);
        assert!(class.properties[0].readonly);
    }

    #[test]
    fn class_without_inherits_row_is_skipped() {
        let html = doc(
            "Foo Class Reference",
            r#"<table class="specbox"><tr><td>Availability</td><td>Always.</td></tr></table><p class="abstract">A foo.</p>"#,
        );
        assert!(extract_page(&html).is_none());
    }

    #[test]
    fn inherits_none_means_root_class() {
        let html = doc(
            "NSObject Class Reference",
            r#"<table class="specbox"><tr><td>Inherits from none</td></tr></table><p class="abstract">The root.</p>"#,
        );
        let stub = extract_page(&html).unwrap();
        let PageBody::Class(class) = &stub.body else {
            panic!("expected a class body");
        };
        assert_eq!(class.superclass, None);
    }

    #[test]
    fn protocol_without_abstract_is_skipped() {
        let html = doc("NSCoding Protocol Reference", "");
        assert!(extract_page(&html).is_none());
    }

    #[test]
    fn nsobject_protocol_is_always_skipped() {
        let html = doc(
            "NSObject Protocol Reference",
            r#"<p class="abstract">The root protocol.</p>"#,
        );
        assert!(extract_page(&html).is_none());
    }

    #[test]
    fn reference_page_dispatches_by_anchor() {
        let html = doc(
            "Foundation Functions Reference",
            concat!(
                r#"<section><a title="Functions"></a>"#,
                r#"<h3 class="tight jump function">Add</h3>"#,
                r#"<p class="abstract">Adds.</p>"#,
                r#"<pre class="declaration">int Add(int a, int b);</pre>"#,
                "</section>",
                r#"<section><a title="Data Types"></a>"#,
                r#"<h3 class="tight jump struct">Pair</h3>"#,
                r#"<p class="abstract">Two ints.</p>"#,
                "<pre class=\"declaration\">struct Pair {\n  int a;\n  int b;\n};</pre>",
                "</section>",
            ),
        );
        let stub = extract_page(&html).unwrap();
        let PageBody::Reference(reference) = &stub.body else {
            panic!("expected a reference body");
        };
        assert_eq!(reference.functions.len(), 1);
        assert_eq!(reference.functions[0].name, "Add");
        assert_eq!(reference.structs.len(), 1);
        assert_eq!(reference.structs[0].name, "Pair");
    }

    #[test]
    fn framework_path_reads_the_second_cell() {
        let html = doc(
            "Foo Class Reference",
            concat!(
                r#"<table class="specbox"><tr><td>Inherits from</td><td>Bar</td></tr>"#,
                r#"<tr><td><b><span class="FrameworkPath">Framework Path</span></b></td>"#,
                r#"<td>/System/Library/Frameworks/Foundation.framework</td></tr></table>"#,
                r#"<p class="abstract">A foo.</p>"#,
            ),
        );
        let stub = extract_page(&html).unwrap();
        assert_eq!(
            stub.framework_path.as_deref(),
            Some("/System/Library/Frameworks/Foundation.framework")
        );
    }

    #[test]
    fn generated_stub_contains_the_class_declaration() {
        let html = format!(
            r#"<html><head><title>Foo Class Reference</title></head><body>{SPECBOX}<p class="abstract">A foo.</p></body></html>"#
        );
        let stub = generate_stub(&html).unwrap();
        assert!(stub.contains("class Foo < Bar"));
        assert!(stub.contains("# A foo."));
    }

    #[test]
    fn unrecognized_page_yields_no_stub() {
        assert!(generate_stub("<html><head><title>Release Notes</title></head><body></body></html>").is_none());
    }
}
