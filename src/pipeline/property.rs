//! Property extractor: `div.api.propertyObjC` declaration nodes.
//!
//! The markup nests the authoritative declaration inside a second
//! `div.declaration`; when the nested one is absent the outer text is used.
//! A declaration with no trailing identifier is malformed and skipped;
//! one bad property never aborts the page.

use crate::pipeline::docref::extract_docref;
use crate::pipeline::dom::first_text;
use crate::pipeline::types::normalize_type;
use crate::symbol::Property;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

static PROPERTY_NODE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.api.propertyObjC").unwrap());
static DECLARATION: Lazy<Selector> = Lazy::new(|| Selector::parse("div.declaration").unwrap());
static NESTED_DECLARATION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.declaration div.declaration").unwrap());

/// `@property` keyword with its optional attribute list, e.g.
/// `@property(nonatomic, readonly)`.
static ATTRIBUTE_BOILERPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@property\s*(\([^)]*\))?").unwrap());

/// Trailing identifier of the declaration: the property name. Everything
/// before it is the raw declared type.
static TRAILING_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+);?\s*$").unwrap());

/// Extract every property declaration on the page, in document order.
pub fn extract_properties(doc: &Html) -> Vec<Property> {
    let mut out = Vec::new();
    for node in doc.select(&PROPERTY_NODE) {
        let decl = first_text(node, &NESTED_DECLARATION)
            .filter(|t| !t.is_empty())
            .or_else(|| first_text(node, &DECLARATION))
            .unwrap_or_default();

        let readonly = decl.contains("readonly");
        let decl = ATTRIBUTE_BOILERPLATE.replace(&decl, "");

        let Some(caps) = TRAILING_IDENT.captures(&decl) else {
            debug!("skipping property with unparseable declaration: {:?}", decl.trim());
            continue;
        };
        let (Some(whole), Some(ident)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let raw_type = &decl[..whole.start()];

        out.push(Property {
            name: ident.as_str().to_string(),
            ty: normalize_type(raw_type),
            readonly,
            doc: extract_docref(node),
        });
    }
    out
}
