//! Constant / enumeration extractor: walks the `#Constants_section`
//! container as positional parallel lists (the i-th abstract, declaration,
//! and term-definition block belong together).
//!
//! A declaration beginning with `struct` / `typedef struct` belongs to the
//! struct extractor and is excluded from constant processing entirely.
//! Otherwise the trailing identifier after the closing brace decides the
//! shape: present means a named enumeration grouping, absent means loose
//! top-level constants. The presence test is a heuristic on the raw
//! declaration text; a C declaration that omits its trailing alias will be
//! read as loose constants.
//!
//! Name/description pairing is strictly positional and bounded by the
//! shorter list; extra names are dropped without a warning.

use crate::pipeline::docref::collapse_lines;
use crate::pipeline::dom::{collect_text, direct_children, SectionState};
use crate::pipeline::structs::extract_structs_in;
use crate::symbol::{ConstantMember, EnumerationBlock, StructDecl};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

static CONSTANTS_SECTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#Constants_section").unwrap());

/// Trailing type-alias identifier after the closing brace, e.g. the
/// `NSComparisonResult` of `} NSComparisonResult;`.
static TRAILING_ALIAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)\}\s*(\S+);\s*$").unwrap());

static STRUCT_DECL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:typedef\s+)?struct").unwrap());

/// Everything extracted from the constants sections of one page.
#[derive(Debug, Default)]
pub struct ConstantsOutput {
    pub constants: Vec<EnumerationBlock>,
    pub structs: Vec<StructDecl>,
}

/// Extract constants, enumeration groupings, and delegated struct blocks
/// from every `#Constants_section` on the page.
pub fn extract_constants(doc: &Html) -> ConstantsOutput {
    let mut out = ConstantsOutput::default();
    for section in doc.select(&CONSTANTS_SECTION) {
        let abstracts = direct_children(section, "p", &["abstract"]);
        let declarations = direct_children(section, "pre", &["declaration"]);
        let termdefs = direct_children(section, "dl", &["termdef"]);

        // One consumed-marker set and one description counter per section;
        // repeated struct delegation within the section must not re-emit.
        let mut state = SectionState::new();

        for (i, termdef) in termdefs.iter().enumerate() {
            let Some(declaration) = declarations.get(i) else {
                debug!("constants block {i} has no matching declaration, stopping");
                break;
            };
            let decl = collect_text(*declaration).trim().to_string();

            if STRUCT_DECL.is_match(&decl) {
                out.structs.extend(extract_structs_in(section, &mut state));
                continue;
            }

            let name = TRAILING_ALIAS
                .captures(&decl)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            let doc_text = abstracts
                .get(i)
                .map(|a| collapse_lines(&collect_text(*a)))
                .unwrap_or_default();

            let names = direct_children(*termdef, "dt", &[]);
            let descriptions = direct_children(*termdef, "dd", &[]);
            let members: Vec<ConstantMember> = names
                .iter()
                .zip(descriptions.iter())
                .map(|(dt, dd)| ConstantMember {
                    name: collect_text(*dt).trim().to_string(),
                    doc: capitalize_first(&collapse_lines(&collect_text(*dd))),
                })
                .collect();

            out.constants.push(EnumerationBlock {
                name,
                doc: doc_text,
                members,
            });
        }
    }
    out
}

/// Upper-case the first letter only; the rest of the description is left
/// untouched so acronyms survive.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
