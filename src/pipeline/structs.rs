//! Struct extractor: `h3` heading markers tagged `struct` or `typeDef`
//! under one section scope, paired positionally with their abstracts and
//! declarations.
//!
//! A `typeDef` marker is processed only when its declaration literally
//! begins with `typedef struct`; other typedefs are consumed without
//! output so they are never revisited. Member descriptions come from the
//! section's flat `dd` list through the running counter in
//! [`SectionState`], shared across every struct block in the section and
//! never reset mid-section, exactly as the upstream markup assumes.

use crate::pipeline::docref::collapse_lines;
use crate::pipeline::dom::{
    child_elements, collect_text, direct_children, has_classes, SectionState,
};
use crate::pipeline::types::normalize_type;
use crate::symbol::{StructDecl, StructMember};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use tracing::debug;

static TYPEDEF_STRUCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^typedef\s+struct").unwrap());
static BRACE_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// First split: one leading type token, then the (possibly comma-separated)
/// member names. `double x, y, z` fans out to three members.
static TYPE_THEN_NAMES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S+)\s+(.+)").unwrap());

/// Second split, greedy: everything up to the last whitespace is the type,
/// so rebuilt multi-word types (`unsigned long x`) recover whole.
static GREEDY_TYPE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.+)\s+(.+)").unwrap());

/// Extract every unconsumed struct block that is a direct child of `scope`.
///
/// Safe to call repeatedly over the same subtree: markers already in
/// `state.consumed` produce nothing on later calls.
pub fn extract_structs_in(scope: ElementRef<'_>, state: &mut SectionState) -> Vec<StructDecl> {
    let markers: Vec<ElementRef<'_>> = child_elements(scope)
        .filter(|el| {
            el.value().name() == "h3"
                && has_classes(*el, &["tight", "jump"])
                && (has_classes(*el, &["struct"]) || has_classes(*el, &["typeDef"]))
        })
        .collect();
    let abstracts = direct_children(scope, "p", &["abstract"]);
    let declarations: Vec<ElementRef<'_>> = child_elements(scope)
        .filter(|el| {
            (el.value().name() == "pre" && has_classes(*el, &["declaration"]))
                || (el.value().name() == "table" && has_classes(*el, &["zDeclaration"]))
        })
        .collect();
    let descriptions: Vec<String> = direct_children(scope, "dl", &["termdef"])
        .into_iter()
        .flat_map(|dl| direct_children(dl, "dd", &[]))
        .map(|dd| collapse_lines(&collect_text(dd)))
        .collect();

    let mut out = Vec::new();
    for (i, marker) in markers.iter().enumerate() {
        if !state.consumed.insert(marker.id()) {
            continue;
        }

        let name = collect_text(*marker).trim().to_string();
        let decl = declarations
            .get(i)
            .map(|d| collect_text(*d).trim().to_string())
            .unwrap_or_default();
        if has_classes(*marker, &["typeDef"]) && !TYPEDEF_STRUCT.is_match(&decl) {
            debug!("skipping non-struct typedef marker {name:?}");
            continue;
        }

        let Some(body) = BRACE_BODY.captures(&decl).and_then(|c| c.get(1)) else {
            continue;
        };

        // Fan out comma-joined names, then re-split each rebuilt
        // `type name` greedily to recover multi-word types.
        let mut flat = Vec::new();
        for item in body.as_str().trim().split(';') {
            let Some(caps) = TYPE_THEN_NAMES.captures(item.trim()) else {
                continue;
            };
            let (ty, names) = (&caps[1], &caps[2]);
            for n in names.split(',') {
                flat.push(format!("{ty} {}", n.trim()));
            }
        }

        let mut members = Vec::new();
        for item in flat {
            let doc = descriptions
                .get(state.member_pos)
                .cloned()
                .unwrap_or_default();
            state.member_pos += 1;
            let Some(caps) = GREEDY_TYPE_SPLIT.captures(&item) else {
                continue;
            };
            members.push(StructMember {
                name: caps[2].trim().to_string(),
                ty: normalize_type(&caps[1]),
                doc,
            });
        }

        if !members.is_empty() {
            let doc = abstracts
                .get(i)
                .map(|a| collapse_lines(&collect_text(*a)))
                .unwrap_or_default();
            out.push(StructDecl { name, doc, members });
        }
    }
    out
}
