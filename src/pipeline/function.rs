//! Function extractor: `h3` function headings under one section scope,
//! with declarations of the shape `<return-type> <name>(<args>);`.
//!
//! Arguments are comma-split; each splits into everything-but-last-token
//! (type) and last token (name), with leading pointer stars moved from the
//! name back onto the type. An argument with no recoverable name is
//! dropped, and a function left with zero recoverable arguments is skipped
//! entirely. Parameter descriptions come from the section-wide flattened
//! `dd` list, indexed by the argument's position within its own function;
//! the upstream markup keeps one flat list per section.

use crate::pipeline::docref::collapse_lines;
use crate::pipeline::dom::{child_elements, collect_text, direct_children, has_classes};
use crate::pipeline::types::normalize_type;
use crate::symbol::{FunctionDecl, ParamDoc, ReturnDoc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use tracing::debug;

/// Leading return-type token of the declaration.
static RETURN_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S+)\s+.+").unwrap());

/// Parenthesized argument list, spanning lines, up to the final `);`.
static ARG_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\((.+)\);").unwrap());

/// One argument: type prefix, then the name as the last token.
static ARG_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.+)\s+(\S+),?$").unwrap());

/// Extract every function heading that is a direct child of `scope`.
pub fn extract_functions(scope: ElementRef<'_>) -> Vec<FunctionDecl> {
    let headings = direct_children(scope, "h3", &["tight", "jump", "function"]);
    let abstracts = direct_children(scope, "p", &["abstract"]);
    let declarations = direct_children(scope, "pre", &["declaration"]);

    // Section-wide flat description list.
    let param_descriptions: Vec<String> = child_elements(scope)
        .filter(|el| el.value().name() == "div" && has_classes(*el, &["api", "parameters"]))
        .flat_map(|div| direct_children(div, "dl", &["termdef"]))
        .flat_map(|dl| direct_children(dl, "dd", &[]))
        .map(|dd| collapse_lines(&collect_text(dd)))
        .collect();

    // Per-function return-value paragraphs, positionally indexed.
    let return_texts: Vec<String> = direct_children(scope, "div", &["return_value"])
        .into_iter()
        .flat_map(|div| direct_children(div, "p", &[]))
        .map(|p| collapse_lines(&collect_text(p)))
        .collect();

    let mut out = Vec::new();
    for (i, heading) in headings.iter().enumerate() {
        let name = collect_text(*heading).trim().to_string();
        let decl = declarations
            .get(i)
            .map(|d| collect_text(*d).trim().to_string())
            .unwrap_or_default();

        let return_raw = RETURN_TOKEN
            .captures(&decl)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| "void".to_string());

        let Some(args) = ARG_LIST.captures(&decl).and_then(|c| c.get(1)) else {
            debug!("skipping function {name:?}: no argument list");
            continue;
        };

        let mut params = Vec::new();
        for (index, arg) in args.as_str().split(',').enumerate() {
            let Some(caps) = ARG_SPLIT.captures(arg.trim()) else {
                continue;
            };
            let raw_name = caps[2].trim_end_matches(',');
            let param = raw_name.trim_start_matches('*');
            if param.is_empty() {
                continue;
            }
            // Pointer stars belong to the type for normalization purposes.
            let mut ty = caps[1].to_string();
            ty.push_str(&"*".repeat(raw_name.len() - param.len()));

            params.push(ParamDoc {
                name: param.to_string(),
                ty: Some(normalize_type(&ty)),
                doc: param_descriptions.get(index).cloned().unwrap_or_default(),
            });
        }
        if params.is_empty() {
            debug!("skipping function {name:?}: no recoverable arguments");
            continue;
        }

        let ret = ReturnDoc {
            ty: Some(normalize_type(&return_raw)),
            text: return_texts.get(i).cloned().unwrap_or_default(),
        };

        let doc = abstracts
            .get(i)
            .map(|a| collapse_lines(&collect_text(*a)))
            .unwrap_or_default();

        out.push(FunctionDecl {
            name,
            params,
            ret,
            doc,
        });
    }
    out
}
