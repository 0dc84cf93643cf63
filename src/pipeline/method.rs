//! Method extractor: `div.api.classMethod` and `div.api.instanceMethod`
//! nodes, processed together in document order.
//!
//! The declaration's parenthesized type tokens are scanned once: the first
//! is the return type, the rest pair positionally with the named parameters
//! *only* when the counts match exactly; on any mismatch parameter typing
//! is omitted for the whole method rather than misaligned.
//!
//! The selector is recovered by deleting the parenthesized type
//! annotations, splitting on whitespace, then splitting each token on `:`
//! into keyword/argument-name pairs. A selector with no keyword parts still
//! produces a valid zero-argument stub.

use crate::pipeline::docref::{collapse_lines, extract_docref};
use crate::pipeline::dom::{collect_text, first_text};
use crate::pipeline::types::normalize_type;
use crate::symbol::{Method, ParamDoc, ReturnDoc, SelectorArg};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

static METHOD_NODES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.api.classMethod, div.api.instanceMethod").unwrap());
static DECLARATION: Lazy<Selector> = Lazy::new(|| Selector::parse("div.declaration").unwrap());
static PARAM_NAMES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.api.parameters dt").unwrap());
static PARAM_DOCS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.api.parameters dd").unwrap());
static RETURN_TEXT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.return_value p").unwrap());

static PAREN_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static CLASS_QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\+").unwrap());
static LEADING_QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[+\-]").unwrap());
static TRAILING_SEMI: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s*$").unwrap());
/// Parenthesized type annotations, including block types whose closing
/// parens stack up (`(void (^)(BOOL))`).
static TYPE_ANNOTATIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]+\)+").unwrap());

/// Extract every class- and instance-method declaration on the page,
/// preserving document order across both scopes.
pub fn extract_methods(doc: &Html) -> Vec<Method> {
    let mut out = Vec::new();
    for node in doc.select(&METHOD_NODES) {
        let decl = first_text(node, &DECLARATION).unwrap_or_default();

        let mut types: Vec<String> = PAREN_TYPE
            .captures_iter(&decl)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        let return_raw = if types.is_empty() {
            None
        } else {
            Some(types.remove(0))
        };

        // Parameter documentation pairs positionally, bounded to an exact
        // dt/dd count match; types additionally require the parenthesized
        // list to line up 1:1 with the names.
        let names: Vec<String> = node.select(&PARAM_NAMES).map(collect_text).collect();
        let docs: Vec<String> = node.select(&PARAM_DOCS).map(collect_text).collect();
        let mut params = Vec::new();
        if names.len() == docs.len() {
            let typed = types.len() == names.len();
            for (i, name) in names.iter().enumerate() {
                params.push(ParamDoc {
                    name: name.trim().to_string(),
                    ty: if typed { Some(normalize_type(&types[i])) } else { None },
                    doc: collapse_lines(&docs[i]),
                });
            }
        } else {
            debug!(
                "parameter name/description count mismatch ({} vs {}), omitting docs",
                names.len(),
                docs.len()
            );
        }

        let return_text = first_text(node, &RETURN_TEXT)
            .map(|t| collapse_lines(&t))
            .unwrap_or_default();
        let ret = if return_raw.is_some() || !return_text.is_empty() {
            Some(ReturnDoc {
                ty: return_raw.as_deref().map(normalize_type),
                text: return_text,
            })
        } else {
            None
        };

        let class_scope = CLASS_QUALIFIER.is_match(&decl);

        let selector_src = LEADING_QUALIFIER.replace(&decl, "");
        let selector_src = TRAILING_SEMI.replace(&selector_src, "");
        let selector_src = selector_src.replace('\u{00A0}', "");
        let stripped = TYPE_ANNOTATIONS.replace_all(&selector_src, "");

        let mut parts = stripped.split_whitespace().map(split_selector_token);
        let Some((name, first_arg)) = parts.next() else {
            debug!("skipping method with empty declaration");
            continue;
        };
        let mut args = Vec::new();
        if let Some(arg) = first_arg {
            args.push(SelectorArg::Plain(arg));
        }
        for (keyword, arg) in parts {
            match arg {
                Some(name) => args.push(SelectorArg::Keyword { keyword, name }),
                None => args.push(SelectorArg::Plain(keyword)),
            }
        }

        out.push(Method {
            name,
            args,
            params,
            ret,
            class_scope,
            doc: extract_docref(node),
        });
    }
    out
}

/// Split one selector token into its keyword and optional argument name.
fn split_selector_token(token: &str) -> (String, Option<String>) {
    match token.split_once(':') {
        Some((keyword, arg)) if !arg.is_empty() => (keyword.to_string(), Some(arg.to_string())),
        Some((keyword, _)) => (keyword.to_string(), None),
        None => (token.to_string(), None),
    }
}
