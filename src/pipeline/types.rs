//! Type normalizer: map a raw declared native type to a binding-level
//! [`TypeCategory`].
//!
//! The function is total and deterministic: every input maps to exactly one
//! category, and anything outside the fixed vocabulary passes through
//! verbatim as [`TypeCategory::Other`]. Rules apply in priority order:
//!
//! 1. Strip a single trailing `*` (pointer-to-scalar collapses to the
//!    pointee's category).
//! 2. A second trailing `*` remaining after that → `Pointer` (double
//!    indirection has no safe scalar mapping).
//! 3. Fixed lookup table (`id`, `void`, `SEL`, boolean / float / integer /
//!    container spellings).
//! 4. No match → the trimmed token unchanged.

use crate::symbol::TypeCategory;
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\*$").unwrap());

/// `id`, optionally with a protocol qualifier such as `id <NSCopying>`.
static OBJECT_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^id(?:\s*<\w+>)?$").unwrap());

/// Fixed-width and platform integer spellings: `int`, `uint`, `int32_t`,
/// `uint64_t`, `intptr_t`, … with an optional `const` qualifier. Prefix
/// match, mirroring the upstream vocabulary.
static INTEGER_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:const\s+)?u?int(?:\d+_t)?").unwrap());

/// Normalize a raw declared-type token to its binding-level category.
///
/// ```
/// use apiref2stub::pipeline::types::normalize_type;
/// use apiref2stub::TypeCategory;
///
/// assert_eq!(normalize_type("NSString *"), TypeCategory::String);
/// assert_eq!(normalize_type("char **"), TypeCategory::Pointer);
/// assert_eq!(normalize_type("CGRect"), TypeCategory::Other("CGRect".into()));
/// ```
pub fn normalize_type(raw: &str) -> TypeCategory {
    let token = raw.trim();
    let token = TRAILING_STAR.replace(token, "");
    let token = token.trim();

    if token.ends_with('*') {
        return TypeCategory::Pointer;
    }
    if OBJECT_TYPE.is_match(token) {
        return TypeCategory::Object;
    }

    match token {
        "void" => TypeCategory::Nil,
        "SEL" => TypeCategory::Symbol,
        "bool" | "BOOL" => TypeCategory::Boolean,
        "float" | "double" | "CGFloat" => TypeCategory::Float,
        "char" | "unichar" | "short" | "long" | "long long" | "unsigned char"
        | "unsigned short" | "unsigned long" | "unsigned long long" | "NSInteger"
        | "NSUInteger" => TypeCategory::Integer,
        "NSString" | "NSMutableString" => TypeCategory::String,
        "NSArray" | "NSMutableArray" => TypeCategory::Array,
        "NSDictionary" | "NSMutableDictionary" => TypeCategory::Hash,
        _ if INTEGER_TYPE.is_match(token) => TypeCategory::Integer,
        _ => TypeCategory::Other(token.to_string()),
    }
}
