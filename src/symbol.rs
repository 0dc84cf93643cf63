//! The symbol model extracted from one reference page.
//!
//! Everything here is transient: a [`PageStub`] is built from one parsed
//! document, rendered to text by [`crate::render`], and dropped. Nothing is
//! shared across documents.
//!
//! The page shape is a closed enum ([`PageKind`]) produced once by the
//! classifier and matched exhaustively by the orchestrator, so
//! `Unrecognized` is a first-class, testable outcome rather than an
//! implicit fallthrough.

use std::fmt;

/// The recognised page shapes, discriminated by the `<title>` suffix.
///
/// `Unrecognized` means the whole document is skipped: no output file,
/// no error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// `"<Name> Class Reference"`
    Class { name: String },
    /// `"<Name> Protocol Reference"`
    Protocol { name: String },
    /// `"<Name> Reference"` (functions / data types)
    Reference { name: String },
    /// Anything else.
    Unrecognized,
}

/// One fully-extracted page, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStub {
    /// Native framework path metadata from the `FrameworkPath` span,
    /// `None` when the marker is missing. Documentation metadata only.
    pub framework_path: Option<String>,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Class(ApiClass),
    Protocol(ApiProtocol),
    Reference(ReferenceBody),
}

/// A class page: superclass is mandatory at the page level (pages with no
/// resolvable ancestry are never built), but a specbox row spelling the
/// superclass as `none` yields a class with no superclass clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClass {
    pub name: String,
    pub superclass: Option<String>,
    pub abstract_text: String,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub constants: Vec<EnumerationBlock>,
    pub structs: Vec<StructDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiProtocol {
    pub name: String,
    pub abstract_text: String,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub constants: Vec<EnumerationBlock>,
    pub structs: Vec<StructDecl>,
}

/// A functions / data-types reference page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceBody {
    pub functions: Vec<FunctionDecl>,
    pub structs: Vec<StructDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TypeCategory,
    /// Derived from a `readonly` modifier token in the raw declaration.
    pub readonly: bool,
    pub doc: String,
}

/// A method with its selector split into keyword/argument-name pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// First selector keyword; the stub's declared name.
    pub name: String,
    /// Rendered argument list, in selector order.
    pub args: Vec<SelectorArg>,
    /// Per-parameter documentation lines. Empty when the name/description
    /// lists did not align.
    pub params: Vec<ParamDoc>,
    /// `None` when neither a return type nor documented return text exists;
    /// no return line is emitted in that case.
    pub ret: Option<ReturnDoc>,
    /// Leading `+` qualifier in the raw declaration.
    pub class_scope: bool,
    pub doc: String,
}

/// One entry of a method's rendered argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorArg {
    /// A bare argument name (the first keyword's argument, or a selector
    /// token that carried no argument).
    Plain(String),
    /// A subsequent `keyword:argname` pair.
    Keyword { keyword: String, name: String },
}

/// A documented parameter. `ty` is present only when the declaration's
/// parenthesized type list aligned 1:1 with the named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDoc {
    pub name: String,
    pub ty: Option<TypeCategory>,
    pub doc: String,
}

/// Return-value documentation: type, documented text, or both.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnDoc {
    pub ty: Option<TypeCategory>,
    pub text: String,
}

/// A constants block. `name` present means an enumeration grouping; absent
/// means the members are emitted as loose top-level constants.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationBlock {
    pub name: Option<String>,
    pub doc: String,
    pub members: Vec<ConstantMember>,
}

/// A constant whose value is never computable from the page prose; stubs
/// always leave it as an unresolved `nil` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantMember {
    pub name: String,
    pub doc: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub doc: String,
    pub members: Vec<StructMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    pub name: String,
    pub ty: TypeCategory,
    pub doc: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<ParamDoc>,
    pub ret: ReturnDoc,
    pub doc: String,
}

/// Binding-level type categories produced by the type normalizer.
///
/// Unknown native types pass through verbatim as [`TypeCategory::Other`] so
/// information is never silently lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCategory {
    /// Double-indirection native types have no safe scalar mapping.
    Pointer,
    Object,
    Nil,
    Symbol,
    Boolean,
    Float,
    Integer,
    String,
    Array,
    Hash,
    /// The trimmed source token, unchanged.
    Other(std::string::String),
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::Pointer => f.write_str("Pointer"),
            TypeCategory::Object => f.write_str("Object"),
            TypeCategory::Nil => f.write_str("nil"),
            TypeCategory::Symbol => f.write_str("Symbol"),
            TypeCategory::Boolean => f.write_str("Boolean"),
            TypeCategory::Float => f.write_str("Float"),
            TypeCategory::Integer => f.write_str("Integer"),
            TypeCategory::String => f.write_str("String"),
            TypeCategory::Array => f.write_str("Array"),
            TypeCategory::Hash => f.write_str("Hash"),
            TypeCategory::Other(t) => f.write_str(t),
        }
    }
}
