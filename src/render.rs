//! Stub rendering: turns the typed symbol model into the textual stub the
//! downstream documentation renderer consumes.
//!
//! The stub dialect is deliberately small: `class Foo < Bar` / `module Foo`
//! containers, `attr_reader` / `attr_accessor` accessors, `def name(args);
//! end` method shells, and `NAME = nil` constants, each preceded by `#`
//! documentation comments (`@param` / `@return` / `@scope` tags). Nothing
//! emitted here is executable; it is scaffolding for the renderer's
//! cross-referencing pass.
//!
//! Layout invariants:
//! - member declarations indent two spaces and comment with `  # `;
//!   top-level symbols (enumerations, structs, functions) comment with `# `
//! - empty documentation renders zero comment lines, never a bare marker
//! - every line is emitted without trailing whitespace

use crate::symbol::{
    ApiClass, ApiProtocol, EnumerationBlock, FunctionDecl, Method, PageBody, PageStub, Property,
    ReferenceBody, SelectorArg, StructDecl,
};

/// Render one classified page to its complete stub text, including the
/// framework-path header line.
pub fn render_page(stub: &PageStub) -> String {
    let mut out = String::new();
    match &stub.framework_path {
        Some(path) => out.push_str(&format!("# -*- framework: {path} -*-\n\n")),
        None => out.push_str("\n\n"),
    }

    match &stub.body {
        PageBody::Class(class) => render_class(class, &mut out),
        PageBody::Protocol(protocol) => render_protocol(protocol, &mut out),
        PageBody::Reference(reference) => render_reference(reference, &mut out),
    }

    strip_trailing_spaces(&out)
}

/// Prefix every line of `text` with `prefix`. Empty text yields an empty
/// block with zero lines.
fn comment_block(text: &str, prefix: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for line in text.split('\n') {
        out.push_str(prefix);
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn render_class(class: &ApiClass, out: &mut String) {
    out.push_str(&comment_block(&class.abstract_text, "# "));
    match &class.superclass {
        Some(superclass) => out.push_str(&format!("\nclass {} < {superclass}\n\n", class.name)),
        None => out.push_str(&format!("\nclass {}\n\n", class.name)),
    }
    render_members(&class.properties, &class.methods, out);
    out.push_str("end\n");
    render_constants(&class.constants, out);
    render_structs(&class.structs, out);
}

fn render_protocol(protocol: &ApiProtocol, out: &mut String) {
    out.push_str(&comment_block(&protocol.abstract_text, "# "));
    out.push_str(&format!("\nmodule {} # Protocol\n\n", protocol.name));
    render_members(&protocol.properties, &protocol.methods, out);
    out.push_str("end\n");
    render_constants(&protocol.constants, out);
    render_structs(&protocol.structs, out);
}

fn render_reference(reference: &ReferenceBody, out: &mut String) {
    for function in &reference.functions {
        render_function(function, out);
    }
    render_structs(&reference.structs, out);
}

fn render_members(properties: &[Property], methods: &[Method], out: &mut String) {
    for property in properties {
        render_property(property, out);
    }
    for method in methods {
        render_method(method, out);
    }
}

fn render_property(property: &Property, out: &mut String) {
    out.push_str(&comment_block(&property.doc, "  # "));
    out.push_str(&format!("  # @return [{}]\n", property.ty));
    let accessor = if property.readonly {
        "attr_reader"
    } else {
        "attr_accessor"
    };
    out.push_str(&format!("  {accessor} :{}\n\n", property.name));
}

fn render_method(method: &Method, out: &mut String) {
    out.push_str(&comment_block(&method.doc, "  # "));

    for param in &method.params {
        out.push_str("  # @param ");
        if let Some(ty) = &param.ty {
            out.push_str(&format!("[{ty}] "));
        }
        out.push_str(&format!("{} {}\n", param.name, param.doc));
    }

    if let Some(ret) = &method.ret {
        out.push_str("  # @return ");
        if let Some(ty) = &ret.ty {
            out.push_str(&format!("[{ty}] "));
        }
        out.push_str(&ret.text);
        out.push('\n');
    }

    if method.class_scope {
        out.push_str("  # @scope class\n");
    }

    let args: Vec<String> = method
        .args
        .iter()
        .map(|arg| match arg {
            SelectorArg::Plain(name) => name.clone(),
            SelectorArg::Keyword { keyword, name } => format!("{keyword}:{name}"),
        })
        .collect();
    out.push_str(&format!("  def {}({}); end\n\n", method.name, args.join(", ")));
}

fn render_constants(blocks: &[EnumerationBlock], out: &mut String) {
    for block in blocks {
        if let Some(name) = &block.name {
            out.push_str(&comment_block(&block.doc, "# "));
            out.push_str(&format!("module {name} # Enumeration\n\n"));
        }
        for member in &block.members {
            out.push_str(&format!("  # {}\n", member.doc));
            out.push_str(&format!("  {} = nil\n", member.name));
        }
        if block.name.is_some() {
            out.push_str("end\n");
        }
    }
}

fn render_structs(structs: &[StructDecl], out: &mut String) {
    for decl in structs {
        out.push_str(&comment_block(&decl.doc, "# "));
        out.push_str(&format!("class {} < Boxed\n", decl.name));
        for member in &decl.members {
            out.push_str(&format!("  # @return [{}] {}\n", member.ty, member.doc));
            out.push_str(&format!("  attr_accessor :{}\n", member.name));
        }
        out.push_str("end\n\n");
    }
}

fn render_function(function: &FunctionDecl, out: &mut String) {
    out.push_str(&comment_block(&function.doc, "# "));
    for param in &function.params {
        out.push_str("# @param ");
        if let Some(ty) = &param.ty {
            out.push_str(&format!("[{ty}] "));
        }
        out.push_str(&format!("{} {}\n", param.name, param.doc));
    }

    out.push_str("# @return ");
    if let Some(ty) = &function.ret.ty {
        out.push_str(&format!("[{ty}] "));
    }
    out.push_str(&function.ret.text);
    out.push('\n');

    let names: Vec<&str> = function.params.iter().map(|p| p.name.as_str()).collect();
    out.push_str(&format!("def {}({}); end\n\n", function.name, names.join(", ")));
}

fn strip_trailing_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        out.push_str(body.trim_end());
        out.push_str(newline);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{ConstantMember, PageStub, ParamDoc, ReturnDoc, StructMember, TypeCategory};

    fn class_page(class: ApiClass) -> PageStub {
        PageStub {
            framework_path: Some("/System/Library/Frameworks/Foundation.framework".into()),
            body: PageBody::Class(class),
        }
    }

    #[test]
    fn class_with_readonly_property() {
        // A class extending Bar with one read-only String property.
        let stub = class_page(ApiClass {
            name: "Foo".into(),
            superclass: Some("Bar".into()),
            abstract_text: "A foo.".into(),
            properties: vec![Property {
                name: "name".into(),
                ty: TypeCategory::String,
                readonly: true,
                doc: "The receiver's name.".into(),
            }],
            methods: vec![],
            constants: vec![],
            structs: vec![],
        });
        let text = render_page(&stub);
        assert!(text.starts_with(
            "# -*- framework: /System/Library/Frameworks/Foundation.framework -*-\n\n"
        ));
        assert!(text.contains("# A foo.\n\nclass Foo < Bar\n\n"));
        assert!(text.contains("  # The receiver's name.\n  # @return [String]\n  attr_reader :name\n\n"));
        assert!(text.ends_with("end\n"));
    }

    #[test]
    fn root_class_has_no_superclass_clause() {
        let stub = class_page(ApiClass {
            name: "NSObject".into(),
            superclass: None,
            abstract_text: "The root class.".into(),
            properties: vec![],
            methods: vec![],
            constants: vec![],
            structs: vec![],
        });
        let text = render_page(&stub);
        assert!(text.contains("\nclass NSObject\n\n"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn missing_framework_path_leaves_blank_header() {
        let stub = PageStub {
            framework_path: None,
            body: PageBody::Reference(ReferenceBody::default()),
        };
        assert_eq!(render_page(&stub), "\n\n");
    }

    #[test]
    fn class_method_stub() {
        let stub = class_page(ApiClass {
            name: "Foo".into(),
            superclass: Some("NSObject".into()),
            abstract_text: String::new(),
            properties: vec![],
            methods: vec![Method {
                name: "setValue".into(),
                args: vec![
                    SelectorArg::Plain("value".into()),
                    SelectorArg::Keyword {
                        keyword: "forKey".into(),
                        name: "key".into(),
                    },
                ],
                params: vec![
                    ParamDoc {
                        name: "value".into(),
                        ty: Some(TypeCategory::Object),
                        doc: "The value.".into(),
                    },
                    ParamDoc {
                        name: "key".into(),
                        ty: Some(TypeCategory::String),
                        doc: "The key.".into(),
                    },
                ],
                ret: Some(ReturnDoc {
                    ty: Some(TypeCategory::Nil),
                    text: String::new(),
                }),
                class_scope: true,
                doc: "Sets a value.".into(),
            }],
            constants: vec![],
            structs: vec![],
        });
        let text = render_page(&stub);
        assert!(text.contains("  # Sets a value.\n"));
        assert!(text.contains("  # @param [Object] value The value.\n"));
        assert!(text.contains("  # @param [String] key The key.\n"));
        // The typed-but-undocumented return line loses its trailing space.
        assert!(text.contains("  # @return [nil]\n"));
        assert!(text.contains("  # @scope class\n"));
        assert!(text.contains("  def setValue(value, forKey:key); end\n\n"));
    }

    #[test]
    fn untyped_params_omit_the_bracket() {
        let stub = class_page(ApiClass {
            name: "Foo".into(),
            superclass: Some("NSObject".into()),
            abstract_text: String::new(),
            properties: vec![],
            methods: vec![Method {
                name: "moveTo".into(),
                args: vec![SelectorArg::Plain("x".into())],
                params: vec![ParamDoc {
                    name: "x".into(),
                    ty: None,
                    doc: "X.".into(),
                }],
                ret: None,
                class_scope: false,
                doc: String::new(),
            }],
            constants: vec![],
            structs: vec![],
        });
        let text = render_page(&stub);
        assert!(text.contains("  # @param x X.\n"));
        assert!(!text.contains("@return"));
        assert!(text.contains("  def moveTo(x); end\n\n"));
    }

    #[test]
    fn named_enumeration_wraps_in_a_module() {
        let stub = class_page(ApiClass {
            name: "Foo".into(),
            superclass: Some("NSObject".into()),
            abstract_text: String::new(),
            properties: vec![],
            methods: vec![],
            constants: vec![EnumerationBlock {
                name: Some("MyEnum".into()),
                doc: "Comparison outcomes.".into(),
                members: vec![
                    ConstantMember {
                        name: "kA".into(),
                        doc: "The first case.".into(),
                    },
                    ConstantMember {
                        name: "kB".into(),
                        doc: "The second case.".into(),
                    },
                ],
            }],
            structs: vec![],
        });
        let text = render_page(&stub);
        assert!(text.contains("# Comparison outcomes.\nmodule MyEnum # Enumeration\n\n"));
        assert!(text.contains("  # The first case.\n  kA = nil\n"));
        assert!(text.contains("  kB = nil\nend\n"));
    }

    #[test]
    fn loose_constants_have_no_wrapper() {
        let stub = class_page(ApiClass {
            name: "Foo".into(),
            superclass: Some("NSObject".into()),
            abstract_text: String::new(),
            properties: vec![],
            methods: vec![],
            constants: vec![EnumerationBlock {
                name: None,
                doc: "Options.".into(),
                members: vec![ConstantMember {
                    name: "OptionA".into(),
                    doc: "A.".into(),
                }],
            }],
            structs: vec![],
        });
        let text = render_page(&stub);
        assert!(text.contains("  # A.\n  OptionA = nil\n"));
        assert!(!text.contains("module"));
        assert!(!text.contains("# Options."));
    }

    #[test]
    fn struct_renders_as_boxed_class() {
        let stub = PageStub {
            framework_path: None,
            body: PageBody::Reference(ReferenceBody {
                functions: vec![],
                structs: vec![StructDecl {
                    name: "Vector".into(),
                    doc: "A 3-component vector.".into(),
                    members: vec![StructMember {
                        name: "x".into(),
                        ty: TypeCategory::Float,
                        doc: "X.".into(),
                    }],
                }],
            }),
        };
        let text = render_page(&stub);
        assert!(text.contains("# A 3-component vector.\nclass Vector < Boxed\n"));
        assert!(text.contains("  # @return [Float] X.\n  attr_accessor :x\n"));
        assert!(text.contains("end\n"));
    }

    #[test]
    fn function_stub_with_typed_return() {
        let stub = PageStub {
            framework_path: None,
            body: PageBody::Reference(ReferenceBody {
                functions: vec![FunctionDecl {
                    name: "Add".into(),
                    params: vec![
                        ParamDoc {
                            name: "a".into(),
                            ty: Some(TypeCategory::Integer),
                            doc: "First addend.".into(),
                        },
                        ParamDoc {
                            name: "b".into(),
                            ty: Some(TypeCategory::Integer),
                            doc: "Second addend.".into(),
                        },
                    ],
                    ret: ReturnDoc {
                        ty: Some(TypeCategory::Integer),
                        text: "The sum.".into(),
                    },
                    doc: "Adds two integers.".into(),
                }],
                structs: vec![],
            }),
        };
        let text = render_page(&stub);
        assert!(text.contains("# Adds two integers.\n"));
        assert!(text.contains("# @param [Integer] a First addend.\n"));
        assert!(text.contains("# @return [Integer] The sum.\n"));
        assert!(text.contains("def Add(a, b); end\n\n"));
    }

    #[test]
    fn no_line_carries_trailing_whitespace() {
        let stub = class_page(ApiClass {
            name: "Foo".into(),
            superclass: Some("NSObject".into()),
            abstract_text: String::new(),
            properties: vec![],
            methods: vec![Method {
                name: "reload".into(),
                args: vec![],
                params: vec![],
                ret: Some(ReturnDoc {
                    ty: Some(TypeCategory::Nil),
                    text: String::new(),
                }),
                class_scope: false,
                doc: String::new(),
            }],
            constants: vec![],
            structs: vec![],
        });
        for line in render_page(&stub).lines() {
            assert_eq!(line, line.trim_end(), "line has trailing whitespace: {line:?}");
        }
    }
}
