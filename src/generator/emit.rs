//! Emit one Rust source file per type group.
//!
//! Each group becomes an `impl` block that completes the declared placeholder
//! methods with bodies returning `&'static [u8]` byte-string literals. The
//! payload is encoded as UTF-8 at emission time via
//! [`proc_macro2::Literal::byte_string`], so lookups at the call site are
//! allocation-free.
//!
//! Output is built with `quote!`, parsed back through `syn`, and formatted by
//! `prettyplease`, so every generated file is syntactically valid Rust by
//! construction.

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};
use thiserror::Error;

use crate::frontend::ast::Accessibility;
use crate::frontend::symbols::{MethodSymbol, SymbolTable, TypeSymbol};
use crate::generator::group::TypeGroup;

/// Appended to the fully-qualified type name to form the output filename.
pub const GENERATED_FILE_SUFFIX: &str = ".utf8.g.rs";

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Generated by utf8gen. Do not edit.";

/// Error during source emission.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("syn parse error: {0}")]
    SynParse(String),
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
}

/// A single generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub filename: String,
    pub text: String,
}

/// Emits generated sources for type groups.
///
/// The filename scratch buffer is reused across groups and cleared at the
/// start of each one, so a long name from one group never leaks into the
/// next.
pub struct SourceEmitter<'a> {
    symbols: &'a SymbolTable,
    filename_buf: String,
}

impl<'a> SourceEmitter<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            filename_buf: String::new(),
        }
    }

    /// Emit the generated file for one type group.
    pub fn emit_group(&mut self, group: &TypeGroup) -> Result<GeneratedSource, EmitError> {
        let ty = self
            .symbols
            .type_symbol(group.containing_type)
            .ok_or_else(|| EmitError::UnknownSymbol(format!("type #{}", group.containing_type)))?;

        let mut fns = Vec::with_capacity(group.methods.len());
        for resolved in &group.methods {
            let method = self
                .symbols
                .method(resolved.method)
                .ok_or_else(|| EmitError::UnknownSymbol(format!("method #{}", resolved.method)))?;
            fns.push(emit_method(method, &resolved.value));
        }

        let type_ident = rust_ident(&ty.name);
        let mut tokens = quote! {
            impl #type_ident {
                #(#fns)*
            }
        };
        // Innermost namespace segment first.
        for segment in ty.namespace.iter().rev() {
            let mod_ident = rust_ident(segment);
            tokens = quote! {
                pub mod #mod_ident {
                    #tokens
                }
            };
        }

        let syntax_tree: syn::File =
            syn::parse2(tokens).map_err(|e| EmitError::SynParse(e.to_string()))?;
        let formatted = prettyplease::unparse(&syntax_tree);

        Ok(GeneratedSource {
            filename: self.filename_for(ty),
            text: format!("{}\n\n{}", GENERATED_HEADER, formatted),
        })
    }

    fn filename_for(&mut self, ty: &TypeSymbol) -> String {
        self.filename_buf.clear();
        self.filename_buf.push_str(&ty.fq_name);
        self.filename_buf.push_str(GENERATED_FILE_SUFFIX);
        self.filename_buf.clone()
    }
}

fn emit_method(method: &MethodSymbol, value: &str) -> TokenStream {
    let name = rust_ident(&method.name);
    let vis = visibility_tokens(&method.modifiers.accessibility);
    let literal = Literal::byte_string(value.as_bytes());
    quote! {
        #vis fn #name() -> &'static [u8] {
            #literal
        }
    }
}

fn visibility_tokens(accessibility: &Option<Accessibility>) -> TokenStream {
    match accessibility {
        Some(Accessibility::Public) => quote! { pub },
        Some(Accessibility::Internal) => quote! { pub(crate) },
        Some(Accessibility::Private) | None => TokenStream::new(),
    }
}

/// Whether a host name can be expressed as a (possibly raw) Rust identifier.
///
/// `crate`, `self`, `Self`, `super`, and `_` have no raw form; the validator
/// skips candidates carrying such names before they reach the emitter.
pub(crate) fn is_mappable_ident(name: &str) -> bool {
    !matches!(name, "crate" | "self" | "Self" | "super" | "_")
}

/// Build an identifier token, raw-escaping Rust keywords.
///
/// Callers must have filtered names through [`is_mappable_ident`] first.
fn rust_ident(name: &str) -> Ident {
    match name {
        "as" | "break" | "const" | "continue" | "dyn" | "else" | "enum" | "extern" | "false"
        | "fn" | "for" | "if" | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move"
        | "mut" | "pub" | "ref" | "return" | "static" | "struct" | "trait" | "true" | "type"
        | "unsafe" | "use" | "where" | "while" | "async" | "await" => {
            Ident::new_raw(name, Span::call_site())
        }
        _ => format_ident!("{}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::Compilation;
    use crate::generator::{collect, group, validate};

    fn emit_all(source: &str) -> Vec<GeneratedSource> {
        let compilation = Compilation::compile(&[("lib", source)]).unwrap();
        let resolved: Vec<_> = collect::collect_candidates(&compilation)
            .iter()
            .filter_map(|c| validate::validate(&compilation, c).ok())
            .collect();
        let groups = group::group_by_type(resolved);
        let mut emitter = SourceEmitter::new(compilation.symbols());
        groups.iter().map(|g| emitter.emit_group(g).unwrap()).collect()
    }

    #[test]
    fn filename_is_fq_name_plus_suffix() {
        let sources = emit_all(
            r#"
            namespace assets.web {
                class Banners {
                    [Utf8("x")]
                    public static partial string m();
                }
            }
            "#,
        );
        assert_eq!(sources[0].filename, "assets.web.Banners.utf8.g.rs");
    }

    #[test]
    fn filename_buffer_does_not_leak_between_groups() {
        let sources = emit_all(
            r#"
            namespace really.long.namespace.path {
                class VeryLongTypeName {
                    [Utf8("a")]
                    public static partial string m();
                }
            }
            class B {
                [Utf8("b")]
                public static partial string n();
            }
            "#,
        );
        assert_eq!(sources.len(), 2);
        assert_eq!(
            sources[0].filename,
            "really.long.namespace.path.VeryLongTypeName.utf8.g.rs"
        );
        assert_eq!(sources[1].filename, "B.utf8.g.rs");
    }

    #[test]
    fn emitted_file_parses_as_rust() {
        let sources = emit_all(
            r#"
            class C {
                [Utf8("héllo")]
                public static partial string greeting();
                [Utf8("")]
                internal static partial string empty();
            }
            "#,
        );
        assert_eq!(sources.len(), 1);
        let text = &sources[0].text;
        assert!(text.starts_with(GENERATED_HEADER));
        let body = text.strip_prefix(GENERATED_HEADER).unwrap();
        let file: syn::File = syn::parse_str(body).unwrap();
        assert_eq!(file.items.len(), 1);
    }

    #[test]
    fn payload_bytes_are_utf8_encoded() {
        let sources = emit_all(
            r#"
            class C {
                [Utf8("héllo")]
                public static partial string greeting();
            }
            "#,
        );
        // é is two bytes in UTF-8; the literal escapes them as \xHH.
        assert!(sources[0].text.contains(r#"b"h\xC3\xA9llo""#));
    }

    #[test]
    fn namespace_becomes_nested_modules() {
        let sources = emit_all(
            r#"
            namespace a.b {
                class C {
                    [Utf8("v")]
                    public static partial string m();
                }
            }
            "#,
        );
        let text = &sources[0].text;
        assert!(text.contains("pub mod a {"));
        assert!(text.contains("pub mod b {"));
        assert!(text.contains("impl C {"));
    }

    #[test]
    fn keyword_method_name_is_raw_escaped() {
        let sources = emit_all(
            r#"
            class C {
                [Utf8("v")]
                public static partial string loop();
            }
            "#,
        );
        assert!(sources[0].text.contains("fn r#loop()"));
    }

    #[test]
    fn same_input_emits_identical_output() {
        let source = r#"
            class C {
                [Utf8("one")]
                public static partial string a();
                [Utf8("two")]
                public static partial string b();
            }
        "#;
        assert_eq!(emit_all(source), emit_all(source));
    }
}
