//! Property-based tests for the generator pipeline.
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, plus an exhaustive enumeration of the validation
//! filter's condition space.

use proptest::prelude::*;
use utf8gen::{Compilation, Utf8Generator, GENERATED_HEADER};

fn generate(source: &str) -> utf8gen::GeneratedOutput {
    let compilation = Compilation::compile(&[("lib", source)]).expect("compile failed");
    Utf8Generator::new()
        .execute(&compilation)
        .expect("generator failed")
}

/// Escape a payload string into host string-literal syntax.
fn escape_payload(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    for c in payload.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out
}

/// Read the byte payload of the sole generated method back out via `syn`.
fn roundtrip_bytes(text: &str) -> Vec<u8> {
    let body = text.strip_prefix(GENERATED_HEADER).expect("missing header");
    let file: syn::File = syn::parse_str(body).expect("generated file must parse");
    for item in &file.items {
        if let syn::Item::Impl(i) = item {
            for member in &i.items {
                if let syn::ImplItem::Fn(f) = member {
                    if let Some(syn::Stmt::Expr(syn::Expr::Lit(lit), None)) = f.block.stmts.first()
                    {
                        if let syn::Lit::ByteStr(bytes) = &lit.lit {
                            return bytes.value();
                        }
                    }
                }
            }
        }
    }
    panic!("no byte-string method body in generated file");
}

// =============================================================================
// Validation Filter Properties
// =============================================================================

/// Property: a declaration appears in the output iff it is static, partial,
/// has zero parameters, returns `string`, and carries the marker attribute
/// with a constant string argument. Enumerates all 2^5 combinations.
#[test]
fn output_membership_matches_exactly_the_all_true_case() {
    for bits in 0u8..32 {
        let is_static = bits & 1 != 0;
        let is_partial = bits & 2 != 0;
        let zero_params = bits & 4 != 0;
        let returns_string = bits & 8 != 0;
        let has_marker = bits & 16 != 0;

        let mut decl = String::new();
        if has_marker {
            decl.push_str("[Utf8(\"payload\")]\n");
        }
        decl.push_str("public ");
        if is_static {
            decl.push_str("static ");
        }
        if is_partial {
            decl.push_str("partial ");
        }
        decl.push_str(if returns_string { "string " } else { "int " });
        decl.push_str("Candidate(");
        if !zero_params {
            decl.push_str("int n");
        }
        decl.push_str(");");

        let source = format!("class Holder {{\n{}\n}}", decl);
        let output = generate(&source);

        let expected = is_static && is_partial && zero_params && returns_string && has_marker;
        assert_eq!(
            !output.sources.is_empty(),
            expected,
            "combination static={} partial={} zero_params={} returns_string={} marker={}",
            is_static,
            is_partial,
            zero_params,
            returns_string,
            has_marker
        );
    }
}

// =============================================================================
// Emission Properties
// =============================================================================

proptest! {
    /// Property: any payload survives the emit/parse round trip as its exact
    /// UTF-8 byte sequence.
    #[test]
    fn payload_round_trips_through_generated_source(payload in "[a-zA-Z0-9 ,.!?_/+-]{0,64}") {
        let source = format!(
            "class Holder {{\n[Utf8(\"{}\")]\npublic static partial string Value();\n}}",
            escape_payload(&payload)
        );
        let output = generate(&source);
        prop_assert_eq!(output.sources.len(), 1);
        prop_assert_eq!(roundtrip_bytes(&output.sources[0].text), payload.as_bytes());
    }

    /// Property: payloads with escapes and non-ASCII text still round trip
    /// byte-for-byte.
    #[test]
    fn escaped_and_unicode_payloads_round_trip(payload in prop::collection::vec(
        prop_oneof![
            Just('"'), Just('\\'), Just('\n'), Just('\t'),
            Just('é'), Just('雪'), Just('a'), Just(' '),
        ],
        0..32,
    )) {
        let payload: String = payload.into_iter().collect();
        let source = format!(
            "class Holder {{\n[Utf8(\"{}\")]\npublic static partial string Value();\n}}",
            escape_payload(&payload)
        );
        let output = generate(&source);
        prop_assert_eq!(roundtrip_bytes(&output.sources[0].text), payload.as_bytes());
    }

    /// Property: generation is deterministic for any method-name set.
    /// Names start with `m` so no host keyword can be generated.
    #[test]
    fn emission_is_deterministic(names in prop::collection::btree_set("m[a-z0-9]{0,8}", 1..6)) {
        let mut body = String::new();
        for name in &names {
            body.push_str(&format!(
                "[Utf8(\"{}\")]\npublic static partial string {}();\n",
                name, name
            ));
        }
        let source = format!("class Holder {{\n{}\n}}", body);
        let first = generate(&source);
        let second = generate(&source);
        prop_assert_eq!(first.sources, second.sources);
    }

    /// Property: every validated method lands in exactly one file, and the
    /// file count equals the number of distinct declaring types.
    #[test]
    fn one_file_per_declaring_type(type_count in 1usize..5, methods_per_type in 1usize..4) {
        let mut source = String::new();
        for t in 0..type_count {
            source.push_str(&format!("class Type{} {{\n", t));
            for m in 0..methods_per_type {
                source.push_str(&format!(
                    "[Utf8(\"t{}m{}\")]\npublic static partial string Method{}();\n",
                    t, m, m
                ));
            }
            source.push_str("}\n");
        }
        let output = generate(&source);
        prop_assert_eq!(output.sources.len(), type_count);
        let total_methods: usize = output
            .sources
            .iter()
            .map(|s| s.text.matches("fn ").count())
            .sum();
        prop_assert_eq!(total_methods, type_count * methods_per_type);
    }
}
