#![forbid(unsafe_code)]
//! utf8gen: a UTF-8 string literal source generator
//!
//! Declarations marked with the `[Utf8("...")]` attribute are completed with
//! generated Rust methods returning the attribute's payload as a `&'static
//! [u8]` UTF-8 byte literal, so the bytes are computed once at generation
//! time rather than encoded at runtime.
//!
//! The crate has two halves: a small declaration-language frontend
//! ([`frontend`]) that builds a semantic model from source text, and the
//! generator pipeline ([`generator`]) that collects, validates, groups, and
//! emits.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **Malformed input**: never a panic. A candidate that fails validation is
//!   skipped; a source file that fails to parse reports [`CompileErrors`].
//!
//! ## Example
//!
//! ```
//! use utf8gen::{Compilation, Utf8Generator};
//!
//! let source = r#"
//!     class Banners {
//!         [Utf8("hello world")]
//!         public static partial string greeting();
//!     }
//! "#;
//! let compilation = Compilation::compile(&[("banners", source)])?;
//! let output = Utf8Generator::new().execute(&compilation)?;
//! assert_eq!(output.sources[0].filename, "Banners.utf8.g.rs");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compilation;
pub mod frontend;
pub mod generator;

pub use compilation::Compilation;
pub use frontend::diagnostics::{CompileError, CompileErrors};
pub use generator::{
    DirectorySink, EmitError, GeneratedOutput, GeneratedSource, MemorySink, RejectReason,
    Rejection, SourceSink, Utf8Generator, GENERATED_FILE_SUFFIX, GENERATED_HEADER,
};
