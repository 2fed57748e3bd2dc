//! Declaration-language frontend.
//!
//! This module contains all frontend components:
//! - `lexer`: tokenization of source code
//! - `parser`: parsing tokens into source units
//! - `ast`: declaration tree definitions
//! - `symbols`: symbol table and builtin types
//! - `resolver`: two-pass symbol resolution
//! - `const_eval`: constant string/int folding
//! - `diagnostics`: error reporting

pub mod ast;
pub mod const_eval;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod symbols;
