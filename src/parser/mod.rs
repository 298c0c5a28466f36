//! Parser for ORCA input files
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind, byte range and line/column span
//!     ↓
//! Parser → SourceFile (route lines, %blocks, geometry) + SyntaxErrors
//!     ↓
//! HIR → annotated model and diagnostics
//! ```
//!
//! Every document is reparsed in full on change; parsing is linear in the
//! number of tokens.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod errors;
mod lexer;
mod token_kind;

pub use ast::*;
pub use errors::{ErrorCode, RelatedInfo, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, parse};
pub use token_kind::TokenKind;
