//! IDE features: high-level APIs for LSP handlers.
//!
//! This module provides the interface between the semantic model (HIR)
//! and an editor protocol server. Each function corresponds to an LSP
//! request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at the LSP boundary
//! 3. **Snapshots**: Queries read one immutable document version
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```
//! use orca::base::Position;
//! use orca::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new();
//! host.open("job.inp", "! B3LYP de");
//!
//! let items = host.completions("job.inp", Position::new(0, 10)).unwrap();
//! assert!(items[0].label.starts_with("def2"));
//! ```

mod analysis;
mod code_actions;
mod completion;
mod hover;
mod index;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use code_actions::{CodeAction, code_actions};
pub use completion::{CompletionContext, CompletionItem, CompletionKind, completions, determine_context};
pub use hover::{HoverResult, hover};
pub use index::{
    Document, DocumentChange, DocumentId, DocumentIndex, EditCommit, IndexError, apply_changes,
};
pub use text_utils::{extract_word_at_cursor, word_prefix};
