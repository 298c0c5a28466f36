//! High-level IR (HIR): semantic model and diagnostics.
//!
//! Everything here is a pure function of a parse result and a
//! [`KnowledgeBase`](crate::knowledge::KnowledgeBase); nothing is cached or
//! shared between documents.
//!
//! ## Key Types
//!
//! - [`SemanticModel`]: Annotations for every leaf of a document
//! - [`Annotation`]: Resolution of one keyword, name, value or element
//! - [`Diagnostic`]: A reported problem with its fixes
//! - [`Suggestion`]: A ranked near-miss replacement
//!
//! ## Layers
//!
//! ```text
//! parse(text)                  ← document model + syntax errors
//!     │
//!     ▼
//! annotate(file)               ← knowledge-base lookup, suggestions,
//!     │                          primary method / basis, conflicts
//!     ▼
//! diagnose(parse, model)       ← ordered, deduplicated diagnostics
//! ```

mod annotate;
mod diagnostics;
mod suggest;

pub use annotate::{
    Annotation, Conflict, Incompatibility, LeafKind, Resolution, SemanticModel, annotate,
};
pub use diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticCollector, Fix, Severity, diagnose,
};
pub use suggest::{Suggestion, compare_names, levenshtein, rank};
