//! # orca-analyzer
//!
//! Core library for ORCA quantum-chemistry input parsing, semantic analysis,
//! and editor features.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (document index, completion, hover, quick fixes)
//!   ↓
//! hir       → Semantic model, suggestions, diagnostics
//!   ↓
//! parser    → Logos lexer, line-based structural parser, document model
//!   ↓
//! knowledge → Keywords, block schemas, elements, resource thresholds
//!   ↓
//! base      → Primitives (Span/Position, LineIndex, TextEdit, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → knowledge → parser → hir → ide)
// ============================================================================

/// Foundation types: positions, spans, line index, text edits
pub mod base;

/// Knowledge base: keyword tables, block schemas, elements, thresholds
pub mod knowledge;

/// Parser: Logos lexer and structural parser
pub mod parser;

/// High-level IR: semantic model and diagnostics
pub mod hir;

/// IDE features: document index, completion, hover, code actions
pub mod ide;

/// Analyzer tunables
pub mod options;

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextEdit, TextRange, TextSize};
pub use knowledge::{KnowledgeBase, KnowledgeBaseError};
pub use options::AnalysisOptions;
