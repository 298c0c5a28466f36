//! Foundation types for the ORCA toolchain.
//!
//! This module provides fundamental types used throughout the analyzer:
//! - [`Position`], [`Span`] - Line/column positions for tokens and model nodes
//! - [`LineIndex`] - Conversion between byte offsets and line/column positions
//! - [`TextEdit`] - Replacement of a span with new text
//! - [`TextRange`], [`TextSize`] - Byte ranges into the document text
//!
//! This module has NO dependencies on other orca modules.

mod line_index;
mod position;
mod text_edit;

pub use line_index::LineIndex;
pub use position::{Position, Span};
pub use text_edit::TextEdit;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
