//! Syntax error types
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - Hints for fixing
//! - Related source locations

use super::codes::ErrorCode;
use crate::base::Span;

/// Related location information for an error
///
/// Used to point to related source locations, e.g. the line that
/// interrupted an unterminated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Description of this related location
    pub message: String,
    /// Source location
    pub span: Span,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A syntax error produced while building the document model.
///
/// Syntax errors never stop the parser; each one marks a line (or a zone)
/// that was skipped or closed early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub span: Span,
    /// Categorized error code
    pub code: ErrorCode,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    /// Create a new syntax error with minimal information
    pub fn new(message: impl Into<String>, span: Span, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            span,
            code,
            hint: None,
            related: vec![],
        }
    }

    /// Create an error using the code's default message
    pub fn from_code(code: ErrorCode, span: Span) -> Self {
        Self::new(code.default_message(), span, code)
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add related information
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    /// Format the error for display
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}
