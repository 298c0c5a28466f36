//! Textual edits over line/column spans.

use super::{Position, Span};

/// Replace the text covered by `span` with `new_text`.
///
/// An empty span inserts at its start.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: Position, new_text: impl Into<String>) -> Self {
        Self::replace(Span::empty(at), new_text)
    }

    pub fn is_insert(&self) -> bool {
        self.span.start == self.span.end
    }
}
