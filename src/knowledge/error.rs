//! Error types for knowledge base construction.

use thiserror::Error;

/// Errors that make a knowledge base unusable.
///
/// These are raised once, when the base is built, and never from the
/// per-document analysis path.
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    /// No route keywords were supplied.
    #[error("knowledge base has no keywords")]
    NoKeywords,

    /// No element symbols were supplied.
    #[error("knowledge base has no elements")]
    NoElements,

    /// Two entries of the same table share a case-insensitive name.
    #[error("duplicate {kind} entry: {name}")]
    Duplicate { kind: &'static str, name: String },

    /// A deprecated keyword names a successor that does not exist.
    #[error("keyword '{keyword}' names unknown successor '{successor}'")]
    UnknownSuccessor { keyword: String, successor: String },

    /// A basis set lists a method family no method belongs to.
    #[error("keyword '{keyword}' lists unknown method family '{family}'")]
    UnknownFamily { keyword: String, family: String },

    /// JSON decoding failed.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KnowledgeBaseError {
    pub(crate) fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            name: name.into(),
        }
    }
}
