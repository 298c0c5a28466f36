//! Document Index: versioned snapshots of every open document.
//!
//! Each document maps to an immutable [`Document`] snapshot behind an `Arc`.
//! Readers clone the `Arc` and never hold the lock while they work.
//! Writers analyze outside the lock and commit with a compare-and-set on the
//! version: a result is discarded only if a newer version was committed
//! while it was being analyzed. Incremental edits whose base was replaced by
//! an older version are re-applied on the replacement.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{LineIndex, Position, Span};
use crate::hir::{Diagnostic, SemanticModel, annotate, diagnose};
use crate::knowledge::KnowledgeBase;
use crate::options::AnalysisOptions;
use crate::parser::{Parse, parse};

/// Document identifier, usually the URI the editor uses.
pub type DocumentId = SmolStr;

/// Errors from misusing the index. Document content never produces one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("document '{0}' is not open")]
    UnknownDocument(DocumentId),

    #[error("stale version {received} for document '{id}' (current version is {current})")]
    StaleVersion {
        id: DocumentId,
        current: i32,
        received: i32,
    },

    #[error("version {version} of document '{id}' was superseded during analysis")]
    Superseded { id: DocumentId, version: i32 },

    #[error("edit at {line}:{column} is outside document '{id}'")]
    EditOutOfRange {
        id: DocumentId,
        line: u32,
        column: u32,
    },
}

/// One content change sent by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentChange {
    /// Replace the whole text.
    Full(String),
    /// Replace the text covered by `span`.
    Edit { span: Span, text: String },
}

impl DocumentChange {
    pub fn is_full(&self) -> bool {
        matches!(self, DocumentChange::Full(_))
    }

    pub fn full(text: impl Into<String>) -> Self {
        DocumentChange::Full(text.into())
    }

    pub fn edit(span: Span, text: impl Into<String>) -> Self {
        DocumentChange::Edit {
            span,
            text: text.into(),
        }
    }
}

/// Immutable analysis snapshot of one document version.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    pub version: i32,
    pub text: Arc<str>,
    pub line_index: LineIndex,
    pub parse: Parse,
    pub model: SemanticModel,
    /// Ordered and deduplicated.
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Parse, annotate and diagnose `text`.
    pub fn analyze(
        id: DocumentId,
        version: i32,
        text: Arc<str>,
        kb: &KnowledgeBase,
        options: &AnalysisOptions,
    ) -> Self {
        let line_index = LineIndex::new(&text);
        let parse = parse(&text, kb);
        let model = annotate(&parse.file, kb, options);
        let diagnostics = diagnose(&text, &line_index, &parse, &model, kb);
        tracing::debug!(
            document = %id,
            version,
            diagnostics = diagnostics.len(),
            "document analyzed"
        );
        Self {
            id,
            version,
            text,
            line_index,
            parse,
            model,
            diagnostics,
        }
    }
}

/// Apply a sequence of changes to `text`, each relative to the result of
/// the previous one.
pub fn apply_changes(
    id: &DocumentId,
    text: &str,
    changes: &[DocumentChange],
) -> Result<String, IndexError> {
    let mut current = text.to_string();
    for change in changes {
        match change {
            DocumentChange::Full(replacement) => current.clone_from(replacement),
            DocumentChange::Edit { span, text: replacement } => {
                let index = LineIndex::new(&current);
                let out_of_range = |at: Position| IndexError::EditOutOfRange {
                    id: id.clone(),
                    line: at.line,
                    column: at.column,
                };
                let start = index
                    .offset(&current, span.start)
                    .ok_or_else(|| out_of_range(span.start))?;
                let end = index
                    .offset(&current, span.end)
                    .ok_or_else(|| out_of_range(span.end))?;
                if end < start {
                    return Err(out_of_range(span.end));
                }
                current.replace_range(usize::from(start)..usize::from(end), replacement);
            }
        }
    }
    Ok(current)
}

/// Outcome of [`DocumentIndex::commit_edit`].
#[derive(Debug, Clone)]
pub enum EditCommit {
    Committed,
    /// An older version replaced the base; re-apply the edits on this snapshot.
    Rebase(Arc<Document>),
}

/// Registry of open documents.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    documents: RwLock<FxHashMap<DocumentId, Arc<Document>>>,
}

impl DocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot of a document.
    pub fn get(&self, id: &str) -> Option<Arc<Document>> {
        self.documents.read().get(id).cloned()
    }

    /// Current snapshot, or [`IndexError::UnknownDocument`].
    pub fn snapshot(&self, id: &str) -> Result<Arc<Document>, IndexError> {
        self.get(id)
            .ok_or_else(|| IndexError::UnknownDocument(DocumentId::new(id)))
    }

    /// Store a document unconditionally, replacing any previous snapshot.
    pub fn insert(&self, document: Arc<Document>) {
        self.documents
            .write()
            .insert(document.id.clone(), document);
    }

    /// Replace the stored snapshot with `document` unless the stored one
    /// is already as new.
    ///
    /// Fails with [`IndexError::Superseded`] if a version at least as new
    /// was committed first; the new document is then dropped.
    pub fn commit(&self, document: Arc<Document>) -> Result<(), IndexError> {
        let mut documents = self.documents.write();
        Self::newer_than_stored(&documents, &document)?;
        documents.insert(document.id.clone(), document);
        Ok(())
    }

    /// Commit a document computed from the snapshot of version `base`.
    ///
    /// Like [`commit`](Self::commit), but if an older version replaced
    /// `base` in the meantime nothing is stored and that snapshot is
    /// returned so the edits can be re-applied to it.
    pub fn commit_edit(&self, base: i32, document: Arc<Document>) -> Result<EditCommit, IndexError> {
        let mut documents = self.documents.write();
        let current = Self::newer_than_stored(&documents, &document)?;
        if current.version != base {
            return Ok(EditCommit::Rebase(current.clone()));
        }
        documents.insert(document.id.clone(), document);
        Ok(EditCommit::Committed)
    }

    /// Stored snapshot, checked to be older than `document`.
    fn newer_than_stored<'a>(
        documents: &'a FxHashMap<DocumentId, Arc<Document>>,
        document: &Document,
    ) -> Result<&'a Arc<Document>, IndexError> {
        let Some(current) = documents.get(&document.id) else {
            return Err(IndexError::UnknownDocument(document.id.clone()));
        };
        if current.version >= document.version {
            tracing::warn!(
                document = %document.id,
                version = document.version,
                current = current.version,
                "discarding superseded analysis"
            );
            return Err(IndexError::Superseded {
                id: document.id.clone(),
                version: document.version,
            });
        }
        Ok(current)
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Document>> {
        self.documents.write().remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.read().contains_key(id)
    }

    /// Identifiers of all open documents, sorted.
    pub fn ids(&self) -> Vec<DocumentId> {
        let mut ids: Vec<_> = self.documents.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}
