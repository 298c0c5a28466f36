//! AnalysisHost and Analysis: unified state management for IDE features.
//!
//! The `AnalysisHost` owns the document index and provides `Analysis`
//! snapshots for querying. A snapshot pins one document version, so every
//! query made through it sees the same text, model and diagnostics even
//! while newer edits are being committed.
//!
//! ## Usage
//!
//! ```
//! use orca::base::Position;
//! use orca::ide::{AnalysisHost, DocumentChange};
//!
//! let host = AnalysisHost::new();
//! host.open("water.inp", "! B3LIP def2-SVP\n");
//! let diagnostics = host.diagnostics("water.inp").unwrap();
//! assert!(diagnostics.iter().any(|d| d.code.as_str() == "unknown-keyword"));
//!
//! host.change("water.inp", &[DocumentChange::full("! B3LYP def2-SVP\n")], 1).unwrap();
//! let analysis = host.analysis("water.inp").unwrap();
//! assert!(analysis.hover(Position::new(0, 3)).is_some());
//! ```

use std::sync::Arc;

use rayon::prelude::*;

use crate::base::Position;
use crate::hir::Diagnostic;
use crate::knowledge::KnowledgeBase;
use crate::options::AnalysisOptions;

use super::index::{
    Document, DocumentChange, DocumentId, DocumentIndex, EditCommit, IndexError, apply_changes,
};
use super::{CodeAction, CompletionItem, HoverResult};

/// Owns all document state for the IDE layer.
///
/// Every method takes `&self`; the host can be shared between threads and
/// different documents are analyzed independently.
pub struct AnalysisHost {
    kb: Arc<KnowledgeBase>,
    options: AnalysisOptions,
    index: DocumentIndex,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a host backed by the built-in knowledge base.
    pub fn new() -> Self {
        Self::with_knowledge_base(KnowledgeBase::builtin())
    }

    pub fn with_knowledge_base(kb: Arc<KnowledgeBase>) -> Self {
        Self {
            kb,
            options: AnalysisOptions::default(),
            index: DocumentIndex::new(),
        }
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    fn analyze(&self, id: DocumentId, version: i32, text: Arc<str>) -> Document {
        Document::analyze(id, version, text, &self.kb, &self.options)
    }

    /// Open (or reopen) a document at version 0.
    pub fn open(&self, id: impl Into<DocumentId>, text: impl Into<Arc<str>>) -> Arc<Document> {
        let document = Arc::new(self.analyze(id.into(), 0, text.into()));
        self.index.insert(document.clone());
        document
    }

    /// Open many documents, analyzing them in parallel.
    pub fn open_many<I, T>(&self, documents: Vec<(I, T)>) -> Vec<Arc<Document>>
    where
        I: Into<DocumentId> + Send,
        T: Into<Arc<str>> + Send,
    {
        let analyzed: Vec<Arc<Document>> = documents
            .into_par_iter()
            .map(|(id, text)| Arc::new(self.analyze(id.into(), 0, text.into())))
            .collect();
        for document in &analyzed {
            self.index.insert(document.clone());
        }
        tracing::info!(count = analyzed.len(), "opened documents");
        analyzed
    }

    /// Apply editor changes and commit the result as `version`.
    ///
    /// `version` must be newer than the stored one. The analysis runs
    /// outside the index lock. If a newer version was committed meanwhile
    /// this result is dropped with [`IndexError::Superseded`]; if an older
    /// one was, incremental edits are re-applied on top of it.
    pub fn change(
        &self,
        id: &str,
        changes: &[DocumentChange],
        version: i32,
    ) -> Result<Arc<Document>, IndexError> {
        let replaces_text = changes.iter().any(DocumentChange::is_full);
        let mut base = self.index.snapshot(id)?;
        loop {
            if version <= base.version {
                tracing::debug!(
                    document = %base.id,
                    current = base.version,
                    received = version,
                    "rejecting stale change"
                );
                return Err(IndexError::StaleVersion {
                    id: base.id.clone(),
                    current: base.version,
                    received: version,
                });
            }
            let text = apply_changes(&base.id, &base.text, changes)?;
            let document = Arc::new(self.analyze(base.id.clone(), version, text.into()));
            if replaces_text {
                self.index.commit(document.clone())?;
                return Ok(document);
            }
            match self.index.commit_edit(base.version, document.clone())? {
                EditCommit::Committed => return Ok(document),
                EditCommit::Rebase(current) => {
                    tracing::debug!(
                        document = %current.id,
                        from = base.version,
                        to = current.version,
                        "re-applying edits"
                    );
                    base = current;
                }
            }
        }
    }

    /// Close a document. Returns `false` if it was not open.
    pub fn close(&self, id: &str) -> bool {
        let closed = self.index.remove(id).is_some();
        tracing::debug!(document = id, closed, "close document");
        closed
    }

    /// Get a consistent snapshot of one document for querying.
    pub fn analysis(&self, id: &str) -> Result<Analysis<'_>, IndexError> {
        Ok(Analysis {
            document: self.index.snapshot(id)?,
            kb: &self.kb,
            options: &self.options,
        })
    }

    pub fn diagnostics(&self, id: &str) -> Result<Vec<Diagnostic>, IndexError> {
        Ok(self.analysis(id)?.diagnostics().to_vec())
    }

    pub fn completions(&self, id: &str, position: Position) -> Result<Vec<CompletionItem>, IndexError> {
        Ok(self.analysis(id)?.completions(position))
    }

    pub fn hover(&self, id: &str, position: Position) -> Result<Option<HoverResult>, IndexError> {
        Ok(self.analysis(id)?.hover(position))
    }

    pub fn code_actions(&self, id: &str, diagnostic: &Diagnostic) -> Result<Vec<CodeAction>, IndexError> {
        Ok(self.analysis(id)?.code_actions(diagnostic))
    }
}

/// An immutable snapshot of one analyzed document.
///
/// All IDE queries go through this struct to ensure consistent results.
pub struct Analysis<'a> {
    document: Arc<Document>,
    kb: &'a KnowledgeBase,
    options: &'a AnalysisOptions,
}

impl Analysis<'_> {
    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn version(&self) -> i32 {
        self.document.version
    }

    /// Ordered diagnostics of the snapshot.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.document.diagnostics
    }

    /// Get completions at a position.
    pub fn completions(&self, position: Position) -> Vec<CompletionItem> {
        super::completions(&self.document, self.kb, self.options, position)
    }

    /// Get hover information at a position.
    pub fn hover(&self, position: Position) -> Option<HoverResult> {
        super::hover(&self.document.model, self.kb, position)
    }

    /// Quick fixes for a diagnostic.
    pub fn code_actions(&self, diagnostic: &Diagnostic) -> Vec<CodeAction> {
        super::code_actions(diagnostic)
    }
}
