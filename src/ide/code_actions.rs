//! Quick fixes for diagnostics.

use std::sync::Arc;

use crate::base::TextEdit;
use crate::hir::{Diagnostic, DiagnosticCode};

/// An edit the user can apply to resolve a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeAction {
    pub title: Arc<str>,
    /// The diagnostic this action resolves.
    pub code: DiagnosticCode,
    pub edits: Vec<TextEdit>,
    /// The first fix of a diagnostic is the preferred one.
    pub is_preferred: bool,
}

impl CodeAction {
    /// LSP code action kind.
    pub fn kind(&self) -> &'static str {
        "quickfix"
    }
}

/// Code actions for one diagnostic, preferred first.
pub fn code_actions(diagnostic: &Diagnostic) -> Vec<CodeAction> {
    diagnostic
        .fixes
        .iter()
        .enumerate()
        .map(|(idx, fix)| CodeAction {
            title: fix.title.clone(),
            code: diagnostic.code,
            edits: vec![fix.edit.clone()],
            is_preferred: idx == 0,
        })
        .collect()
}
