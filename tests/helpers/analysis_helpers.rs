//! Helpers for setting up analysis hosts and collecting diagnostics.

use orca::hir::{Diagnostic, Severity};
use orca::ide::AnalysisHost;

pub const DOC: &str = "test.inp";

/// Creates an AnalysisHost with a single open document.
pub fn host_with(source: &str) -> AnalysisHost {
    let host = AnalysisHost::new();
    host.open(DOC, source);
    host
}

/// Get all diagnostics for an ORCA source string.
pub fn diagnostics_for(source: &str) -> Vec<Diagnostic> {
    host_with(source)
        .diagnostics(DOC)
        .expect("document was just opened")
}

/// Get only error-level diagnostics.
pub fn errors_for(source: &str) -> Vec<Diagnostic> {
    diagnostics_for(source)
        .into_iter()
        .filter(|d| d.severity == Severity::Error)
        .collect()
}

/// Diagnostic codes in reported order.
pub fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(|d| d.code.as_str()).collect()
}

/// Assert a source has no diagnostics at all.
pub fn assert_clean(source: &str) {
    let diagnostics = diagnostics_for(source);
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics, got {}:\n{}",
        diagnostics.len(),
        diagnostics
            .iter()
            .map(|d| format!("  Line {}: {} ({})", d.span.start.line + 1, d.message, d.code))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Apply edits to a source string. Edits must not overlap.
pub fn apply_edits(source: &str, edits: &[orca::TextEdit]) -> String {
    let index = orca::LineIndex::new(source);
    let mut ranges: Vec<_> = edits
        .iter()
        .map(|edit| {
            let start = index.offset(source, edit.span.start).expect("edit start in range");
            let end = index.offset(source, edit.span.end).expect("edit end in range");
            (usize::from(start)..usize::from(end), edit.new_text.as_str())
        })
        .collect();
    ranges.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));

    let mut result = source.to_string();
    for (range, text) in ranges {
        result.replace_range(range, text);
    }
    result
}
