//! Quick fixes offered for diagnostics and applied back through the host.

use orca::hir::DiagnosticCode;
use orca::ide::DocumentChange;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_quick_fix_round_trip_through_host() {
    let source = with_water("! B3LIP def2-TZVP OPT");
    let host = host_with(&source);

    let diagnostics = host.diagnostics(DOC).unwrap();
    assert_eq!(codes(&diagnostics), vec!["unknown-keyword"]);
    let actions = host.code_actions(DOC, &diagnostics[0]).unwrap();

    let action = &actions[0];
    assert!(action.is_preferred);
    assert_eq!(action.kind(), "quickfix");
    assert_eq!(action.code, DiagnosticCode::UnknownKeyword);
    assert_eq!(&*action.title, "Replace 'B3LIP' with 'B3LYP'");

    let changes: Vec<_> = action
        .edits
        .iter()
        .map(|edit| DocumentChange::edit(edit.span, edit.new_text.clone()))
        .collect();
    let document = host.change(DOC, &changes, 1).unwrap();
    assert!(document.text.starts_with("! B3LYP def2-TZVP OPT\n"));
    assert!(document.diagnostics.is_empty());
}

#[test]
fn test_every_suggestion_becomes_an_action() {
    let host = host_with("! D5\n");
    let diagnostics = host.diagnostics(DOC).unwrap();
    let unknown = diagnostics
        .iter()
        .find(|d| d.code == DiagnosticCode::UnknownKeyword)
        .unwrap();
    let actions = host.code_actions(DOC, unknown).unwrap();

    let replacements: Vec<_> = actions.iter().map(|a| a.edits[0].new_text.as_str()).collect();
    let suggestions: Vec<_> = unknown.suggestions.iter().map(|s| s.as_str()).collect();
    assert_eq!(replacements, suggestions);
    assert!(replacements.starts_with(&["D3", "D4"]));
    assert_eq!(actions.iter().filter(|a| a.is_preferred).count(), 1);
}

#[test]
fn test_informational_diagnostics_without_fix() {
    let host = host_with("%maxcore 4000\n");
    for diagnostic in host.diagnostics(DOC).unwrap() {
        assert!(host.code_actions(DOC, &diagnostic).unwrap().is_empty());
    }
}

#[test]
fn test_terminator_actions() {
    let source = "! HF def2-SVP\n%scf maxiter 10\n* xyz 0 1\nH 0 0 0\nH 0 0 0.74\n%maxcore 2000\n";
    let host = host_with(source);
    let diagnostics = host.diagnostics(DOC).unwrap();
    assert_eq!(codes(&diagnostics), vec!["unterminated-block", "unterminated-geometry"]);

    let edits: Vec<_> = diagnostics
        .iter()
        .flat_map(|d| host.code_actions(DOC, d).unwrap())
        .flat_map(|action| action.edits)
        .collect();
    let fixed = apply_edits(source, &edits);
    assert_eq!(
        fixed,
        "! HF def2-SVP\n%scf maxiter 10\nend\n* xyz 0 1\nH 0 0 0\nH 0 0 0.74\n*\n%maxcore 2000\n"
    );
    assert_clean(&fixed);
}
