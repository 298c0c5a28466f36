//! End-to-end diagnostics for representative inputs.

use orca::hir::{DiagnosticCode, Severity};
use orca::{Position, Span};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_well_formed_job_is_clean() {
    assert_clean(&with_water("! B3LYP def2-TZVP OPT"));
}

#[test]
fn test_fixtures_are_clean() {
    assert_clean(COMPLETE_JOB);
    assert_clean(INTERNAL_COORDINATES);
    assert_clean(FILE_GEOMETRY);
}

#[test]
fn test_misspelled_method() {
    let errors = errors_for("! B3LIP def2-TZVP");
    assert_eq!(codes(&errors), vec!["unknown-keyword"]);

    let error = &errors[0];
    assert_eq!(error.span, Span::from_coords(0, 2, 0, 7));
    assert_eq!(error.fixes[0].edit.new_text, "B3LYP");
    assert_eq!(apply_edits("! B3LIP def2-TZVP", &[error.fixes[0].edit.clone()]), "! B3LYP def2-TZVP");
}

#[test]
fn test_missing_multiplicity() {
    let source = WATER_GEOMETRY.replace("* xyz 0 1", "* xyz 0");
    assert_eq!(codes(&errors_for(&source)), vec!["missing-charge-multiplicity"]);

    let with_route = format!("! B3LYP def2-TZVP OPT\n{}", source);
    assert_eq!(codes(&diagnostics_for(&with_route)), vec!["missing-charge-multiplicity"]);
}

#[test]
fn test_bare_header_without_multiplicity() {
    let diagnostics = diagnostics_for("* xyz 0");
    let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, DiagnosticCode::MissingChargeMultiplicity);
    assert!(diagnostics.iter().all(|d| d.code != DiagnosticCode::UnterminatedGeometry));
}

#[test]
fn test_geometry_may_run_to_end_of_input() {
    let open = WATER_GEOMETRY.trim_end().trim_end_matches('*');
    assert_clean(&format!("! HF def2-SVP\n{}", open));
}

#[test]
fn test_unterminated_pal_before_route_line() {
    let source = "%pal nprocs 4\n! HF STO-3G\n";
    let host = host_with(source);
    let analysis = host.analysis(DOC).unwrap();

    let errors: Vec<_> = analysis.diagnostics().iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, DiagnosticCode::UnterminatedBlock);
    assert_eq!(errors[0].span, Span::from_coords(0, 0, 0, 4));

    let keywords: Vec<_> = analysis
        .document()
        .model
        .route_keywords()
        .map(|a| (a.text.as_str(), a.is_resolved()))
        .collect();
    assert_eq!(keywords, vec![("HF", true), ("STO-3G", true)]);
}

#[test]
fn test_syntax_errors_surface_as_diagnostics() {
    let diagnostics = diagnostics_for("! HF\nstray words\nend\n%\n");
    assert!(diagnostics.iter().all(|d| d.code == DiagnosticCode::SyntaxError
        || d.severity == Severity::Info));
    let error_codes: Vec<_> = diagnostics
        .iter()
        .filter_map(|d| d.error_code)
        .map(|code| code.as_str())
        .collect();
    assert_eq!(error_codes, vec!["E0901", "E0203", "E0301"]);
}

#[test]
fn test_related_information_points_at_primary() {
    let diagnostics = diagnostics_for(&with_water("! PBE0 def2-SVP B3LYP"));
    assert_eq!(codes(&diagnostics), vec!["duplicate-category"]);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.span, Span::from_coords(0, 16, 0, 21));
    assert_eq!(diagnostic.related[0].span, Span::from_coords(0, 2, 0, 6));
    assert!(diagnostic.message.contains("'PBE0'"));
}

#[test]
fn test_incompatible_basis_is_a_warning() {
    let diagnostics = diagnostics_for(&with_water("! CCSD(T) STO-3G"));
    assert_eq!(codes(&diagnostics), vec!["incompatible-basis"]);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].related[0].span.start, Position::new(0, 2));
}

#[test]
fn test_resource_recommendations_scale_with_atoms() {
    let small = format!("! HF def2-SVP\n%maxcore 1500\n%pal nprocs 16 end\n{}", WATER_GEOMETRY);
    assert_eq!(codes(&diagnostics_for(&small)), vec!["excessive-nprocs"]);

    let atoms: String = (0..60).map(|i| format!("H 0.0 0.0 {}.0\n", i)).collect();
    let large = format!("! HF def2-SVP\n%maxcore 1500\n%pal nprocs 16 end\n* xyz 0 1\n{}*\n", atoms);
    let diagnostics = diagnostics_for(&large);
    assert_eq!(codes(&diagnostics), vec!["low-memory"]);
    assert_eq!(diagnostics[0].fixes[0].edit.new_text, "2000");
}

#[test]
fn test_diagnostics_are_ordered_by_position() {
    let source = "! B3LIP\n%scff end\n* xyz 0 0\nQq 0 0 0\n*\n";
    let diagnostics = diagnostics_for(source);
    assert_eq!(
        codes(&diagnostics),
        vec!["unknown-keyword", "unknown-block", "invalid-multiplicity", "unknown-element"]
    );
    let starts: Vec<_> = diagnostics.iter().map(|d| d.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}

#[test]
fn test_incomplete_route_is_reported() {
    let diagnostics = diagnostics_for(&with_water("! OPT"));
    assert_eq!(codes(&diagnostics), vec!["missing-basis", "missing-method"]);
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Info));

    assert_eq!(codes(&diagnostics_for(&with_water("! PBE0 OPT"))), vec!["missing-basis"]);
    assert_eq!(codes(&diagnostics_for(&with_water("! def2-SVP OPT"))), vec!["missing-method"]);
    assert_clean(&with_water("! AM1 OPT"));
}

#[test]
fn test_empty_document_has_no_diagnostics() {
    assert_clean("");
    assert_clean("# just a comment\n");
}
