//! Hover through the analysis host.

use orca::Position;
use rstest::rstest;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn hover_text(source: &str, line: u32, column: u32) -> Option<String> {
    host_with(source)
        .hover(DOC, Position::new(line, column))
        .unwrap()
        .map(|result| result.contents)
}

#[rstest]
#[case::method(1, 4, "**B3LYP** *Method, hybrid*")]
#[case::basis(1, 12, "**def2-TZVP** *Basis set, karlsruhe*")]
#[case::job_type(1, 19, "**OPT** *Job type, job*")]
#[case::block(3, 2, "**%pal**")]
#[case::parameter(5, 4, "**maxiter** in `%scf`")]
#[case::coordinate_system(8, 3, "**xyz** *Cartesian coordinates*")]
#[case::charge(8, 6, "**Charge** 0")]
#[case::multiplicity(8, 8, "**Multiplicity** 1 (singlet)")]
#[case::element(9, 0, "**O** Oxygen")]
fn test_hover_complete_job(
    #[case] line: u32,
    #[case] column: u32,
    #[case] expected_start: &str,
) {
    let contents = hover_text(COMPLETE_JOB, line, column).expect("hover result");
    assert!(
        contents.starts_with(expected_start),
        "expected '{}', got '{}'",
        expected_start,
        contents
    );
}

#[test]
fn test_hover_span_covers_word() {
    let host = host_with(COMPLETE_JOB);
    let result = host.hover(DOC, Position::new(1, 10)).unwrap().unwrap();
    assert_eq!(result.span, orca::Span::from_coords(1, 8, 1, 17));
}

#[test]
fn test_hover_unknown_names_suggest_replacement() {
    assert_eq!(
        hover_text("! B3LYP def2-TZVPP2", 0, 10).as_deref(),
        Some("Unknown keyword `def2-TZVPP2`\n\nDid you mean `def2-TZVPP`?")
    );
    let block = hover_text("%scff maxiter 5 end\n", 0, 3).unwrap();
    assert_eq!(block, "Unknown block `scff`\n\nDid you mean `scf`?");
}

#[test]
fn test_hover_deprecated_keyword() {
    let contents = hover_text("! Grid5", 0, 3).unwrap();
    assert!(contents.contains("Deprecated: use `DefGrid2` instead."));
}

#[test]
fn test_hover_restricted_basis_lists_families() {
    let contents = hover_text("! HF STO-3G", 0, 7).unwrap();
    assert!(contents.contains("Intended for: hf, gga, meta-gga, hybrid, semiempirical"));
}

#[rstest]
#[case::comment(0, 3)]
#[case::whitespace(1, 1)]
#[case::number_value(2, 11)]
#[case::coordinates(9, 10)]
fn test_no_hover(#[case] line: u32, #[case] column: u32) {
    assert_eq!(hover_text(COMPLETE_JOB, line, column), None);
}
