//! Applying quick fixes resolves the diagnostic they belong to.

use orca::hir::DiagnosticCode;
use rstest::rstest;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn fix_first(source: &str, code: DiagnosticCode) -> String {
    let diagnostics = diagnostics_for(source);
    let diagnostic = diagnostics
        .iter()
        .find(|d| d.code == code)
        .unwrap_or_else(|| panic!("no {} in {:?}", code, codes(&diagnostics)));
    let fix = diagnostic.fixes.first().expect("diagnostic has a fix");
    apply_edits(source, &[fix.edit.clone()])
}

#[rstest]
#[case::misspelled_keyword(with_water("! B3LIP def2-SVP"), DiagnosticCode::UnknownKeyword)]
#[case::deprecated_keyword(with_water("! PBE Grid5 def2-SVP"), DiagnosticCode::DeprecatedKeyword)]
#[case::unterminated_block("%pal nprocs 4\n! HF STO-3G\n".to_string(), DiagnosticCode::UnterminatedBlock)]
#[case::unterminated_multiline_block(
    format!("%scf\n  maxiter 100\n{}", with_water("! HF")),
    DiagnosticCode::UnterminatedBlock
)]
#[case::unterminated_geometry(
    "! HF def2-SVP\n* xyz 0 1\nH 0 0 0\nH 0 0 0.74\n%maxcore 2000\n".to_string(),
    DiagnosticCode::UnterminatedGeometry
)]
#[case::missing_multiplicity(WATER_GEOMETRY.replace("* xyz 0 1", "* xyz 0"), DiagnosticCode::MissingChargeMultiplicity)]
#[case::missing_both(WATER_GEOMETRY.replace("* xyz 0 1", "* xyz"), DiagnosticCode::MissingChargeMultiplicity)]
#[case::non_integer_charge(WATER_GEOMETRY.replace("* xyz 0 1", "* xyz zero 1"), DiagnosticCode::MissingChargeMultiplicity)]
#[case::file_without_header("! HF\n* xyzfile water.xyz\n".to_string(), DiagnosticCode::MissingChargeMultiplicity)]
#[case::invalid_multiplicity(WATER_GEOMETRY.replace("* xyz 0 1", "* xyz 0 -2"), DiagnosticCode::InvalidMultiplicity)]
#[case::unknown_block(with_water("! HF\n%scff maxiter 10 end"), DiagnosticCode::UnknownBlock)]
#[case::unknown_parameter(with_water("! HF\n%scf maxitr 10 end"), DiagnosticCode::UnknownBlockParameter)]
#[case::invalid_choice(with_water("! HF\n%scf convergence tigth end"), DiagnosticCode::InvalidParameterValue)]
#[case::low_memory(with_water("! HF\n%maxcore 200"), DiagnosticCode::LowMemory)]
#[case::excessive_nprocs(with_water("! HF\n%pal nprocs 128 end"), DiagnosticCode::ExcessiveNprocs)]
#[case::unknown_coordinate_system(WATER_GEOMETRY.replace("xyz", "xzy"), DiagnosticCode::UnknownCoordinateSystem)]
fn test_fix_resolves_diagnostic(#[case] source: String, #[case] code: DiagnosticCode) {
    let fixed = fix_first(&source, code);
    let remaining = diagnostics_for(&fixed);
    assert!(
        remaining.iter().all(|d| d.code != code),
        "still reports {} after fix:\n{}",
        code,
        fixed
    );
}

#[test]
fn test_fixed_document_is_clean() {
    let source = "! B3LIP def2-SVP\n%pal nprocs 2\n* xyz 0\nO 0.0 0.0 0.0\nH 0.0 0.76 0.59\nH 0.0 -0.76 0.59\n*\n";
    let mut current = source.to_string();
    for code in [
        DiagnosticCode::UnknownKeyword,
        DiagnosticCode::UnterminatedBlock,
        DiagnosticCode::MissingChargeMultiplicity,
    ] {
        current = fix_first(&current, code);
    }
    assert_clean(&current);
    assert_eq!(
        current,
        "! B3LYP def2-SVP\n%pal nprocs 2\nend\n* xyz 0 1\nO 0.0 0.0 0.0\nH 0.0 0.76 0.59\nH 0.0 -0.76 0.59\n*\n"
    );
}

#[test]
fn test_header_fix_text() {
    let fixed = fix_first(
        &WATER_GEOMETRY.replace("* xyz 0 1", "* xyz 0"),
        DiagnosticCode::MissingChargeMultiplicity,
    );
    assert!(fixed.starts_with("* xyz 0 1\n"));

    let fixed = fix_first("! HF\n* xyzfile water.xyz\n", DiagnosticCode::MissingChargeMultiplicity);
    assert_eq!(fixed, "! HF\n* xyzfile 0 1 water.xyz\n");
}
