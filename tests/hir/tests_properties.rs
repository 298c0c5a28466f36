//! Properties that hold across the whole knowledge base.

use orca::KnowledgeBase;
use orca::hir::{DiagnosticCode, levenshtein};
use orca::knowledge::KeywordCategory;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

/// Misspellings one edit away from exactly one keyword.
fn unambiguous_misspellings(kb: &KnowledgeBase) -> Vec<(String, String)> {
    let names: Vec<&str> = kb.keywords().iter().map(|k| k.name.as_str()).collect();
    let mut found = Vec::new();
    for name in &names {
        let mut shortened = name.to_string();
        shortened.pop();
        for variant in [format!("{}q", name), shortened] {
            if variant.len() < 2 || names.iter().any(|n| levenshtein(&variant, n) == 0) {
                continue;
            }
            let near: Vec<_> = names
                .iter()
                .filter(|n| levenshtein(&variant, n) == 1)
                .collect();
            if near.len() == 1 {
                found.push((variant, near[0].to_string()));
            }
        }
    }
    found
}

#[test]
fn test_single_edit_misspelling_suggests_its_keyword_first() {
    let kb = KnowledgeBase::builtin();
    let cases = unambiguous_misspellings(&kb);
    assert!(cases.len() > 50, "only {} cases generated", cases.len());

    for (variant, expected) in cases {
        let diagnostics = diagnostics_for(&format!("! {}\n", variant));
        let unknown = diagnostics
            .iter()
            .find(|d| d.code == DiagnosticCode::UnknownKeyword)
            .unwrap_or_else(|| panic!("'{}' was not reported", variant));
        assert_eq!(unknown.suggestions[0], expected, "for '{}'", variant);
        assert_eq!(unknown.fixes[0].edit.new_text, expected, "for '{}'", variant);
    }
}

#[test]
fn test_compatible_method_and_basis_have_no_errors() {
    let kb = KnowledgeBase::builtin();
    let mut checked = 0;
    for method in kb.keywords_in(KeywordCategory::Method).filter(|k| !k.deprecated) {
        for basis in kb.keywords_in(KeywordCategory::BasisSet).filter(|k| !k.deprecated) {
            if !kb.is_compatible(method, basis) {
                continue;
            }
            let source = with_water(&format!("! {} {}", method.name, basis.name));
            let errors = errors_for(&source);
            assert!(errors.is_empty(), "{}: {:?}", source, codes(&errors));
            checked += 1;
        }
    }
    assert!(checked > 500);
}

#[test]
fn test_integer_charge_and_positive_multiplicity_are_accepted() {
    for (charge, multiplicity) in [(0, 1), (-1, 2), (2, 1), (0, 3), (1, 4)] {
        let source = with_water("! PBE0 def2-SVP").replace(
            "* xyz 0 1",
            &format!("* xyz {} {}", charge, multiplicity),
        );
        assert!(errors_for(&source).is_empty(), "{}", source);
    }
}

#[test]
fn test_analysis_is_deterministic() {
    let sources = [
        COMPLETE_JOB.to_string(),
        "! B3LIP CCSD(T) STO-3G\n%scf maxiter x\n* xyzz 0\nQq 0 0\n".to_string(),
        "%pal nprocs 4\n! HF STO-3G\n%maxcore 10\n".to_string(),
    ];
    for source in &sources {
        assert_eq!(diagnostics_for(source), diagnostics_for(source));
    }
}
