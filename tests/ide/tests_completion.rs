//! Completion through the analysis host.

use orca::AnalysisOptions;
use orca::Position;
use orca::ide::{AnalysisHost, CompletionItem, CompletionKind};
use orca::knowledge::KeywordCategory;
use rstest::rstest;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn complete(source: &str, line: u32, column: u32) -> Vec<CompletionItem> {
    host_with(source)
        .completions(DOC, Position::new(line, column))
        .unwrap()
}

fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| &*item.label).collect()
}

#[test]
fn test_basis_sets_after_method() {
    let host = host_with("! B3LYP de");
    let items = host.completions(DOC, Position::new(0, 10)).unwrap();
    let labels = labels(&items);

    let prefixed = labels
        .iter()
        .take_while(|l| l.to_ascii_lowercase().starts_with("de"))
        .count();
    assert!(prefixed > 0);
    assert!(labels[prefixed..]
        .iter()
        .all(|l| !l.to_ascii_lowercase().starts_with("de")));

    let kb = host.knowledge_base();
    let basis_sets: Vec<_> = kb
        .keywords_in(KeywordCategory::BasisSet)
        .map(|k| k.name.as_str())
        .filter(|name| name.starts_with("def2-"))
        .collect();
    for basis in basis_sets {
        assert!(labels[..prefixed].contains(&basis), "missing {}", basis);
    }

    let priorities: Vec<_> = items.iter().map(|i| i.sort_priority).collect();
    assert_eq!(priorities, (0..items.len() as u32).collect::<Vec<_>>());
}

#[test]
fn test_keyword_details() {
    let items = complete("! B3LYP def2-TZ", 0, 15);
    assert_eq!(labels(&items)[..2], ["def2-TZVP", "def2-TZVP/C"]);
    let item = &items[0];
    assert_eq!(item.kind, CompletionKind::Keyword);
    assert_eq!(item.detail.as_deref(), Some("Basis set (karlsruhe)"));
    assert!(item.documentation.is_some());
}

#[test]
fn test_deprecated_keyword_detail_names_successor() {
    let items = complete("! Grid4", 0, 7);
    assert_eq!(labels(&items)[0], "Grid4");
    assert_eq!(
        items[0].detail.as_deref(),
        Some("Setting (deprecated, use DefGrid2)")
    );
}

#[rstest]
#[case::block_name("%pa", 0, 3, vec!["pal", "basis", "maxcore", "plots"])]
#[case::parameter("%pal npr", 0, 8, vec!["nprocs"])]
#[case::body_parameter("%scf\n  maxi\nend\n", 1, 6, vec!["maxiter"])]
#[case::choice_value("%scf convergence Very", 0, 21, vec!["VeryTight"])]
#[case::boolean_value("%scf damp t", 0, 11, vec!["true"])]
#[case::coordinate_system("! HF\n* gz", 1, 4, vec!["gzmt", "gzmtfile"])]
#[case::memory_preset("%maxcore 40", 0, 11, vec!["4000"])]
#[case::memory_presets("! HF\n%maxcore ", 1, 9, vec!["1000", "2000", "4000", "8000"])]
fn test_contexts(
    #[case] source: &str,
    #[case] line: u32,
    #[case] column: u32,
    #[case] expected: Vec<&str>,
) {
    let items = complete(source, line, column);
    assert_eq!(labels(&items), expected);
}

#[test]
fn test_elements_inside_open_geometry() {
    let source = "! HF\n* xyz 0 1\nO 0 0 0\nC";
    let items = complete(source, 3, 1);
    assert_eq!(labels(&items)[0], "C");
    assert!(items.iter().all(|i| i.kind == CompletionKind::Element));
    assert!(labels(&items).contains(&"Cl"));
}

#[rstest]
#[case::after_terminated_block("%pal nprocs 4 end\n", 0, 17)]
#[case::after_directive_value("%maxcore 4000 ", 0, 14)]
#[case::unknown_block("%foo\n  ba\nend\n", 1, 4)]
#[case::comment("# B3", 0, 4)]
#[case::after_geometry(WATER_GEOMETRY, 5, 0)]
fn test_no_completions(#[case] source: &str, #[case] line: u32, #[case] column: u32) {
    let items = complete(source, line, column);
    assert!(items.is_empty(), "unexpected {:?}", labels(&items));
}

#[test]
fn test_fuzzy_matches_follow_prefix_matches() {
    let items = complete("! PBX", 0, 5);
    let labels = labels(&items);
    assert!(!labels.is_empty());
    assert!(labels.iter().all(|l| !l.to_ascii_lowercase().starts_with("pbx")));
    assert!(labels.contains(&"PBE"));
}

#[test]
fn test_completion_limit_from_options() {
    let host = AnalysisHost::new().with_options(AnalysisOptions::default().with_max_completions(5));
    host.open(DOC, "! ");
    let items = host.completions(DOC, Position::new(0, 2)).unwrap();
    assert_eq!(items.len(), 5);
}

#[test]
fn test_completion_for_closed_document_fails() {
    let host = AnalysisHost::new();
    assert!(host.completions("missing.inp", Position::new(0, 0)).is_err());
}
