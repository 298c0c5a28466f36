//! Recovery from malformed zones.
//!
//! A damaged zone must never swallow the zones that follow it.

use orca::KnowledgeBase;
use orca::parser::{ErrorCode, Parse, parse};
use rstest::rstest;

use crate::helpers::source_fixtures::*;

fn parse_source(source: &str) -> Parse {
    parse(source, &KnowledgeBase::builtin())
}

fn route_words(parse: &Parse) -> Vec<String> {
    parse
        .file
        .route_keywords()
        .map(|w| w.text.to_string())
        .collect()
}

#[test]
fn test_unterminated_pal_keeps_following_route_line() {
    let parse = parse_source("%pal nprocs 4\n! HF STO-3G\n");

    assert_eq!(parse.errors.len(), 1);
    assert_eq!(parse.errors[0].code, ErrorCode::E0201);
    assert_eq!(route_words(&parse), vec!["HF", "STO-3G"]);

    let pal = parse.file.block("pal").unwrap();
    assert!(!pal.terminated);
    assert_eq!(pal.parameter("nprocs").unwrap().values[0].as_integer(), Some(4));
}

#[rstest]
#[case::multi_line("%scf\n maxiter 100\n")]
#[case::single_line("%scf maxiter 100\n")]
#[case::unknown_block("%foo\n bar 1\n")]
fn test_unterminated_block_keeps_every_later_zone(#[case] broken: &str) {
    let source = format!("{}{}", broken, COMPLETE_JOB.replace("# water optimization\n", ""));
    let parse = parse_source(&source);

    assert!(parse.errors.iter().any(|e| e.code == ErrorCode::E0201));
    assert_eq!(
        route_words(&parse),
        vec!["B3LYP", "def2-TZVP", "OPT", "D3BJ", "TightSCF"]
    );
    assert!(parse.file.block("maxcore").is_some());
    assert!(parse.file.block("pal").unwrap().terminated);
    assert_eq!(parse.file.atom_count(), 3);
}

#[test]
fn test_unterminated_block_points_at_next_zone() {
    let parse = parse_source("%scf\n maxiter 100\n! HF\n");
    let error = &parse.errors[0];
    assert_eq!(error.span, orca::Span::from_coords(0, 0, 0, 4));
    assert_eq!(error.related.len(), 1);
    assert_eq!(error.related[0].span.start, orca::Position::new(2, 0));
}

#[test]
fn test_unterminated_geometry_keeps_atoms_and_later_blocks() {
    let source = "! HF\n* xyz 0 1\nO 0 0 0\nH 0 0 1\n%pal nprocs 2 end\n";
    let parse = parse_source(source);

    assert_eq!(parse.errors.len(), 1);
    assert_eq!(parse.errors[0].code, ErrorCode::E0202);
    let geometry = parse.file.geometry().unwrap();
    assert!(!geometry.terminated);
    assert_eq!(geometry.atoms.len(), 2);
    assert!(parse.file.block("pal").unwrap().terminated);
}

#[test]
fn test_malformed_lines_do_not_stop_the_geometry() {
    let source = "! HF\n* xyz 0 1\nO 0 0\nH 0 0 1\nH 0 1 0\n*\n";
    let parse = parse_source(source);
    assert_eq!(parse.errors.len(), 1);
    let geometry = parse.file.geometry().unwrap();
    assert!(geometry.terminated);
    assert_eq!(geometry.atoms.len(), 2);
}

#[test]
fn test_stray_marker_mid_line_is_dropped() {
    let parse = parse_source("! HF def2-SVP ! OPT\n");
    assert_eq!(parse.errors.len(), 1);
    assert_eq!(parse.errors[0].code, ErrorCode::E0101);
    assert_eq!(route_words(&parse), vec!["HF", "def2-SVP", "OPT"]);
}

#[test]
fn test_every_error_has_a_message() {
    let parse = parse_source("%\n* xyz 0\nXx 1 2\n%pal nprocs\n! HF = ,\n");
    assert!(!parse.errors.is_empty());
    for error in &parse.errors {
        assert!(!error.message.is_empty(), "{:?}", error);
    }
}
