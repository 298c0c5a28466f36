//! Document index versioning and concurrent access.

use std::sync::Arc;
use std::thread;

use orca::KnowledgeBase;
use orca::hir::DiagnosticCode;
use orca::ide::{
    AnalysisHost, Document, DocumentChange, DocumentId, DocumentIndex, EditCommit, IndexError,
};
use orca::{AnalysisOptions, Span};

use crate::helpers::source_fixtures::*;

fn analyzed(id: &str, version: i32, text: &str) -> Arc<Document> {
    Arc::new(Document::analyze(
        DocumentId::new(id),
        version,
        Arc::from(text),
        &KnowledgeBase::builtin(),
        &AnalysisOptions::default(),
    ))
}

#[test]
fn test_newer_analysis_wins_regardless_of_commit_order() {
    let index = DocumentIndex::new();
    index.insert(analyzed("a.inp", 0, "! HF\n"));

    // Both analyses started from version 0
    index.commit(analyzed("a.inp", 3, "! PBE\n")).unwrap();
    index.commit(analyzed("a.inp", 5, "! PBE0\n")).unwrap();
    assert_eq!(index.get("a.inp").unwrap().version, 5);
    assert_eq!(&*index.get("a.inp").unwrap().text, "! PBE0\n");

    assert_eq!(
        index.commit(analyzed("a.inp", 4, "! MP2\n")),
        Err(IndexError::Superseded {
            id: DocumentId::new("a.inp"),
            version: 4
        })
    );
    assert_eq!(index.get("a.inp").unwrap().version, 5);
}

#[test]
fn test_edit_on_replaced_base_is_rebased() {
    let index = DocumentIndex::new();
    index.insert(analyzed("a.inp", 0, "! HF\n"));
    index.commit(analyzed("a.inp", 3, "! PBE\n")).unwrap();

    let outcome = index.commit_edit(0, analyzed("a.inp", 5, "! HF OPT\n")).unwrap();
    let EditCommit::Rebase(current) = outcome else {
        panic!("edit built on version 0 was stored over version 3");
    };
    assert_eq!(current.version, 3);
    assert_eq!(&*index.get("a.inp").unwrap().text, "! PBE\n");
}

#[test]
fn test_commit_to_closed_document_fails() {
    let index = DocumentIndex::new();
    assert!(matches!(
        index.commit(analyzed("gone.inp", 1, "")),
        Err(IndexError::UnknownDocument(_))
    ));
    assert!(index.is_empty());
}

#[test]
fn test_incremental_edits() {
    let host = AnalysisHost::new();
    host.open("w.inp", with_water("! HF"));

    let changes = [
        DocumentChange::edit(Span::from_coords(0, 4, 0, 4), " def2-SVP"),
        DocumentChange::edit(Span::from_coords(0, 2, 0, 4), "B3LIP"),
    ];
    let document = host.change("w.inp", &changes, 1).unwrap();
    assert!(document.text.starts_with("! B3LIP def2-SVP\n"));
    assert_eq!(document.diagnostics[0].code, DiagnosticCode::UnknownKeyword);
}

#[test]
fn test_versions_must_increase() {
    let host = AnalysisHost::new();
    host.open("v.inp", "! HF\n");
    host.change("v.inp", &[DocumentChange::full("! PBE\n")], 5).unwrap();

    for stale in [0, 3, 5] {
        let err = host
            .change("v.inp", &[DocumentChange::full("! MP2\n")], stale)
            .unwrap_err();
        assert_eq!(err.to_string(), format!(
            "stale version {} for document 'v.inp' (current version is 5)",
            stale
        ));
    }
    assert_eq!(host.analysis("v.inp").unwrap().version(), 5);
}

#[test]
fn test_unknown_document_errors() {
    let host = AnalysisHost::new();
    let err = host.change("nope.inp", &[DocumentChange::full("")], 1).unwrap_err();
    assert_eq!(err, IndexError::UnknownDocument(DocumentId::new("nope.inp")));
    assert_eq!(err.to_string(), "document 'nope.inp' is not open");
}

#[test]
fn test_open_many_in_parallel() {
    let host = AnalysisHost::new();
    let documents: Vec<_> = (0..32)
        .map(|i| {
            let route = if i % 2 == 0 { "! B3LYP def2-SVP" } else { "! B3LIP def2-SVP" };
            (format!("doc{:02}.inp", i), with_water(route))
        })
        .collect();
    let opened = host.open_many(documents);

    assert_eq!(opened.len(), 32);
    assert_eq!(host.index().len(), 32);
    for (i, id) in host.index().ids().iter().enumerate() {
        assert_eq!(id.as_str(), format!("doc{:02}.inp", i));
        let has_error = host.diagnostics(id).unwrap().iter().any(|d| d.is_error());
        assert_eq!(has_error, i % 2 == 1, "{}", id);
    }
}

#[test]
fn test_documents_are_isolated_across_threads() {
    let host = AnalysisHost::new();
    thread::scope(|scope| {
        for worker in 0..8 {
            let host = &host;
            scope.spawn(move || {
                let id = format!("worker{}.inp", worker);
                host.open(id.as_str(), with_water("! HF def2-SVP"));
                for version in 1..=20 {
                    let text = with_water(&format!("! HF def2-SVP\n%maxcore {}", 1000 + version));
                    host.change(&id, &[DocumentChange::full(text)], version).unwrap();
                }
            });
        }
    });

    assert_eq!(host.index().len(), 8);
    for worker in 0..8 {
        let analysis = host.analysis(&format!("worker{}.inp", worker)).unwrap();
        assert_eq!(analysis.version(), 20);
        assert!(analysis.document().text.contains("%maxcore 1020"));
        assert!(analysis.diagnostics().is_empty());
    }
}

#[test]
fn test_racing_changes_commit_monotonically() {
    let host = AnalysisHost::new();
    host.open("race.inp", "! HF\n");

    let committed: Vec<i32> = thread::scope(|scope| {
        let handles: Vec<_> = (1..=16)
            .map(|version| {
                let host = &host;
                scope.spawn(move || {
                    let text = format!("! HF\n# version {}\n", version);
                    match host.change("race.inp", &[DocumentChange::full(text)], version) {
                        Ok(document) => Some(document.version),
                        Err(IndexError::StaleVersion { .. } | IndexError::Superseded { .. }) => None,
                        Err(other) => panic!("unexpected error: {}", other),
                    }
                })
            })
            .collect();
        handles
            .into_iter()
            .filter_map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(committed.contains(&16));
    let document = host.index().get("race.inp").unwrap();
    assert_eq!(document.version, 16);
    assert_eq!(&*document.text, "! HF\n# version 16\n");
}

#[test]
fn test_racing_edits_keep_the_newest_version() {
    let host = AnalysisHost::new();
    host.open("edits.inp", "! HF\n");

    thread::scope(|scope| {
        for version in 1..=16 {
            let host = &host;
            scope.spawn(move || {
                let edit = DocumentChange::edit(
                    Span::from_coords(1, 0, 1, 0),
                    format!("# edit {}\n", version),
                );
                match host.change("edits.inp", &[edit], version) {
                    Ok(_) | Err(IndexError::StaleVersion { .. } | IndexError::Superseded { .. }) => {}
                    Err(other) => panic!("unexpected error: {}", other),
                }
            });
        }
    });

    let document = host.index().get("edits.inp").unwrap();
    assert_eq!(document.version, 16);
    assert!(document.text.starts_with("! HF\n# edit 16\n"), "{}", document.text);
}

#[test]
fn test_readers_see_consistent_snapshots() {
    let host = AnalysisHost::new();
    host.open("read.inp", with_water("! B3LYP def2-SVP"));

    thread::scope(|scope| {
        scope.spawn(|| {
            for version in 1..=50 {
                let route = if version % 2 == 0 { "! B3LYP def2-SVP" } else { "! B3LIP def2-SVP" };
                host.change("read.inp", &[DocumentChange::full(with_water(route))], version)
                    .unwrap();
            }
        });
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    let analysis = host.analysis("read.inp").unwrap();
                    let misspelled = analysis.document().text.contains("B3LIP");
                    let reported = analysis
                        .diagnostics()
                        .iter()
                        .any(|d| d.code == DiagnosticCode::UnknownKeyword);
                    assert_eq!(misspelled, reported, "version {}", analysis.version());
                    assert_eq!(misspelled, analysis.version() % 2 == 1);
                }
            });
        }
    });

    assert_eq!(host.analysis("read.inp").unwrap().version(), 50);
}
