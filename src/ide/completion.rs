//! Completion suggestions implementation.

use std::sync::Arc;

use smol_str::SmolStr;

use super::index::Document;
use super::text_utils::word_prefix;
use crate::base::Position;
use crate::hir::{compare_names, levenshtein};
use crate::knowledge::{BlockSpec, CoordinateKind, KeywordEntry, KnowledgeBase, ValueType};
use crate::options::AnalysisOptions;
use crate::parser::Zone;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Keyword,
    Block,
    Parameter,
    Value,
    CoordinateSystem,
    Element,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Keyword => 14,          // Keyword
            CompletionKind::Block => 9,             // Module
            CompletionKind::Parameter => 10,        // Property
            CompletionKind::Value => 12,            // Value
            CompletionKind::CoordinateSystem => 20, // EnumMember
            CompletionKind::Element => 21,          // Constant
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    fn from_keyword(entry: &KeywordEntry) -> Self {
        let detail = match &entry.successor {
            Some(successor) if entry.deprecated => {
                format!("{} (deprecated, use {})", entry.category.display(), successor)
            }
            _ => format!("{} ({})", entry.category.display(), entry.family),
        };
        Self::new(entry.name.as_str(), CompletionKind::Keyword)
            .with_detail(detail)
            .with_documentation(entry.documentation.as_str())
    }

    fn from_block(spec: &BlockSpec) -> Self {
        let detail = if spec.is_line_directive() {
            "single-line directive"
        } else {
            "block"
        };
        let documentation = match &spec.example {
            Some(example) => format!("{}\n\n```\n{}\n```", spec.documentation, example),
            None => spec.documentation.clone(),
        };
        Self::new(spec.name.as_str(), CompletionKind::Block)
            .with_detail(detail)
            .with_documentation(documentation)
    }
}

/// What the cursor is positioned to complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionContext {
    RouteKeyword,
    BlockName,
    BlockParameter { block: SmolStr },
    ParameterValue { block: SmolStr, key: SmolStr },
    /// Value after the name of a single-line directive such as `%maxcore`
    DirectiveArgument { block: SmolStr },
    CoordinateSystem,
    Element,
    /// Nothing to offer (comments, numbers, unknown blocks)
    None,
}

/// Get completion suggestions at a position.
///
/// Candidates that start with the partial word left of the cursor come
/// first, in name order, followed by near misses ranked by edit distance.
pub fn completions(
    document: &Document,
    kb: &KnowledgeBase,
    options: &AnalysisOptions,
    position: Position,
) -> Vec<CompletionItem> {
    let line = document
        .line_index
        .line_text(&document.text, position.line)
        .unwrap_or("");
    let (prefix_start, prefix) = word_prefix(line, position.column as usize);
    let context = determine_context(document, kb, line, prefix_start, position);
    tracing::trace!(?context, %prefix, "completion context");

    let candidates = candidates(kb, &context);
    rank_candidates(&prefix, candidates, options)
}

/// Classify the cursor position, from the current line first and the
/// enclosing zone for lines without a marker.
pub fn determine_context(
    document: &Document,
    kb: &KnowledgeBase,
    line: &str,
    prefix_start: usize,
    position: Position,
) -> CompletionContext {
    let head: String = line.chars().take(prefix_start).collect();
    if head.contains('#') {
        return CompletionContext::None;
    }
    let trimmed = head.trim_start();

    match trimmed.chars().next().or_else(|| line.trim_start().chars().next()) {
        Some('!') => CompletionContext::RouteKeyword,
        Some('%') => {
            let words: Vec<&str> = trimmed
                .trim_start_matches('%')
                .split_whitespace()
                .collect();
            match words.split_first() {
                None => CompletionContext::BlockName,
                Some((name, rest)) => block_context(kb, name, rest),
            }
        }
        Some('*') if !is_geometry_body(document, position) => {
            if trimmed.trim_start_matches('*').trim().is_empty() {
                CompletionContext::CoordinateSystem
            } else {
                CompletionContext::None
            }
        }
        _ => body_context(document, kb, trimmed, position),
    }
}

/// A lone `*` inside open coordinates closes them rather than opening a
/// new geometry header.
fn is_geometry_body(document: &Document, position: Position) -> bool {
    matches!(enclosing_zone(document, position), Some(Zone::Geometry(_)))
}

/// The zone a line without its own marker belongs to.
fn enclosing_zone(document: &Document, position: Position) -> Option<&Zone> {
    let zone = document
        .parse
        .file
        .zones
        .iter()
        .rev()
        .find(|zone| zone.span().start.line < position.line)?;
    let open = match zone {
        Zone::Block(block) => !block.terminated,
        Zone::Geometry(geometry) => !geometry.terminated,
        Zone::Route(_) | Zone::Unknown(_) => false,
    };
    (open || zone.span().contains(position)).then_some(zone)
}

fn body_context(
    document: &Document,
    kb: &KnowledgeBase,
    head: &str,
    position: Position,
) -> CompletionContext {
    let words: Vec<&str> = head.split_whitespace().collect();
    match enclosing_zone(document, position) {
        Some(Zone::Block(block)) => block_context(kb, &block.name.text, &words),
        Some(Zone::Geometry(_)) if words.is_empty() => CompletionContext::Element,
        _ => CompletionContext::None,
    }
}

/// Context inside a block, given the complete words left of the cursor.
fn block_context(kb: &KnowledgeBase, name: &str, words: &[&str]) -> CompletionContext {
    let Some(spec) = kb.block(name) else {
        return CompletionContext::None;
    };
    if spec.is_line_directive() {
        return match words {
            [] => CompletionContext::DirectiveArgument {
                block: spec.name.clone(),
            },
            _ => CompletionContext::None,
        };
    }
    if words.iter().any(|w| w.eq_ignore_ascii_case("end")) {
        return CompletionContext::None;
    }
    match words.last().and_then(|last| spec.parameter(last)) {
        Some(param) => match param.value_type {
            ValueType::Choice(_) | ValueType::Boolean => CompletionContext::ParameterValue {
                block: spec.name.clone(),
                key: param.name.clone(),
            },
            _ => CompletionContext::None,
        },
        None => CompletionContext::BlockParameter {
            block: spec.name.clone(),
        },
    }
}

fn candidates(kb: &KnowledgeBase, context: &CompletionContext) -> Vec<CompletionItem> {
    match context {
        CompletionContext::RouteKeyword => {
            kb.keywords().iter().map(CompletionItem::from_keyword).collect()
        }
        CompletionContext::BlockName => kb.blocks().iter().map(CompletionItem::from_block).collect(),
        CompletionContext::BlockParameter { block } => kb
            .block(block)
            .map(|spec| {
                spec.parameters
                    .iter()
                    .map(|param| {
                        CompletionItem::new(param.name.as_str(), CompletionKind::Parameter)
                            .with_detail(param.value_type.describe())
                            .with_documentation(param.documentation.as_str())
                            .with_insert_text(format!("{} ", param.name))
                    })
                    .collect()
            })
            .unwrap_or_default(),
        CompletionContext::ParameterValue { block, key } => {
            let value_type = kb
                .block(block)
                .and_then(|spec| spec.parameter(key))
                .map(|param| &param.value_type);
            value_items(value_type, key)
        }
        CompletionContext::DirectiveArgument { block } => match kb.block(block) {
            Some(spec) if spec.name == "maxcore" => memory_items(kb),
            Some(spec) => value_items(spec.argument.as_ref(), block),
            None => Vec::new(),
        },
        CompletionContext::CoordinateSystem => kb
            .coordinate_systems()
            .iter()
            .map(|system| {
                let item = CompletionItem::new(system.name.as_str(), CompletionKind::CoordinateSystem)
                    .with_detail(system.kind.display())
                    .with_documentation(system.documentation.as_str());
                match system.kind {
                    CoordinateKind::File => item,
                    _ => item.with_insert_text(format!("{} 0 1", system.name)),
                }
            })
            .collect(),
        CompletionContext::Element => kb
            .elements()
            .iter()
            .map(|element| {
                CompletionItem::new(element.symbol.as_str(), CompletionKind::Element)
                    .with_detail(element.name.as_str())
                    .with_documentation(format!("Atomic number {}", element.atomic_number))
            })
            .collect(),
        CompletionContext::None => Vec::new(),
    }
}

fn value_items(value_type: Option<&ValueType>, owner: &str) -> Vec<CompletionItem> {
    let values: Vec<&str> = match value_type {
        Some(ValueType::Choice(options)) => options.iter().map(SmolStr::as_str).collect(),
        Some(ValueType::Boolean) => vec!["true", "false"],
        _ => Vec::new(),
    };
    values
        .into_iter()
        .map(|value| {
            CompletionItem::new(value, CompletionKind::Value).with_detail(format!("value of {}", owner))
        })
        .collect()
}

/// `%maxcore` presets, one per recommended memory tier.
fn memory_items(kb: &KnowledgeBase) -> Vec<CompletionItem> {
    kb.thresholds()
        .maxcore
        .iter()
        .map(|tier| {
            let documentation = match tier.max_atoms {
                Some(max) => format!("Recommended for up to {} atoms", max),
                None => "Recommended for larger systems".to_string(),
            };
            CompletionItem::new(tier.value.to_string(), CompletionKind::Value)
                .with_detail("MB per core")
                .with_documentation(documentation)
        })
        .collect()
}

fn starts_with_ignore_case(label: &str, prefix: &str) -> bool {
    label
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Prefix matches in name order, then near misses: candidates whose first
/// `prefix.len()` characters are within half the prefix length (at most
/// the configured suggestion distance) of the prefix.
fn rank_candidates(
    prefix: &str,
    candidates: Vec<CompletionItem>,
    options: &AnalysisOptions,
) -> Vec<CompletionItem> {
    let prefix_len = prefix.chars().count();
    let max_distance = options.max_suggestion_distance.min(prefix_len / 2);

    let mut matches = Vec::new();
    let mut near = Vec::new();
    for item in candidates {
        if starts_with_ignore_case(&item.label, prefix) {
            matches.push(item);
        } else if max_distance > 0 {
            let head: String = item.label.chars().take(prefix_len).collect();
            let distance = levenshtein(prefix, &head);
            if distance <= max_distance {
                near.push((distance, item));
            }
        }
    }
    matches.sort_by(|a, b| compare_names(&a.label, &b.label));
    near.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| compare_names(&a.label, &b.label)));

    matches
        .into_iter()
        .chain(near.into_iter().map(|(_, item)| item))
        .take(options.max_completions)
        .enumerate()
        .map(|(rank, item)| item.with_priority(rank as u32))
        .collect()
}
