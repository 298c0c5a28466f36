//! Semantic analysis: resolving model leaves against the knowledge base.
//!
//! Every keyword, block name, parameter, value, coordinate tag and element
//! of a [`SourceFile`] gets an [`Annotation`]. Unresolved leaves carry
//! ranked near-miss suggestions that feed diagnostics, quick fixes and hover.

use smol_str::SmolStr;

use super::suggest::{Suggestion, rank};
use crate::base::{Position, Span};
use crate::knowledge::{BlockSpec, KeywordCategory, KnowledgeBase, ValueType};
use crate::options::AnalysisOptions;
use crate::parser::{GeometryBlock, NamedBlock, SourceFile, Value};

/// What kind of leaf an annotation describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeafKind {
    RouteKeyword,
    BlockName,
    /// Value of a single-line directive such as `%maxcore 4000`
    Argument { block: SmolStr },
    ParameterKey { block: SmolStr },
    ParameterValue { block: SmolStr, key: SmolStr },
    CoordinateSystem,
    Charge,
    Multiplicity,
    Element,
}

impl LeafKind {
    pub fn display(&self) -> &'static str {
        match self {
            LeafKind::RouteKeyword => "keyword",
            LeafKind::BlockName => "block",
            LeafKind::Argument { .. } => "argument",
            LeafKind::ParameterKey { .. } => "parameter",
            LeafKind::ParameterValue { .. } => "value",
            LeafKind::CoordinateSystem => "coordinate system",
            LeafKind::Charge => "charge",
            LeafKind::Multiplicity => "multiplicity",
            LeafKind::Element => "element",
        }
    }
}

/// Outcome of looking a leaf up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Matched; `name` is the canonical spelling.
    Resolved {
        name: SmolStr,
        category: Option<KeywordCategory>,
    },
    Unresolved,
    /// Not checked, e.g. parameters of a block the knowledge base does not know.
    Unchecked,
}

/// Semantic information attached to one model leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub kind: LeafKind,
    pub text: SmolStr,
    pub span: Span,
    pub resolution: Resolution,
    /// Near misses, nearest first; empty unless unresolved.
    pub suggestions: Vec<Suggestion>,
}

impl Annotation {
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved { .. })
    }

    pub fn is_unresolved(&self) -> bool {
        self.resolution == Resolution::Unresolved
    }

    /// Canonical name of a resolved leaf.
    pub fn resolved_name(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Resolved { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<KeywordCategory> {
        match self.resolution {
            Resolution::Resolved { category, .. } => category,
            _ => None,
        }
    }

    pub fn top_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.first()
    }
}

/// A route keyword competing with an earlier one for a primary category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict {
    /// Index of the rejected keyword's annotation
    pub annotation: usize,
    /// Index of the accepted keyword's annotation
    pub primary: usize,
    pub category: KeywordCategory,
}

/// Primary method and basis set that are not meant to be combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Incompatibility {
    pub method: usize,
    pub basis: usize,
}

/// The annotated view of one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SemanticModel {
    pub annotations: Vec<Annotation>,
    pub primary_method: Option<usize>,
    pub primary_basis: Option<usize>,
    pub conflicts: Vec<Conflict>,
    pub incompatibility: Option<Incompatibility>,
}

impl SemanticModel {
    /// Innermost annotation whose span contains the position.
    pub fn annotation_at(&self, position: Position) -> Option<&Annotation> {
        self.annotations
            .iter()
            .filter(|a| a.span.contains(position))
            .min_by_key(|a| a.span.size())
    }

    pub fn route_keywords(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(|a| a.kind == LeafKind::RouteKeyword)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(|a| a.is_unresolved())
    }

    pub fn primary_method(&self) -> Option<&Annotation> {
        self.primary_method.map(|idx| &self.annotations[idx])
    }

    pub fn primary_basis(&self) -> Option<&Annotation> {
        self.primary_basis.map(|idx| &self.annotations[idx])
    }
}

/// Annotate every leaf of a parsed document.
pub fn annotate(file: &SourceFile, kb: &KnowledgeBase, options: &AnalysisOptions) -> SemanticModel {
    let mut annotator = Annotator {
        kb,
        options,
        model: SemanticModel::default(),
    };
    annotator.route(file);
    for block in file.blocks() {
        annotator.block(block);
    }
    for geometry in file.geometries() {
        annotator.geometry(geometry);
    }
    annotator.model
}

struct Annotator<'a> {
    kb: &'a KnowledgeBase,
    options: &'a AnalysisOptions,
    model: SemanticModel,
}

impl Annotator<'_> {
    fn push(&mut self, annotation: Annotation) -> usize {
        self.model.annotations.push(annotation);
        self.model.annotations.len() - 1
    }

    fn suggest<'c>(&self, text: &str, candidates: impl IntoIterator<Item = &'c str>) -> Vec<Suggestion> {
        rank(
            text,
            candidates,
            self.options.max_suggestion_distance,
            self.options.max_suggestions,
        )
    }

    fn resolved(name: &str, category: Option<KeywordCategory>) -> Resolution {
        Resolution::Resolved {
            name: SmolStr::new(name),
            category,
        }
    }

    // =========================================================================
    // Route line
    // =========================================================================

    fn route(&mut self, file: &SourceFile) {
        let kb = self.kb;
        for keyword in file.route_keywords() {
            let (resolution, suggestions) = match kb.keyword(&keyword.text) {
                Some(entry) => (Self::resolved(&entry.name, Some(entry.category)), Vec::new()),
                None => (
                    Resolution::Unresolved,
                    self.suggest(&keyword.text, kb.keywords().iter().map(|k| k.name.as_str())),
                ),
            };
            let idx = self.push(Annotation {
                kind: LeafKind::RouteKeyword,
                text: keyword.text.clone(),
                span: keyword.span,
                resolution,
                suggestions,
            });

            let Some(category) = self.model.annotations[idx]
                .category()
                .filter(KeywordCategory::is_primary)
            else {
                continue;
            };
            let slot = if category == KeywordCategory::Method {
                &mut self.model.primary_method
            } else {
                &mut self.model.primary_basis
            };
            match *slot {
                None => *slot = Some(idx),
                Some(primary) => self.model.conflicts.push(Conflict {
                    annotation: idx,
                    primary,
                    category,
                }),
            }
        }
        self.check_compatibility();
    }

    fn check_compatibility(&mut self) {
        let (Some(method_idx), Some(basis_idx)) = (self.model.primary_method, self.model.primary_basis)
        else {
            return;
        };
        let lookup = |idx: usize| {
            self.model.annotations[idx]
                .resolved_name()
                .and_then(|name| self.kb.keyword(name))
        };
        if let (Some(method), Some(basis)) = (lookup(method_idx), lookup(basis_idx)) {
            if !self.kb.is_compatible(method, basis) {
                self.model.incompatibility = Some(Incompatibility {
                    method: method_idx,
                    basis: basis_idx,
                });
            }
        }
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    fn block(&mut self, block: &NamedBlock) {
        let kb = self.kb;
        let spec = kb.block(&block.name.text);
        let (resolution, suggestions) = match spec {
            Some(spec) => (Self::resolved(&spec.name, None), Vec::new()),
            None => (
                Resolution::Unresolved,
                self.suggest(&block.name.text, kb.blocks().iter().map(|b| b.name.as_str())),
            ),
        };
        self.push(Annotation {
            kind: LeafKind::BlockName,
            text: block.name.text.clone(),
            span: block.name.span,
            resolution,
            suggestions,
        });

        let block_name = spec.map_or_else(|| block.name.text.clone(), |s| s.name.clone());
        for argument in &block.arguments {
            let value_type = spec.and_then(|s| s.argument.as_ref());
            self.value(
                LeafKind::Argument {
                    block: block_name.clone(),
                },
                argument,
                value_type,
            );
        }

        for param in block.parameters() {
            let param_spec = spec.and_then(|s| s.parameter(&param.key.text));
            let (resolution, suggestions) = match (spec, param_spec) {
                (_, Some(p)) => (Self::resolved(&p.name, None), Vec::new()),
                (Some(spec), None) => (Resolution::Unresolved, self.suggest_parameter(spec, &param.key.text)),
                (None, None) => (Resolution::Unchecked, Vec::new()),
            };
            self.push(Annotation {
                kind: LeafKind::ParameterKey {
                    block: block_name.clone(),
                },
                text: param.key.text.clone(),
                span: param.key.span,
                resolution,
                suggestions,
            });

            let key = param_spec.map_or_else(|| param.key.text.clone(), |p| p.name.clone());
            for value in &param.values {
                self.value(
                    LeafKind::ParameterValue {
                        block: block_name.clone(),
                        key: key.clone(),
                    },
                    value,
                    param_spec.map(|p| &p.value_type),
                );
            }
        }
    }

    fn suggest_parameter(&self, spec: &BlockSpec, key: &str) -> Vec<Suggestion> {
        self.suggest(key, spec.parameters.iter().map(|p| p.name.as_str()))
    }

    /// Check a value against its declared type, if any.
    fn value(&mut self, kind: LeafKind, value: &Value, value_type: Option<&ValueType>) {
        let (resolution, suggestions) = match value_type {
            None => (Resolution::Unchecked, Vec::new()),
            Some(ValueType::Choice(options)) => {
                match options.iter().find(|o| o.eq_ignore_ascii_case(&value.text)) {
                    Some(option) => (Self::resolved(option, None), Vec::new()),
                    None => (
                        Resolution::Unresolved,
                        self.suggest(&value.text, options.iter().map(SmolStr::as_str)),
                    ),
                }
            }
            Some(value_type) if value_type.accepts(&value.text) => {
                (Self::resolved(&value.text, None), Vec::new())
            }
            Some(_) => (Resolution::Unresolved, Vec::new()),
        };
        self.push(Annotation {
            kind,
            text: value.text.clone(),
            span: value.span,
            resolution,
            suggestions,
        });
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn geometry(&mut self, geometry: &GeometryBlock) {
        let kb = self.kb;
        if let Some(tag) = &geometry.coord_system {
            let (resolution, suggestions) = match kb.coordinate_system(&tag.text) {
                Some(system) => (Self::resolved(&system.name, None), Vec::new()),
                None => (
                    Resolution::Unresolved,
                    self.suggest(
                        &tag.text,
                        kb.coordinate_systems().iter().map(|c| c.name.as_str()),
                    ),
                ),
            };
            self.push(Annotation {
                kind: LeafKind::CoordinateSystem,
                text: tag.text.clone(),
                span: tag.span,
                resolution,
                suggestions,
            });
        }

        for (kind, value) in [
            (LeafKind::Charge, &geometry.charge),
            (LeafKind::Multiplicity, &geometry.multiplicity),
        ] {
            if let Some(value) = value {
                self.value(kind, value, Some(&ValueType::Integer));
            }
        }

        for atom in &geometry.atoms {
            let (resolution, suggestions) = match kb.element(&atom.element.text) {
                Some(element) => (Self::resolved(&element.symbol, None), Vec::new()),
                None => (
                    Resolution::Unresolved,
                    self.suggest(
                        &atom.element.text,
                        kb.elements().iter().map(|e| e.symbol.as_str()),
                    ),
                ),
            };
            self.push(Annotation {
                kind: LeafKind::Element,
                text: atom.element.text.clone(),
                span: atom.element.span,
                resolution,
                suggestions,
            });
        }
    }
}
