//! Diagnostics: structural and semantic problem reporting.
//!
//! Every rule runs independently over the parse result and the semantic
//! model. The [`DiagnosticCollector`] then removes duplicates and puts the
//! list into its stable order (range, severity, code).

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use super::annotate::{Annotation, LeafKind, SemanticModel};
use crate::base::{LineIndex, Position, Span, TextEdit};
use crate::knowledge::{CoordinateKind, KnowledgeBase};
use crate::parser::{ErrorCode, GeometryBlock, Parse, RelatedInfo, SyntaxError, Value};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
///
/// Ordered from most to least severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        }
    }
}

/// Stable identifier of a diagnostic rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    SyntaxError,
    UnterminatedBlock,
    UnterminatedGeometry,
    UnknownKeyword,
    DuplicateCategory,
    DeprecatedKeyword,
    IncompatibleBasis,
    UnknownBlock,
    UnknownBlockParameter,
    InvalidParameterValue,
    LowMemory,
    ExcessiveNprocs,
    MissingChargeMultiplicity,
    InvalidMultiplicity,
    UnknownCoordinateSystem,
    UnknownElement,
    DuplicateGeometry,
    EmptyGeometry,
    MissingRouteLine,
    MissingGeometry,
    MissingMethod,
    MissingBasis,
}

impl DiagnosticCode {
    pub const ALL: [DiagnosticCode; 22] = [
        DiagnosticCode::SyntaxError,
        DiagnosticCode::UnterminatedBlock,
        DiagnosticCode::UnterminatedGeometry,
        DiagnosticCode::UnknownKeyword,
        DiagnosticCode::DuplicateCategory,
        DiagnosticCode::DeprecatedKeyword,
        DiagnosticCode::IncompatibleBasis,
        DiagnosticCode::UnknownBlock,
        DiagnosticCode::UnknownBlockParameter,
        DiagnosticCode::InvalidParameterValue,
        DiagnosticCode::LowMemory,
        DiagnosticCode::ExcessiveNprocs,
        DiagnosticCode::MissingChargeMultiplicity,
        DiagnosticCode::InvalidMultiplicity,
        DiagnosticCode::UnknownCoordinateSystem,
        DiagnosticCode::UnknownElement,
        DiagnosticCode::DuplicateGeometry,
        DiagnosticCode::EmptyGeometry,
        DiagnosticCode::MissingRouteLine,
        DiagnosticCode::MissingGeometry,
        DiagnosticCode::MissingMethod,
        DiagnosticCode::MissingBasis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::SyntaxError => "syntax-error",
            DiagnosticCode::UnterminatedBlock => "unterminated-block",
            DiagnosticCode::UnterminatedGeometry => "unterminated-geometry",
            DiagnosticCode::UnknownKeyword => "unknown-keyword",
            DiagnosticCode::DuplicateCategory => "duplicate-category",
            DiagnosticCode::DeprecatedKeyword => "deprecated-keyword",
            DiagnosticCode::IncompatibleBasis => "incompatible-basis",
            DiagnosticCode::UnknownBlock => "unknown-block",
            DiagnosticCode::UnknownBlockParameter => "unknown-block-parameter",
            DiagnosticCode::InvalidParameterValue => "invalid-parameter-value",
            DiagnosticCode::LowMemory => "low-memory",
            DiagnosticCode::ExcessiveNprocs => "excessive-nprocs",
            DiagnosticCode::MissingChargeMultiplicity => "missing-charge-multiplicity",
            DiagnosticCode::InvalidMultiplicity => "invalid-multiplicity",
            DiagnosticCode::UnknownCoordinateSystem => "unknown-coordinate-system",
            DiagnosticCode::UnknownElement => "unknown-element",
            DiagnosticCode::DuplicateGeometry => "duplicate-geometry",
            DiagnosticCode::EmptyGeometry => "empty-geometry",
            DiagnosticCode::MissingRouteLine => "missing-route-line",
            DiagnosticCode::MissingGeometry => "missing-geometry",
            DiagnosticCode::MissingMethod => "missing-method",
            DiagnosticCode::MissingBasis => "missing-basis",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticCode::SyntaxError
            | DiagnosticCode::UnterminatedBlock
            | DiagnosticCode::UnterminatedGeometry
            | DiagnosticCode::UnknownKeyword
            | DiagnosticCode::DuplicateCategory
            | DiagnosticCode::MissingChargeMultiplicity
            | DiagnosticCode::InvalidMultiplicity
            | DiagnosticCode::UnknownCoordinateSystem
            | DiagnosticCode::UnknownElement
            | DiagnosticCode::DuplicateGeometry => Severity::Error,
            DiagnosticCode::DeprecatedKeyword
            | DiagnosticCode::IncompatibleBasis
            | DiagnosticCode::UnknownBlock
            | DiagnosticCode::UnknownBlockParameter
            | DiagnosticCode::InvalidParameterValue
            | DiagnosticCode::EmptyGeometry => Severity::Warning,
            DiagnosticCode::LowMemory
            | DiagnosticCode::ExcessiveNprocs
            | DiagnosticCode::MissingRouteLine
            | DiagnosticCode::MissingGeometry
            | DiagnosticCode::MissingMethod
            | DiagnosticCode::MissingBasis => Severity::Info,
        }
    }

    /// Look a code up by its identifier.
    pub fn from_name(name: &str) -> Option<DiagnosticCode> {
        Self::ALL.into_iter().find(|code| code.as_str() == name)
    }
}

impl From<ErrorCode> for DiagnosticCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::E0201 => DiagnosticCode::UnterminatedBlock,
            ErrorCode::E0202 => DiagnosticCode::UnterminatedGeometry,
            _ => DiagnosticCode::SyntaxError,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed repair attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fix {
    pub title: Arc<str>,
    pub edit: TextEdit,
}

impl Fix {
    pub fn new(title: impl Into<Arc<str>>, edit: TextEdit) -> Self {
        Self {
            title: title.into(),
            edit,
        }
    }

    fn replace(original: &str, span: Span, replacement: &str) -> Self {
        Self::new(
            format!("Replace '{}' with '{}'", original, replacement),
            TextEdit::replace(span, replacement),
        )
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// Parser error code of a structural diagnostic (e.g., "E0201").
    pub error_code: Option<ErrorCode>,
    pub message: Arc<str>,
    /// Replacement candidates, nearest first.
    pub suggestions: Vec<SmolStr>,
    /// Repairs, preferred first.
    pub fixes: Vec<Fix>,
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self {
            span,
            severity: code.severity(),
            code,
            error_code: None,
            message: message.into(),
            suggestions: Vec::new(),
            fixes: Vec::new(),
            related: Vec::new(),
        }
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    /// Record the annotation's suggestions, each with a replacement fix.
    fn with_suggestions(mut self, annotation: &Annotation) -> Self {
        for suggestion in &annotation.suggestions {
            self.fixes.push(Fix::replace(
                &annotation.text,
                annotation.span,
                &suggestion.text,
            ));
            self.suggestions.push(suggestion.text.clone());
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics from independent rules.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all diagnostics collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Take the diagnostics, deduplicated by (range, code) and ordered by
    /// range, then severity, then code.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(|a, b| {
            a.span
                .cmp(&b.span)
                .then_with(|| a.severity.cmp(&b.severity))
                .then_with(|| a.code.as_str().cmp(b.code.as_str()))
        });
        self.diagnostics
            .dedup_by(|a, b| a.span == b.span && a.code == b.code);
        self.diagnostics
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Run every diagnostic rule over one analyzed document.
pub fn diagnose(
    text: &str,
    line_index: &LineIndex,
    parse: &Parse,
    model: &SemanticModel,
    kb: &KnowledgeBase,
) -> Vec<Diagnostic> {
    let mut checker = Checker {
        text,
        line_index,
        parse,
        model,
        kb,
        out: DiagnosticCollector::new(),
    };
    checker.syntax();
    checker.route();
    checker.blocks();
    checker.resources();
    checker.geometry();
    checker.document();

    let diagnostics = checker.out.finish();
    tracing::debug!(count = diagnostics.len(), "diagnostics computed");
    diagnostics
}

struct Checker<'a> {
    text: &'a str,
    line_index: &'a LineIndex,
    parse: &'a Parse,
    model: &'a SemanticModel,
    kb: &'a KnowledgeBase,
    out: DiagnosticCollector,
}

impl Checker<'_> {
    /// Position just past the last character of a line.
    fn line_end(&self, line: u32) -> Position {
        let column = self
            .line_index
            .line_text(self.text, line)
            .map_or(0, |text| text.chars().count());
        Position::new(line, column as u32)
    }

    fn annotations(&self, kind: impl Fn(&LeafKind) -> bool) -> impl Iterator<Item = &Annotation> {
        self.model.annotations.iter().filter(move |a| kind(&a.kind))
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    fn syntax(&mut self) {
        let parse = self.parse;
        for error in &parse.errors {
            let message = match &error.hint {
                Some(hint) => format!("{}\nhint: {}", error.message, hint),
                None => error.message.clone(),
            };
            let mut diagnostic = Diagnostic::new(error.code.into(), error.span, message);
            diagnostic.error_code = Some(error.code);
            diagnostic.related = error.related.clone();
            if let Some(fix) = error
                .code
                .is_unterminated()
                .then(|| self.terminator_fix(error))
                .flatten()
            {
                diagnostic = diagnostic.with_fix(fix);
            }
            self.out.add(diagnostic);
        }
    }

    /// Insert the missing terminator on a new line after the zone's last line.
    fn terminator_fix(&self, error: &SyntaxError) -> Option<Fix> {
        let file = &self.parse.file;
        let (last_line, terminator) = match error.code {
            ErrorCode::E0201 => {
                let block = file.blocks().find(|b| b.header_span() == error.span)?;
                (block.span.end.line, "end")
            }
            ErrorCode::E0202 => {
                let geometry = file.geometries().find(|g| g.header == error.span)?;
                (geometry.span.end.line, "*")
            }
            _ => return None,
        };
        Some(Fix::new(
            format!("Insert '{}'", terminator),
            TextEdit::insert(self.line_end(last_line), format!("\n{}", terminator)),
        ))
    }

    // -------------------------------------------------------------------------
    // Route line
    // -------------------------------------------------------------------------

    fn route(&mut self) {
        let model = self.model;
        for keyword in model.route_keywords() {
            if keyword.is_unresolved() {
                self.out.add(
                    Diagnostic::new(
                        DiagnosticCode::UnknownKeyword,
                        keyword.span,
                        format!("unknown keyword '{}'", keyword.text),
                    )
                    .with_suggestions(keyword),
                );
                continue;
            }
            let entry = keyword.resolved_name().and_then(|name| self.kb.keyword(name));
            if let Some(entry) = entry.filter(|e| e.deprecated) {
                let mut diagnostic = Diagnostic::new(
                    DiagnosticCode::DeprecatedKeyword,
                    keyword.span,
                    format!("keyword '{}' is deprecated", entry.name),
                );
                if let Some(successor) = &entry.successor {
                    diagnostic.message = format!(
                        "keyword '{}' is deprecated, use '{}' instead",
                        entry.name, successor
                    )
                    .into();
                    diagnostic.suggestions.push(successor.clone());
                    diagnostic = diagnostic.with_fix(Fix::replace(&keyword.text, keyword.span, successor));
                }
                self.out.add(diagnostic);
            }
        }

        for conflict in &model.conflicts {
            let rejected = &model.annotations[conflict.annotation];
            let primary = &model.annotations[conflict.primary];
            let what = conflict.category.display().to_lowercase();
            self.out.add(
                Diagnostic::new(
                    DiagnosticCode::DuplicateCategory,
                    rejected.span,
                    format!(
                        "'{}' conflicts with {} '{}'; only one {} can be used",
                        rejected.text, what, primary.text, what,
                    ),
                )
                .with_related(RelatedInfo::new(
                    format!("{} '{}' selected here", conflict.category.display(), primary.text),
                    primary.span,
                )),
            );
        }

        if let Some(pair) = model.incompatibility {
            let method = &model.annotations[pair.method];
            let basis = &model.annotations[pair.basis];
            self.out.add(
                Diagnostic::new(
                    DiagnosticCode::IncompatibleBasis,
                    basis.span,
                    format!(
                        "basis set '{}' is not suited for method '{}'",
                        basis.text, method.text
                    ),
                )
                .with_related(RelatedInfo::new(
                    format!("method '{}' selected here", method.text),
                    method.span,
                )),
            );
        }
    }

    // -------------------------------------------------------------------------
    // Blocks
    // -------------------------------------------------------------------------

    fn blocks(&mut self) {
        let unknown_blocks: Vec<_> = self
            .annotations(|k| *k == LeafKind::BlockName)
            .filter(|a| a.is_unresolved())
            .map(|a| {
                Diagnostic::new(
                    DiagnosticCode::UnknownBlock,
                    a.span,
                    format!("unknown block '%{}'", a.text),
                )
                .with_suggestions(a)
            })
            .collect();

        let unknown_parameters: Vec<_> = self
            .model
            .unresolved()
            .filter_map(|a| match &a.kind {
                LeafKind::ParameterKey { block } => Some(
                    Diagnostic::new(
                        DiagnosticCode::UnknownBlockParameter,
                        a.span,
                        format!("unknown parameter '{}' in block '%{}'", a.text, block),
                    )
                    .with_suggestions(a),
                ),
                _ => None,
            })
            .collect();

        let invalid_values: Vec<_> = self
            .annotations(|k| {
                matches!(
                    k,
                    LeafKind::Argument { .. } | LeafKind::ParameterValue { .. }
                )
            })
            .filter(|a| a.is_unresolved())
            .map(|a| self.invalid_value(a))
            .collect();

        for diagnostic in unknown_blocks
            .into_iter()
            .chain(unknown_parameters)
            .chain(invalid_values)
        {
            self.out.add(diagnostic);
        }
    }

    fn invalid_value(&self, annotation: &Annotation) -> Diagnostic {
        let (target, value_type) = match &annotation.kind {
            LeafKind::Argument { block } => (
                format!("'%{}'", block),
                self.kb.block(block).and_then(|b| b.argument.as_ref()),
            ),
            LeafKind::ParameterValue { block, key } => (
                format!("'{}'", key),
                self.kb
                    .block(block)
                    .and_then(|b| b.parameter(key))
                    .map(|p| &p.value_type),
            ),
            _ => (String::new(), None),
        };
        let expected = value_type.map_or_else(String::new, |t| format!(": expected {}", t.describe()));
        Diagnostic::new(
            DiagnosticCode::InvalidParameterValue,
            annotation.span,
            format!("invalid value '{}' for {}{}", annotation.text, target, expected),
        )
        .with_suggestions(annotation)
    }

    fn resources(&mut self) {
        let parse = self.parse;
        let file = &parse.file;
        let atoms = file.atom_count();
        let thresholds = self.kb.thresholds();

        let maxcore = file
            .block("maxcore")
            .and_then(|block| block.arguments.first());
        if let (Some(value), Some(minimum)) = (maxcore, thresholds.min_maxcore(atoms)) {
            if let Some(current) = value.as_integer().filter(|v| *v >= 0 && (*v as u64) < minimum) {
                self.out.add(
                    Diagnostic::new(
                        DiagnosticCode::LowMemory,
                        value.span,
                        format!(
                            "%maxcore {} MB is below the recommended {} MB per core for {} atoms",
                            current, minimum, atoms
                        ),
                    )
                    .with_fix(Fix::replace(&value.text, value.span, &minimum.to_string())),
                );
            }
        }

        if atoms == 0 {
            return;
        }
        let nprocs = file
            .block("pal")
            .and_then(|block| block.parameter("nprocs"))
            .and_then(|param| param.values.first());
        if let (Some(value), Some(ceiling)) = (nprocs, thresholds.max_nprocs(atoms)) {
            if let Some(current) = value.as_integer().filter(|v| *v > 0 && (*v as u64) > ceiling) {
                self.out.add(
                    Diagnostic::new(
                        DiagnosticCode::ExcessiveNprocs,
                        value.span,
                        format!(
                            "{} processes exceed the useful maximum of {} for {} atoms",
                            current, ceiling, atoms
                        ),
                    )
                    .with_fix(Fix::replace(&value.text, value.span, &ceiling.to_string())),
                );
            }
        }
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    fn geometry(&mut self) {
        let parse = self.parse;
        let file = &parse.file;
        let mut geometries = file.geometries();
        let first = geometries.next();
        for duplicate in geometries {
            let mut diagnostic = Diagnostic::new(
                DiagnosticCode::DuplicateGeometry,
                duplicate.header,
                "only one geometry block is allowed",
            );
            if let Some(first) = first {
                diagnostic = diagnostic
                    .with_related(RelatedInfo::new("first geometry block here", first.header));
            }
            self.out.add(diagnostic);
        }

        for geometry in file.geometries() {
            self.header(geometry);
            let kind = self.coordinate_kind(geometry);
            if kind != CoordinateKind::File && geometry.terminated && geometry.atoms.is_empty() {
                self.out.add(Diagnostic::new(
                    DiagnosticCode::EmptyGeometry,
                    geometry.header,
                    "geometry block contains no atoms",
                ));
            }
        }

        let unknown: Vec<_> = self
            .annotations(|k| matches!(k, LeafKind::CoordinateSystem | LeafKind::Element))
            .filter(|a| a.is_unresolved())
            .map(|a| {
                let (code, message) = match a.kind {
                    LeafKind::CoordinateSystem => (
                        DiagnosticCode::UnknownCoordinateSystem,
                        format!("unknown coordinate system '{}'", a.text),
                    ),
                    _ => (
                        DiagnosticCode::UnknownElement,
                        format!("unknown element '{}'", a.text),
                    ),
                };
                Diagnostic::new(code, a.span, message).with_suggestions(a)
            })
            .collect();
        for diagnostic in unknown {
            self.out.add(diagnostic);
        }
    }

    fn coordinate_kind(&self, geometry: &GeometryBlock) -> CoordinateKind {
        geometry
            .coord_system
            .as_ref()
            .and_then(|tag| self.kb.coordinate_system(&tag.text))
            .map_or(CoordinateKind::Cartesian, |system| system.kind)
    }

    /// Charge and multiplicity checks on a geometry header.
    fn header(&mut self, geometry: &GeometryBlock) {
        if let Some(multiplicity) = &geometry.multiplicity {
            if multiplicity.as_integer().is_some_and(|m| m <= 0) {
                self.out.add(
                    Diagnostic::new(
                        DiagnosticCode::InvalidMultiplicity,
                        multiplicity.span,
                        format!("multiplicity must be positive, found {}", multiplicity.text),
                    )
                    .with_fix(Fix::replace(&multiplicity.text, multiplicity.span, "1")),
                );
            }
        }
        if geometry.is_complete() {
            return;
        }

        let charge_ok = geometry.charge_value().is_some();
        let message = match (charge_ok, geometry.multiplicity_value().is_some()) {
            (true, _) => "geometry header is missing the multiplicity",
            (false, true) => "geometry header is missing the charge",
            (false, false) => "geometry header is missing charge and multiplicity",
        };
        let mut diagnostic = Diagnostic::new(
            DiagnosticCode::MissingChargeMultiplicity,
            geometry.header,
            format!("{} (expected '* tag charge multiplicity')", message),
        );
        let edit = self.header_edit(geometry);
        diagnostic = diagnostic.with_fix(Fix::new("Add charge and multiplicity", edit));
        self.out.add(diagnostic);
    }

    /// Edit making the header read `... charge multiplicity`, keeping a
    /// valid charge and defaulting to `0 1`.
    fn header_edit(&self, geometry: &GeometryBlock) -> TextEdit {
        let is_int = |value: &&Value| value.as_integer().is_some();
        match (&geometry.charge, &geometry.multiplicity) {
            (None, _) => {
                let anchor = geometry
                    .coord_system
                    .as_ref()
                    .map_or(geometry.marker, |tag| tag.span);
                TextEdit::insert(anchor.end, " 0 1")
            }
            (Some(charge), None) if is_int(&charge) => TextEdit::insert(charge.span.end, " 1"),
            (Some(charge), Some(multiplicity)) if is_int(&charge) => {
                TextEdit::replace(multiplicity.span, "1")
            }
            (Some(charge), None) if self.coordinate_kind(geometry) == CoordinateKind::File => {
                TextEdit::insert(charge.span.start, "0 1 ")
            }
            (Some(charge), None) => TextEdit::replace(charge.span, "0 1"),
            (Some(charge), Some(multiplicity)) if is_int(&multiplicity) => {
                TextEdit::replace(charge.span, "0")
            }
            (Some(charge), Some(multiplicity)) => {
                TextEdit::replace(charge.span.cover(multiplicity.span), "0 1")
            }
        }
    }

    // -------------------------------------------------------------------------
    // Document
    // -------------------------------------------------------------------------

    fn document(&mut self) {
        let parse = self.parse;
        let file = &parse.file;
        if file.is_empty() {
            return;
        }
        let start = Span::empty(Position::new(0, 0));
        match file.route_lines().next() {
            Some(route) => self.route_completeness(route.span),
            None => self.out.add(Diagnostic::new(
                DiagnosticCode::MissingRouteLine,
                start,
                "no route line ('! method basis ...') found",
            )),
        }
        if file.geometries().next().is_none() {
            self.out.add(Diagnostic::new(
                DiagnosticCode::MissingGeometry,
                start,
                "no geometry block ('* xyz charge multiplicity') found",
            ));
        }
    }

    /// Method and basis set on a route line whose keywords all resolved.
    fn route_completeness(&mut self, span: Span) {
        let (model, kb) = (self.model, self.kb);
        if model.route_keywords().any(Annotation::is_unresolved) {
            return;
        }
        let method = model
            .primary_method()
            .and_then(Annotation::resolved_name)
            .and_then(|name| kb.keyword(name));
        if method.is_none() {
            self.out.add(Diagnostic::new(
                DiagnosticCode::MissingMethod,
                span,
                "no method on the route line (e.g. B3LYP, HF, MP2)",
            ));
        }
        let brings_own_basis = method.is_some_and(|m| m.family == "semiempirical");
        if model.primary_basis.is_none() && !brings_own_basis {
            self.out.add(Diagnostic::new(
                DiagnosticCode::MissingBasis,
                span,
                "no basis set on the route line (e.g. def2-TZVP, 6-31G*)",
            ));
        }
    }
}
