//! Document model produced by the parser.
//!
//! A document is an ordered list of zones. Every leaf keeps the span it was
//! parsed from so IDE features can map cursor positions back to nodes.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{Position, Span};

/// Root of a parsed document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceFile {
    pub zones: Vec<Zone>,
}

impl SourceFile {
    pub fn route_lines(&self) -> impl Iterator<Item = &RouteLine> {
        self.zones.iter().filter_map(|zone| match zone {
            Zone::Route(route) => Some(route),
            _ => None,
        })
    }

    /// Route keywords of every `!` line, in document order.
    pub fn route_keywords(&self) -> impl Iterator<Item = &Word> {
        self.route_lines().flat_map(|route| route.keywords.iter())
    }

    pub fn blocks(&self) -> impl Iterator<Item = &NamedBlock> {
        self.zones.iter().filter_map(|zone| match zone {
            Zone::Block(block) => Some(block),
            _ => None,
        })
    }

    /// First block with the given name (case-insensitive).
    pub fn block(&self, name: &str) -> Option<&NamedBlock> {
        self.blocks()
            .find(|block| block.name.text.eq_ignore_ascii_case(name))
    }

    pub fn geometries(&self) -> impl Iterator<Item = &GeometryBlock> {
        self.zones.iter().filter_map(|zone| match zone {
            Zone::Geometry(geometry) => Some(geometry),
            _ => None,
        })
    }

    /// The first geometry block; later ones are duplicates.
    pub fn geometry(&self) -> Option<&GeometryBlock> {
        self.geometries().next()
    }

    /// Number of atoms in the first geometry block.
    pub fn atom_count(&self) -> usize {
        self.geometry().map_or(0, |geometry| geometry.atoms.len())
    }

    /// Innermost zone whose span contains the position.
    pub fn zone_at(&self, position: Position) -> Option<&Zone> {
        self.zones
            .iter()
            .filter(|zone| zone.span().contains(position))
            .min_by_key(|zone| zone.span().size())
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// A top-level zone of the document.
#[derive(Clone, Debug, PartialEq)]
pub enum Zone {
    Route(RouteLine),
    Block(NamedBlock),
    Geometry(GeometryBlock),
    /// A line outside every zone, kept verbatim.
    Unknown(UnknownLine),
}

impl Zone {
    pub fn span(&self) -> Span {
        match self {
            Zone::Route(route) => route.span,
            Zone::Block(block) => block.span,
            Zone::Geometry(geometry) => geometry.span,
            Zone::Unknown(line) => line.span,
        }
    }
}

/// A keyword, name or tag as written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word {
    pub text: SmolStr,
    pub span: Span,
}

impl Word {
    pub fn new(text: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// Interpretation of a value token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueKind {
    Integer(i64),
    Float(f64),
    /// Bare word
    Text,
    /// Double-quoted string; `text` holds the contents without quotes
    Quoted,
}

/// A parameter value, header argument or geometry header field.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub text: SmolStr,
    pub kind: ValueKind,
    pub span: Span,
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self.kind {
            ValueKind::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Integer(value) => Some(value as f64),
            ValueKind::Float(value) => Some(value),
            ValueKind::Text | ValueKind::Quoted => None,
        }
    }
}

/// `! keyword keyword ...`
#[derive(Clone, Debug, PartialEq)]
pub struct RouteLine {
    pub marker: Span,
    pub keywords: Vec<Word>,
    pub span: Span,
}

/// `key value...` inside a block.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub key: Word,
    pub values: Vec<Value>,
    pub span: Span,
}

/// `%name ... end`, or a single-line directive such as `%maxcore 4000`.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedBlock {
    pub marker: Span,
    pub name: Word,
    /// Values following the name of a single-line directive
    pub arguments: Vec<Value>,
    /// Parameters keyed by lowercase name; repeated keys keep every occurrence
    pub params: IndexMap<SmolStr, Vec<Parameter>>,
    pub terminated: bool,
    pub span: Span,
}

impl NamedBlock {
    /// `%` together with the block name.
    pub fn header_span(&self) -> Span {
        self.marker.cover(self.name.span)
    }

    /// All parameters in insertion order of their keys.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values().flatten()
    }

    /// Last occurrence of a parameter (case-insensitive).
    pub fn parameter(&self, key: &str) -> Option<&Parameter> {
        self.params
            .get(key.to_ascii_lowercase().as_str())
            .and_then(|occurrences| occurrences.last())
    }
}

/// `* tag charge multiplicity` followed by atom records and a closing `*`.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryBlock {
    pub marker: Span,
    pub coord_system: Option<Word>,
    pub charge: Option<Value>,
    pub multiplicity: Option<Value>,
    /// External coordinate file of a `*xyzfile`-style header
    pub file: Option<Value>,
    pub atoms: Vec<Atom>,
    pub terminated: bool,
    /// From the `*` marker to the last header token
    pub header: Span,
    pub span: Span,
}

impl GeometryBlock {
    pub fn charge_value(&self) -> Option<i64> {
        self.charge.as_ref().and_then(Value::as_integer)
    }

    pub fn multiplicity_value(&self) -> Option<i64> {
        self.multiplicity.as_ref().and_then(Value::as_integer)
    }

    /// Both charge and multiplicity are present integers.
    pub fn is_complete(&self) -> bool {
        self.charge_value().is_some() && self.multiplicity_value().is_some()
    }
}

/// One atom record. Internal and Z-matrix records store their
/// bond length, angle and dihedral in `x`, `y`, `z`.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub element: Word,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Connectivity indices of internal-coordinate records
    pub refs: Vec<u32>,
    pub span: Span,
}

/// Raw words of a line that belongs to no zone.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownLine {
    pub words: Vec<Word>,
    pub span: Span,
}
