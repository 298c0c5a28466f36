//! Knowledge base entry types.
//!
//! These are the plain data records the knowledge base is built from. With
//! the `json` feature they can be deserialized from an external table.

use smol_str::SmolStr;

/// Category of a route-line keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum KeywordCategory {
    Method,
    BasisSet,
    AuxiliaryBasis,
    JobType,
    Dispersion,
    Setting,
}

impl KeywordCategory {
    /// Stable identifier used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Method => "method",
            KeywordCategory::BasisSet => "basis-set",
            KeywordCategory::AuxiliaryBasis => "auxiliary-basis",
            KeywordCategory::JobType => "job-type",
            KeywordCategory::Dispersion => "dispersion",
            KeywordCategory::Setting => "setting",
        }
    }

    /// Human readable name.
    pub fn display(&self) -> &'static str {
        match self {
            KeywordCategory::Method => "Method",
            KeywordCategory::BasisSet => "Basis set",
            KeywordCategory::AuxiliaryBasis => "Auxiliary basis set",
            KeywordCategory::JobType => "Job type",
            KeywordCategory::Dispersion => "Dispersion correction",
            KeywordCategory::Setting => "Setting",
        }
    }

    /// Categories of which only one keyword may appear on the route line.
    pub fn is_primary(&self) -> bool {
        matches!(self, KeywordCategory::Method | KeywordCategory::BasisSet)
    }
}

/// A route-line keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct KeywordEntry {
    pub name: SmolStr,
    pub category: KeywordCategory,
    /// Sub-classification, e.g. `hybrid` for a functional or `karlsruhe` for a basis set.
    pub family: SmolStr,
    pub documentation: String,
    /// Method families this basis set is meant for. Empty means any.
    #[cfg_attr(feature = "json", serde(default))]
    pub compatible_families: Vec<SmolStr>,
    #[cfg_attr(feature = "json", serde(default))]
    pub deprecated: bool,
    /// Keyword to use instead of a deprecated one.
    #[cfg_attr(feature = "json", serde(default))]
    pub successor: Option<SmolStr>,
}

impl KeywordEntry {
    pub fn new(
        name: impl Into<SmolStr>,
        category: KeywordCategory,
        family: impl Into<SmolStr>,
        documentation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            family: family.into(),
            documentation: documentation.into(),
            compatible_families: Vec::new(),
            deprecated: false,
            successor: None,
        }
    }

    pub fn with_compatible<S: Into<SmolStr>>(
        mut self,
        families: impl IntoIterator<Item = S>,
    ) -> Self {
        self.compatible_families = families.into_iter().map(Into::into).collect();
        self
    }

    pub fn deprecated_for(mut self, successor: impl Into<SmolStr>) -> Self {
        self.deprecated = true;
        self.successor = Some(successor.into());
        self
    }
}

/// Expected type of a block parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    Text,
    Choice(Vec<SmolStr>),
}

impl ValueType {
    /// Check whether a raw value (quotes already stripped) fits this type.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            ValueType::Integer => text.parse::<i64>().is_ok(),
            ValueType::Float => text.parse::<f64>().is_ok(),
            ValueType::Boolean => matches!(
                text.to_ascii_lowercase().as_str(),
                "true" | "false" | "on" | "off" | "yes" | "no"
            ),
            ValueType::Text => true,
            ValueType::Choice(options) => options.iter().any(|o| o.eq_ignore_ascii_case(text)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ValueType::Integer => "an integer".to_string(),
            ValueType::Float => "a number".to_string(),
            ValueType::Boolean => "true/false".to_string(),
            ValueType::Text => "text".to_string(),
            ValueType::Choice(options) => format!("one of {}", options.join(", ")),
        }
    }
}

/// A parameter declared by a block schema.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct ParameterSpec {
    pub name: SmolStr,
    pub value_type: ValueType,
    #[cfg_attr(feature = "json", serde(default))]
    pub documentation: String,
}

impl ParameterSpec {
    pub fn new(name: impl Into<SmolStr>, value_type: ValueType, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type,
            documentation: doc.into(),
        }
    }
}

/// How a block is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum BlockTerminator {
    /// Closed by an `end` keyword.
    #[default]
    End,
    /// A single-line directive such as `%maxcore 4000`.
    Line,
}

/// Schema of a `%name` block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct BlockSpec {
    pub name: SmolStr,
    pub documentation: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub terminator: BlockTerminator,
    /// Type of the value following the name on a line directive.
    #[cfg_attr(feature = "json", serde(default))]
    pub argument: Option<ValueType>,
    #[cfg_attr(feature = "json", serde(default))]
    pub parameters: Vec<ParameterSpec>,
    /// Usage example shown in completion and hover.
    #[cfg_attr(feature = "json", serde(default))]
    pub example: Option<String>,
}

impl BlockSpec {
    pub fn new(name: impl Into<SmolStr>, documentation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documentation: documentation.into(),
            terminator: BlockTerminator::End,
            argument: None,
            parameters: Vec::new(),
            example: None,
        }
    }

    pub fn line_directive(mut self, argument: ValueType) -> Self {
        self.terminator = BlockTerminator::Line;
        self.argument = Some(argument);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Case-insensitive parameter lookup.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn is_line_directive(&self) -> bool {
        self.terminator == BlockTerminator::Line
    }
}

/// How atom records of a geometry block are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum CoordinateKind {
    /// `El x y z`
    Cartesian,
    /// `El a b c r angle dihedral`
    Internal,
    /// `El [a r [b angle [c dihedral]]]`
    ZMatrix,
    /// Header names an external file; no body.
    File,
}

impl CoordinateKind {
    pub fn display(&self) -> &'static str {
        match self {
            CoordinateKind::Cartesian => "Cartesian coordinates",
            CoordinateKind::Internal => "internal coordinates",
            CoordinateKind::ZMatrix => "Z-matrix",
            CoordinateKind::File => "coordinates read from a file",
        }
    }
}

/// A geometry coordinate-system tag (`xyz`, `int`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct CoordinateSystem {
    pub name: SmolStr,
    pub kind: CoordinateKind,
    pub documentation: String,
}

/// A chemical element.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct Element {
    pub symbol: SmolStr,
    pub name: SmolStr,
    pub atomic_number: u8,
}

/// Threshold selected by system size: applies when `atoms <= max_atoms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct Tier {
    /// Upper bound on atom count, `None` for the open-ended last tier.
    pub max_atoms: Option<usize>,
    pub value: u64,
}

impl Tier {
    pub const fn new(max_atoms: Option<usize>, value: u64) -> Self {
        Self { max_atoms, value }
    }
}

/// Resource recommendations scaled by atom count.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct Thresholds {
    /// Minimum recommended `%maxcore` (MB per core).
    #[cfg_attr(feature = "json", serde(default))]
    pub maxcore: Vec<Tier>,
    /// Largest useful `%pal nprocs`.
    #[cfg_attr(feature = "json", serde(default))]
    pub nprocs: Vec<Tier>,
}

impl Thresholds {
    /// Minimum recommended memory per core for a system of `atoms` atoms.
    pub fn min_maxcore(&self, atoms: usize) -> Option<u64> {
        Self::select(&self.maxcore, atoms)
    }

    /// Largest useful processor count for a system of `atoms` atoms.
    pub fn max_nprocs(&self, atoms: usize) -> Option<u64> {
        Self::select(&self.nprocs, atoms)
    }

    fn select(tiers: &[Tier], atoms: usize) -> Option<u64> {
        tiers
            .iter()
            .find(|tier| tier.max_atoms.is_none_or(|max| atoms <= max))
            .map(|tier| tier.value)
    }
}

/// Everything a knowledge base is built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize, serde::Serialize))]
pub struct KnowledgeData {
    pub keywords: Vec<KeywordEntry>,
    #[cfg_attr(feature = "json", serde(default))]
    pub blocks: Vec<BlockSpec>,
    #[cfg_attr(feature = "json", serde(default))]
    pub coordinate_systems: Vec<CoordinateSystem>,
    #[cfg_attr(feature = "json", serde(default))]
    pub elements: Vec<Element>,
    #[cfg_attr(feature = "json", serde(default))]
    pub thresholds: Thresholds,
}
