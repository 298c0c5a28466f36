//! Hover information implementation.

use crate::base::{Position, Span};
use crate::hir::{Annotation, LeafKind, Resolution, SemanticModel};
use crate::knowledge::KnowledgeBase;

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// The hovered range.
    pub span: Span,
}

impl HoverResult {
    fn new(contents: String, annotation: &Annotation) -> Self {
        Self {
            contents,
            span: annotation.span,
        }
    }
}

/// Get hover information at a position.
///
/// Shows knowledge-base documentation for the innermost leaf under the
/// cursor, or an "unknown" notice with the closest suggestion.
pub fn hover(model: &SemanticModel, kb: &KnowledgeBase, position: Position) -> Option<HoverResult> {
    let annotation = model.annotation_at(position)?;
    let contents = match &annotation.resolution {
        Resolution::Resolved { name, .. } => resolved_contents(kb, annotation, name)?,
        Resolution::Unresolved => unknown_contents(annotation),
        Resolution::Unchecked => match &annotation.kind {
            LeafKind::ParameterKey { block } => format!(
                "**{}**\n\nParameter of block `%{}`, which is not in the knowledge base.",
                annotation.text, block
            ),
            _ => return None,
        },
    };
    Some(HoverResult::new(contents, annotation))
}

fn resolved_contents(kb: &KnowledgeBase, annotation: &Annotation, name: &str) -> Option<String> {
    let contents = match &annotation.kind {
        LeafKind::RouteKeyword => {
            let entry = kb.keyword(name)?;
            let mut contents = format!(
                "**{}** *{}, {}*\n\n{}",
                entry.name,
                entry.category.display(),
                entry.family,
                entry.documentation
            );
            if let Some(successor) = entry.successor.as_ref().filter(|_| entry.deprecated) {
                contents.push_str(&format!("\n\nDeprecated: use `{}` instead.", successor));
            }
            if !entry.compatible_families.is_empty() {
                contents.push_str(&format!(
                    "\n\nIntended for: {}",
                    entry.compatible_families.join(", ")
                ));
            }
            contents
        }
        LeafKind::BlockName => {
            let spec = kb.block(name)?;
            let mut contents = format!("**%{}**\n\n{}", spec.name, spec.documentation);
            if !spec.parameters.is_empty() {
                contents.push_str("\n\nParameters:");
                for param in &spec.parameters {
                    contents.push_str(&format!("\n- `{}`: {}", param.name, param.value_type.describe()));
                }
            }
            if let Some(example) = &spec.example {
                contents.push_str(&format!("\n\n```\n{}\n```", example));
            }
            contents
        }
        LeafKind::ParameterKey { block } => {
            let param = kb.block(block)?.parameter(name)?;
            format!(
                "**{}** in `%{}`\n\n{}\n\nValue: {}",
                param.name,
                block,
                param.documentation,
                param.value_type.describe()
            )
        }
        LeafKind::CoordinateSystem => {
            let system = kb.coordinate_system(name)?;
            format!(
                "**{}** *{}*\n\n{}",
                system.name,
                system.kind.display(),
                system.documentation
            )
        }
        LeafKind::Charge => format!("**Charge** {}\n\nTotal molecular charge.", annotation.text),
        LeafKind::Multiplicity => {
            let spin = annotation.text.parse::<i64>().ok().and_then(spin_state);
            match spin {
                Some(state) => format!(
                    "**Multiplicity** {} ({})\n\nSpin multiplicity 2S+1.",
                    annotation.text, state
                ),
                None => format!("**Multiplicity** {}\n\nSpin multiplicity 2S+1.", annotation.text),
            }
        }
        LeafKind::Element => {
            let element = kb.element(name)?;
            format!(
                "**{}** {}\n\nAtomic number {}",
                element.symbol, element.name, element.atomic_number
            )
        }
        LeafKind::Argument { .. } | LeafKind::ParameterValue { .. } => return None,
    };
    Some(contents)
}

fn unknown_contents(annotation: &Annotation) -> String {
    let mut contents = format!("Unknown {} `{}`", annotation.kind.display(), annotation.text);
    if let Some(suggestion) = annotation.top_suggestion() {
        contents.push_str(&format!("\n\nDid you mean `{}`?", suggestion.text));
    }
    contents
}

fn spin_state(multiplicity: i64) -> Option<&'static str> {
    match multiplicity {
        1 => Some("singlet"),
        2 => Some("doublet"),
        3 => Some("triplet"),
        4 => Some("quartet"),
        5 => Some("quintet"),
        _ => None,
    }
}
