//! Knowledge base: immutable lookup tables for ORCA keywords and blocks.
//!
//! The knowledge base is built once, validated, and then shared by `Arc`
//! across every document analysis. All lookups are case-insensitive.
//!
//! ```
//! use orca::knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::builtin();
//! let b3lyp = kb.keyword("b3lyp").unwrap();
//! assert_eq!(b3lyp.name, "B3LYP");
//! ```

mod builtin;
mod entry;
mod error;

use std::sync::{Arc, LazyLock};

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

pub use entry::{
    BlockSpec, BlockTerminator, CoordinateKind, CoordinateSystem, Element, KeywordCategory,
    KeywordEntry, KnowledgeData, ParameterSpec, Thresholds, Tier, ValueType,
};
pub use error::KnowledgeBaseError;

static BUILTIN: LazyLock<Arc<KnowledgeBase>> = LazyLock::new(|| {
    let kb = KnowledgeBase::from_data(builtin::data())
        .unwrap_or_else(|err| panic!("built-in knowledge base is invalid: {err}"));
    Arc::new(kb)
});

/// Case-folded lookup key.
fn fold(name: &str) -> SmolStr {
    SmolStr::new(name.to_lowercase())
}

/// Validated, indexed knowledge tables.
#[derive(Debug)]
pub struct KnowledgeBase {
    keywords: Vec<KeywordEntry>,
    keyword_index: FxHashMap<SmolStr, usize>,
    blocks: Vec<BlockSpec>,
    block_index: FxHashMap<SmolStr, usize>,
    coordinate_systems: Vec<CoordinateSystem>,
    coordinate_index: FxHashMap<SmolStr, usize>,
    elements: Vec<Element>,
    element_index: FxHashMap<SmolStr, usize>,
    thresholds: Thresholds,
}

impl KnowledgeBase {
    /// The built-in ORCA tables, constructed on first use.
    pub fn builtin() -> Arc<KnowledgeBase> {
        Arc::clone(&BUILTIN)
    }

    /// Build and validate a knowledge base from raw tables.
    pub fn from_data(data: KnowledgeData) -> Result<Self, KnowledgeBaseError> {
        if data.keywords.is_empty() {
            return Err(KnowledgeBaseError::NoKeywords);
        }
        if data.elements.is_empty() {
            return Err(KnowledgeBaseError::NoElements);
        }

        let keyword_index = index_by(&data.keywords, "keyword", |k| &k.name)?;
        let block_index = index_by(&data.blocks, "block", |b| &b.name)?;
        let coordinate_index =
            index_by(&data.coordinate_systems, "coordinate system", |c| &c.name)?;
        let element_index = index_by(&data.elements, "element", |e| &e.symbol)?;

        let families: FxHashSet<SmolStr> = data
            .keywords
            .iter()
            .filter(|k| k.category == KeywordCategory::Method)
            .map(|k| fold(&k.family))
            .collect();

        for keyword in &data.keywords {
            if let Some(successor) = &keyword.successor {
                if !keyword_index.contains_key(&fold(successor)) {
                    return Err(KnowledgeBaseError::UnknownSuccessor {
                        keyword: keyword.name.to_string(),
                        successor: successor.to_string(),
                    });
                }
            }
            for family in &keyword.compatible_families {
                if !families.contains(&fold(family)) {
                    return Err(KnowledgeBaseError::UnknownFamily {
                        keyword: keyword.name.to_string(),
                        family: family.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            keywords = data.keywords.len(),
            blocks = data.blocks.len(),
            elements = data.elements.len(),
            "knowledge base loaded"
        );

        Ok(Self {
            keywords: data.keywords,
            keyword_index,
            blocks: data.blocks,
            block_index,
            coordinate_systems: data.coordinate_systems,
            coordinate_index,
            elements: data.elements,
            element_index,
            thresholds: data.thresholds,
        })
    }

    /// Build a knowledge base from a JSON document shaped like [`KnowledgeData`].
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, KnowledgeBaseError> {
        let data: KnowledgeData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    // ==================== Keywords ====================

    pub fn keyword(&self, name: &str) -> Option<&KeywordEntry> {
        self.keyword_index
            .get(&fold(name))
            .map(|&idx| &self.keywords[idx])
    }

    pub fn keywords(&self) -> &[KeywordEntry] {
        &self.keywords
    }

    pub fn keywords_in(&self, category: KeywordCategory) -> impl Iterator<Item = &KeywordEntry> {
        self.keywords.iter().filter(move |k| k.category == category)
    }

    /// Whether a basis set is meant to be used with a method.
    pub fn is_compatible(&self, method: &KeywordEntry, basis: &KeywordEntry) -> bool {
        basis.compatible_families.is_empty()
            || basis
                .compatible_families
                .iter()
                .any(|family| family.eq_ignore_ascii_case(&method.family))
    }

    // ==================== Blocks ====================

    pub fn block(&self, name: &str) -> Option<&BlockSpec> {
        self.block_index
            .get(&fold(name))
            .map(|&idx| &self.blocks[idx])
    }

    pub fn blocks(&self) -> &[BlockSpec] {
        &self.blocks
    }

    // ==================== Geometry ====================

    pub fn coordinate_system(&self, name: &str) -> Option<&CoordinateSystem> {
        self.coordinate_index
            .get(&fold(name))
            .map(|&idx| &self.coordinate_systems[idx])
    }

    pub fn coordinate_systems(&self) -> &[CoordinateSystem] {
        &self.coordinate_systems
    }

    pub fn element(&self, symbol: &str) -> Option<&Element> {
        self.element_index
            .get(&fold(symbol))
            .map(|&idx| &self.elements[idx])
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}

fn index_by<T>(
    items: &[T],
    kind: &'static str,
    name: impl Fn(&T) -> &SmolStr,
) -> Result<FxHashMap<SmolStr, usize>, KnowledgeBaseError> {
    let mut index = FxHashMap::default();
    for (idx, item) in items.iter().enumerate() {
        let key = fold(name(item));
        if index.insert(key, idx).is_some() {
            return Err(KnowledgeBaseError::duplicate(kind, name(item).as_str()));
        }
    }
    Ok(index)
}
