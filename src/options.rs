//! Analysis options

/// Tunables for the analyzer and IDE features.
///
/// Domain thresholds (memory tiers, processor ceilings) live in the
/// knowledge base; these options only shape how results are presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Maximum number of completion items returned per request
    pub max_completions: usize,
    /// Largest edit distance still considered a near miss
    pub max_suggestion_distance: usize,
    /// Maximum number of suggestions kept per unresolved leaf
    pub max_suggestions: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_completions: 50,
            max_suggestion_distance: 2,
            max_suggestions: 5,
        }
    }
}

impl AnalysisOptions {
    pub fn with_max_completions(mut self, max: usize) -> Self {
        self.max_completions = max;
        self
    }

    pub fn with_max_suggestion_distance(mut self, distance: usize) -> Self {
        self.max_suggestion_distance = distance;
        self
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }
}
