use rdf_algebra_model::{BindingTable, Pattern};
use rustc_hash::FxHashMap;

/// The pre-evaluated results of the sub-patterns of `EXISTS` and `NOT EXISTS` filters.
///
/// The evaluator of a group evaluates each embedded pattern before applying the group's filters
/// and registers the result here. A pattern without an entry is considered not yet evaluated.
#[derive(Clone, Debug, Default)]
pub struct SubPatternResults {
    results: FxHashMap<Pattern, BindingTable>,
}

impl SubPatternResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the result of `pattern`, replacing any previous result.
    pub fn insert(&mut self, pattern: Pattern, result: BindingTable) {
        self.results.insert(pattern, result);
    }

    /// Returns the result of `pattern`, if it has been evaluated.
    pub fn get(&self, pattern: &Pattern) -> Option<&BindingTable> {
        self.results.get(pattern)
    }

    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.results.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
