use crate::{Cell, RdfTerm};
use oxrdf::Variable;
use std::collections::BTreeMap;

/// A single solution: a mapping from variables to optional terms.
///
/// A variable that is missing from the map is not a column of the row ([Cell::NoColumn]). A
/// variable that maps to `None` is a column without a value ([Cell::NoValue]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BindingRow {
    cells: BTreeMap<Variable, Option<RdfTerm>>,
}

impl BindingRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell of `variable`.
    pub fn get(&self, variable: &Variable) -> Cell<'_> {
        Cell::from(self.cells.get(variable))
    }

    /// Returns the bound term of `variable`, ignoring whether the column exists.
    pub fn term(&self, variable: &Variable) -> Option<&RdfTerm> {
        self.get(variable).term()
    }

    pub fn contains_column(&self, variable: &Variable) -> bool {
        self.cells.contains_key(variable)
    }

    /// Sets the cell of `variable`, creating the column if necessary.
    pub fn set(&mut self, variable: Variable, value: Option<RdfTerm>) {
        self.cells.insert(variable, value);
    }

    /// Binds `variable` to `term`.
    pub fn bind(&mut self, variable: Variable, term: RdfTerm) {
        self.set(variable, Some(term));
    }

    /// Creates the column of `variable` without a value if it does not exist yet.
    pub fn ensure_column(&mut self, variable: &Variable) {
        if !self.cells.contains_key(variable) {
            self.cells.insert(variable.clone(), None);
        }
    }

    /// Removes the column of `variable`.
    pub fn remove(&mut self, variable: &Variable) -> Option<Option<RdfTerm>> {
        self.cells.remove(variable)
    }

    /// Iterates over the columns of the row in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, Option<&RdfTerm>)> {
        self.cells
            .iter()
            .map(|(variable, value)| (variable, value.as_ref()))
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.cells.keys()
    }

    /// Checks whether two rows agree on every variable that is bound in both.
    ///
    /// Variables without a value are compatible with anything.
    pub fn is_compatible(&self, other: &BindingRow) -> bool {
        self.cells.iter().all(|(variable, value)| {
            match (value, other.cells.get(variable)) {
                (Some(lhs), Some(Some(rhs))) => lhs == rhs,
                _ => true,
            }
        })
    }

    /// Merges two compatible rows. Bound values of `other` fill the gaps of `self`.
    pub fn merge(&self, other: &BindingRow) -> BindingRow {
        let mut result = self.clone();
        for (variable, value) in &other.cells {
            match result.cells.get_mut(variable) {
                Some(Some(_)) => {}
                Some(slot) => slot.clone_from(value),
                None => {
                    result.cells.insert(variable.clone(), value.clone());
                }
            }
        }
        result
    }
}

impl FromIterator<(Variable, Option<RdfTerm>)> for BindingRow {
    fn from_iter<T: IntoIterator<Item = (Variable, Option<RdfTerm>)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(Variable, RdfTerm)> for BindingRow {
    fn from_iter<T: IntoIterator<Item = (Variable, RdfTerm)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(variable, term)| (variable, Some(term)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    #[test]
    fn distinguishes_missing_column_and_value() {
        let mut row = BindingRow::new();
        row.set(var("a"), None);
        row.bind(var("b"), RdfTerm::simple_literal("x"));
        assert_eq!(row.get(&var("a")), Cell::NoValue);
        assert!(row.get(&var("b")).is_bound());
        assert_eq!(row.get(&var("c")), Cell::NoColumn);
    }

    #[test]
    fn unbound_values_are_compatible() {
        let lhs: BindingRow = [
            (var("a"), Some(RdfTerm::simple_literal("1"))),
            (var("b"), None),
        ]
        .into_iter()
        .collect();
        let rhs: BindingRow = [
            (var("a"), RdfTerm::simple_literal("1")),
            (var("b"), RdfTerm::simple_literal("2")),
        ]
        .into_iter()
        .collect();
        assert!(lhs.is_compatible(&rhs));
        assert_eq!(
            lhs.merge(&rhs).term(&var("b")),
            Some(&RdfTerm::simple_literal("2"))
        );

        let conflicting: BindingRow = [(var("a"), RdfTerm::simple_literal("2"))]
            .into_iter()
            .collect();
        assert!(!lhs.is_compatible(&conflicting));
    }
}
