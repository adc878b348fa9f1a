use crate::{BindingRow, BindingTable, ConstructionError, Prefix, RdfTerm};
use oxrdf::Variable;
use std::fmt;

/// An inline binding set (`VALUES`).
///
/// Each column is an ordered list of optional terms, where `None` is `UNDEF`. Columns may have
/// different lengths; shorter columns behave as if they were padded with `UNDEF` up to
/// [Values::max_bindings_length].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Values {
    columns: Vec<(Variable, Vec<Option<RdfTerm>>)>,
}

impl Values {
    /// Creates a new binding set. At least one column is required.
    pub fn new(
        columns: impl IntoIterator<Item = (Variable, Vec<Option<RdfTerm>>)>,
    ) -> Result<Self, ConstructionError> {
        let mut result: Vec<(Variable, Vec<Option<RdfTerm>>)> = Vec::new();
        for (variable, bindings) in columns {
            match result.iter_mut().find(|(v, _)| *v == variable) {
                Some((_, existing)) => existing.extend(bindings),
                None => result.push((variable, bindings)),
            }
        }
        if result.is_empty() {
            return Err(ConstructionError::EmptyValues);
        }
        Ok(Self { columns: result })
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.columns.iter().map(|(variable, _)| variable)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The length of the longest column.
    pub fn max_bindings_length(&self) -> usize {
        self.columns
            .iter()
            .map(|(_, bindings)| bindings.len())
            .max()
            .unwrap_or(0)
    }

    /// Returns the binding of `column` in tuple `index`. Padded positions are `UNDEF`.
    pub fn binding(&self, column: usize, index: usize) -> Option<&RdfTerm> {
        self.columns
            .get(column)
            .and_then(|(_, bindings)| bindings.get(index))
            .and_then(Option::as_ref)
    }

    /// Iterates over the columns.
    pub fn columns(&self) -> impl Iterator<Item = (&Variable, &[Option<RdfTerm>])> {
        self.columns
            .iter()
            .map(|(variable, bindings)| (variable, bindings.as_slice()))
    }

    /// Converts the binding set into a table with one row per tuple.
    pub fn to_table(&self) -> BindingTable {
        let rows = (0..self.max_bindings_length()).map(|index| {
            self.columns
                .iter()
                .enumerate()
                .map(|(column, (variable, _))| {
                    (variable.clone(), self.binding(column, index).cloned())
                })
                .collect::<BindingRow>()
        });
        BindingTable::from_rows(self.variables().cloned(), rows)
    }

    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        let variables = self
            .variables()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let tuples = (0..self.max_bindings_length())
            .map(|index| {
                let terms = (0..self.columns.len())
                    .map(|column| {
                        self.binding(column, index)
                            .map_or_else(|| "UNDEF".to_owned(), |term| term.to_sparql(prefixes))
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("({terms})")
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("VALUES ({variables}) {{ {tuples} }}")
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_columns_are_padded() {
        let values = Values::new([
            (
                Variable::new_unchecked("a"),
                vec![Some(RdfTerm::simple_literal("1")), None],
            ),
            (
                Variable::new_unchecked("b"),
                vec![Some(RdfTerm::simple_literal("2"))],
            ),
        ])
        .unwrap();
        assert_eq!(values.max_bindings_length(), 2);
        assert_eq!(values.binding(1, 1), None);
        insta::assert_snapshot!(values, @r#"VALUES (?a ?b) { ("1" "2") (UNDEF UNDEF) }"#);
        assert_eq!(values.to_table().len(), 2);
    }

    #[test]
    fn requires_a_column() {
        assert_eq!(
            Values::new(Vec::new()),
            Err(ConstructionError::EmptyValues)
        );
    }
}
