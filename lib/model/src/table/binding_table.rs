use crate::{BindingRow, RdfTerm};
use oxrdf::Variable;
use std::fmt;

/// An ordered sequence of [BindingRow]s that share one schema.
///
/// Every row of the table contains a column for every variable of the schema. Pushing a row with
/// additional columns extends the schema, and the new columns of the existing rows are left
/// without a value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingTable {
    variables: Vec<Variable>,
    rows: Vec<BindingRow>,
}

impl BindingTable {
    /// Creates a table without rows.
    pub fn new(variables: impl IntoIterator<Item = Variable>) -> Self {
        let mut table = Self::default();
        for variable in variables {
            table.add_column(variable);
        }
        table
    }

    /// The join identity: no columns and exactly one empty row.
    pub fn unit() -> Self {
        Self {
            variables: Vec::new(),
            rows: vec![BindingRow::new()],
        }
    }

    /// Creates a table from rows. The schema is the union of `variables` and all row columns.
    pub fn from_rows(
        variables: impl IntoIterator<Item = Variable>,
        rows: impl IntoIterator<Item = BindingRow>,
    ) -> Self {
        let mut table = Self::new(variables);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn rows(&self) -> &[BindingRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<BindingRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains_variable(&self, variable: &Variable) -> bool {
        self.variables.contains(variable)
    }

    /// Adds a column without values to the schema and every row.
    pub fn add_column(&mut self, variable: Variable) {
        if self.contains_variable(&variable) {
            return;
        }
        for row in &mut self.rows {
            row.ensure_column(&variable);
        }
        self.variables.push(variable);
    }

    /// Appends a row, reconciling its columns with the schema.
    pub fn push_row(&mut self, mut row: BindingRow) {
        let new_columns = row
            .variables()
            .filter(|variable| !self.variables.contains(variable))
            .cloned()
            .collect::<Vec<_>>();
        for variable in new_columns {
            self.add_column(variable);
        }
        for variable in &self.variables {
            row.ensure_column(variable);
        }
        self.rows.push(row);
    }

    /// Keeps only the rows for which `predicate` returns true.
    pub fn retain(&mut self, predicate: impl FnMut(&BindingRow) -> bool) {
        self.rows.retain(predicate);
    }

    /// Removes a column from the schema and every row.
    pub fn remove_column(&mut self, variable: &Variable) {
        self.variables.retain(|v| v != variable);
        for row in &mut self.rows {
            row.remove(variable);
        }
    }

    /// Returns the distinct terms bound to `variable`, in order of appearance.
    pub fn distinct_terms(&self, variable: &Variable) -> Vec<&RdfTerm> {
        let mut result: Vec<&RdfTerm> = Vec::new();
        for term in self.rows.iter().filter_map(|row| row.term(variable)) {
            if !result.contains(&term) {
                result.push(term);
            }
        }
        result
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BindingRow> {
        self.rows.iter()
    }
}

impl<'table> IntoIterator for &'table BindingTable {
    type Item = &'table BindingRow;
    type IntoIter = std::slice::Iter<'table, BindingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for BindingTable {
    type Item = BindingRow;
    type IntoIter = std::vec::IntoIter<BindingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Renders the table with one line per row. Cells without a value are left empty.
impl fmt::Display for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for variable in &self.variables {
            write!(f, " {variable} |")?;
        }
        for row in &self.rows {
            f.write_str("\n|")?;
            for variable in &self.variables {
                match row.term(variable) {
                    Some(term) => write!(f, " {term} |")?,
                    None => f.write_str("  |")?,
                }
            }
        }
        Ok(())
    }
}
