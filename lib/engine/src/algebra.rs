//! Relational operators on [BindingTable]s.
//!
//! Rows are combined with SPARQL compatibility: a column without a value is compatible with any
//! value.

use rdf_algebra_logical::{Bind, CombinationKind};
use rdf_algebra_model::{BindingRow, BindingTable, Variable};
use rustc_hash::FxHashSet;

/// Combines the running result with the result of a block.
pub fn combine(left: BindingTable, right: &BindingTable, kind: CombinationKind) -> BindingTable {
    match kind {
        CombinationKind::Join => join(&left, right),
        CombinationKind::LeftJoin => left_join(&left, right),
        CombinationKind::Minus => minus(left, right),
    }
}

/// The natural join on the shared variables.
pub fn join(left: &BindingTable, right: &BindingTable) -> BindingTable {
    let rows = left.iter().flat_map(|lhs| {
        right
            .iter()
            .filter(|rhs| lhs.is_compatible(rhs))
            .map(|rhs| lhs.merge(rhs))
    });
    BindingTable::from_rows(schema(left, right), rows)
}

/// The left outer join. Rows of `left` without a compatible partner are kept and the columns of
/// `right` are left without a value.
pub fn left_join(left: &BindingTable, right: &BindingTable) -> BindingTable {
    let mut result = BindingTable::new(schema(left, right));
    for lhs in left {
        let mut matched = false;
        for rhs in right.iter().filter(|rhs| lhs.is_compatible(rhs)) {
            matched = true;
            result.push_row(lhs.merge(rhs));
        }
        if !matched {
            result.push_row(lhs.clone());
        }
    }
    result
}

/// Concatenates tables. Columns missing from some table are left without a value.
pub fn union(tables: impl IntoIterator<Item = BindingTable>) -> BindingTable {
    let mut result = BindingTable::default();
    for table in tables {
        for variable in table.variables() {
            result.add_column(variable.clone());
        }
        for row in table {
            result.push_row(row);
        }
    }
    result
}

/// Removes the rows of `left` that have a partner in `right`.
///
/// A partner agrees on every column shared by both tables, and all of these columns must be
/// bound in both rows. Tables without shared columns remove nothing.
pub fn minus(mut left: BindingTable, right: &BindingTable) -> BindingTable {
    let shared = left
        .variables()
        .iter()
        .filter(|variable| right.contains_variable(variable))
        .cloned()
        .collect::<Vec<_>>();
    if shared.is_empty() {
        return left;
    }
    left.retain(|lhs| !right.iter().any(|rhs| is_minus_partner(lhs, rhs, &shared)));
    left
}

fn is_minus_partner(lhs: &BindingRow, rhs: &BindingRow, shared: &[Variable]) -> bool {
    shared
        .iter()
        .all(|variable| match (lhs.term(variable), rhs.term(variable)) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        })
}

/// Adds the column of a `BIND`. Rows whose expression fails get no value.
pub fn extend(table: BindingTable, bind: &Bind) -> BindingTable {
    let mut result = BindingTable::new(table.variables().iter().cloned());
    result.add_column(bind.variable.clone());
    for mut row in table {
        let value = bind.expression.evaluate(&row).ok();
        row.set(bind.variable.clone(), value);
        result.push_row(row);
    }
    result
}

/// Keeps the given columns. Unknown variables become columns without values.
pub fn project(table: BindingTable, variables: &[Variable]) -> BindingTable {
    let rows = table.into_iter().map(|row| {
        variables
            .iter()
            .map(|variable| (variable.clone(), row.term(variable).cloned()))
            .collect::<BindingRow>()
    });
    BindingTable::from_rows(variables.iter().cloned(), rows)
}

/// Removes duplicate rows, keeping the first occurrence.
pub fn distinct(mut table: BindingTable) -> BindingTable {
    let mut seen = FxHashSet::default();
    table.retain(|row| seen.insert(row.clone()));
    table
}

/// Skips `offset` rows and keeps at most `limit` rows.
pub fn slice(table: BindingTable, offset: usize, limit: Option<usize>) -> BindingTable {
    let variables = table.variables().to_vec();
    let rows = table
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX));
    BindingTable::from_rows(variables, rows)
}

fn schema(left: &BindingTable, right: &BindingTable) -> Vec<Variable> {
    let mut variables = left.variables().to_vec();
    for variable in right.variables() {
        if !variables.contains(variable) {
            variables.push(variable.clone());
        }
    }
    variables
}
