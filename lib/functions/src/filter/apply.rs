use crate::comparison::compare_cells;
use crate::{lang_matches, Filter, SubPatternResults};
use rdf_algebra_model::{
    BindingRow, BindingTable, Cell, RdfTerm, TermPattern, TypedValueRef, Values, Variable,
};

impl Filter {
    /// Decides whether `row` is kept. `negate` inverts the final decision.
    ///
    /// Evaluation never fails: errors of the underlying comparisons and expressions exclude the
    /// row.
    pub fn apply(&self, row: &BindingRow, context: &SubPatternResults, negate: bool) -> bool {
        self.evaluate(row, context) != negate
    }

    fn evaluate(&self, row: &BindingRow, context: &SubPatternResults) -> bool {
        match self {
            Filter::Bound(variable) => check_value(row, variable, |_| true),
            Filter::IsUri(variable) => check_value(row, variable, RdfTerm::is_resource),
            Filter::IsLiteral(variable) => check_value(row, variable, RdfTerm::is_literal),
            Filter::IsNumeric(variable) => check_value(row, variable, |term| {
                TypedValueRef::try_from(term).is_ok_and(|value| value.is_numeric())
            }),
            Filter::Datatype(variable, datatype) => check_value(row, variable, |term| {
                term.datatype() == Some(datatype.as_ref())
            }),
            Filter::LangMatches(variable, range) => match row.get(variable) {
                Cell::NoColumn | Cell::NoValue => true,
                Cell::Value(term) => term.is_literal()
                    && lang_matches(term.language().unwrap_or_default(), range.as_str()),
            },
            Filter::Regex(variable, regex) => match row.get(variable) {
                Cell::NoColumn | Cell::NoValue => true,
                Cell::Value(term) => regex.is_match(&term.to_string()),
            },
            Filter::SameTerm(lhs, rhs) => {
                match (operand_cell(row, lhs), operand_cell(row, rhs)) {
                    (Cell::NoColumn, _) | (_, Cell::NoColumn) => true,
                    (Cell::NoValue, Cell::NoValue) => true,
                    (Cell::Value(lhs), Cell::Value(rhs)) => lhs == rhs,
                    (Cell::NoValue, Cell::Value(_)) | (Cell::Value(_), Cell::NoValue) => false,
                }
            }
            Filter::In(variable, members) => match row.get(variable) {
                Cell::NoColumn => true,
                Cell::NoValue => false,
                Cell::Value(term) => members.contains(term),
            },
            Filter::Comparison(flavor, lhs, rhs) => {
                compare_cells(*flavor, operand_cell(row, lhs), operand_cell(row, rhs))
                    .unwrap_or(false)
            }
            Filter::And(lhs, rhs) => lhs.evaluate(row, context) && rhs.evaluate(row, context),
            Filter::Or(lhs, rhs) => lhs.evaluate(row, context) || rhs.evaluate(row, context),
            Filter::Not(inner) => !inner.evaluate(row, context),
            Filter::Exists(pattern) => context
                .get(pattern.pattern())
                .is_some_and(|results| has_match(row, results)),
            Filter::NotExists(pattern) => context
                .get(pattern.pattern())
                .map_or(true, |results| !has_match(row, results)),
            Filter::Expression(expression) => expression.evaluate_boolean(row).unwrap_or(false),
            Filter::Values(values) => matches_values(row, values),
        }
    }
}

/// Applies the common policy of the type-check filters: a missing column passes, a missing
/// value fails.
fn check_value(row: &BindingRow, variable: &Variable, check: impl FnOnce(&RdfTerm) -> bool) -> bool {
    match row.get(variable) {
        Cell::NoColumn => true,
        Cell::NoValue => false,
        Cell::Value(term) => check(term),
    }
}

fn operand_cell<'a>(row: &'a BindingRow, operand: &'a TermPattern) -> Cell<'a> {
    match operand {
        TermPattern::Term(term) => Cell::Value(term),
        TermPattern::Variable(variable) => row.get(variable),
    }
}

/// Checks whether some row of `results` agrees with `row` on all shared variables.
///
/// Missing values never match, neither in `row` nor in `results`.
fn has_match(row: &BindingRow, results: &BindingTable) -> bool {
    let shared = results
        .variables()
        .iter()
        .filter(|variable| row.contains_column(variable))
        .collect::<Vec<_>>();
    results.iter().any(|candidate| {
        shared.iter().all(|variable| {
            match (row.term(variable), candidate.term(variable)) {
                (Some(lhs), Some(rhs)) => lhs == rhs,
                _ => false,
            }
        })
    })
}

/// Checks whether some tuple of `values` matches `row` on every column.
///
/// A column of `values` matches if the row has no such column, if the tuple has `UNDEF` in that
/// column, or if the row's value equals the tuple's value. Rows without any of the columns are
/// kept even if `values` has no tuples.
fn matches_values(row: &BindingRow, values: &Values) -> bool {
    if !values.variables().any(|variable| row.contains_column(variable)) {
        return true;
    }
    (0..values.max_bindings_length()).any(|index| {
        values.variables().enumerate().all(|(column, variable)| {
            match (row.get(variable), values.binding(column, index)) {
                (Cell::NoColumn, _) | (_, None) => true,
                (Cell::NoValue, Some(_)) => false,
                (Cell::Value(lhs), Some(rhs)) => lhs == rhs,
            }
        })
    })
}
