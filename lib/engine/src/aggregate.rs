use rdf_algebra_functions::{compare_terms, Filter, SubPatternResults, TermOrdering};
use rdf_algebra_logical::{AggregateFunction, Aggregator};
use rdf_algebra_model::{vocab::xsd, BindingRow, BindingTable, RdfTerm, TermPattern};
use std::cmp::Ordering;

/// Partitions `table` and aggregates each partition into one row.
///
/// Without a partition variable, the whole table is a single partition, even if it is empty.
/// Partitions whose aggregate does not satisfy the `HAVING` condition are dropped.
pub fn aggregate(table: &BindingTable, aggregator: &Aggregator) -> BindingTable {
    let having = aggregator.having().map(|having| {
        Filter::comparison(
            having.flavor,
            aggregator.result().clone(),
            TermPattern::Term(having.threshold.clone()),
        )
    });
    let context = SubPatternResults::new();

    let mut result = BindingTable::new(aggregator.output_variables());
    for (key, rows) in partition(table, aggregator) {
        let mut row = BindingRow::new();
        if let Some(group_by) = aggregator.group_by() {
            row.set(group_by.clone(), key);
        }
        row.set(aggregator.result().clone(), aggregate_rows(&rows, aggregator));

        if having
            .as_ref()
            .map_or(true, |having| having.apply(&row, &context, false))
        {
            result.push_row(row);
        }
    }
    result
}

/// Groups the rows by the term of the partition variable, in order of first appearance.
fn partition<'table>(
    table: &'table BindingTable,
    aggregator: &Aggregator,
) -> Vec<(Option<RdfTerm>, Vec<&'table BindingRow>)> {
    let Some(group_by) = aggregator.group_by() else {
        return vec![(None, table.iter().collect())];
    };

    let mut partitions: Vec<(Option<RdfTerm>, Vec<&BindingRow>)> = Vec::new();
    for row in table {
        let key = row.term(group_by);
        match partitions
            .iter_mut()
            .find(|(existing, _)| existing.as_ref() == key)
        {
            Some((_, rows)) => rows.push(row),
            None => partitions.push((key.cloned(), vec![row])),
        }
    }
    partitions
}

fn aggregate_rows(rows: &[&BindingRow], aggregator: &Aggregator) -> Option<RdfTerm> {
    let Some(variable) = aggregator.variable() else {
        let count = if aggregator.is_distinct() {
            distinct(rows.iter().copied()).len()
        } else {
            rows.len()
        };
        return Some(count_term(count));
    };

    let mut values = rows
        .iter()
        .filter_map(|row| row.term(variable))
        .collect::<Vec<_>>();
    if aggregator.is_distinct() {
        values = distinct(values);
    }

    match aggregator.function() {
        AggregateFunction::Count => Some(count_term(values.len())),
        AggregateFunction::Min => extremum(values, Ordering::Less),
        AggregateFunction::Max => extremum(values, Ordering::Greater),
        AggregateFunction::Sample => values.first().map(|term| (*term).clone()),
    }
}

/// Picks the value that is ordered `preferred` relative to all others. Values that cannot be
/// ordered against the current candidate are skipped.
fn extremum(values: Vec<&RdfTerm>, preferred: Ordering) -> Option<RdfTerm> {
    let mut values = values.into_iter();
    let mut best = values.next()?;
    for value in values {
        if matches!(compare_terms(value, best), Ok(TermOrdering::Ordered(ordering)) if ordering == preferred)
        {
            best = value;
        }
    }
    Some(best.clone())
}

fn distinct<T: PartialEq>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut result = Vec::new();
    for value in values {
        if !result.contains(&value) {
            result.push(value);
        }
    }
    result
}

fn count_term(count: usize) -> RdfTerm {
    RdfTerm::typed_literal(count.to_string(), xsd::INTEGER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_algebra_functions::ComparisonFlavor;
    use rdf_algebra_model::Variable;

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    fn int(value: i64) -> RdfTerm {
        RdfTerm::typed_literal(value.to_string(), xsd::INTEGER)
    }

    fn people() -> BindingTable {
        let rows = [("a", 30), ("a", 40), ("b", 25), ("a", 30)].map(|(name, age)| {
            [
                (var("name"), RdfTerm::simple_literal(name)),
                (var("age"), int(age)),
            ]
            .into_iter()
            .collect::<BindingRow>()
        });
        BindingTable::from_rows([var("name"), var("age")], rows)
    }

    #[test]
    fn count_per_partition() {
        let aggregator = Aggregator::new(AggregateFunction::Count, Some(var("age")), var("count"))
            .with_group_by(var("name"));

        insta::assert_snapshot!(aggregate(&people(), &aggregator), @r#"
        | ?name | ?count |
        | "a" | "3"^^<http://www.w3.org/2001/XMLSchema#integer> |
        | "b" | "1"^^<http://www.w3.org/2001/XMLSchema#integer> |
        "#);
    }

    #[test]
    fn count_distinct_without_partition() {
        let aggregator = Aggregator::new(AggregateFunction::Count, Some(var("age")), var("count"))
            .with_distinct(true);
        let result = aggregate(&people(), &aggregator);
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0].term(&var("count")), Some(&int(3)));
    }

    #[test]
    fn count_rows_of_empty_table() {
        let aggregator = Aggregator::new(AggregateFunction::Count, None, var("count"));
        let result = aggregate(&BindingTable::new([var("x")]), &aggregator);
        assert_eq!(result.rows()[0].term(&var("count")), Some(&int(0)));
    }

    #[test]
    fn min_and_max() {
        let min = Aggregator::new(AggregateFunction::Min, Some(var("age")), var("min"));
        let max = Aggregator::new(AggregateFunction::Max, Some(var("age")), var("max"));
        assert_eq!(
            aggregate(&people(), &min).rows()[0].term(&var("min")),
            Some(&int(25))
        );
        assert_eq!(
            aggregate(&people(), &max).rows()[0].term(&var("max")),
            Some(&int(40))
        );
    }

    #[test]
    fn having_drops_partitions() {
        let aggregator = Aggregator::new(AggregateFunction::Count, None, var("count"))
            .with_group_by(var("name"))
            .with_having(ComparisonFlavor::GreaterThan, int(1));
        let result = aggregate(&people(), &aggregator);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.rows()[0].term(&var("name")),
            Some(&RdfTerm::simple_literal("a"))
        );
    }
}
