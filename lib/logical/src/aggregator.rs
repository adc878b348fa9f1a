use rdf_algebra_functions::ComparisonFlavor;
use rdf_algebra_model::{Prefix, RdfTerm, Variable};
use std::fmt;

/// An aggregate function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Min,
    Max,
    Sample,
}

impl AggregateFunction {
    pub fn name(self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Sample => "SAMPLE",
        }
    }
}

/// A `HAVING` condition comparing the aggregate of each partition with a threshold.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Having {
    pub flavor: ComparisonFlavor,
    pub threshold: RdfTerm,
}

/// Partitions the solutions of a query and aggregates one variable per partition.
///
/// The result has one row per partition with the partition variable (if any) and the aggregate
/// bound to `result`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aggregator {
    function: AggregateFunction,
    /// `None` aggregates whole rows (`COUNT(*)`).
    variable: Option<Variable>,
    result: Variable,
    group_by: Option<Variable>,
    distinct: bool,
    having: Option<Having>,
}

impl Aggregator {
    pub fn new(function: AggregateFunction, variable: Option<Variable>, result: Variable) -> Self {
        Self {
            function,
            variable,
            result,
            group_by: None,
            distinct: false,
            having: None,
        }
    }

    #[must_use]
    pub fn with_group_by(mut self, variable: Variable) -> Self {
        self.group_by = Some(variable);
        self
    }

    #[must_use]
    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    #[must_use]
    pub fn with_having(mut self, flavor: ComparisonFlavor, threshold: RdfTerm) -> Self {
        self.having = Some(Having { flavor, threshold });
        self
    }

    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    pub fn variable(&self) -> Option<&Variable> {
        self.variable.as_ref()
    }

    pub fn result(&self) -> &Variable {
        &self.result
    }

    pub fn group_by(&self) -> Option<&Variable> {
        self.group_by.as_ref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn having(&self) -> Option<&Having> {
        self.having.as_ref()
    }

    /// The variables of the aggregated solutions.
    pub fn output_variables(&self) -> Vec<Variable> {
        self.group_by
            .iter()
            .cloned()
            .chain([self.result.clone()])
            .collect()
    }

    /// Renders the projection expression, e.g. `(COUNT(DISTINCT ?x) AS ?count)`.
    pub fn projection_to_sparql(&self) -> String {
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        let argument = self
            .variable
            .as_ref()
            .map_or_else(|| "*".to_owned(), ToString::to_string);
        format!(
            "({}({distinct}{argument}) AS {})",
            self.function.name(),
            self.result
        )
    }

    /// Renders the `GROUP BY` and `HAVING` clauses.
    pub fn modifiers_to_sparql(&self, prefixes: &[Prefix]) -> String {
        let mut clauses = Vec::new();
        if let Some(group_by) = &self.group_by {
            clauses.push(format!("GROUP BY {group_by}"));
        }
        if let Some(having) = &self.having {
            clauses.push(format!(
                "HAVING ({} {} {})",
                self.result,
                having.flavor,
                having.threshold.to_sparql(prefixes)
            ));
        }
        clauses.join(" ")
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.projection_to_sparql())?;
        let modifiers = self.modifiers_to_sparql(&[]);
        if !modifiers.is_empty() {
            write!(f, " {modifiers}")?;
        }
        Ok(())
    }
}
