use crate::combination::plan_blocks;
use crate::group::{prefix_declarations, render_block};
use crate::{Aggregator, PatternGroup};
use itertools::Itertools;
use rdf_algebra_model::{Prefix, Variable};
use std::fmt;

/// A `SELECT` query over a sequence of pattern groups.
///
/// The groups are combined according to their flags. Without an explicit projection, all
/// variables are selected (`*`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectQuery {
    groups: Vec<PatternGroup>,
    projection: Option<Vec<Variable>>,
    distinct: bool,
    limit: Option<usize>,
    offset: usize,
    aggregator: Option<Aggregator>,
    prefixes: Vec<Prefix>,
}

impl SelectQuery {
    pub fn new(groups: impl IntoIterator<Item = PatternGroup>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_projection(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.projection = Some(variables.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = Some(aggregator);
        self
    }

    #[must_use]
    pub fn with_prefixes(mut self, prefixes: impl IntoIterator<Item = Prefix>) -> Self {
        self.prefixes = prefixes.into_iter().collect();
        self
    }

    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    pub fn projection(&self) -> Option<&[Variable]> {
        self.projection.as_deref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn aggregator(&self) -> Option<&Aggregator> {
        self.aggregator.as_ref()
    }

    pub fn prefixes(&self) -> &[Prefix] {
        &self.prefixes
    }

    pub fn to_sparql(&self) -> String {
        let mut query = prefix_declarations(&self.prefixes);
        query.push_str("SELECT ");
        if self.distinct {
            query.push_str("DISTINCT ");
        }
        let projection = match (&self.aggregator, &self.projection) {
            (Some(aggregator), _) => aggregator
                .group_by()
                .map(ToString::to_string)
                .into_iter()
                .chain([aggregator.projection_to_sparql()])
                .join(" "),
            (None, Some(variables)) => variables.iter().join(" "),
            (None, None) => "*".to_owned(),
        };
        query.push_str(&projection);
        query.push_str(" WHERE ");
        query.push_str(&groups_to_sparql(&self.groups, &self.prefixes));
        if let Some(aggregator) = &self.aggregator {
            let modifiers = aggregator.modifiers_to_sparql(&self.prefixes);
            if !modifiers.is_empty() {
                query.push(' ');
                query.push_str(&modifiers);
            }
        }
        if let Some(limit) = self.limit {
            query.push_str(" LIMIT ");
            query.push_str(&limit.to_string());
        }
        if self.offset > 0 {
            query.push_str(" OFFSET ");
            query.push_str(&self.offset.to_string());
        }
        query
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql())
    }
}

/// An `ASK` query: checks whether the groups have at least one solution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AskQuery {
    groups: Vec<PatternGroup>,
    prefixes: Vec<Prefix>,
}

impl AskQuery {
    pub fn new(groups: impl IntoIterator<Item = PatternGroup>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
            prefixes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_prefixes(mut self, prefixes: impl IntoIterator<Item = Prefix>) -> Self {
        self.prefixes = prefixes.into_iter().collect();
        self
    }

    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    pub fn prefixes(&self) -> &[Prefix] {
        &self.prefixes
    }

    pub fn to_sparql(&self) -> String {
        format!(
            "{}ASK WHERE {}",
            prefix_declarations(&self.prefixes),
            groups_to_sparql(&self.groups, &self.prefixes)
        )
    }
}

impl fmt::Display for AskQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql())
    }
}

fn groups_to_sparql(groups: &[PatternGroup], prefixes: &[Prefix]) -> String {
    let blocks = plan_blocks(groups)
        .iter()
        .map(|block| render_block(block, |group| group.to_sparql(prefixes)))
        .join(" ");
    format!("{{ {blocks} }}")
}
