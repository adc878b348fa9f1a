mod compile;
mod step;

pub use step::{PathStep, PathStepGroup};

use rdf_algebra_model::{
    is_reserved_variable, ConstructionError, Prefix, TermPattern, Variable,
};
use std::fmt;

/// A property path between a start and an end term, built from sequence and alternative steps.
///
/// The path is built incrementally and compiled into elementary patterns by
/// [PropertyPath::compile]. Its depth is the number of step groups: a sequence step and an
/// alternative set each add one level, regardless of the size of the set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    start: TermPattern,
    end: TermPattern,
    groups: Vec<PathStepGroup>,
    optional: bool,
    join_as_union: bool,
    join_as_minus: bool,
}

impl PropertyPath {
    /// Creates a path without steps.
    pub fn new(
        start: impl Into<TermPattern>,
        end: impl Into<TermPattern>,
    ) -> Result<Self, ConstructionError> {
        let start = start.into();
        let end = end.into();
        for endpoint in [&start, &end] {
            if let TermPattern::Variable(variable) = endpoint {
                if is_reserved_variable(variable) {
                    return Err(ConstructionError::ReservedVariable(variable.to_string()));
                }
            }
        }
        Ok(Self {
            start,
            end,
            groups: Vec::new(),
            optional: false,
            join_as_union: false,
            join_as_minus: false,
        })
    }

    /// Appends a sequence step at a new depth.
    #[must_use]
    pub fn add_step(mut self, step: PathStep) -> Self {
        self.groups.push(PathStepGroup::Sequence(step));
        self
    }

    /// Appends a set of alternative steps at a new depth.
    ///
    /// A set with a single step is equivalent to [PropertyPath::add_step].
    pub fn add_alternative_steps(
        mut self,
        steps: impl IntoIterator<Item = PathStep>,
    ) -> Result<Self, ConstructionError> {
        let mut steps = steps.into_iter().collect::<Vec<_>>();
        let group = match steps.len() {
            0 => return Err(ConstructionError::EmptyAlternative),
            1 => PathStepGroup::Sequence(steps.remove(0)),
            _ => PathStepGroup::Alternative(steps),
        };
        self.groups.push(group);
        Ok(self)
    }

    /// Appends alternative steps to the last depth if it is an alternative set. Otherwise, the
    /// steps open a new depth like [PropertyPath::add_alternative_steps].
    pub fn append_alternatives(
        mut self,
        steps: impl IntoIterator<Item = PathStep>,
    ) -> Result<Self, ConstructionError> {
        let steps = steps.into_iter().collect::<Vec<_>>();
        if steps.is_empty() {
            return Err(ConstructionError::EmptyAlternative);
        }
        match self.groups.last_mut() {
            Some(PathStepGroup::Alternative(existing)) => {
                existing.extend(steps);
                Ok(self)
            }
            _ => self.add_alternative_steps(steps),
        }
    }

    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Marks the path to be unioned with the next member. Clears `join_as_minus`.
    #[must_use]
    pub fn with_join_as_union(mut self, join_as_union: bool) -> Self {
        self.join_as_union = join_as_union;
        if join_as_union {
            self.join_as_minus = false;
        }
        self
    }

    /// Marks the next member to be subtracted from the result. Clears `join_as_union`.
    #[must_use]
    pub fn with_join_as_minus(mut self, join_as_minus: bool) -> Self {
        self.join_as_minus = join_as_minus;
        if join_as_minus {
            self.join_as_union = false;
        }
        self
    }

    pub fn start(&self) -> &TermPattern {
        &self.start
    }

    pub fn end(&self) -> &TermPattern {
        &self.end
    }

    pub fn groups(&self) -> &[PathStepGroup] {
        &self.groups
    }

    /// The number of step groups.
    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_join_as_union(&self) -> bool {
        self.join_as_union
    }

    pub fn is_join_as_minus(&self) -> bool {
        self.join_as_minus
    }

    /// The user-visible variables of the path: the endpoints and the predicates.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut result = Vec::new();
        let predicates = self
            .groups
            .iter()
            .flat_map(PathStepGroup::steps)
            .map(PathStep::predicate);
        for variable in [&self.start, &self.end]
            .into_iter()
            .chain(predicates)
            .filter_map(TermPattern::as_variable)
        {
            if !result.contains(&variable) {
                result.push(variable);
            }
        }
        result
    }

    /// Renders the path as a SPARQL triple with a path expression.
    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        let path = self
            .groups
            .iter()
            .map(|group| group.to_sparql(prefixes))
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{} {path} {} .",
            self.start.to_sparql(prefixes),
            self.end.to_sparql(prefixes)
        )
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql(&[]))
    }
}
