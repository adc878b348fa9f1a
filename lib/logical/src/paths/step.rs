use rdf_algebra_model::{is_reserved_variable, ConstructionError, Prefix, TermPattern};
use std::fmt;

/// A single predicate of a property path, optionally traversed in inverse direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathStep {
    predicate: TermPattern,
    inverse: bool,
}

impl PathStep {
    /// Creates a forward step. The predicate must be an IRI or a variable.
    pub fn new(predicate: impl Into<TermPattern>) -> Result<Self, ConstructionError> {
        let predicate = predicate.into();
        match &predicate {
            TermPattern::Term(term) if !term.is_resource() => {
                return Err(ConstructionError::InvalidPatternMember {
                    term: term.to_string(),
                    position: "predicate",
                })
            }
            TermPattern::Variable(variable) if is_reserved_variable(variable) => {
                return Err(ConstructionError::ReservedVariable(variable.to_string()))
            }
            _ => {}
        }
        Ok(Self {
            predicate,
            inverse: false,
        })
    }

    /// Creates a step that is traversed from object to subject (`^p`).
    pub fn new_inverse(predicate: impl Into<TermPattern>) -> Result<Self, ConstructionError> {
        Ok(Self {
            inverse: true,
            ..Self::new(predicate)?
        })
    }

    pub fn predicate(&self) -> &TermPattern {
        &self.predicate
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        let predicate = self.predicate.to_sparql(prefixes);
        if self.inverse {
            format!("^{predicate}")
        } else {
            predicate
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql(&[]))
    }
}

/// The steps at one depth of a property path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathStepGroup {
    Sequence(PathStep),
    /// Two or more alternative steps (`p1|p2`).
    Alternative(Vec<PathStep>),
}

impl PathStepGroup {
    pub fn steps(&self) -> &[PathStep] {
        match self {
            PathStepGroup::Sequence(step) => std::slice::from_ref(step),
            PathStepGroup::Alternative(steps) => steps,
        }
    }

    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        match self {
            PathStepGroup::Sequence(step) => step.to_sparql(prefixes),
            PathStepGroup::Alternative(steps) => {
                let steps = steps
                    .iter()
                    .map(|step| step.to_sparql(prefixes))
                    .collect::<Vec<_>>();
                format!("({})", steps.join("|"))
            }
        }
    }
}
