use crate::{PathStep, PathStepGroup, PropertyPath};
use rdf_algebra_model::{
    ConstructionError, Pattern, TermPattern, Variable, RESERVED_VARIABLE_PREFIX,
};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

impl PropertyPath {
    /// Compiles the path into elementary patterns.
    ///
    /// Consecutive depths are connected through synthetic variables. Their names are derived
    /// from a fingerprint of the path and the number of patterns emitted so far, so compiling the
    /// same path always yields the same patterns. An alternative set of `k` steps emits `k`
    /// patterns between the same endpoints; the first `k - 1` are marked with `join_as_union`.
    pub fn compile(&self) -> Result<Vec<Pattern>, ConstructionError> {
        if self.groups.is_empty() {
            return Err(ConstructionError::EmptyPropertyPath);
        }

        let fingerprint = self.fingerprint();
        let mut patterns = Vec::new();
        let mut left = self.start.clone();
        for (index, group) in self.groups.iter().enumerate() {
            let right = if index + 1 == self.groups.len() {
                self.end.clone()
            } else {
                TermPattern::Variable(synthetic_variable(fingerprint, patterns.len()))
            };

            match group {
                PathStepGroup::Sequence(step) => {
                    patterns.push(step_pattern(step, &left, &right)?);
                }
                PathStepGroup::Alternative(steps) => {
                    let last = steps.len() - 1;
                    for (position, step) in steps.iter().enumerate() {
                        let pattern =
                            step_pattern(step, &left, &right)?.with_join_as_union(position < last);
                        patterns.push(pattern);
                    }
                }
            }
            left = right;
        }
        Ok(patterns)
    }

    /// The synthetic variables introduced by [PropertyPath::compile].
    pub fn synthetic_variables(&self) -> Result<Vec<Variable>, ConstructionError> {
        let mut result = Vec::new();
        for pattern in self.compile()? {
            for variable in pattern.variables() {
                if is_synthetic(variable) && !result.contains(variable) {
                    result.push(variable.clone());
                }
            }
        }
        Ok(result)
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.start.hash(&mut hasher);
        self.end.hash(&mut hasher);
        self.groups.hash(&mut hasher);
        hasher.finish()
    }
}

fn synthetic_variable(fingerprint: u64, emitted: usize) -> Variable {
    Variable::new_unchecked(format!(
        "{RESERVED_VARIABLE_PREFIX}{fingerprint:016x}_{emitted}"
    ))
}

fn is_synthetic(variable: &Variable) -> bool {
    variable.as_str().starts_with(RESERVED_VARIABLE_PREFIX)
}

fn step_pattern(
    step: &PathStep,
    left: &TermPattern,
    right: &TermPattern,
) -> Result<Pattern, ConstructionError> {
    let (subject, object) = if step.is_inverse() {
        (right, left)
    } else {
        (left, right)
    };
    Pattern::new(subject.clone(), step.predicate().clone(), object.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_algebra_model::NamedNode;

    fn p(local: &str) -> PathStep {
        PathStep::new(NamedNode::new_unchecked(format!("http://example.com/{local}"))).unwrap()
    }

    #[test]
    fn synthetic_names_use_emitted_count() {
        let path = PropertyPath::new(Variable::new_unchecked("s"), Variable::new_unchecked("o"))
            .unwrap()
            .add_alternative_steps([p("a"), p("b")])
            .unwrap()
            .add_step(p("c"));
        let patterns = path.compile().unwrap();
        let synthetic = path.synthetic_variables().unwrap();
        assert_eq!(synthetic.len(), 1);
        assert!(synthetic[0].as_str().ends_with("_0"));
        assert_eq!(patterns[2].subject(), &TermPattern::Variable(synthetic[0].clone()));
    }

    #[test]
    fn different_paths_use_different_names() {
        let base = PropertyPath::new(Variable::new_unchecked("s"), Variable::new_unchecked("o"))
            .unwrap();
        let first = base.clone().add_step(p("a")).add_step(p("b"));
        let second = base.add_step(p("a")).add_step(p("c"));
        assert_ne!(
            first.synthetic_variables().unwrap(),
            second.synthetic_variables().unwrap()
        );
    }
}
