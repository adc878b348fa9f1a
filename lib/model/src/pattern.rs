use crate::{ConstructionError, Prefix, RdfTerm};
use oxrdf::Variable;
use std::fmt;

/// Variables starting with this prefix are reserved for the synthetic variables of compiled
/// property paths.
pub const RESERVED_VARIABLE_PREFIX: &str = "__PP";

/// Checks whether `variable` uses the prefix reserved for synthetic path variables.
pub fn is_reserved_variable(variable: &Variable) -> bool {
    variable.as_str().starts_with(RESERVED_VARIABLE_PREFIX)
}

/// A position of a [Pattern]: either a concrete term or a variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TermPattern {
    Term(RdfTerm),
    Variable(Variable),
}

impl TermPattern {
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            TermPattern::Variable(variable) => Some(variable),
            TermPattern::Term(_) => None,
        }
    }

    pub fn as_term(&self) -> Option<&RdfTerm> {
        match self {
            TermPattern::Term(term) => Some(term),
            TermPattern::Variable(_) => None,
        }
    }

    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        match self {
            TermPattern::Term(term) => term.to_sparql(prefixes),
            TermPattern::Variable(variable) => variable.to_string(),
        }
    }
}

impl fmt::Display for TermPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermPattern::Term(term) => term.fmt(f),
            TermPattern::Variable(variable) => variable.fmt(f),
        }
    }
}

impl From<RdfTerm> for TermPattern {
    fn from(term: RdfTerm) -> Self {
        TermPattern::Term(term)
    }
}

impl From<Variable> for TermPattern {
    fn from(variable: Variable) -> Self {
        TermPattern::Variable(variable)
    }
}

impl From<oxrdf::NamedNode> for TermPattern {
    fn from(node: oxrdf::NamedNode) -> Self {
        TermPattern::Term(node.into())
    }
}

/// A triple or quad template.
///
/// The flags decide how the matches of the pattern combine with the preceding members of its
/// group: `optional` requests a left outer join, `join_as_union` unions the pattern with the next
/// member, and `join_as_minus` subtracts the next member from the running result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    context: Option<TermPattern>,
    subject: TermPattern,
    predicate: TermPattern,
    object: TermPattern,
    optional: bool,
    join_as_union: bool,
    join_as_minus: bool,
}

impl Pattern {
    /// Creates a triple pattern that matches the default graph.
    pub fn new(
        subject: impl Into<TermPattern>,
        predicate: impl Into<TermPattern>,
        object: impl Into<TermPattern>,
    ) -> Result<Self, ConstructionError> {
        let subject = subject.into();
        let predicate = predicate.into();
        let object = object.into();

        if matches!(&subject, TermPattern::Term(term) if term.is_literal()) {
            return Err(invalid_member(&subject, "subject"));
        }
        if matches!(&predicate, TermPattern::Term(term) if !term.is_resource()) {
            return Err(invalid_member(&predicate, "predicate"));
        }

        Ok(Self {
            context: None,
            subject,
            predicate,
            object,
            optional: false,
            join_as_union: false,
            join_as_minus: false,
        })
    }

    /// Creates a quad pattern that matches the named graph `context`.
    pub fn new_quad(
        context: impl Into<TermPattern>,
        subject: impl Into<TermPattern>,
        predicate: impl Into<TermPattern>,
        object: impl Into<TermPattern>,
    ) -> Result<Self, ConstructionError> {
        let context = context.into();
        if matches!(&context, TermPattern::Term(term) if !term.is_resource()) {
            return Err(invalid_member(&context, "context"));
        }
        let mut pattern = Self::new(subject, predicate, object)?;
        pattern.context = Some(context);
        Ok(pattern)
    }

    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Marks the pattern to be unioned with the next member. Clears `join_as_minus`.
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

    pub fn context(&self) -> Option<&TermPattern> {
        self.context.as_ref()
    }

    pub fn subject(&self) -> &TermPattern {
        &self.subject
    }

    pub fn predicate(&self) -> &TermPattern {
        &self.predicate
    }

    pub fn object(&self) -> &TermPattern {
        &self.object
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

    fn positions(&self) -> impl Iterator<Item = &TermPattern> {
        self.context
            .iter()
            .chain([&self.subject, &self.predicate, &self.object])
    }

    /// The distinct variables of the pattern, in position order.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut result = Vec::new();
        for variable in self.positions().filter_map(TermPattern::as_variable) {
            if !result.contains(&variable) {
                result.push(variable);
            }
        }
        result
    }

    /// A pattern without variables.
    pub fn is_ground(&self) -> bool {
        self.positions().all(|position| position.as_term().is_some())
    }

    /// Renders the pattern as a SPARQL triple block, wrapped in `GRAPH` if it has a context.
    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        let triple = format!(
            "{} {} {} .",
            self.subject.to_sparql(prefixes),
            self.predicate.to_sparql(prefixes),
            self.object.to_sparql(prefixes)
        );
        match &self.context {
            Some(context) => format!("GRAPH {} {{ {triple} }}", context.to_sparql(prefixes)),
            None => triple,
        }
    }
}

fn invalid_member(term: &TermPattern, position: &'static str) -> ConstructionError {
    ConstructionError::InvalidPatternMember {
        term: term.to_string(),
        position,
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{BlankNode, NamedNode};

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{local}"))
    }

    #[test]
    fn rejects_invalid_positions() {
        let literal = RdfTerm::simple_literal("x");
        assert!(Pattern::new(literal.clone(), ex("p"), ex("o")).is_err());
        assert!(Pattern::new(ex("s"), literal, ex("o")).is_err());
        assert!(Pattern::new(ex("s"), RdfTerm::from(BlankNode::default()), ex("o")).is_err());
        assert!(Pattern::new_quad(
            RdfTerm::simple_literal("g"),
            ex("s"),
            ex("p"),
            ex("o")
        )
        .is_err());
    }

    #[test]
    fn variables_and_groundness() {
        let s = Variable::new_unchecked("s");
        let pattern = Pattern::new(s.clone(), ex("p"), s.clone()).unwrap();
        assert_eq!(pattern.variables(), vec![&s]);
        assert!(!pattern.is_ground());
        assert!(Pattern::new(ex("s"), ex("p"), ex("o")).unwrap().is_ground());
    }

    #[test]
    fn union_and_minus_are_exclusive() {
        let pattern = Pattern::new(ex("s"), ex("p"), ex("o"))
            .unwrap()
            .with_join_as_union(true)
            .with_join_as_minus(true);
        assert!(pattern.is_join_as_minus());
        assert!(!pattern.is_join_as_union());
    }

    #[test]
    fn render_with_prefixes() {
        let prefixes = [Prefix::new("ex", ex(""))];
        let pattern = Pattern::new_quad(
            Variable::new_unchecked("g"),
            Variable::new_unchecked("s"),
            ex("p"),
            RdfTerm::simple_literal("o"),
        )
        .unwrap();
        insta::assert_snapshot!(pattern.to_sparql(&prefixes), @r#"GRAPH ?g { ?s ex:p "o" . }"#);
    }

    #[test]
    fn reserved_prefix() {
        assert!(is_reserved_variable(&Variable::new_unchecked("__PP1_0")));
        assert!(!is_reserved_variable(&Variable::new_unchecked("PP")));
    }
}
