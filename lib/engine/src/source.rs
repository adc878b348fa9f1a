use crate::error::QueryEvaluationError;
use async_trait::async_trait;
use rdf_algebra_model::{
    BindingRow, BindingTable, BlankNode, NamedNode, Pattern, RdfTerm, TermPattern,
};
use rustc_hash::FxHashSet;
use std::fmt::Debug;

/// A source of solutions for single patterns.
///
/// Implementations must return a table that has a column for every variable of the pattern, even
/// if no quad matches.
#[async_trait]
pub trait DataSource: Debug + Send + Sync {
    /// Returns the solutions of `pattern`.
    async fn match_pattern(&self, pattern: &Pattern) -> Result<BindingTable, QueryEvaluationError>;
}

/// The subject of a [Quad].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QuadSubject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl From<NamedNode> for QuadSubject {
    fn from(node: NamedNode) -> Self {
        QuadSubject::NamedNode(node)
    }
}

impl From<BlankNode> for QuadSubject {
    fn from(node: BlankNode) -> Self {
        QuadSubject::BlankNode(node)
    }
}

impl From<QuadSubject> for RdfTerm {
    fn from(subject: QuadSubject) -> Self {
        match subject {
            QuadSubject::NamedNode(node) => node.into(),
            QuadSubject::BlankNode(node) => node.into(),
        }
    }
}

/// A quad of a [MemoryGraph]. Quads without a graph name belong to the default graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quad {
    pub subject: QuadSubject,
    pub predicate: NamedNode,
    pub object: RdfTerm,
    pub graph_name: Option<NamedNode>,
}

impl Quad {
    /// Creates a quad in the default graph.
    pub fn new(
        subject: impl Into<QuadSubject>,
        predicate: NamedNode,
        object: impl Into<RdfTerm>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
            graph_name: None,
        }
    }

    #[must_use]
    pub fn in_graph(mut self, graph_name: NamedNode) -> Self {
        self.graph_name = Some(graph_name);
        self
    }
}

/// An in-memory set of quads.
///
/// Patterns without a context match the default graph. Patterns with a context match the named
/// graphs.
#[derive(Clone, Debug, Default)]
pub struct MemoryGraph {
    quads: Vec<Quad>,
    index: FxHashSet<Quad>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a quad. Returns false if the quad was already present.
    pub fn insert(&mut self, quad: Quad) -> bool {
        if !self.index.insert(quad.clone()) {
            return false;
        }
        self.quads.push(quad);
        true
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quad> {
        self.quads.iter()
    }

    fn match_sync(&self, pattern: &Pattern) -> BindingTable {
        let variables = pattern.variables().into_iter().cloned();
        let rows = self.quads.iter().filter_map(|quad| match_quad(pattern, quad));
        BindingTable::from_rows(variables, rows)
    }
}

impl Extend<Quad> for MemoryGraph {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        for quad in iter {
            self.insert(quad);
        }
    }
}

impl FromIterator<Quad> for MemoryGraph {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<'graph> IntoIterator for &'graph MemoryGraph {
    type Item = &'graph Quad;
    type IntoIter = std::slice::Iter<'graph, Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.iter()
    }
}

#[async_trait]
impl DataSource for MemoryGraph {
    async fn match_pattern(&self, pattern: &Pattern) -> Result<BindingTable, QueryEvaluationError> {
        Ok(self.match_sync(pattern))
    }
}

/// Matches a single quad. A variable that occurs more than once must be bound to equal terms.
fn match_quad(pattern: &Pattern, quad: &Quad) -> Option<BindingRow> {
    let mut row = BindingRow::new();
    match (pattern.context(), &quad.graph_name) {
        (None, None) => {}
        (Some(context), Some(graph_name)) => {
            bind_position(&mut row, context, &RdfTerm::from(graph_name.clone()))?;
        }
        _ => return None,
    }
    bind_position(
        &mut row,
        pattern.subject(),
        &RdfTerm::from(quad.subject.clone()),
    )?;
    bind_position(
        &mut row,
        pattern.predicate(),
        &RdfTerm::from(quad.predicate.clone()),
    )?;
    bind_position(&mut row, pattern.object(), &quad.object)?;
    Some(row)
}

fn bind_position(row: &mut BindingRow, position: &TermPattern, term: &RdfTerm) -> Option<()> {
    match position {
        TermPattern::Term(expected) => (expected == term).then_some(()),
        TermPattern::Variable(variable) => match row.term(variable) {
            Some(bound) => (bound == term).then_some(()),
            None => {
                row.bind(variable.clone(), term.clone());
                Some(())
            }
        },
    }
}
