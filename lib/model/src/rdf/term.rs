use crate::rdf::literal::{PlainLiteral, TypedLiteral};
use crate::rdf::prefix::{render_iri, Prefix};
use crate::vocab::xsd;
use oxrdf::{BlankNode, Literal, NamedNode, NamedNodeRef};
use std::fmt;

/// An RDF term as it is stored in a binding table cell.
///
/// Variables are not terms; they only occur in patterns (see [TermPattern](crate::TermPattern)).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RdfTerm {
    /// An IRI.
    Resource(NamedNode),
    /// A blank node.
    BlankNode(BlankNode),
    /// A simple or language-tagged literal.
    PlainLiteral(PlainLiteral),
    /// A literal with an explicit datatype.
    TypedLiteral(TypedLiteral),
}

impl RdfTerm {
    /// Creates a typed literal.
    ///
    /// `xsd:string` literals are normalized to plain literals, as RDF 1.1 does not distinguish
    /// them from simple literals.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        let datatype = datatype.into();
        if datatype.as_ref() == xsd::STRING {
            RdfTerm::PlainLiteral(PlainLiteral::new(value))
        } else {
            RdfTerm::TypedLiteral(TypedLiteral::new(value, datatype))
        }
    }

    /// Creates a simple literal.
    pub fn simple_literal(value: impl Into<String>) -> Self {
        RdfTerm::PlainLiteral(PlainLiteral::new(value))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, RdfTerm::Resource(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfTerm::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, RdfTerm::PlainLiteral(_) | RdfTerm::TypedLiteral(_))
    }

    /// Returns the string value of the term: the IRI, the blank node identifier, or the lexical
    /// form of a literal.
    pub fn lexical_form(&self) -> &str {
        match self {
            RdfTerm::Resource(node) => node.as_str(),
            RdfTerm::BlankNode(node) => node.as_str(),
            RdfTerm::PlainLiteral(literal) => literal.value(),
            RdfTerm::TypedLiteral(literal) => literal.value(),
        }
    }

    /// Returns the (possibly implicit) datatype of a literal.
    pub fn datatype(&self) -> Option<NamedNodeRef<'_>> {
        match self {
            RdfTerm::PlainLiteral(literal) => Some(literal.datatype()),
            RdfTerm::TypedLiteral(literal) => Some(literal.datatype()),
            RdfTerm::Resource(_) | RdfTerm::BlankNode(_) => None,
        }
    }

    /// Returns the language tag of a plain literal.
    pub fn language(&self) -> Option<&str> {
        match self {
            RdfTerm::PlainLiteral(literal) => literal.language(),
            _ => None,
        }
    }

    /// Renders the term in SPARQL syntax, abbreviating IRIs with the given prefixes.
    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        match self {
            RdfTerm::Resource(node) => render_iri(node.as_str(), prefixes),
            RdfTerm::BlankNode(node) => node.to_string(),
            RdfTerm::PlainLiteral(literal) => literal.to_string(),
            RdfTerm::TypedLiteral(literal) => format!(
                "{}^^{}",
                PlainLiteral::new(literal.value()),
                render_iri(literal.datatype().as_str(), prefixes)
            ),
        }
    }
}

impl fmt::Display for RdfTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfTerm::Resource(node) => node.fmt(f),
            RdfTerm::BlankNode(node) => node.fmt(f),
            RdfTerm::PlainLiteral(literal) => literal.fmt(f),
            RdfTerm::TypedLiteral(literal) => literal.fmt(f),
        }
    }
}

impl From<NamedNode> for RdfTerm {
    fn from(node: NamedNode) -> Self {
        RdfTerm::Resource(node)
    }
}

impl From<NamedNodeRef<'_>> for RdfTerm {
    fn from(node: NamedNodeRef<'_>) -> Self {
        RdfTerm::Resource(node.into_owned())
    }
}

impl From<BlankNode> for RdfTerm {
    fn from(node: BlankNode) -> Self {
        RdfTerm::BlankNode(node)
    }
}

impl From<PlainLiteral> for RdfTerm {
    fn from(literal: PlainLiteral) -> Self {
        RdfTerm::PlainLiteral(literal)
    }
}

impl From<TypedLiteral> for RdfTerm {
    fn from(literal: TypedLiteral) -> Self {
        RdfTerm::typed_literal(literal.value(), literal.datatype().into_owned())
    }
}

impl From<Literal> for RdfTerm {
    fn from(literal: Literal) -> Self {
        match literal.language() {
            Some(language) => PlainLiteral::new_language_tagged(literal.value(), language)
                .map_or_else(
                    |_| RdfTerm::simple_literal(literal.value()),
                    RdfTerm::PlainLiteral,
                ),
            None => RdfTerm::typed_literal(literal.value(), literal.datatype().into_owned()),
        }
    }
}
