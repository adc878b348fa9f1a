mod error;
mod pattern;
mod rdf;
mod table;
mod typed_value;
mod values;
pub mod vocab;
mod xsd;

pub use error::*;
pub use pattern::*;
pub use rdf::*;
pub use table::*;
pub use typed_value::*;
pub use values::*;
pub use xsd::*;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    BlankNode, BlankNodeIdParseError, BlankNodeRef, IriParseError, Literal, LiteralRef, NamedNode,
    NamedNodeRef, Variable, VariableNameParseError, VariableRef,
};
