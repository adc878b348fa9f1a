mod literal;
mod parser;
mod prefix;
mod term;

pub use literal::{is_valid_language_tag, BaseDirection, PlainLiteral, TypedLiteral};
pub use prefix::{render_iri, Prefix};
pub use term::RdfTerm;
