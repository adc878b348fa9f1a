//! Evaluation of SPARQL expressions and filters against single rows of a binding table.

mod builtin;
mod comparison;
mod context;
mod expression;
mod filter;

pub use builtin::{compile_pattern, is_valid_language_range, lang_matches};
pub use comparison::{compare, compare_cells, compare_terms, ComparisonFlavor, TermOrdering};
pub use context::SubPatternResults;
pub use expression::Expression;
pub use filter::{Filter, InList, LanguageRange, RegexFilter, SubPattern};
