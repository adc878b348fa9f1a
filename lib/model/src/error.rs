use oxiri::IriParseError;
use oxrdf::BlankNodeIdParseError;
use oxsdatatypes::{
    ParseDateTimeError, ParseDecimalError, ParseDurationError, TooLargeForDecimalError,
};
use std::fmt::{Display, Formatter};
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// A light-weight result, mainly used for SPARQL operations.
pub type ThinResult<T> = Result<T, ThinError>;

/// A thin error type that indicates an *expected* failure without any reason.
///
/// In SPARQL, many operations can fail. For example, because the input value had a different data
/// type. However, these errors are expected and are part of the query evaluation. As all of these
/// "expected" errors are treated equally in the query evaluation, we do not need to store a reason.
/// A filter that observes a [ThinError] excludes the row.
#[derive(Clone, Copy, Debug, Default, Error, PartialEq, Eq)]
pub struct ThinError {}

impl ThinError {
    /// Creates a result with a [ThinError].
    pub fn expected<T>() -> ThinResult<T> {
        Err(ThinError::default())
    }
}

impl Display for ThinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("An expected error occurred.")
    }
}

macro_rules! implement_from {
    ($t:ty) => {
        impl From<$t> for ThinError {
            fn from(_: $t) -> Self {
                ThinError::default()
            }
        }
    };
}

implement_from!(TooLargeForDecimalError);
implement_from!(ParseBoolError);
implement_from!(ParseIntError);
implement_from!(ParseFloatError);
implement_from!(ParseDecimalError);
implement_from!(ParseDateTimeError);
implement_from!(ParseDurationError);

/// An error raised while parsing the canonical string form of an RDF term.
#[derive(Debug, Error)]
pub enum TermParseError {
    #[error("Unexpected end of input while parsing a term")]
    UnexpectedEnd,
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("Invalid escape sequence '\\{0}'")]
    InvalidEscape(String),
    #[error(transparent)]
    Iri(#[from] IriParseError),
    #[error(transparent)]
    BlankNode(#[from] BlankNodeIdParseError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// An error raised while building a pattern, filter, path, or group.
///
/// These errors are always raised when the offending tree is built, never during evaluation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstructionError {
    /// A term was placed into a pattern position that does not accept it.
    #[error("{term} is not allowed in the {position} position of a pattern")]
    InvalidPatternMember {
        /// The rendered term.
        term: String,
        /// The name of the position (subject, predicate, object, context).
        position: &'static str,
    },
    /// Ground patterns cannot be wrapped by EXISTS or NOT EXISTS.
    #[error("The pattern {0} does not contain variables and cannot be used in EXISTS/NOT EXISTS")]
    GroundSubPattern(String),
    /// A BIND introduced a variable that is already produced within the group.
    #[error("The variable {0} is already in scope and cannot be bound")]
    VariableAlreadyBound(String),
    /// An invalid language tag or language range.
    #[error("The language tag '{0}' is malformed")]
    InvalidLanguageTag(String),
    /// An invalid base direction.
    #[error("The base direction '{0}' is neither 'ltr' nor 'rtl'")]
    InvalidDirection(String),
    /// An invalid regular expression or flag set.
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(String),
    /// The variable name uses the prefix reserved for synthetic path variables.
    #[error("The variable {0} uses the reserved prefix of synthetic path variables")]
    ReservedVariable(String),
    /// A property path without any step.
    #[error("A property path must contain at least one step")]
    EmptyPropertyPath,
    /// An alternative step set without any step.
    #[error("An alternative step set must contain at least one step")]
    EmptyAlternative,
    /// Inline values without any column.
    #[error("Inline values must declare at least one variable")]
    EmptyValues,
    /// An invalid variable name.
    #[error("'{0}' is not a valid variable name")]
    InvalidVariableName(String),
}
