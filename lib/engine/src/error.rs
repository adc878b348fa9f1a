use rdf_algebra_model::{ConstructionError, NamedNode};
use std::convert::Infallible;
use std::error::Error;
use std::time::Duration;

/// An error raised while evaluating a group or query.
///
/// Local evaluation of filters, paths, and groups never fails because of the data. Only data
/// sources and remote services can raise errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryEvaluationError {
    /// Error from the underlying data source.
    #[error(transparent)]
    Dataset(Box<dyn Error + Send + Sync>),
    /// Error during `SERVICE` evaluation or while querying a remote federation member.
    #[error("{0}")]
    Service(#[source] Box<dyn Error + Send + Sync>),
    /// A remote source did not answer in time.
    #[error("The remote source did not answer within {0:?}")]
    ServiceTimeout(Duration),
    /// No handler is registered for the given `SERVICE`.
    #[error("The service {0} is not supported")]
    UnsupportedService(NamedNode),
    /// An invalid tree was passed to the evaluator.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl QueryEvaluationError {
    /// Wraps an error of a data source.
    pub fn dataset(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Dataset(error.into())
    }

    /// Wraps a transport error of a remote endpoint.
    pub fn service(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Service(error.into())
    }
}

impl From<Infallible> for QueryEvaluationError {
    #[inline]
    fn from(error: Infallible) -> Self {
        match error {}
    }
}
