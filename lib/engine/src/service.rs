use crate::error::QueryEvaluationError;
use crate::options::{ErrorBehavior, ServiceOptions};
use crate::source::DataSource;
use async_trait::async_trait;
use rdf_algebra_model::{BindingTable, NamedNode, Pattern, Variable};
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends queries to remote endpoints.
///
/// The handler owns the transport. Timeouts and the error behavior are enforced by the caller.
#[async_trait]
pub trait ServiceHandler: Debug + Send + Sync {
    /// Evaluates `query` at `endpoint`.
    ///
    /// Transport failures should be reported with [QueryEvaluationError::service].
    async fn handle(
        &self,
        endpoint: &NamedNode,
        query: &str,
        options: &ServiceOptions,
    ) -> Result<BindingTable, QueryEvaluationError>;
}

/// Calls `endpoint` through `handler`, bounded by the timeout of `options`.
///
/// Failures and timeouts are resolved with the error behavior of `options`. An empty result has
/// a column for each of `variables`.
pub async fn call_service<'variable>(
    handler: &dyn ServiceHandler,
    endpoint: &NamedNode,
    query: &str,
    options: &ServiceOptions,
    variables: impl IntoIterator<Item = &'variable Variable>,
) -> Result<BindingTable, QueryEvaluationError> {
    debug!(%endpoint, "Calling service");
    let result = with_timeout(
        options.timeout(),
        handler.handle(endpoint, query, options),
    )
    .await;
    recover(result, options.error_behavior(), variables, || {
        endpoint.to_string()
    })
}

/// Runs `future` and converts an elapsed deadline into [QueryEvaluationError::ServiceTimeout].
/// The future is dropped when the deadline passes.
pub(crate) async fn with_timeout<T>(
    timeout: Duration,
    future: impl Future<Output = Result<T, QueryEvaluationError>>,
) -> Result<T, QueryEvaluationError> {
    tokio::time::timeout(timeout, future)
        .await
        .unwrap_or(Err(QueryEvaluationError::ServiceTimeout(timeout)))
}

/// Applies `behavior` to the result of a remote source.
pub(crate) fn recover<'variable>(
    result: Result<BindingTable, QueryEvaluationError>,
    behavior: ErrorBehavior,
    variables: impl IntoIterator<Item = &'variable Variable>,
    source: impl FnOnce() -> String,
) -> Result<BindingTable, QueryEvaluationError> {
    match (result, behavior) {
        (Ok(table), _) => Ok(table),
        (Err(error), ErrorBehavior::Throw) => Err(error),
        (Err(error), ErrorBehavior::EmptyResult) => {
            warn!(source = source(), %error, "Remote source failed, using an empty result");
            Ok(BindingTable::new(variables.into_iter().cloned()))
        }
    }
}

/// A remote endpoint that acts as a [DataSource], for example as a member of a
/// [Federation](crate::Federation).
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    endpoint: NamedNode,
    handler: Arc<dyn ServiceHandler>,
    options: ServiceOptions,
}

impl RemoteEndpoint {
    pub fn new(endpoint: NamedNode, handler: Arc<dyn ServiceHandler>) -> Self {
        Self {
            endpoint,
            handler,
            options: ServiceOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ServiceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn endpoint(&self) -> &NamedNode {
        &self.endpoint
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }
}

#[async_trait]
impl DataSource for RemoteEndpoint {
    async fn match_pattern(&self, pattern: &Pattern) -> Result<BindingTable, QueryEvaluationError> {
        let query = format!("SELECT * WHERE {{ {} }}", pattern.to_sparql(&[]));
        call_service(
            self.handler.as_ref(),
            &self.endpoint,
            &query,
            &self.options,
            pattern.variables(),
        )
        .await
    }
}
