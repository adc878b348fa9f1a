use rdf_algebra_model::NamedNode;
use rustc_hash::FxHashMap;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The HTTP method used to send a query to a remote endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

/// What happens when a remote source fails or does not answer in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorBehavior {
    /// The whole query fails.
    #[default]
    Throw,
    /// The source contributes an empty result.
    EmptyResult,
}

/// Options for calling a remote endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceOptions {
    timeout: Duration,
    http_method: HttpMethod,
    error_behavior: ErrorBehavior,
    update_content_type: Option<String>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            http_method: HttpMethod::default(),
            error_behavior: ErrorBehavior::default(),
            update_content_type: None,
        }
    }
}

impl ServiceOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_http_method(mut self, http_method: HttpMethod) -> Self {
        self.http_method = http_method;
        self
    }

    #[must_use]
    pub fn with_error_behavior(mut self, error_behavior: ErrorBehavior) -> Self {
        self.error_behavior = error_behavior;
        self
    }

    /// Sets the content type of update requests.
    #[must_use]
    pub fn with_update_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.update_content_type = Some(content_type.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    pub fn error_behavior(&self) -> ErrorBehavior {
        self.error_behavior
    }

    pub fn update_content_type(&self) -> Option<&str> {
        self.update_content_type.as_deref()
    }
}

/// Options applied to every member of a [Federation](crate::Federation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FederationOptions {
    timeout: Duration,
    error_behavior: ErrorBehavior,
}

impl Default for FederationOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            error_behavior: ErrorBehavior::default(),
        }
    }
}

impl FederationOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_error_behavior(mut self, error_behavior: ErrorBehavior) -> Self {
        self.error_behavior = error_behavior;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn error_behavior(&self) -> ErrorBehavior {
        self.error_behavior
    }
}

/// Options for query evaluation.
///
/// Service options are looked up by endpoint. Endpoints without explicit options use the
/// default service options.
#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    default_service_options: ServiceOptions,
    service_options: FxHashMap<NamedNode, ServiceOptions>,
}

impl QueryOptions {
    #[must_use]
    pub fn with_default_service_options(mut self, options: ServiceOptions) -> Self {
        self.default_service_options = options;
        self
    }

    /// Sets the options of a single endpoint.
    #[must_use]
    pub fn with_service_options(mut self, endpoint: NamedNode, options: ServiceOptions) -> Self {
        self.service_options.insert(endpoint, options);
        self
    }

    pub fn default_service_options(&self) -> &ServiceOptions {
        &self.default_service_options
    }

    /// The options used to call `endpoint`.
    pub fn service_options(&self, endpoint: &NamedNode) -> &ServiceOptions {
        self.service_options
            .get(endpoint)
            .unwrap_or(&self.default_service_options)
    }
}
