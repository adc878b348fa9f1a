//! Evaluation of pattern groups and queries against local and remote data sources.
//!
//! The [QueryEvaluator] combines the tables produced by a [DataSource] according to the flags of
//! the groups and their members. Remote endpoints are reached through a [ServiceHandler], either
//! for `SERVICE` groups or as members of a [Federation].

mod aggregate;
pub mod algebra;
mod error;
mod evaluator;
mod federation;
mod options;
mod service;
mod source;

pub use aggregate::aggregate;
pub use error::QueryEvaluationError;
pub use evaluator::QueryEvaluator;
pub use federation::Federation;
pub use options::{ErrorBehavior, FederationOptions, HttpMethod, QueryOptions, ServiceOptions};
pub use service::{call_service, RemoteEndpoint, ServiceHandler};
pub use source::{DataSource, MemoryGraph, Quad, QuadSubject};
