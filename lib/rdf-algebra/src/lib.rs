//! SPARQL-style query algebra over binding tables.
//!
//! Queries are built from pattern groups that contain triple patterns, property paths, inline
//! values, bindings, and filters. The trees are validated when they are built and evaluated by a
//! [QueryEvaluator](engine::QueryEvaluator) against a local or federated data source.
//!
//! ```
//! use rdf_algebra::engine::{MemoryGraph, Quad, QueryEvaluator};
//! use rdf_algebra::logical::{PatternGroup, SelectQuery};
//! use rdf_algebra::model::{NamedNode, Pattern, RdfTerm, Variable};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let name = NamedNode::new("http://schema.org/name")?;
//! let paris = NamedNode::new("http://www.wikidata.org/entity/Q90")?;
//! let graph = [Quad::new(paris, name.clone(), RdfTerm::simple_literal("Paris"))]
//!     .into_iter()
//!     .collect::<MemoryGraph>();
//!
//! let city = Variable::new("city")?;
//! let group = PatternGroup::new().add_pattern(Pattern::new(city, name, Variable::new("name")?)?)?;
//! let solutions = QueryEvaluator::new(Arc::new(graph))
//!     .evaluate_select(&SelectQuery::new([group]))
//!     .await?;
//! assert_eq!(solutions.len(), 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! # }).unwrap();
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod model {
    pub use rdf_algebra_model::*;
}

pub mod functions {
    pub use rdf_algebra_functions::*;
}

pub mod logical {
    pub use rdf_algebra_logical::*;
}

pub mod engine {
    pub use rdf_algebra_engine::*;
}
