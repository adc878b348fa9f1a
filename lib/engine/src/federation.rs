use crate::algebra::union;
use crate::error::QueryEvaluationError;
use crate::options::FederationOptions;
use crate::service::{recover, with_timeout};
use crate::source::DataSource;
use async_trait::async_trait;
use futures::future::join_all;
use rdf_algebra_model::{BindingTable, Pattern};
use std::sync::Arc;
use tracing::debug;

/// A set of data sources that acts as a single source.
///
/// A pattern is matched against every member concurrently, and the results are concatenated.
/// Duplicate rows are kept. Each member is bounded by the federation timeout, and a failing member
/// is handled according to the error behavior of the federation.
#[derive(Debug, Clone, Default)]
pub struct Federation {
    members: Vec<Arc<dyn DataSource>>,
    options: FederationOptions,
}

impl Federation {
    pub fn new(members: impl IntoIterator<Item = Arc<dyn DataSource>>) -> Self {
        Self {
            members: members.into_iter().collect(),
            options: FederationOptions::default(),
        }
    }

    #[must_use]
    pub fn with_member(mut self, member: Arc<dyn DataSource>) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: FederationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn members(&self) -> &[Arc<dyn DataSource>] {
        &self.members
    }

    pub fn options(&self) -> &FederationOptions {
        &self.options
    }
}

#[async_trait]
impl DataSource for Federation {
    async fn match_pattern(&self, pattern: &Pattern) -> Result<BindingTable, QueryEvaluationError> {
        debug!(members = self.members.len(), %pattern, "Fanning out pattern");
        let timeout = self.options.timeout();
        let results = join_all(
            self.members
                .iter()
                .map(|member| with_timeout(timeout, member.match_pattern(pattern))),
        )
        .await;

        let mut tables = vec![BindingTable::new(pattern.variables().into_iter().cloned())];
        for (index, result) in results.into_iter().enumerate() {
            tables.push(recover(
                result,
                self.options.error_behavior(),
                pattern.variables(),
                || format!("federation member {index}"),
            )?);
        }
        Ok(union(tables))
    }
}
