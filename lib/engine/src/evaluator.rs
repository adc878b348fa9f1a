use crate::aggregate::aggregate;
use crate::algebra::{combine, distinct, extend, project, slice, union};
use crate::error::QueryEvaluationError;
use crate::options::QueryOptions;
use crate::service::{call_service, ServiceHandler};
use crate::source::DataSource;
use rdf_algebra_functions::SubPatternResults;
use rdf_algebra_logical::{
    plan_blocks, AskQuery, Block, GroupOperand, GroupStep, PatternGroup, PropertyPath, SelectQuery,
};
use rdf_algebra_model::{BindingTable, NamedNode};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Evaluates pattern groups and queries against a [DataSource].
///
/// Groups with a service endpoint are sent to the registered [ServiceHandler]. Without a handler,
/// their evaluation fails with [QueryEvaluationError::UnsupportedService].
#[derive(Debug, Clone)]
pub struct QueryEvaluator {
    source: Arc<dyn DataSource>,
    service_handler: Option<Arc<dyn ServiceHandler>>,
    options: QueryOptions,
}

impl QueryEvaluator {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            service_handler: None,
            options: QueryOptions::default(),
        }
    }

    #[must_use]
    pub fn with_service_handler(mut self, handler: Arc<dyn ServiceHandler>) -> Self {
        self.service_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Evaluates a `SELECT` query.
    ///
    /// The groups are combined first. An aggregator replaces the projection. Distinct, offset, and
    /// limit are applied last.
    pub async fn evaluate_select(
        &self,
        query: &SelectQuery,
    ) -> Result<BindingTable, QueryEvaluationError> {
        let mut table = self.evaluate_groups(query.groups()).await?;
        if let Some(aggregator) = query.aggregator() {
            table = aggregate(&table, aggregator);
        } else if let Some(projection) = query.projection() {
            table = project(table, projection);
        }
        if query.is_distinct() {
            table = distinct(table);
        }
        Ok(slice(table, query.offset(), query.limit()))
    }

    /// Evaluates an `ASK` query.
    pub async fn evaluate_ask(&self, query: &AskQuery) -> Result<bool, QueryEvaluationError> {
        Ok(!self.evaluate_groups(query.groups()).await?.is_empty())
    }

    /// Evaluates a sequence of groups, combining each with the groups before it.
    pub async fn evaluate_groups(
        &self,
        groups: &[PatternGroup],
    ) -> Result<BindingTable, QueryEvaluationError> {
        evaluate_blocks(plan_blocks(groups), |group| self.evaluate_group(group)).await
    }

    /// Evaluates a single group.
    ///
    /// Patterns, paths, values, and binds are evaluated in declaration order. The filters of the
    /// group are applied to the resulting table afterwards.
    pub async fn evaluate_group(
        &self,
        group: &PatternGroup,
    ) -> Result<BindingTable, QueryEvaluationError> {
        if let Some(endpoint) = group.service() {
            return self.evaluate_service(endpoint, group).await;
        }

        let mut table = BindingTable::unit();
        for step in group.plan() {
            table = match step {
                GroupStep::Combine(block) => {
                    let kind = block.kind;
                    let operand =
                        evaluate_union(block, |operand| self.evaluate_operand(operand)).await?;
                    combine(table, &operand, kind)
                }
                GroupStep::Extend(bind) => extend(table, bind),
            };
        }
        let table = self.apply_filters(group, table).await?;

        debug!(
            members = group.members().len(),
            rows = table.len(),
            "Evaluated group"
        );
        Ok(table)
    }

    async fn evaluate_operand(
        &self,
        operand: &GroupOperand,
    ) -> Result<BindingTable, QueryEvaluationError> {
        match operand {
            GroupOperand::Pattern(pattern) => self.source.match_pattern(pattern).await,
            GroupOperand::Path(path) => self.evaluate_path(path).await,
            GroupOperand::Values(values) => Ok(values.to_table()),
        }
    }

    /// Evaluates the compiled patterns of a path. The synthetic variables are removed from the
    /// result.
    async fn evaluate_path(&self, path: &PropertyPath) -> Result<BindingTable, QueryEvaluationError> {
        let patterns = path.compile()?;
        let mut table = evaluate_blocks(plan_blocks(&patterns), |pattern| {
            self.source.match_pattern(pattern)
        })
        .await?;
        for variable in path.synthetic_variables()? {
            table.remove_column(&variable);
        }
        Ok(table)
    }

    /// Evaluates the sub-patterns of `EXISTS` and `NOT EXISTS` and applies the filters in
    /// declaration order.
    async fn apply_filters(
        &self,
        group: &PatternGroup,
        mut table: BindingTable,
    ) -> Result<BindingTable, QueryEvaluationError> {
        let filters = group.filters().collect::<Vec<_>>();
        if filters.is_empty() {
            return Ok(table);
        }

        let mut context = SubPatternResults::new();
        for pattern in filters.iter().flat_map(|filter| filter.sub_patterns()) {
            if !context.contains(pattern) {
                let result = self.source.match_pattern(pattern).await?;
                context.insert(pattern.clone(), result);
            }
        }
        if !context.is_empty() {
            debug!(patterns = context.len(), "Evaluated EXISTS sub-patterns");
        }

        table.retain(|row| filters.iter().all(|filter| filter.apply(row, &context, false)));
        Ok(table)
    }

    async fn evaluate_service(
        &self,
        endpoint: &NamedNode,
        group: &PatternGroup,
    ) -> Result<BindingTable, QueryEvaluationError> {
        let Some(handler) = &self.service_handler else {
            return Err(QueryEvaluationError::UnsupportedService(endpoint.clone()));
        };
        call_service(
            handler.as_ref(),
            endpoint,
            &group.service_query(&[]),
            self.options.service_options(endpoint),
            group.variables(),
        )
        .await
    }
}

/// Evaluates the blocks in order, starting from the unit table.
async fn evaluate_blocks<'item, T, F, Fut>(
    blocks: Vec<Block<'item, T>>,
    evaluate: F,
) -> Result<BindingTable, QueryEvaluationError>
where
    F: Fn(&'item T) -> Fut,
    Fut: Future<Output = Result<BindingTable, QueryEvaluationError>>,
{
    let mut table = BindingTable::unit();
    for block in blocks {
        let kind = block.kind;
        let operand = evaluate_union(block, &evaluate).await?;
        table = combine(table, &operand, kind);
    }
    Ok(table)
}

/// Evaluates the items of a block and concatenates their results.
async fn evaluate_union<'item, T, F, Fut>(
    block: Block<'item, T>,
    evaluate: F,
) -> Result<BindingTable, QueryEvaluationError>
where
    F: Fn(&'item T) -> Fut,
    Fut: Future<Output = Result<BindingTable, QueryEvaluationError>>,
{
    let mut operands = Vec::with_capacity(block.items.len());
    for item in block.items {
        operands.push(evaluate(item).await?);
    }
    Ok(union(operands))
}
