#![cfg(test)]

use async_trait::async_trait;
use rdf_algebra_engine::{
    DataSource, ErrorBehavior, Federation, FederationOptions, MemoryGraph, Quad,
    QueryEvaluationError, QueryEvaluator, QueryOptions, RemoteEndpoint, ServiceHandler,
    ServiceOptions,
};
use rdf_algebra_logical::PatternGroup;
use rdf_algebra_model::{BindingRow, BindingTable, NamedNode, Pattern, RdfTerm, Variable};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{local}"))
}

fn graph(quads: impl IntoIterator<Item = Quad>) -> Arc<dyn DataSource> {
    Arc::new(quads.into_iter().collect::<MemoryGraph>())
}

/// Answers every query with a fixed table and records the received queries.
#[derive(Debug, Default)]
struct RecordingHandler {
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl ServiceHandler for RecordingHandler {
    async fn handle(
        &self,
        _endpoint: &NamedNode,
        query: &str,
        _options: &ServiceOptions,
    ) -> Result<BindingTable, QueryEvaluationError> {
        self.queries.lock().unwrap().push(query.to_owned());
        let row = [(var("s"), RdfTerm::from(ex("remote")))]
            .into_iter()
            .collect::<BindingRow>();
        Ok(BindingTable::from_rows([var("s"), var("o")], [row]))
    }
}

/// Never answers in time.
#[derive(Debug)]
struct SlowHandler;

#[async_trait]
impl ServiceHandler for SlowHandler {
    async fn handle(
        &self,
        _endpoint: &NamedNode,
        _query: &str,
        _options: &ServiceOptions,
    ) -> Result<BindingTable, QueryEvaluationError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(BindingTable::default())
    }
}

/// Always fails with a transport error.
#[derive(Debug)]
struct FailingHandler;

#[async_trait]
impl ServiceHandler for FailingHandler {
    async fn handle(
        &self,
        endpoint: &NamedNode,
        _query: &str,
        _options: &ServiceOptions,
    ) -> Result<BindingTable, QueryEvaluationError> {
        Err(QueryEvaluationError::service(format!(
            "connection to {endpoint} refused"
        )))
    }
}

fn knows_pattern() -> Pattern {
    Pattern::new(var("s"), ex("knows"), var("o")).unwrap()
}

#[tokio::test]
async fn federation_unions_member_results() -> Result<(), QueryEvaluationError> {
    let first = graph([
        Quad::new(ex("a"), ex("knows"), ex("b")),
        Quad::new(ex("b"), ex("knows"), ex("c")),
    ]);
    let second = graph([Quad::new(ex("a"), ex("knows"), ex("b"))]);
    let nested = Federation::new([graph([Quad::new(ex("c"), ex("knows"), ex("a"))])]);
    let federation = Federation::new([first, second]).with_member(Arc::new(nested));

    let table = federation.match_pattern(&knows_pattern()).await?;
    assert_eq!(table.variables(), &[var("s"), var("o")]);
    assert_eq!(table.len(), 4);
    Ok(())
}

#[tokio::test]
async fn federation_timeout_with_empty_result() -> Result<(), QueryEvaluationError> {
    let slow = RemoteEndpoint::new(ex("slow"), Arc::new(SlowHandler));
    let local = graph([Quad::new(ex("a"), ex("knows"), ex("b"))]);
    let federation = Federation::new([local, Arc::new(slow) as Arc<dyn DataSource>]).with_options(
        FederationOptions::default()
            .with_timeout(Duration::from_millis(20))
            .with_error_behavior(ErrorBehavior::EmptyResult),
    );

    let table = federation.match_pattern(&knows_pattern()).await?;
    assert_eq!(table.len(), 1);
    Ok(())
}

#[tokio::test]
async fn federation_timeout_fails_by_default() {
    let slow = RemoteEndpoint::new(ex("slow"), Arc::new(SlowHandler));
    let federation = Federation::new([Arc::new(slow) as Arc<dyn DataSource>])
        .with_options(FederationOptions::default().with_timeout(Duration::from_millis(20)));

    let result = federation.match_pattern(&knows_pattern()).await;
    assert!(matches!(
        result,
        Err(QueryEvaluationError::ServiceTimeout(timeout)) if timeout == Duration::from_millis(20)
    ));
}

#[tokio::test]
async fn service_group_sends_rendered_query() -> Result<(), QueryEvaluationError> {
    let handler = Arc::new(RecordingHandler::default());
    let evaluator = QueryEvaluator::new(graph([]))
        .with_service_handler(Arc::clone(&handler) as Arc<dyn ServiceHandler>);
    let group = PatternGroup::new()
        .add_pattern(knows_pattern())?
        .with_service(ex("sparql"));

    let table = evaluator.evaluate_group(&group).await?;
    assert_eq!(table.len(), 1);
    insta::assert_snapshot!(
        handler.queries.lock().unwrap().join("\n"),
        @"SELECT * WHERE { ?s <http://example.com/knows> ?o . }"
    );
    Ok(())
}

#[tokio::test]
async fn service_failure_follows_endpoint_options() -> Result<(), QueryEvaluationError> {
    let group = PatternGroup::new()
        .add_pattern(knows_pattern())?
        .with_service(ex("sparql"));

    let throwing = QueryEvaluator::new(graph([])).with_service_handler(Arc::new(FailingHandler));
    assert!(matches!(
        throwing.evaluate_group(&group).await,
        Err(QueryEvaluationError::Service(_))
    ));

    let options = QueryOptions::default().with_service_options(
        ex("sparql"),
        ServiceOptions::default().with_error_behavior(ErrorBehavior::EmptyResult),
    );
    let lenient = throwing.with_options(options);
    let table = lenient.evaluate_group(&group).await?;
    assert!(table.is_empty());
    assert_eq!(table.variables(), &[var("s"), var("o")]);
    Ok(())
}

#[tokio::test]
async fn service_timeout_uses_default_options() {
    let group = PatternGroup::new()
        .add_pattern(knows_pattern())
        .unwrap()
        .with_service(ex("sparql"));
    let options = QueryOptions::default().with_default_service_options(
        ServiceOptions::default().with_timeout(Duration::from_millis(20)),
    );
    let evaluator = QueryEvaluator::new(graph([]))
        .with_service_handler(Arc::new(SlowHandler))
        .with_options(options);

    assert!(matches!(
        evaluator.evaluate_group(&group).await,
        Err(QueryEvaluationError::ServiceTimeout(_))
    ));
}
