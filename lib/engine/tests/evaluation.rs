#![cfg(test)]

use rdf_algebra_engine::{MemoryGraph, Quad, QueryEvaluationError, QueryEvaluator};
use rdf_algebra_functions::{ComparisonFlavor, Expression, Filter};
use rdf_algebra_logical::{
    AggregateFunction, Aggregator, AskQuery, PathStep, PatternGroup, PropertyPath, SelectQuery,
};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{NamedNode, Pattern, RdfTerm, Values, Variable};
use std::sync::Arc;

fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{local}"))
}

fn int(value: i64) -> RdfTerm {
    RdfTerm::typed_literal(value.to_string(), xsd::INTEGER)
}

fn evaluator() -> QueryEvaluator {
    let graph = [
        Quad::new(ex("alice"), ex("name"), RdfTerm::simple_literal("Alice")),
        Quad::new(ex("bob"), ex("name"), RdfTerm::simple_literal("Bob")),
        Quad::new(ex("carol"), ex("name"), RdfTerm::simple_literal("Carol")),
        Quad::new(ex("alice"), ex("age"), int(30)),
        Quad::new(ex("bob"), ex("age"), int(25)),
        Quad::new(ex("alice"), ex("knows"), ex("bob")),
        Quad::new(ex("bob"), ex("knows"), ex("carol")),
        Quad::new(ex("carol"), ex("likes"), ex("alice")),
    ]
    .into_iter()
    .collect::<MemoryGraph>();
    QueryEvaluator::new(Arc::new(graph))
}

#[tokio::test]
async fn join_patterns_on_shared_variables() -> Result<(), QueryEvaluationError> {
    let group = PatternGroup::new()
        .add_pattern(Pattern::new(var("p"), ex("knows"), var("f"))?)?
        .add_pattern(Pattern::new(var("f"), ex("name"), var("n"))?)?;

    insta::assert_snapshot!(evaluator().evaluate_group(&group).await?, @r#"
    | ?p | ?f | ?n |
    | <http://example.com/alice> | <http://example.com/bob> | "Bob" |
    | <http://example.com/bob> | <http://example.com/carol> | "Carol" |
    "#);
    Ok(())
}

#[tokio::test]
async fn optional_pattern_keeps_unmatched_rows() -> Result<(), QueryEvaluationError> {
    let group = PatternGroup::new()
        .add_pattern(Pattern::new(var("p"), ex("name"), var("n"))?)?
        .add_pattern(Pattern::new(var("p"), ex("age"), var("a"))?.with_optional(true))?;

    let table = evaluator().evaluate_group(&group).await?;
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows()[0].term(&var("a")), Some(&int(30)));
    assert!(table.rows()[2].contains_column(&var("a")));
    assert_eq!(table.rows()[2].term(&var("a")), None);
    Ok(())
}

#[tokio::test]
async fn union_flag_chains_members() -> Result<(), QueryEvaluationError> {
    let group = PatternGroup::new()
        .add_pattern(Pattern::new(var("x"), ex("knows"), var("y"))?.with_join_as_union(true))?
        .add_pattern(Pattern::new(var("x"), ex("likes"), var("y"))?)?;

    assert_eq!(evaluator().evaluate_group(&group).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn minus_group_removes_compatible_rows() -> Result<(), QueryEvaluationError> {
    let named = PatternGroup::new()
        .add_pattern(Pattern::new(var("p"), ex("name"), var("n"))?)?
        .with_join_as_minus(true);
    let aged = PatternGroup::new().add_pattern(Pattern::new(var("p"), ex("age"), var("a"))?)?;

    insta::assert_snapshot!(evaluator().evaluate_groups(&[named, aged]).await?, @r#"
    | ?p | ?n |
    | <http://example.com/carol> | "Carol" |
    "#);
    Ok(())
}

#[tokio::test]
async fn sequence_path_hides_synthetic_variables() -> Result<(), QueryEvaluationError> {
    let path = PropertyPath::new(var("a"), var("n"))?
        .add_step(PathStep::new(ex("knows"))?)
        .add_step(PathStep::new(ex("name"))?);
    let group = PatternGroup::new().add_path(path)?;

    insta::assert_snapshot!(evaluator().evaluate_group(&group).await?, @r#"
    | ?a | ?n |
    | <http://example.com/alice> | "Bob" |
    | <http://example.com/bob> | "Carol" |
    "#);
    Ok(())
}

#[tokio::test]
async fn alternative_and_inverse_path_steps() -> Result<(), QueryEvaluationError> {
    let alternatives = PropertyPath::new(var("a"), var("b"))?
        .add_alternative_steps([PathStep::new(ex("knows"))?, PathStep::new(ex("likes"))?])?;
    let group = PatternGroup::new().add_path(alternatives)?;
    assert_eq!(evaluator().evaluate_group(&group).await?.len(), 3);

    let inverse = PropertyPath::new(ex("carol"), var("b"))?
        .add_step(PathStep::new_inverse(ex("knows"))?);
    let group = PatternGroup::new().add_path(inverse)?;
    let table = evaluator().evaluate_group(&group).await?;
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].term(&var("b")), Some(&RdfTerm::from(ex("bob"))));
    Ok(())
}

#[tokio::test]
async fn bind_then_filter() -> Result<(), QueryEvaluationError> {
    let group = PatternGroup::new()
        .add_pattern(Pattern::new(var("p"), ex("age"), var("a"))?)?
        .add_bind(
            var("next"),
            Expression::Add(
                Box::new(Expression::variable(var("a"))),
                Box::new(Expression::constant(int(1))),
            ),
        )?
        .add_filter(Filter::comparison(
            ComparisonFlavor::GreaterThan,
            var("next"),
            int(26),
        ));

    let table = evaluator().evaluate_group(&group).await?;
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].term(&var("next")), Some(&int(31)));
    Ok(())
}

#[tokio::test]
async fn exists_and_not_exists() -> Result<(), QueryEvaluationError> {
    let aged = Pattern::new(var("p"), ex("age"), var("a"))?;
    let base = PatternGroup::new().add_pattern(Pattern::new(var("p"), ex("name"), var("n"))?)?;

    let with_age = base.clone().add_filter(Filter::exists(aged.clone())?);
    assert_eq!(evaluator().evaluate_group(&with_age).await?.len(), 2);

    let without_age = base.add_filter(Filter::not_exists(aged)?);
    let table = evaluator().evaluate_group(&without_age).await?;
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows()[0].term(&var("n")),
        Some(&RdfTerm::simple_literal("Carol"))
    );
    Ok(())
}

#[tokio::test]
async fn values_restrict_solutions() -> Result<(), QueryEvaluationError> {
    let values = Values::new([(
        var("p"),
        vec![Some(RdfTerm::from(ex("alice"))), Some(RdfTerm::from(ex("dave")))],
    )])?;
    let group = PatternGroup::new()
        .add_values(values)?
        .add_pattern(Pattern::new(var("p"), ex("name"), var("n"))?)?;

    insta::assert_snapshot!(evaluator().evaluate_group(&group).await?, @r#"
    | ?p | ?n |
    | <http://example.com/alice> | "Alice" |
    "#);
    Ok(())
}

#[tokio::test]
async fn select_with_modifiers() -> Result<(), QueryEvaluationError> {
    let group = PatternGroup::new()
        .add_pattern(Pattern::new(var("x"), ex("knows"), var("y"))?.with_join_as_union(true))?
        .add_pattern(Pattern::new(var("x"), ex("likes"), var("y"))?)?;
    let query = SelectQuery::new([group])
        .with_projection([var("x")])
        .with_distinct(true)
        .with_offset(1)
        .with_limit(1);

    insta::assert_snapshot!(evaluator().evaluate_select(&query).await?, @r"
    | ?x |
    | <http://example.com/bob> |
    ");
    Ok(())
}

#[tokio::test]
async fn select_with_aggregator() -> Result<(), QueryEvaluationError> {
    let group = PatternGroup::new()
        .add_pattern(Pattern::new(var("p"), ex("name"), var("n"))?)?
        .add_pattern(Pattern::new(var("p"), ex("age"), var("a"))?.with_optional(true))?;
    let aggregator = Aggregator::new(AggregateFunction::Count, Some(var("a")), var("aged"));
    let query = SelectQuery::new([group]).with_aggregator(aggregator);

    let table = evaluator().evaluate_select(&query).await?;
    assert_eq!(table.variables(), &[var("aged")]);
    assert_eq!(table.rows()[0].term(&var("aged")), Some(&int(2)));
    Ok(())
}

#[tokio::test]
async fn ask_query() -> Result<(), QueryEvaluationError> {
    let known = PatternGroup::new().add_pattern(Pattern::new(ex("alice"), ex("knows"), var("x"))?)?;
    assert!(evaluator().evaluate_ask(&AskQuery::new([known])).await?);

    let unknown = PatternGroup::new().add_pattern(Pattern::new(ex("dave"), ex("knows"), var("x"))?)?;
    assert!(!evaluator().evaluate_ask(&AskQuery::new([unknown])).await?);
    Ok(())
}

#[tokio::test]
async fn service_without_handler_is_unsupported() -> Result<(), QueryEvaluationError> {
    let group = PatternGroup::new()
        .add_pattern(Pattern::new(var("s"), ex("p"), var("o"))?)?
        .with_service(ex("sparql"));

    let result = evaluator().evaluate_group(&group).await;
    assert!(matches!(
        result,
        Err(QueryEvaluationError::UnsupportedService(endpoint)) if endpoint == ex("sparql")
    ));
    Ok(())
}
