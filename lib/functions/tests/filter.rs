#![cfg(test)]

use rdf_algebra_functions::{ComparisonFlavor, Filter, InList, SubPatternResults};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{
    BindingRow, BindingTable, ConstructionError, NamedNode, Pattern, RdfTerm, Values, Variable,
};
use std::str::FromStr;

fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

fn term(value: &str) -> RdfTerm {
    RdfTerm::from_str(value).unwrap()
}

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{local}"))
}

fn row(cells: &[(&str, Option<&str>)]) -> BindingRow {
    cells
        .iter()
        .map(|(name, value)| (var(name), value.map(term)))
        .collect()
}

fn keeps(filter: &Filter, row: &BindingRow) -> bool {
    filter.apply(row, &SubPatternResults::new(), false)
}

#[test]
fn float_greater_than_decimal() {
    let filter = Filter::comparison(
        ComparisonFlavor::GreaterThan,
        var("A"),
        RdfTerm::typed_literal("12", xsd::DECIMAL),
    );
    let row = row(&[(
        "A",
        Some("\"27.7\"^^<http://www.w3.org/2001/XMLSchema#float>"),
    )]);
    assert!(keeps(&filter, &row));
}

#[test]
fn float_less_than_gday_is_excluded() {
    let filter = Filter::comparison(ComparisonFlavor::LessThan, var("A"), var("B"));
    let row = row(&[
        (
            "A",
            Some("\"27.7\"^^<http://www.w3.org/2001/XMLSchema#float>"),
        ),
        ("B", Some("\"---30\"^^<http://www.w3.org/2001/XMLSchema#gDay>")),
    ]);
    assert!(!keeps(&filter, &row));
}

#[test]
fn comparison_missing_column_or_value_fails() {
    let filter = Filter::comparison(ComparisonFlavor::EqualTo, var("A"), var("B"));
    assert!(!keeps(&filter, &row(&[("A", Some("\"x\""))])));
    assert!(!keeps(&filter, &row(&[("A", Some("\"x\"")), ("B", None)])));
    assert!(keeps(&filter, &row(&[("A", None), ("B", None)])));

    let not_equal = Filter::comparison(ComparisonFlavor::NotEqualTo, var("A"), var("B"));
    assert!(!keeps(&not_equal, &row(&[("A", None), ("B", None)])));
}

#[test]
fn lang_matches_ignores_direction() {
    let filter = Filter::lang_matches(var("B"), "en").unwrap();
    assert!(keeps(&filter, &row(&[("B", Some("\"hello\"@en-US--ltr"))])));
    assert!(!keeps(&filter, &row(&[("B", Some("\"hallo\"@de"))])));
    assert!(!keeps(&filter, &row(&[("B", Some("<http://example.com/a>"))])));
    assert!(keeps(&filter, &row(&[("B", None)])));
    assert!(keeps(&filter, &row(&[])));

    let any = Filter::lang_matches(var("B"), "*").unwrap();
    assert!(keeps(&any, &row(&[("B", Some("\"x\"@fr--rtl"))])));
    assert!(!keeps(&any, &row(&[("B", Some("\"x\""))])));

    let none = Filter::lang_matches(var("B"), "").unwrap();
    assert!(keeps(&none, &row(&[("B", Some("\"x\""))])));

    assert_eq!(
        Filter::lang_matches(var("B"), "en_US"),
        Err(ConstructionError::InvalidLanguageTag("en_US".to_owned()))
    );
}

#[test]
fn type_check_policies() {
    let filters = [
        Filter::Bound(var("A")),
        Filter::IsUri(var("A")),
        Filter::IsLiteral(var("A")),
        Filter::IsNumeric(var("A")),
        Filter::Datatype(var("A"), xsd::INTEGER.into_owned()),
    ];
    for filter in &filters {
        assert!(keeps(filter, &row(&[])), "{filter}");
        assert!(!keeps(filter, &row(&[("A", None)])), "{filter}");
    }

    let integer = row(&[(
        "A",
        Some("\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>"),
    )]);
    assert!(keeps(&Filter::IsNumeric(var("A")), &integer));
    assert!(keeps(&Filter::IsLiteral(var("A")), &integer));
    assert!(!keeps(&Filter::IsUri(var("A")), &integer));
    assert!(keeps(
        &Filter::Datatype(var("A"), xsd::INTEGER.into_owned()),
        &integer
    ));

    let invalid = row(&[(
        "A",
        Some("\"five\"^^<http://www.w3.org/2001/XMLSchema#integer>"),
    )]);
    assert!(!keeps(&Filter::IsNumeric(var("A")), &invalid));
}

#[test]
fn regex_matches_canonical_form() {
    let filter = Filter::regex(var("A"), "^\"hel", Some("i")).unwrap();
    assert!(keeps(&filter, &row(&[("A", Some("\"HELLO\"@en"))])));
    assert!(!keeps(&filter, &row(&[("A", Some("\"world\""))])));
    assert!(keeps(&filter, &row(&[("A", None)])));
    assert!(keeps(&filter, &row(&[])));
    assert!(Filter::regex(var("A"), "(", None).is_err());
}

#[test]
fn regex_sees_language_tag_and_datatype() {
    let language = Filter::regex(var("A"), "@en$", None).unwrap();
    assert!(keeps(&language, &row(&[("A", Some("\"hello\"@en"))])));
    assert!(!keeps(&language, &row(&[("A", Some("\"hello\"@de"))])));
    assert!(!keeps(&language, &row(&[("A", Some("\"hello\""))])));

    let datatype = Filter::regex(var("A"), "XMLSchema#integer>$", None).unwrap();
    assert!(keeps(
        &datatype,
        &row(&[("A", Some("\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>"))])
    ));
    assert!(!keeps(
        &datatype,
        &row(&[("A", Some("\"5\"^^<http://www.w3.org/2001/XMLSchema#decimal>"))])
    ));

    let iri = Filter::regex(var("A"), "^<http://example.com/", None).unwrap();
    assert!(keeps(&iri, &row(&[("A", Some("<http://example.com/a>"))])));
}

#[test]
fn same_term_policies() {
    let filter = Filter::same_term(var("A"), var("B"));
    assert!(keeps(&filter, &row(&[("A", Some("\"x\""))])));
    assert!(!keeps(&filter, &row(&[("A", None), ("B", Some("\"x\""))])));
    assert!(keeps(&filter, &row(&[("A", Some("\"x\"")), ("B", Some("\"x\""))])));
    assert!(!keeps(
        &filter,
        &row(&[
            ("A", Some("\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>")),
            ("B", Some("\"01\"^^<http://www.w3.org/2001/XMLSchema#integer>"))
        ])
    ));
}

#[test]
fn in_drops_unparsable_members_and_keeps_undef() {
    let members = InList::parse([Some("\"a\""), Some("garbage"), Some("\"a\""), None, Some("\"b\"")]);
    assert_eq!(
        members.members(),
        &[Some(term("\"a\"")), None, Some(term("\"b\""))]
    );

    let filter = Filter::In(var("A"), members);
    assert!(keeps(&filter, &row(&[("A", Some("\"b\""))])));
    assert!(!keeps(&filter, &row(&[("A", Some("\"c\""))])));
    assert!(!keeps(&filter, &row(&[("A", None)])));
    assert!(keeps(&filter, &row(&[])));
}

#[test]
fn exists_and_not_exists() {
    let pattern = Pattern::new(var("s"), ex("p"), var("o")).unwrap();
    let exists = Filter::exists(pattern.clone()).unwrap();
    let not_exists = Filter::not_exists(pattern.clone()).unwrap();
    let outer = row(&[("s", Some("<http://example.com/a>"))]);

    let unset = SubPatternResults::new();
    assert!(!exists.apply(&outer, &unset, false));
    assert!(not_exists.apply(&outer, &unset, false));

    let mut empty = SubPatternResults::new();
    empty.insert(pattern.clone(), BindingTable::new([var("s"), var("o")]));
    for outer in [outer.clone(), row(&[]), row(&[("s", None)])] {
        assert!(not_exists.apply(&outer, &empty, false));
        assert!(!exists.apply(&outer, &empty, false));
    }

    let mut results = SubPatternResults::new();
    results.insert(
        pattern,
        BindingTable::from_rows(
            [var("s"), var("o")],
            [
                row(&[("s", Some("<http://example.com/a>")), ("o", Some("\"1\""))]),
                row(&[("s", None), ("o", Some("\"2\""))]),
            ],
        ),
    );
    assert!(exists.apply(&outer, &results, false));
    assert!(!not_exists.apply(&outer, &results, false));

    let other = row(&[("s", Some("<http://example.com/b>"))]);
    assert!(!exists.apply(&other, &results, false));
    assert!(!exists.apply(&row(&[("s", None)]), &results, false));
}

#[test]
fn ground_sub_pattern_is_rejected() {
    let ground = Pattern::new(ex("s"), ex("p"), ex("o")).unwrap();
    assert!(matches!(
        Filter::exists(ground.clone()),
        Err(ConstructionError::GroundSubPattern(_))
    ));
    assert!(Filter::not_exists(ground).is_err());
}

#[test]
fn values_filter_treats_undef_as_wildcard() {
    let values = Values::new([
        (var("A"), vec![None]),
        (var("B"), vec![Some(term("\"b\""))]),
    ])
    .unwrap();
    let filter = Filter::Values(values);

    assert!(keeps(&filter, &row(&[("A", Some("\"anything\"")), ("B", Some("\"b\""))])));
    assert!(!keeps(&filter, &row(&[("A", Some("\"anything\"")), ("B", Some("\"c\""))])));
    assert!(keeps(&filter, &row(&[("A", None)])));
    assert!(!keeps(&filter, &row(&[("B", None)])));
}

#[test]
fn values_filter_requires_a_common_tuple() {
    let values = Values::new([
        (var("A"), vec![Some(term("\"1\"")), Some(term("\"2\""))]),
        (var("B"), vec![Some(term("\"x\"")), Some(term("\"y\""))]),
    ])
    .unwrap();
    let filter = Filter::Values(values);
    assert!(keeps(&filter, &row(&[("A", Some("\"1\"")), ("B", Some("\"x\""))])));
    assert!(!keeps(&filter, &row(&[("A", Some("\"1\"")), ("B", Some("\"y\""))])));
}

#[test]
fn values_filter_without_tuples() {
    let filter = Filter::Values(Values::new([(var("A"), vec![])]).unwrap());
    assert!(keeps(&filter, &row(&[("B", Some("\"x\""))])));
    assert!(keeps(&filter, &row(&[])));
    assert!(!keeps(&filter, &row(&[("A", Some("\"x\""))])));
    assert!(!keeps(&filter, &row(&[("A", None)])));
}

#[test]
fn combinators_compose_decisions() {
    let rows = [
        row(&[]),
        row(&[("A", None)]),
        row(&[("A", Some("\"x\""))]),
        row(&[("A", Some("<http://example.com/a>"))]),
        row(&[("A", Some("\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>"))]),
    ];
    let leaves = [
        Filter::Bound(var("A")),
        Filter::IsUri(var("A")),
        Filter::IsLiteral(var("A")),
        Filter::comparison(
            ComparisonFlavor::GreaterThan,
            var("A"),
            RdfTerm::typed_literal("1", xsd::INTEGER),
        ),
    ];
    let context = SubPatternResults::new();
    for row in &rows {
        for a in &leaves {
            for b in &leaves {
                let a_keeps = a.apply(row, &context, false);
                let b_keeps = b.apply(row, &context, false);
                assert_eq!(a.clone().and(b.clone()).apply(row, &context, false), a_keeps && b_keeps);
                assert_eq!(a.clone().or(b.clone()).apply(row, &context, false), a_keeps || b_keeps);
                assert_eq!(a.clone().negate().apply(row, &context, false), !a_keeps);
                assert_eq!(a.apply(row, &context, true), !a_keeps);

                let nested = a.clone().and(b.clone()).negate().or(a.clone());
                assert_eq!(
                    nested.apply(row, &context, false),
                    !(a_keeps && b_keeps) || a_keeps
                );
            }
        }
    }
}

#[test]
fn comparison_operand_swap() {
    let float = "\"27.7\"^^<http://www.w3.org/2001/XMLSchema#float>";
    let rows = [
        row(&[
            ("A", Some(float)),
            ("B", Some("\"12\"^^<http://www.w3.org/2001/XMLSchema#decimal>")),
        ]),
        row(&[
            ("A", Some(float)),
            ("B", Some("\"---30\"^^<http://www.w3.org/2001/XMLSchema#gDay>")),
        ]),
        row(&[("A", None), ("B", None)]),
        row(&[("A", Some("\"a\"")), ("B", None)]),
        row(&[("A", Some("\"a\""))]),
        row(&[("A", Some("\"a\"@en")), ("B", Some("\"a\"@de"))]),
    ];
    for row in &rows {
        for flavor in [
            ComparisonFlavor::EqualTo,
            ComparisonFlavor::NotEqualTo,
            ComparisonFlavor::LessThan,
            ComparisonFlavor::LessThanOrEqualTo,
            ComparisonFlavor::GreaterThan,
            ComparisonFlavor::GreaterThanOrEqualTo,
        ] {
            let filter = Filter::comparison(flavor, var("A"), var("B"));
            let swapped = Filter::comparison(flavor.flip(), var("B"), var("A"));
            assert_eq!(keeps(&filter, row), keeps(&swapped, row), "{filter}");
        }
    }
}

#[test]
fn render_filters() {
    let filter = Filter::lang_matches(var("B"), "en")
        .unwrap()
        .and(Filter::regex(var("A"), "^a", Some("i")).unwrap())
        .or(Filter::not_exists(Pattern::new(var("A"), ex("p"), var("B")).unwrap())
            .unwrap()
            .negate());
    insta::assert_snapshot!(filter, @r#"((langMatches(LANG(?B), "en") && REGEX(STR(?A), "^a", "i")) || (!NOT EXISTS { ?A <http://example.com/p> ?B . }))"#);
}

#[test]
fn render_values_filters() {
    let values = Values::new([
        (var("A"), vec![Some(term("\"a\"")), None]),
        (var("B"), vec![Some(term("\"b\""))]),
    ])
    .unwrap();
    insta::assert_snapshot!(
        Filter::Values(values),
        @r#"(((!BOUND(?A) || sameTerm(?A, "a")) && (!BOUND(?B) || sameTerm(?B, "b"))) || true)"#
    );

    let empty = Values::new([(var("A"), vec![])]).unwrap();
    insta::assert_snapshot!(Filter::Values(empty), @"(!BOUND(?A))");
}
