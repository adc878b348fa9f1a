mod eval;

use crate::ComparisonFlavor;
use rdf_algebra_model::{Prefix, RdfTerm, Variable};
use std::fmt;

/// A SPARQL expression that is evaluated against a single row.
///
/// Evaluation either yields a term or fails with a [ThinError](rdf_algebra_model::ThinError).
/// Unbound variables, type mismatches, and invalid lexical forms are failures; expressions never
/// fall back to a default value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    Constant(RdfTerm),
    Variable(Variable),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Negate(Box<Expression>),
    Abs(Box<Expression>),
    StrLen(Box<Expression>),
    StrStarts(Box<Expression>, Box<Expression>),
    StrEnds(Box<Expression>, Box<Expression>),
    Contains(Box<Expression>, Box<Expression>),
    UCase(Box<Expression>),
    LCase(Box<Expression>),
    Str(Box<Expression>),
    Lang(Box<Expression>),
    Datatype(Box<Expression>),
    Concat(Vec<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    Bound(Variable),
    IsUri(Box<Expression>),
    IsBlank(Box<Expression>),
    IsLiteral(Box<Expression>),
    IsNumeric(Box<Expression>),
    SameTerm(Box<Expression>, Box<Expression>),
    LangMatches(Box<Expression>, Box<Expression>),
    /// Text, pattern, and optional flags.
    Regex(Box<Expression>, Box<Expression>, Option<Box<Expression>>),
    In(Box<Expression>, Vec<Expression>),
    Comparison(ComparisonFlavor, Box<Expression>, Box<Expression>),
    If(Box<Expression>, Box<Expression>, Box<Expression>),
    Coalesce(Vec<Expression>),
}

impl Expression {
    pub fn constant(term: impl Into<RdfTerm>) -> Self {
        Expression::Constant(term.into())
    }

    pub fn variable(variable: Variable) -> Self {
        Expression::Variable(variable)
    }

    pub fn comparison(flavor: ComparisonFlavor, lhs: Expression, rhs: Expression) -> Self {
        Expression::Comparison(flavor, Box::new(lhs), Box::new(rhs))
    }

    /// The distinct variables referenced by the expression.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut result = Vec::new();
        self.collect_variables(&mut result);
        result
    }

    fn collect_variables<'a>(&'a self, result: &mut Vec<&'a Variable>) {
        match self {
            Expression::Constant(_) => {}
            Expression::Variable(variable) | Expression::Bound(variable) => {
                if !result.contains(&variable) {
                    result.push(variable);
                }
            }
            Expression::Add(lhs, rhs)
            | Expression::Subtract(lhs, rhs)
            | Expression::Multiply(lhs, rhs)
            | Expression::Divide(lhs, rhs)
            | Expression::StrStarts(lhs, rhs)
            | Expression::StrEnds(lhs, rhs)
            | Expression::Contains(lhs, rhs)
            | Expression::And(lhs, rhs)
            | Expression::Or(lhs, rhs)
            | Expression::SameTerm(lhs, rhs)
            | Expression::LangMatches(lhs, rhs)
            | Expression::Comparison(_, lhs, rhs) => {
                lhs.collect_variables(result);
                rhs.collect_variables(result);
            }
            Expression::Negate(inner)
            | Expression::Abs(inner)
            | Expression::StrLen(inner)
            | Expression::UCase(inner)
            | Expression::LCase(inner)
            | Expression::Str(inner)
            | Expression::Lang(inner)
            | Expression::Datatype(inner)
            | Expression::Not(inner)
            | Expression::IsUri(inner)
            | Expression::IsBlank(inner)
            | Expression::IsLiteral(inner)
            | Expression::IsNumeric(inner) => inner.collect_variables(result),
            Expression::Concat(args) | Expression::Coalesce(args) => {
                for arg in args {
                    arg.collect_variables(result);
                }
            }
            Expression::Regex(text, pattern, flags) => {
                text.collect_variables(result);
                pattern.collect_variables(result);
                if let Some(flags) = flags {
                    flags.collect_variables(result);
                }
            }
            Expression::In(needle, haystack) => {
                needle.collect_variables(result);
                for member in haystack {
                    member.collect_variables(result);
                }
            }
            Expression::If(condition, then, otherwise) => {
                condition.collect_variables(result);
                then.collect_variables(result);
                otherwise.collect_variables(result);
            }
        }
    }

    /// Renders the expression in SPARQL syntax.
    pub fn to_sparql(&self, prefixes: &[Prefix]) -> String {
        let binary = |operator: &str, lhs: &Expression, rhs: &Expression| {
            format!(
                "({} {operator} {})",
                lhs.to_sparql(prefixes),
                rhs.to_sparql(prefixes)
            )
        };
        let call = |name: &str, args: &[&Expression]| {
            let args = args
                .iter()
                .map(|arg| arg.to_sparql(prefixes))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{name}({args})")
        };

        match self {
            Expression::Constant(term) => term.to_sparql(prefixes),
            Expression::Variable(variable) => variable.to_string(),
            Expression::Add(lhs, rhs) => binary("+", lhs, rhs),
            Expression::Subtract(lhs, rhs) => binary("-", lhs, rhs),
            Expression::Multiply(lhs, rhs) => binary("*", lhs, rhs),
            Expression::Divide(lhs, rhs) => binary("/", lhs, rhs),
            Expression::Negate(inner) => format!("(-{})", inner.to_sparql(prefixes)),
            Expression::Abs(inner) => call("ABS", &[inner]),
            Expression::StrLen(inner) => call("STRLEN", &[inner]),
            Expression::StrStarts(lhs, rhs) => call("STRSTARTS", &[lhs, rhs]),
            Expression::StrEnds(lhs, rhs) => call("STRENDS", &[lhs, rhs]),
            Expression::Contains(lhs, rhs) => call("CONTAINS", &[lhs, rhs]),
            Expression::UCase(inner) => call("UCASE", &[inner]),
            Expression::LCase(inner) => call("LCASE", &[inner]),
            Expression::Str(inner) => call("STR", &[inner]),
            Expression::Lang(inner) => call("LANG", &[inner]),
            Expression::Datatype(inner) => call("DATATYPE", &[inner]),
            Expression::Concat(args) => call("CONCAT", &args.iter().collect::<Vec<_>>()),
            Expression::And(lhs, rhs) => binary("&&", lhs, rhs),
            Expression::Or(lhs, rhs) => binary("||", lhs, rhs),
            Expression::Not(inner) => format!("(!{})", inner.to_sparql(prefixes)),
            Expression::Bound(variable) => format!("BOUND({variable})"),
            Expression::IsUri(inner) => call("isIRI", &[inner]),
            Expression::IsBlank(inner) => call("isBLANK", &[inner]),
            Expression::IsLiteral(inner) => call("isLITERAL", &[inner]),
            Expression::IsNumeric(inner) => call("isNUMERIC", &[inner]),
            Expression::SameTerm(lhs, rhs) => call("sameTerm", &[lhs, rhs]),
            Expression::LangMatches(lhs, rhs) => call("langMatches", &[lhs, rhs]),
            Expression::Regex(text, pattern, Some(flags)) => {
                call("REGEX", &[text, pattern, flags])
            }
            Expression::Regex(text, pattern, None) => call("REGEX", &[text, pattern]),
            Expression::In(needle, haystack) => {
                let members = haystack
                    .iter()
                    .map(|member| member.to_sparql(prefixes))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({} IN ({members}))", needle.to_sparql(prefixes))
            }
            Expression::Comparison(flavor, lhs, rhs) => binary(flavor.as_operator(), lhs, rhs),
            Expression::If(condition, then, otherwise) => {
                call("IF", &[condition, then, otherwise])
            }
            Expression::Coalesce(args) => call("COALESCE", &args.iter().collect::<Vec<_>>()),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql(&[]))
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::Variable(variable)
    }
}

impl From<RdfTerm> for Expression {
    fn from(term: RdfTerm) -> Self {
        Expression::Constant(term)
    }
}
