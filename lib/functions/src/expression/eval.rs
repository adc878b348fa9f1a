use crate::builtin::{compile_pattern, lang_matches};
use crate::comparison::compare;
use crate::{ComparisonFlavor, Expression};
use rdf_algebra_model::{
    boolean_term, BindingRow, Numeric, PlainLiteral, RdfTerm, ThinError, ThinResult,
    TypedValueRef,
};

impl Expression {
    /// Evaluates the expression against `row`.
    pub fn evaluate(&self, row: &BindingRow) -> ThinResult<RdfTerm> {
        match self {
            Expression::Constant(term) => Ok(term.clone()),
            Expression::Variable(variable) => row.term(variable).cloned().ok_or(ThinError {}),
            Expression::Add(lhs, rhs) => {
                numeric_binary(row, lhs, rhs, Numeric::checked_add)
            }
            Expression::Subtract(lhs, rhs) => {
                numeric_binary(row, lhs, rhs, Numeric::checked_sub)
            }
            Expression::Multiply(lhs, rhs) => {
                numeric_binary(row, lhs, rhs, Numeric::checked_mul)
            }
            Expression::Divide(lhs, rhs) => {
                numeric_binary(row, lhs, rhs, Numeric::checked_div)
            }
            Expression::Negate(inner) => Ok(inner.evaluate_numeric(row)?.checked_neg()?.into_term()),
            Expression::Abs(inner) => Ok(inner.evaluate_numeric(row)?.checked_abs()?.into_term()),
            Expression::StrLen(inner) => {
                let literal = inner.evaluate_string(row)?;
                let length = i64::try_from(literal.value().chars().count())
                    .map_err(|_| ThinError {})?;
                Ok(Numeric::from(length).into_term())
            }
            Expression::StrStarts(lhs, rhs) => {
                string_predicate(row, lhs, rhs, |lhs, rhs| lhs.starts_with(rhs))
            }
            Expression::StrEnds(lhs, rhs) => {
                string_predicate(row, lhs, rhs, |lhs, rhs| lhs.ends_with(rhs))
            }
            Expression::Contains(lhs, rhs) => {
                string_predicate(row, lhs, rhs, |lhs, rhs| lhs.contains(rhs))
            }
            Expression::UCase(inner) => {
                let literal = inner.evaluate_string(row)?;
                Ok(literal.with_value(literal.value().to_uppercase()).into())
            }
            Expression::LCase(inner) => {
                let literal = inner.evaluate_string(row)?;
                Ok(literal.with_value(literal.value().to_lowercase()).into())
            }
            Expression::Str(inner) => match inner.evaluate(row)? {
                RdfTerm::BlankNode(_) => ThinError::expected(),
                term => Ok(RdfTerm::simple_literal(term.lexical_form())),
            },
            Expression::Lang(inner) => {
                let term = inner.evaluate(row)?;
                if !term.is_literal() {
                    return ThinError::expected();
                }
                Ok(RdfTerm::simple_literal(term.language().unwrap_or_default()))
            }
            Expression::Datatype(inner) => {
                let term = inner.evaluate(row)?;
                let datatype = term.datatype().ok_or(ThinError {})?;
                Ok(RdfTerm::from(datatype))
            }
            Expression::Concat(args) => evaluate_concat(row, args),
            Expression::And(lhs, rhs) => {
                let lhs = lhs.evaluate_boolean(row);
                if lhs == Ok(false) {
                    return Ok(boolean_term(false));
                }
                match (lhs, rhs.evaluate_boolean(row)) {
                    (Ok(true), Ok(true)) => Ok(boolean_term(true)),
                    (_, Ok(false)) => Ok(boolean_term(false)),
                    _ => ThinError::expected(),
                }
            }
            Expression::Or(lhs, rhs) => {
                let lhs = lhs.evaluate_boolean(row);
                if lhs == Ok(true) {
                    return Ok(boolean_term(true));
                }
                match (lhs, rhs.evaluate_boolean(row)) {
                    (Ok(false), Ok(false)) => Ok(boolean_term(false)),
                    (_, Ok(true)) => Ok(boolean_term(true)),
                    _ => ThinError::expected(),
                }
            }
            Expression::Not(inner) => Ok(boolean_term(!inner.evaluate_boolean(row)?)),
            Expression::Bound(variable) => Ok(boolean_term(row.get(variable).is_bound())),
            Expression::IsUri(inner) => Ok(boolean_term(inner.evaluate(row)?.is_resource())),
            Expression::IsBlank(inner) => Ok(boolean_term(inner.evaluate(row)?.is_blank_node())),
            Expression::IsLiteral(inner) => Ok(boolean_term(inner.evaluate(row)?.is_literal())),
            Expression::IsNumeric(inner) => {
                let term = inner.evaluate(row)?;
                let is_numeric = TypedValueRef::try_from(&term).is_ok_and(|v| v.is_numeric());
                Ok(boolean_term(is_numeric))
            }
            Expression::SameTerm(lhs, rhs) => {
                Ok(boolean_term(lhs.evaluate(row)? == rhs.evaluate(row)?))
            }
            Expression::LangMatches(language, range) => {
                let language = language.evaluate_simple_string(row)?;
                let range = range.evaluate_simple_string(row)?;
                Ok(boolean_term(lang_matches(&language, &range)))
            }
            Expression::Regex(text, pattern, flags) => {
                let text = text.evaluate_string(row)?;
                let pattern = pattern.evaluate_simple_string(row)?;
                let flags = flags
                    .as_ref()
                    .map(|flags| flags.evaluate_simple_string(row))
                    .transpose()?;
                let regex = compile_pattern(&pattern, flags.as_deref()).ok_or(ThinError {})?;
                Ok(boolean_term(regex.is_match(text.value())))
            }
            Expression::In(needle, haystack) => {
                let needle = needle.evaluate(row)?;
                let mut error = false;
                for member in haystack {
                    match member
                        .evaluate(row)
                        .and_then(|member| compare(ComparisonFlavor::EqualTo, &needle, &member))
                    {
                        Ok(true) => return Ok(boolean_term(true)),
                        Ok(false) => {}
                        Err(_) => error = true,
                    }
                }
                if error {
                    ThinError::expected()
                } else {
                    Ok(boolean_term(false))
                }
            }
            Expression::Comparison(flavor, lhs, rhs) => {
                let lhs = lhs.evaluate(row)?;
                let rhs = rhs.evaluate(row)?;
                Ok(boolean_term(compare(*flavor, &lhs, &rhs)?))
            }
            Expression::If(condition, then, otherwise) => {
                if condition.evaluate_boolean(row)? {
                    then.evaluate(row)
                } else {
                    otherwise.evaluate(row)
                }
            }
            Expression::Coalesce(args) => args
                .iter()
                .find_map(|arg| arg.evaluate(row).ok())
                .ok_or(ThinError {}),
        }
    }

    /// Evaluates the expression and computes its effective boolean value.
    pub fn evaluate_boolean(&self, row: &BindingRow) -> ThinResult<bool> {
        let term = self.evaluate(row)?;
        TypedValueRef::try_from(&term)?.effective_boolean_value()
    }

    fn evaluate_numeric(&self, row: &BindingRow) -> ThinResult<Numeric> {
        let term = self.evaluate(row)?;
        match TypedValueRef::try_from(&term)? {
            TypedValueRef::NumericLiteral(value) => Ok(value),
            _ => ThinError::expected(),
        }
    }

    fn evaluate_string(&self, row: &BindingRow) -> ThinResult<PlainLiteral> {
        match self.evaluate(row)? {
            RdfTerm::PlainLiteral(literal) => Ok(literal),
            _ => ThinError::expected(),
        }
    }

    fn evaluate_simple_string(&self, row: &BindingRow) -> ThinResult<String> {
        let literal = self.evaluate_string(row)?;
        if literal.language().is_some() {
            return ThinError::expected();
        }
        Ok(literal.value().to_owned())
    }
}

fn numeric_binary(
    row: &BindingRow,
    lhs: &Expression,
    rhs: &Expression,
    op: impl FnOnce(Numeric, Numeric) -> ThinResult<Numeric>,
) -> ThinResult<RdfTerm> {
    let lhs = lhs.evaluate_numeric(row)?;
    let rhs = rhs.evaluate_numeric(row)?;
    Ok(op(lhs, rhs)?.into_term())
}

/// Evaluates a string function with two arguments.
///
/// The arguments must be compatible: the second argument is either a simple literal or has the
/// same language as the first one.
fn string_predicate(
    row: &BindingRow,
    lhs: &Expression,
    rhs: &Expression,
    predicate: impl FnOnce(&str, &str) -> bool,
) -> ThinResult<RdfTerm> {
    let lhs = lhs.evaluate_string(row)?;
    let rhs = rhs.evaluate_string(row)?;
    if rhs.language().is_some() && rhs.language() != lhs.language() {
        return ThinError::expected();
    }
    Ok(boolean_term(predicate(lhs.value(), rhs.value())))
}

fn evaluate_concat(row: &BindingRow, args: &[Expression]) -> ThinResult<RdfTerm> {
    let mut value = String::new();
    let mut common: Option<PlainLiteral> = None;
    let mut same_language = true;
    for arg in args {
        let literal = arg.evaluate_string(row)?;
        value.push_str(literal.value());
        match &common {
            None => common = Some(literal),
            Some(first) => {
                same_language &= first.language() == literal.language()
                    && first.direction() == literal.direction();
            }
        }
    }
    let result = match common {
        Some(first) if same_language => first.with_value(value),
        _ => PlainLiteral::new(value),
    };
    Ok(result.into())
}
