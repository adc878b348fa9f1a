use rdf_algebra_model::{Cell, RdfTerm, ThinError, ThinResult, TypedValueRef};
use std::cmp::Ordering;
use std::fmt;

/// The operator of a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonFlavor {
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
}

impl ComparisonFlavor {
    /// Returns the flavor that yields the same result when the operands are swapped.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            ComparisonFlavor::EqualTo => ComparisonFlavor::EqualTo,
            ComparisonFlavor::NotEqualTo => ComparisonFlavor::NotEqualTo,
            ComparisonFlavor::LessThan => ComparisonFlavor::GreaterThan,
            ComparisonFlavor::LessThanOrEqualTo => ComparisonFlavor::GreaterThanOrEqualTo,
            ComparisonFlavor::GreaterThan => ComparisonFlavor::LessThan,
            ComparisonFlavor::GreaterThanOrEqualTo => ComparisonFlavor::LessThanOrEqualTo,
        }
    }

    pub fn as_operator(self) -> &'static str {
        match self {
            ComparisonFlavor::EqualTo => "=",
            ComparisonFlavor::NotEqualTo => "!=",
            ComparisonFlavor::LessThan => "<",
            ComparisonFlavor::LessThanOrEqualTo => "<=",
            ComparisonFlavor::GreaterThan => ">",
            ComparisonFlavor::GreaterThanOrEqualTo => ">=",
        }
    }

    fn matches(self, ordering: Ordering) -> bool {
        match self {
            ComparisonFlavor::EqualTo => ordering.is_eq(),
            ComparisonFlavor::NotEqualTo => ordering.is_ne(),
            ComparisonFlavor::LessThan => ordering.is_lt(),
            ComparisonFlavor::LessThanOrEqualTo => ordering.is_le(),
            ComparisonFlavor::GreaterThan => ordering.is_gt(),
            ComparisonFlavor::GreaterThanOrEqualTo => ordering.is_ge(),
        }
    }
}

impl fmt::Display for ComparisonFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_operator())
    }
}

/// The outcome of comparing two terms whose comparison is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermOrdering {
    /// The terms are ordered.
    Ordered(Ordering),
    /// The terms are known to be different but have no order (e.g., literals with different
    /// languages, or an IRI and a literal). Only `=` and `!=` are defined.
    Distinct,
}

impl TermOrdering {
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            TermOrdering::Ordered(ordering) => TermOrdering::Ordered(ordering.reverse()),
            TermOrdering::Distinct => TermOrdering::Distinct,
        }
    }
}

/// Compares two terms in their value spaces.
///
/// Returns an error if the terms are incomparable: literals of different datatypes that cannot
/// be promoted to a common type, or literals with an invalid lexical form.
pub fn compare_terms(lhs: &RdfTerm, rhs: &RdfTerm) -> ThinResult<TermOrdering> {
    let lhs = TypedValueRef::try_from(lhs)?;
    let rhs = TypedValueRef::try_from(rhs)?;
    compare_typed_values(lhs, rhs)
}

fn ordered<T: PartialOrd>(lhs: &T, rhs: &T) -> TermOrdering {
    lhs.partial_cmp(rhs)
        .map_or(TermOrdering::Distinct, TermOrdering::Ordered)
}

fn compare_typed_values(
    lhs: TypedValueRef<'_>,
    rhs: TypedValueRef<'_>,
) -> ThinResult<TermOrdering> {
    use TypedValueRef as V;

    let ordering = match (lhs, rhs) {
        (V::NamedNode(lhs), V::NamedNode(rhs)) => {
            TermOrdering::Ordered(lhs.as_str().cmp(rhs.as_str()))
        }
        (V::BlankNode(lhs), V::BlankNode(rhs)) => {
            TermOrdering::Ordered(lhs.as_str().cmp(rhs.as_str()))
        }
        (V::NamedNode(_) | V::BlankNode(_), _) | (_, V::NamedNode(_) | V::BlankNode(_)) => {
            TermOrdering::Distinct
        }
        (V::NumericLiteral(lhs), V::NumericLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::BooleanLiteral(lhs), V::BooleanLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::SimpleLiteral(lhs), V::SimpleLiteral(rhs)) => TermOrdering::Ordered(lhs.cmp(rhs)),
        (
            V::LanguageStringLiteral {
                value: lhs_value,
                language: lhs_language,
                direction: lhs_direction,
            },
            V::LanguageStringLiteral {
                value: rhs_value,
                language: rhs_language,
                direction: rhs_direction,
            },
        ) => {
            if lhs_language == rhs_language && lhs_direction == rhs_direction {
                TermOrdering::Ordered(lhs_value.cmp(rhs_value))
            } else {
                TermOrdering::Distinct
            }
        }
        (V::SimpleLiteral(_), V::LanguageStringLiteral { .. })
        | (V::LanguageStringLiteral { .. }, V::SimpleLiteral(_)) => TermOrdering::Distinct,
        (V::DateTimeLiteral(lhs), V::DateTimeLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::TimeLiteral(lhs), V::TimeLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::DateLiteral(lhs), V::DateLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::GYearMonthLiteral(lhs), V::GYearMonthLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::GYearLiteral(lhs), V::GYearLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::GMonthDayLiteral(lhs), V::GMonthDayLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::GDayLiteral(lhs), V::GDayLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::GMonthLiteral(lhs), V::GMonthLiteral(rhs)) => ordered(&lhs, &rhs),
        (V::DurationLiteral(lhs), V::DurationLiteral(rhs)) => ordered(&lhs, &rhs),
        (
            V::OtherLiteral {
                value: lhs_value,
                datatype: lhs_datatype,
            },
            V::OtherLiteral {
                value: rhs_value,
                datatype: rhs_datatype,
            },
        ) if lhs_datatype == rhs_datatype => TermOrdering::Ordered(lhs_value.cmp(rhs_value)),
        _ => return ThinError::expected(),
    };
    Ok(ordering)
}

/// Evaluates `lhs flavor rhs` on two terms.
pub fn compare(flavor: ComparisonFlavor, lhs: &RdfTerm, rhs: &RdfTerm) -> ThinResult<bool> {
    match compare_terms(lhs, rhs)? {
        TermOrdering::Ordered(ordering) => Ok(flavor.matches(ordering)),
        TermOrdering::Distinct => match flavor {
            ComparisonFlavor::EqualTo => Ok(false),
            ComparisonFlavor::NotEqualTo => Ok(true),
            _ => ThinError::expected(),
        },
    }
}

/// Evaluates `lhs flavor rhs` on two cells of a row.
///
/// A missing column fails the comparison. A missing value fails it as well, except if both
/// values are missing: then the operands count as equal for `=` and `!=`.
pub fn compare_cells(flavor: ComparisonFlavor, lhs: Cell<'_>, rhs: Cell<'_>) -> ThinResult<bool> {
    match (lhs, rhs) {
        (Cell::Value(lhs), Cell::Value(rhs)) => compare(flavor, lhs, rhs),
        (Cell::NoValue, Cell::NoValue) => match flavor {
            ComparisonFlavor::EqualTo => Ok(true),
            ComparisonFlavor::NotEqualTo => Ok(false),
            _ => ThinError::expected(),
        },
        _ => ThinError::expected(),
    }
}
