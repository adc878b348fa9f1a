use crate::vocab::xsd;
use crate::xsd::is_integer_datatype;
use crate::{
    BaseDirection, Boolean, Date, DateTime, DayTimeDuration, Decimal, Double, Duration, Float,
    GDay, GMonth, GMonthDay, GYear, GYearMonth, Integer, Numeric, RdfTerm, ThinError,
    ThinResult, Time, YearMonthDuration,
};
use oxrdf::{BlankNodeRef, NamedNodeRef};
use std::str::FromStr;

/// The value of an RDF term in its datatype's value space.
///
/// Literals of known datatypes are parsed into their value. Literals of unknown datatypes are kept
/// as [TypedValueRef::OtherLiteral]. A literal of a known datatype with an invalid lexical form
/// cannot be converted and yields a [ThinError].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TypedValueRef<'value> {
    NamedNode(NamedNodeRef<'value>),
    BlankNode(BlankNodeRef<'value>),
    BooleanLiteral(Boolean),
    NumericLiteral(Numeric),
    SimpleLiteral(&'value str),
    LanguageStringLiteral {
        value: &'value str,
        language: &'value str,
        direction: Option<BaseDirection>,
    },
    DateTimeLiteral(DateTime),
    TimeLiteral(Time),
    DateLiteral(Date),
    GYearMonthLiteral(GYearMonth),
    GYearLiteral(GYear),
    GMonthDayLiteral(GMonthDay),
    GDayLiteral(GDay),
    GMonthLiteral(GMonth),
    DurationLiteral(Duration),
    OtherLiteral {
        value: &'value str,
        datatype: NamedNodeRef<'value>,
    },
}

impl<'value> TryFrom<&'value RdfTerm> for TypedValueRef<'value> {
    type Error = ThinError;

    fn try_from(term: &'value RdfTerm) -> ThinResult<Self> {
        Ok(match term {
            RdfTerm::Resource(node) => TypedValueRef::NamedNode(node.as_ref()),
            RdfTerm::BlankNode(node) => TypedValueRef::BlankNode(node.as_ref()),
            RdfTerm::PlainLiteral(literal) => match literal.language() {
                Some(language) => TypedValueRef::LanguageStringLiteral {
                    value: literal.value(),
                    language,
                    direction: literal.direction(),
                },
                None => TypedValueRef::SimpleLiteral(literal.value()),
            },
            RdfTerm::TypedLiteral(literal) => {
                parse_typed_literal(literal.value(), literal.datatype())?
            }
        })
    }
}

fn parse_typed_literal<'value>(
    value: &'value str,
    datatype: NamedNodeRef<'value>,
) -> ThinResult<TypedValueRef<'value>> {
    let typed_value = match datatype {
        xsd::BOOLEAN => TypedValueRef::BooleanLiteral(Boolean::from_str(value)?),
        xsd::DECIMAL => TypedValueRef::NumericLiteral(Numeric::Decimal(Decimal::from_str(value)?)),
        xsd::FLOAT => TypedValueRef::NumericLiteral(Numeric::Float(Float::from_str(value)?)),
        xsd::DOUBLE => TypedValueRef::NumericLiteral(Numeric::Double(Double::from_str(value)?)),
        xsd::STRING => TypedValueRef::SimpleLiteral(value),
        xsd::DATE_TIME | xsd::DATE_TIME_STAMP => {
            TypedValueRef::DateTimeLiteral(DateTime::from_str(value)?)
        }
        xsd::TIME => TypedValueRef::TimeLiteral(Time::from_str(value)?),
        xsd::DATE => TypedValueRef::DateLiteral(Date::from_str(value)?),
        xsd::G_YEAR_MONTH => TypedValueRef::GYearMonthLiteral(GYearMonth::from_str(value)?),
        xsd::G_YEAR => TypedValueRef::GYearLiteral(GYear::from_str(value)?),
        xsd::G_MONTH_DAY => TypedValueRef::GMonthDayLiteral(GMonthDay::from_str(value)?),
        xsd::G_DAY => TypedValueRef::GDayLiteral(GDay::from_str(value)?),
        xsd::G_MONTH => TypedValueRef::GMonthLiteral(GMonth::from_str(value)?),
        xsd::DURATION => TypedValueRef::DurationLiteral(Duration::from_str(value)?),
        xsd::YEAR_MONTH_DURATION => {
            TypedValueRef::DurationLiteral(YearMonthDuration::from_str(value)?.into())
        }
        xsd::DAY_TIME_DURATION => {
            TypedValueRef::DurationLiteral(DayTimeDuration::from_str(value)?.into())
        }
        datatype if is_integer_datatype(datatype) => {
            TypedValueRef::NumericLiteral(Numeric::Integer(Integer::from_str(value)?))
        }
        datatype => TypedValueRef::OtherLiteral { value, datatype },
    };
    Ok(typed_value)
}

impl TypedValueRef<'_> {
    /// Returns whether the value is a literal of a numeric datatype.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypedValueRef::NumericLiteral(_))
    }

    /// Returns the value as a string literal with an optional language, if it is one.
    pub fn as_string_literal(&self) -> Option<(&str, Option<&str>)> {
        match *self {
            TypedValueRef::SimpleLiteral(value) => Some((value, None)),
            TypedValueRef::LanguageStringLiteral {
                value, language, ..
            } => Some((value, Some(language))),
            _ => None,
        }
    }

    /// Computes the [effective boolean value](https://www.w3.org/TR/sparql11-query/#ebv).
    pub fn effective_boolean_value(&self) -> ThinResult<bool> {
        match self {
            TypedValueRef::BooleanLiteral(value) => Ok(bool::from(*value)),
            TypedValueRef::NumericLiteral(value) => Ok(value.effective_boolean_value()),
            TypedValueRef::SimpleLiteral(value) => Ok(!value.is_empty()),
            TypedValueRef::LanguageStringLiteral { value, .. } => Ok(!value.is_empty()),
            _ => ThinError::expected(),
        }
    }
}

impl From<bool> for TypedValueRef<'_> {
    fn from(value: bool) -> Self {
        TypedValueRef::BooleanLiteral(value.into())
    }
}

impl From<Numeric> for TypedValueRef<'_> {
    fn from(value: Numeric) -> Self {
        TypedValueRef::NumericLiteral(value)
    }
}

/// Creates an `xsd:boolean` literal.
pub fn boolean_term(value: bool) -> RdfTerm {
    RdfTerm::typed_literal(if value { "true" } else { "false" }, xsd::BOOLEAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_datatypes() {
        let float = RdfTerm::typed_literal("27.7", xsd::FLOAT);
        assert!(TypedValueRef::try_from(&float).unwrap().is_numeric());

        let int = RdfTerm::typed_literal("5", xsd::SHORT);
        assert_eq!(
            TypedValueRef::try_from(&int).unwrap(),
            TypedValueRef::NumericLiteral(Numeric::from(5))
        );

        let day = RdfTerm::typed_literal("---30", xsd::G_DAY);
        assert!(matches!(
            TypedValueRef::try_from(&day).unwrap(),
            TypedValueRef::GDayLiteral(_)
        ));
    }

    #[test]
    fn invalid_lexical_form_is_an_error() {
        let term = RdfTerm::typed_literal("abc", xsd::INTEGER);
        assert!(TypedValueRef::try_from(&term).is_err());
    }

    #[test]
    fn unknown_datatype_is_kept() {
        let term = RdfTerm::typed_literal("x", NamedNodeRef::new_unchecked("http://example.com/dt"));
        assert!(matches!(
            TypedValueRef::try_from(&term).unwrap(),
            TypedValueRef::OtherLiteral { value: "x", .. }
        ));
    }

    #[test]
    fn effective_boolean_value() {
        let empty = RdfTerm::simple_literal("");
        let zero = RdfTerm::typed_literal("0", xsd::INTEGER);
        let iri = RdfTerm::Resource(oxrdf::NamedNode::new_unchecked("http://example.com/"));
        assert_eq!(
            TypedValueRef::try_from(&empty).unwrap().effective_boolean_value(),
            Ok(false)
        );
        assert_eq!(
            TypedValueRef::try_from(&zero).unwrap().effective_boolean_value(),
            Ok(false)
        );
        assert!(TypedValueRef::try_from(&iri)
            .unwrap()
            .effective_boolean_value()
            .is_err());
    }
}
