use crate::vocab::xsd;
use crate::{RdfTerm, ThinError, ThinResult};
use oxsdatatypes::{Decimal, Double, Float, Integer};
use std::cmp::Ordering;

/// A numeric value of one of the four primitive numeric families.
///
/// Values of the `xsd:integer` family (`xsd:int`, `xsd:short`, ...) are represented as
/// [Integer].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Numeric {
    Integer(Integer),
    Decimal(Decimal),
    Float(Float),
    Double(Double),
}

/// Two numeric operands promoted to their widest common type.
///
/// The promotion order is `integer < decimal < float < double`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericPair {
    Integer(Integer, Integer),
    Decimal(Decimal, Decimal),
    Float(Float, Float),
    Double(Double, Double),
}

impl NumericPair {
    pub fn promote(lhs: Numeric, rhs: Numeric) -> Self {
        match (lhs, rhs) {
            (Numeric::Integer(lhs), Numeric::Integer(rhs)) => NumericPair::Integer(lhs, rhs),
            (Numeric::Integer(lhs), Numeric::Decimal(rhs)) => {
                NumericPair::Decimal(Decimal::from(lhs), rhs)
            }
            (Numeric::Integer(lhs), Numeric::Float(rhs)) => {
                NumericPair::Float(Float::from(lhs), rhs)
            }
            (Numeric::Integer(lhs), Numeric::Double(rhs)) => {
                NumericPair::Double(Double::from(lhs), rhs)
            }
            (Numeric::Decimal(lhs), Numeric::Integer(rhs)) => {
                NumericPair::Decimal(lhs, Decimal::from(rhs))
            }
            (Numeric::Decimal(lhs), Numeric::Decimal(rhs)) => NumericPair::Decimal(lhs, rhs),
            (Numeric::Decimal(lhs), Numeric::Float(rhs)) => {
                NumericPair::Float(Float::from(lhs), rhs)
            }
            (Numeric::Decimal(lhs), Numeric::Double(rhs)) => {
                NumericPair::Double(Double::from(lhs), rhs)
            }
            (Numeric::Float(lhs), Numeric::Integer(rhs)) => {
                NumericPair::Float(lhs, Float::from(rhs))
            }
            (Numeric::Float(lhs), Numeric::Decimal(rhs)) => {
                NumericPair::Float(lhs, Float::from(rhs))
            }
            (Numeric::Float(lhs), Numeric::Float(rhs)) => NumericPair::Float(lhs, rhs),
            (Numeric::Float(lhs), Numeric::Double(rhs)) => {
                NumericPair::Double(Double::from(lhs), rhs)
            }
            (Numeric::Double(lhs), Numeric::Integer(rhs)) => {
                NumericPair::Double(lhs, Double::from(rhs))
            }
            (Numeric::Double(lhs), Numeric::Decimal(rhs)) => {
                NumericPair::Double(lhs, Double::from(rhs))
            }
            (Numeric::Double(lhs), Numeric::Float(rhs)) => {
                NumericPair::Double(lhs, Double::from(rhs))
            }
            (Numeric::Double(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs, rhs),
        }
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match NumericPair::promote(*self, *other) {
            NumericPair::Integer(lhs, rhs) => Some(lhs.cmp(&rhs)),
            NumericPair::Decimal(lhs, rhs) => Some(lhs.cmp(&rhs)),
            NumericPair::Float(lhs, rhs) => lhs.partial_cmp(&rhs),
            NumericPair::Double(lhs, rhs) => lhs.partial_cmp(&rhs),
        }
    }
}

impl Numeric {
    pub fn checked_add(self, rhs: Self) -> ThinResult<Self> {
        match NumericPair::promote(self, rhs) {
            NumericPair::Integer(lhs, rhs) => lhs.checked_add(rhs).map(Numeric::Integer),
            NumericPair::Decimal(lhs, rhs) => lhs.checked_add(rhs).map(Numeric::Decimal),
            NumericPair::Float(lhs, rhs) => Some(Numeric::Float(lhs + rhs)),
            NumericPair::Double(lhs, rhs) => Some(Numeric::Double(lhs + rhs)),
        }
        .ok_or(ThinError {})
    }

    pub fn checked_sub(self, rhs: Self) -> ThinResult<Self> {
        match NumericPair::promote(self, rhs) {
            NumericPair::Integer(lhs, rhs) => lhs.checked_sub(rhs).map(Numeric::Integer),
            NumericPair::Decimal(lhs, rhs) => lhs.checked_sub(rhs).map(Numeric::Decimal),
            NumericPair::Float(lhs, rhs) => Some(Numeric::Float(lhs - rhs)),
            NumericPair::Double(lhs, rhs) => Some(Numeric::Double(lhs - rhs)),
        }
        .ok_or(ThinError {})
    }

    pub fn checked_mul(self, rhs: Self) -> ThinResult<Self> {
        match NumericPair::promote(self, rhs) {
            NumericPair::Integer(lhs, rhs) => lhs.checked_mul(rhs).map(Numeric::Integer),
            NumericPair::Decimal(lhs, rhs) => lhs.checked_mul(rhs).map(Numeric::Decimal),
            NumericPair::Float(lhs, rhs) => Some(Numeric::Float(lhs * rhs)),
            NumericPair::Double(lhs, rhs) => Some(Numeric::Double(lhs * rhs)),
        }
        .ok_or(ThinError {})
    }

    /// Divides two numbers. Integer division produces an `xsd:decimal`.
    pub fn checked_div(self, rhs: Self) -> ThinResult<Self> {
        match NumericPair::promote(self, rhs) {
            NumericPair::Integer(lhs, rhs) => Decimal::from(lhs)
                .checked_div(Decimal::from(rhs))
                .map(Numeric::Decimal),
            NumericPair::Decimal(lhs, rhs) => lhs.checked_div(rhs).map(Numeric::Decimal),
            NumericPair::Float(lhs, rhs) => Some(Numeric::Float(lhs / rhs)),
            NumericPair::Double(lhs, rhs) => Some(Numeric::Double(lhs / rhs)),
        }
        .ok_or(ThinError {})
    }

    pub fn checked_neg(self) -> ThinResult<Self> {
        match self {
            Numeric::Integer(value) => value.checked_neg().map(Numeric::Integer),
            Numeric::Decimal(value) => value.checked_neg().map(Numeric::Decimal),
            Numeric::Float(value) => Some(Numeric::Float(-value)),
            Numeric::Double(value) => Some(Numeric::Double(-value)),
        }
        .ok_or(ThinError {})
    }

    pub fn checked_abs(self) -> ThinResult<Self> {
        match self {
            Numeric::Integer(value) => value.checked_abs().map(Numeric::Integer),
            Numeric::Decimal(value) => value.checked_abs().map(Numeric::Decimal),
            Numeric::Float(value) => Some(Numeric::Float(value.abs())),
            Numeric::Double(value) => Some(Numeric::Double(value.abs())),
        }
        .ok_or(ThinError {})
    }

    /// The effective boolean value: `false` for zero and NaN.
    pub fn effective_boolean_value(self) -> bool {
        match self {
            Numeric::Integer(value) => value != Integer::from(0),
            Numeric::Decimal(value) => value != Decimal::from(Integer::from(0)),
            Numeric::Float(value) => {
                let value = f32::from(value);
                value != 0.0 && !value.is_nan()
            }
            Numeric::Double(value) => {
                let value = f64::from(value);
                value != 0.0 && !value.is_nan()
            }
        }
    }

    /// Converts the value into a typed literal using the canonical datatype of its family.
    pub fn into_term(self) -> RdfTerm {
        match self {
            Numeric::Integer(value) => RdfTerm::typed_literal(value.to_string(), xsd::INTEGER),
            Numeric::Decimal(value) => RdfTerm::typed_literal(value.to_string(), xsd::DECIMAL),
            Numeric::Float(value) => RdfTerm::typed_literal(value.to_string(), xsd::FLOAT),
            Numeric::Double(value) => RdfTerm::typed_literal(value.to_string(), xsd::DOUBLE),
        }
    }
}

impl From<Integer> for Numeric {
    fn from(value: Integer) -> Self {
        Numeric::Integer(value)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Integer(Integer::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn promotion_picks_widest_type() {
        let integer = Numeric::Integer(Integer::from(12));
        let decimal = Numeric::Decimal(Decimal::from_str("12.5").unwrap());
        let float = Numeric::Float(Float::from(27.7_f32));
        assert!(matches!(
            NumericPair::promote(integer, decimal),
            NumericPair::Decimal(_, _)
        ));
        assert!(matches!(
            NumericPair::promote(decimal, float),
            NumericPair::Float(_, _)
        ));
        assert_eq!(float.partial_cmp(&decimal), Some(Ordering::Greater));
    }

    #[test]
    fn integer_division_is_decimal() {
        let result = Numeric::from(7).checked_div(Numeric::from(2)).unwrap();
        assert_eq!(
            result.into_term().to_string(),
            "\"3.5\"^^<http://www.w3.org/2001/XMLSchema#decimal>"
        );
        assert!(Numeric::from(1).checked_div(Numeric::from(0)).is_err());
    }

    #[test]
    fn nan_is_not_comparable() {
        let nan = Numeric::Double(Double::from(f64::NAN));
        assert_eq!(nan.partial_cmp(&Numeric::from(1)), None);
        assert!(!nan.effective_boolean_value());
    }
}
