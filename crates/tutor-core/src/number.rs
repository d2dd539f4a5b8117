//! Numeric values produced by the calculator and the constant table

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;

/// An integer or floating point value.
///
/// Integer arithmetic stays integral until a true division or a float operand
/// is involved, so `7*6` renders as `42` while `(5-1)/2` renders as `2.0`.
/// Integers are unbounded: `2**64` is `18446744073709551616`, not an overflow.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

impl Number {
    /// The value as a float, widening integers.
    ///
    /// Integers beyond the float range come back as an infinity.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(value) => value.to_f64().unwrap_or(f64::NAN),
            Number::Float(value) => *value,
        }
    }

    /// Whether the value has a finite float representation
    pub fn is_finite(&self) -> bool {
        self.as_f64().is_finite()
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(BigInt::from(value))
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::Int(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{}", value),
            Number::Float(value) => f.write_str(&format_float(*value)),
        }
    }
}

impl Serialize for Number {
    /// JSON numbers; integers wider than 64 bits are written as floats
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Int(value) => {
                if let Some(small) = value.to_i64() {
                    serializer.serialize_i64(small)
                } else if let Some(unsigned) = value.to_u64() {
                    serializer.serialize_u64(unsigned)
                } else {
                    serializer.serialize_f64(self.as_f64())
                }
            }
            Number::Float(value) => serializer.serialize_f64(*value),
        }
    }
}

/// Shortest round-trip rendering of a float.
///
/// Decimal exponents in `-4..16` print positionally and always carry a
/// fractional part; anything else prints in scientific form with a signed,
/// at least two digit exponent (`6.02214076e+23`, `1e-05`).
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if (-4..16).contains(&exponent) {
        let positional = value.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
