use crate::error::{ExpressionError, Result};
use std::fmt;

/// Result of an evaluation: either an integer or a float.
///
/// Integer arithmetic stays integral until an operation needs a float
/// (true division, a float operand, a negative exponent) or overflows `i64`,
/// in which case the result is promoted to `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(v) => v == 0.0,
        }
    }

    /// Parses a digit run or a `digits.digits` literal.
    pub(crate) fn parse_literal(literal: &str) -> Option<Number> {
        if literal.contains('.') {
            return literal.parse::<f64>().ok().map(Number::Float);
        }
        match literal.parse::<i64>() {
            Ok(n) => Some(Number::Int(n)),
            // too large for i64, keep the magnitude
            Err(_) => literal.parse::<f64>().ok().map(Number::Float),
        }
    }

    pub fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map_or(Number::Float(a as f64 + b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    pub fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_sub(b)
                .map_or(Number::Float(a as f64 - b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() - b.as_f64()),
        }
    }

    pub fn mul(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(b)
                .map_or(Number::Float(a as f64 * b as f64), Number::Int),
            (a, b) => Number::Float(a.as_f64() * b.as_f64()),
        }
    }

    /// True division, always a float.
    pub fn div(self, rhs: Number) -> Result<Number> {
        if rhs.is_zero() {
            return Err(ExpressionError::DivisionByZero);
        }
        Ok(Number::Float(self.as_f64() / rhs.as_f64()))
    }

    /// Division rounding toward negative infinity.
    pub fn floor_div(self, rhs: Number) -> Result<Number> {
        if rhs.is_zero() {
            return Err(ExpressionError::DivisionByZero);
        }
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Ok(match a.checked_div(b) {
                Some(q) if a % b != 0 && ((a < 0) != (b < 0)) => Number::Int(q - 1),
                Some(q) => Number::Int(q),
                // i64::MIN // -1
                None => Number::Float(-(a as f64)),
            }),
            (a, b) => Ok(Number::Float(float_div_mod(a.as_f64(), b.as_f64()).0)),
        }
    }

    /// Remainder carrying the sign of the divisor.
    pub fn modulo(self, rhs: Number) -> Result<Number> {
        if rhs.is_zero() {
            return Err(ExpressionError::DivisionByZero);
        }
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                let r = a.wrapping_rem(b);
                if r != 0 && ((r < 0) != (b < 0)) {
                    Ok(Number::Int(r + b))
                } else {
                    Ok(Number::Int(r))
                }
            }
            (a, b) => Ok(Number::Float(float_div_mod(a.as_f64(), b.as_f64()).1)),
        }
    }

    pub fn pow(self, rhs: Number) -> Result<Number> {
        match (self, rhs) {
            (Number::Int(base), Number::Int(exp)) if exp >= 0 => Ok(match base {
                0 if exp == 0 => Number::Int(1),
                0 | 1 => Number::Int(base),
                -1 if exp % 2 == 0 => Number::Int(1),
                -1 => Number::Int(-1),
                // |base| >= 2 overflows long before the exponent leaves u32
                _ => u32::try_from(exp)
                    .ok()
                    .and_then(|exp| base.checked_pow(exp))
                    .map_or_else(|| Number::Float((base as f64).powf(exp as f64)), Number::Int),
            }),
            (base, exp) => {
                let (base, exp) = (base.as_f64(), exp.as_f64());
                if base == 0.0 && exp < 0.0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                Ok(Number::Float(base.powf(exp)))
            }
        }
    }
}

/// Floor quotient and divisor-signed remainder of two floats.
fn float_div_mod(a: f64, b: f64) -> (f64, f64) {
    let mut rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 {
        if (b < 0.0) != (rem < 0.0) {
            rem += b;
            div -= 1.0;
        }
    } else {
        rem = 0.0_f64.copysign(b);
    }
    let floor_div = if div != 0.0 {
        let floored = div.floor();
        if div - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        }
    } else {
        0.0_f64.copysign(a / b)
    };
    (floor_div, rem)
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(v) => write_float(f, *v),
        }
    }
}

/// Shortest round-trip digits, at least one fractional digit, and exponent
/// form (`1e+16`, `1e-05`) outside `[1e-4, 1e16)`.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        if let Some((mantissa, exponent)) = formatted.split_once('e') {
            let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
            let sign = if exponent < 0 { '-' } else { '+' };
            return write!(f, "{}e{}{:02}", mantissa, sign, exponent.unsigned_abs());
        }
    }

    if value.fract() == 0.0 {
        write!(f, "{:.1}", value)
    } else {
        write!(f, "{}", value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}
