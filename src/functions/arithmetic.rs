use super::{checked_float, float_to_int, FunctionTable, DOMAIN_ERROR, RANGE_ERROR};
use crate::ast::{Number, Operator};
use strmath_macros::strmath_fn;

pub fn register(table: &mut FunctionTable) {
    table.register_function("abs", abs);
    table.register_function("int", int);
    table.register_function("float", float);
    table.register_function("round", round);
    table.register_function("pow", pow);
    table.register_function("fabs", fabs);
    table.register_function("ceil", ceil);
    table.register_function("floor", floor);
    table.register_function("trunc", trunc);
    table.register_function("fmod", fmod);
    table.register_function("remainder", remainder);
    table.register_function("copysign", copysign);
    table.register_function("isfinite", isfinite);
    table.register_function("isinf", isinf);
    table.register_function("isnan", isnan);
    table.register_function("fsum", fsum);
}

#[strmath_fn]
fn abs(x: Number) -> Result<Number, String> {
    Ok(match x {
        Number::Int(n) => n
            .checked_abs()
            .map_or(Number::Float((n as f64).abs()), Number::Int),
        Number::Float(v) => Number::Float(v.abs()),
    })
}

#[strmath_fn]
fn int(x: Number) -> Result<Number, String> {
    match x {
        Number::Int(n) => Ok(Number::Int(n)),
        Number::Float(v) => float_to_int(v.trunc()),
    }
}

#[strmath_fn]
fn float(x: f64) -> Result<Number, String> {
    Ok(Number::Float(x))
}

/// Rounds half to even. Without `ndigits` the result is an integer.
#[strmath_fn]
fn round(x: Number, ndigits: Option<i64>) -> Result<Number, String> {
    match (x, ndigits) {
        (Number::Int(n), None) => Ok(Number::Int(n)),
        (Number::Float(v), None) => float_to_int(v.round_ties_even()),
        (Number::Int(n), Some(digits)) => Ok(round_int(n, digits)),
        (Number::Float(v), Some(digits)) => Ok(Number::Float(round_float(v, digits))),
    }
}

fn round_int(n: i64, digits: i64) -> Number {
    if digits >= 0 {
        return Number::Int(n);
    }
    let scale = match digits
        .checked_neg()
        .and_then(|d| u32::try_from(d).ok())
        .and_then(|d| 10i64.checked_pow(d))
    {
        Some(scale) => scale,
        None => return Number::Int(0),
    };

    let (quotient, rest) = (n.div_euclid(scale), n.rem_euclid(scale));
    let twice = rest * 2;
    let quotient = if twice > scale || (twice == scale && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    };
    quotient
        .checked_mul(scale)
        .map_or(Number::Float(quotient as f64 * scale as f64), Number::Int)
}

fn round_float(value: f64, digits: i64) -> f64 {
    if !value.is_finite() || digits > 308 {
        return value;
    }
    if digits < -308 {
        return 0.0_f64.copysign(value);
    }
    let scale = 10f64.powi(digits.unsigned_abs() as i32);
    if digits >= 0 {
        let scaled = value * scale;
        if scaled.is_finite() {
            scaled.round_ties_even() / scale
        } else {
            value
        }
    } else {
        (value / scale).round_ties_even() * scale
    }
}

/// `pow(x, y)` is `x ** y`; `pow(x, y, m)` is modular exponentiation on ints.
#[strmath_fn]
fn pow(base: Number, exp: Number, modulus: Option<Number>) -> Result<Number, String> {
    match modulus {
        None => Operator::Power.apply(base, exp).map_err(|e| e.to_string()),
        Some(modulus) => match (base, exp, modulus) {
            (Number::Int(base), Number::Int(exp), Number::Int(modulus)) => {
                modular_pow(base, exp, modulus)
            }
            _ => Err(
                "pow() 3rd argument not allowed unless all arguments are integers".to_string(),
            ),
        },
    }
}

fn modular_pow(base: i64, exp: i64, modulus: i64) -> Result<Number, String> {
    if modulus == 0 {
        return Err("pow() 3rd argument cannot be 0".to_string());
    }
    if exp < 0 {
        return Err("pow() negative exponent not supported with a modulus".to_string());
    }

    let m = (modulus as i128).abs();
    let mut base = (base as i128).rem_euclid(m);
    let mut exp = exp as u64;
    let mut result = 1 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    if modulus < 0 && result != 0 {
        result -= m;
    }
    Ok(Number::Int(result as i64))
}

#[strmath_fn]
fn fabs(x: f64) -> Result<Number, String> {
    Ok(Number::Float(x.abs()))
}

#[strmath_fn]
fn ceil(x: Number) -> Result<Number, String> {
    match x {
        Number::Int(n) => Ok(Number::Int(n)),
        Number::Float(v) => float_to_int(v.ceil()),
    }
}

#[strmath_fn]
fn floor(x: Number) -> Result<Number, String> {
    match x {
        Number::Int(n) => Ok(Number::Int(n)),
        Number::Float(v) => float_to_int(v.floor()),
    }
}

#[strmath_fn]
fn trunc(x: Number) -> Result<Number, String> {
    match x {
        Number::Int(n) => Ok(Number::Int(n)),
        Number::Float(v) => float_to_int(v.trunc()),
    }
}

#[strmath_fn]
fn fmod(x: f64, y: f64) -> Result<Number, String> {
    checked_float(x % y, &[x, y])
}

/// IEEE 754 remainder: `x - n * y` with `n` the closest integer to `x / y`.
#[strmath_fn]
fn remainder(x: f64, y: f64) -> Result<Number, String> {
    if x.is_nan() || y.is_nan() {
        return Ok(Number::Float(f64::NAN));
    }
    if x.is_infinite() || y == 0.0 {
        return Err(DOMAIN_ERROR.to_string());
    }
    if y.is_infinite() {
        return Ok(Number::Float(x));
    }
    Ok(Number::Float(x - (x / y).round_ties_even() * y))
}

#[strmath_fn]
fn copysign(x: f64, y: f64) -> Result<Number, String> {
    Ok(Number::Float(x.copysign(y)))
}

fn flag(value: bool) -> Number {
    Number::Int(value as i64)
}

/// `1` when `x` is neither infinite nor NaN, `0` otherwise.
#[strmath_fn]
fn isfinite(x: f64) -> Result<Number, String> {
    Ok(flag(x.is_finite()))
}

#[strmath_fn]
fn isinf(x: f64) -> Result<Number, String> {
    Ok(flag(x.is_infinite()))
}

#[strmath_fn]
fn isnan(x: f64) -> Result<Number, String> {
    Ok(flag(x.is_nan()))
}

/// Correctly rounded sum, tracking exact partial sums.
#[strmath_fn]
fn fsum(values: Vec<f64>) -> Result<Number, String> {
    if values.iter().any(|v| !v.is_finite()) {
        return checked_float(values.iter().sum(), &values);
    }

    let mut partials: Vec<f64> = Vec::new();
    for mut x in values.iter().copied() {
        let mut kept = 0;
        for i in 0..partials.len() {
            let mut y = partials[i];
            if x.abs() < y.abs() {
                (x, y) = (y, x);
            }
            let high = x + y;
            if high.is_infinite() {
                return Err(RANGE_ERROR.to_string());
            }
            let low = y - (high - x);
            if low != 0.0 {
                partials[kept] = low;
                kept += 1;
            }
            x = high;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    let total = partials.iter().rev().fold(0.0, |acc, p| acc + p);
    checked_float(total, &values)
}
