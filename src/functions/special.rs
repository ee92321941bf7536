use super::{checked_float, FunctionTable, DOMAIN_ERROR};
use crate::ast::Number;
use strmath_macros::strmath_fn;

pub fn register(table: &mut FunctionTable) {
    table.register_function("gamma", gamma);
    table.register_function("lgamma", lgamma);
    table.register_function("erf", erf);
    table.register_function("erfc", erfc);
}

/// Poles of the gamma function: zero and the negative integers.
fn is_pole(x: f64) -> bool {
    x <= 0.0 && x.fract() == 0.0
}

#[strmath_fn]
fn gamma(x: f64) -> Result<Number, String> {
    if is_pole(x) || x == f64::NEG_INFINITY {
        return Err(DOMAIN_ERROR.to_string());
    }
    checked_float(libm::tgamma(x), &[x])
}

/// Natural logarithm of `|gamma(x)|`.
#[strmath_fn]
fn lgamma(x: f64) -> Result<Number, String> {
    if is_pole(x) {
        return Err(DOMAIN_ERROR.to_string());
    }
    checked_float(libm::lgamma(x), &[x])
}

#[strmath_fn]
fn erf(x: f64) -> Result<Number, String> {
    Ok(Number::Float(libm::erf(x)))
}

#[strmath_fn]
fn erfc(x: f64) -> Result<Number, String> {
    Ok(Number::Float(libm::erfc(x)))
}
