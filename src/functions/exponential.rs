use super::{checked_float, FunctionTable, DOMAIN_ERROR};
use crate::ast::Number;
use strmath_macros::strmath_fn;

pub fn register(table: &mut FunctionTable) {
    table.register_function("sqrt", sqrt);
    table.register_function("exp", exp);
    table.register_function("expm1", expm1);
    table.register_function("log", log);
    table.register_function("log10", log10);
    table.register_function("log2", log2);
    table.register_function("log1p", log1p);
    table.register_function("cbrt", cbrt);
    table.register_function("exp2", exp2);
    table.register_function("ldexp", ldexp);
}

#[strmath_fn]
fn sqrt(x: f64) -> Result<Number, String> {
    checked_float(x.sqrt(), &[x])
}

#[strmath_fn]
fn exp(x: f64) -> Result<Number, String> {
    checked_float(x.exp(), &[x])
}

#[strmath_fn]
fn expm1(x: f64) -> Result<Number, String> {
    checked_float(x.exp_m1(), &[x])
}

/// Natural logarithm, or logarithm to `base` when given.
#[strmath_fn]
fn log(x: f64, base: Option<f64>) -> Result<Number, String> {
    let numerator = ln(x)?;
    match base {
        None => Ok(Number::Float(numerator)),
        Some(base) => {
            let denominator = ln(base)?;
            if denominator == 0.0 {
                return Err("float division by zero".to_string());
            }
            Ok(Number::Float(numerator / denominator))
        }
    }
}

fn ln(x: f64) -> Result<f64, String> {
    if x.is_nan() {
        return Ok(x);
    }
    if x <= 0.0 {
        return Err(DOMAIN_ERROR.to_string());
    }
    Ok(x.ln())
}

#[strmath_fn]
fn log10(x: f64) -> Result<Number, String> {
    if x <= 0.0 {
        return Err(DOMAIN_ERROR.to_string());
    }
    Ok(Number::Float(x.log10()))
}

#[strmath_fn]
fn log2(x: f64) -> Result<Number, String> {
    if x <= 0.0 {
        return Err(DOMAIN_ERROR.to_string());
    }
    Ok(Number::Float(x.log2()))
}

#[strmath_fn]
fn log1p(x: f64) -> Result<Number, String> {
    if x <= -1.0 {
        return Err(DOMAIN_ERROR.to_string());
    }
    Ok(Number::Float(x.ln_1p()))
}

#[strmath_fn]
fn cbrt(x: f64) -> Result<Number, String> {
    Ok(Number::Float(x.cbrt()))
}

#[strmath_fn]
fn exp2(x: f64) -> Result<Number, String> {
    checked_float(x.exp2(), &[x])
}

/// `x * 2 ** i`.
#[strmath_fn]
fn ldexp(x: f64, i: i64) -> Result<Number, String> {
    let i = i.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    checked_float(libm::ldexp(x, i), &[x])
}
