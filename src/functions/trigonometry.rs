use super::{checked_float, FunctionTable, DOMAIN_ERROR};
use crate::ast::Number;
use strmath_macros::strmath_fn;

pub fn register(table: &mut FunctionTable) {
    table.register_function("sin", sin);
    table.register_function("cos", cos);
    table.register_function("tan", tan);
    table.register_function("asin", asin);
    table.register_function("acos", acos);
    table.register_function("atan", atan);
    table.register_function("atan2", atan2);
    table.register_function("sinh", sinh);
    table.register_function("cosh", cosh);
    table.register_function("tanh", tanh);
    table.register_function("asinh", asinh);
    table.register_function("acosh", acosh);
    table.register_function("atanh", atanh);
    table.register_function("degrees", degrees);
    table.register_function("radians", radians);
    table.register_function("hypot", hypot);
}

// Angles are in radians.

#[strmath_fn]
fn sin(x: f64) -> Result<Number, String> {
    checked_float(x.sin(), &[x])
}

#[strmath_fn]
fn cos(x: f64) -> Result<Number, String> {
    checked_float(x.cos(), &[x])
}

#[strmath_fn]
fn tan(x: f64) -> Result<Number, String> {
    checked_float(x.tan(), &[x])
}

#[strmath_fn]
fn asin(x: f64) -> Result<Number, String> {
    checked_float(x.asin(), &[x])
}

#[strmath_fn]
fn acos(x: f64) -> Result<Number, String> {
    checked_float(x.acos(), &[x])
}

#[strmath_fn]
fn atan(x: f64) -> Result<Number, String> {
    Ok(Number::Float(x.atan()))
}

#[strmath_fn]
fn atan2(y: f64, x: f64) -> Result<Number, String> {
    Ok(Number::Float(y.atan2(x)))
}

#[strmath_fn]
fn sinh(x: f64) -> Result<Number, String> {
    checked_float(x.sinh(), &[x])
}

#[strmath_fn]
fn cosh(x: f64) -> Result<Number, String> {
    checked_float(x.cosh(), &[x])
}

#[strmath_fn]
fn tanh(x: f64) -> Result<Number, String> {
    Ok(Number::Float(x.tanh()))
}

#[strmath_fn]
fn asinh(x: f64) -> Result<Number, String> {
    Ok(Number::Float(x.asinh()))
}

#[strmath_fn]
fn acosh(x: f64) -> Result<Number, String> {
    checked_float(x.acosh(), &[x])
}

#[strmath_fn]
fn atanh(x: f64) -> Result<Number, String> {
    if x.abs() >= 1.0 {
        return Err(DOMAIN_ERROR.to_string());
    }
    Ok(Number::Float(x.atanh()))
}

#[strmath_fn]
fn degrees(x: f64) -> Result<Number, String> {
    Ok(Number::Float(x.to_degrees()))
}

#[strmath_fn]
fn radians(x: f64) -> Result<Number, String> {
    Ok(Number::Float(x.to_radians()))
}

/// Euclidean norm of any number of coordinates.
#[strmath_fn]
fn hypot(coordinates: Vec<f64>) -> Result<Number, String> {
    if coordinates.iter().any(|c| c.is_infinite()) {
        return Ok(Number::Float(f64::INFINITY));
    }
    let norm = coordinates.iter().fold(0.0_f64, |acc, c| acc.hypot(*c));
    Ok(Number::Float(norm))
}
