pub mod arithmetic;
pub mod exponential;
pub mod number_theory;
pub mod special;
pub mod trigonometry;

use crate::ast::Number;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::LazyLock;

/// A supported function. Arguments arrive evaluated; the error is a
/// human-readable reason (arity, argument type, domain).
pub type Function = fn(&[Number]) -> Result<Number, String>;

const DOMAIN_ERROR: &str = "math domain error";
const RANGE_ERROR: &str = "math range error";

/// Closed name -> function table.
pub struct FunctionTable {
    functions: BTreeMap<&'static str, Function>,
}

impl FunctionTable {
    fn new() -> Self {
        Self {
            functions: BTreeMap::new(),
        }
    }

    fn register_function(&mut self, name: &'static str, function: Function) {
        self.functions.insert(name, function);
    }

    pub fn get(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    /// Whether some function name starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.functions
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .next()
            .is_some_and(|(name, _)| name.starts_with(prefix))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }
}

static SUPPORTED_FUNCTIONS: LazyLock<FunctionTable> = LazyLock::new(|| {
    let mut table = FunctionTable::new();
    arithmetic::register(&mut table);
    exponential::register(&mut table);
    number_theory::register(&mut table);
    special::register(&mut table);
    trigonometry::register(&mut table);
    table
});

pub fn supported_functions() -> &'static FunctionTable {
    &SUPPORTED_FUNCTIONS
}

pub fn lookup(name: &str) -> Option<Function> {
    SUPPORTED_FUNCTIONS.get(name)
}

pub fn is_function_prefix(prefix: &str) -> bool {
    SUPPORTED_FUNCTIONS.has_prefix(prefix)
}

/// Wraps a float result, turning NaN from non-NaN inputs into a domain
/// error and infinity from finite inputs into a range error.
fn checked_float(result: f64, inputs: &[f64]) -> Result<Number, String> {
    if result.is_nan() && !inputs.iter().any(|v| v.is_nan()) {
        return Err(DOMAIN_ERROR.to_string());
    }
    if result.is_infinite() && inputs.iter().all(|v| v.is_finite()) {
        return Err(RANGE_ERROR.to_string());
    }
    Ok(Number::Float(result))
}

/// Integral float to `Int`, or `Float` when it does not fit `i64`.
fn float_to_int(value: f64) -> Result<Number, String> {
    if value.is_nan() {
        return Err("cannot convert float NaN to integer".to_string());
    }
    if value.is_infinite() {
        return Err("cannot convert float infinity to integer".to_string());
    }
    if value >= -9.223_372_036_854_776e18 && value < 9.223_372_036_854_776e18 {
        Ok(Number::Int(value as i64))
    } else {
        Ok(Number::Float(value))
    }
}
