pub mod ast;
pub mod error;
pub mod functions;

pub use ast::Number;
pub use error::{ExpressionError, Result};

use ast::{build_tree, tokenize};
use log::debug;
use rayon::prelude::*;

/// Parses and evaluates an arithmetic expression.
///
/// Supports integers, decimals, `+ - * / // % **`, parentheses and the
/// functions in [`functions::supported_functions`].
///
/// ```
/// use strmath_rs::{evaluate, Number};
///
/// assert_eq!(evaluate("2 + 3 * 4"), Ok(Number::Int(14)));
/// assert_eq!(evaluate("sqrt(16) + 1"), Ok(Number::Float(5.0)));
/// ```
pub fn evaluate(expression: &str) -> Result<Number> {
    debug!("Evaluating expression: {}", expression);
    let tokens = tokenize(expression)?;
    let tree = build_tree(tokens)?;
    tree.evaluate()
}

/// Evaluates independent expressions in parallel, keeping input order.
pub fn evaluate_batch<S>(expressions: &[S]) -> Vec<Result<Number>>
where
    S: AsRef<str> + Sync,
{
    expressions
        .par_iter()
        .map(|expression| evaluate(expression.as_ref()))
        .collect()
}
