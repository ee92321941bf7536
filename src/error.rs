use thiserror::Error;

/// Every way an expression can fail to parse or evaluate.
///
/// All variants belong to the same "invalid expression" category; callers
/// that only care whether the expression was accepted can treat the enum as
/// a whole.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// Neither a number, an operator, a float nor the start of a function name.
    #[error("Token `{0}` is not a number nor an operator.")]
    InvalidToken(String),

    /// A valid token in a position where it cannot appear.
    #[error("Got an unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("Some braces are not paired")]
    BracesMismatch,

    #[error("`{0}` is not a valid operator")]
    InvalidOperator(String),

    /// Input ended while a function name or its argument list was still open.
    #[error("Function `{0}` is not complete")]
    IncompleteFunction(String),

    /// Unknown function, or a supported one that rejected its arguments.
    #[error("Function `{name}` is invalid: {reason}")]
    InvalidFunction { name: String, reason: String },

    #[error("Division by zero")]
    DivisionByZero,

    /// Nothing to evaluate: empty input, `()` or an empty function argument.
    #[error("Expression is empty")]
    EmptyExpression,

    /// More operators and parentheses than the evaluator nests.
    #[error("Expression is too complex: more than {0} operators and parentheses")]
    TooComplex(usize),
}

impl ExpressionError {
    pub(crate) fn unknown_function(name: &str) -> Self {
        ExpressionError::InvalidFunction {
            name: name.to_string(),
            reason: "function is not supported".to_string(),
        }
    }
}

pub type Result<T, E = ExpressionError> = std::result::Result<T, E>;
