use crate::ast::Number;
use crate::error::{ExpressionError, Result};
use std::fmt;

/// Every operator symbol the tokenizer accepts.
pub const OPERATORS: [&str; 7] = ["+", "-", "/", "//", "*", "%", "**"];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Divide,
    FloorDivide,
    Multiply,
    Modulo,
    Power,
}

impl Operator {
    pub fn apply(&self, left: Number, right: Number) -> Result<Number> {
        match self {
            Operator::Add => Ok(left.add(right)),
            Operator::Subtract => Ok(left.sub(right)),
            Operator::Multiply => Ok(left.mul(right)),
            Operator::Divide => left.div(right),
            Operator::FloorDivide => left.floor_div(right),
            Operator::Modulo => left.modulo(right),
            Operator::Power => left.pow(right),
        }
    }

    /// Binding strength, loosest first.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 0,
            Operator::Multiply | Operator::Divide | Operator::FloorDivide | Operator::Modulo => 1,
            Operator::Power => 2,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, Operator::Power)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Divide => "/",
            Operator::FloorDivide => "//",
            Operator::Multiply => "*",
            Operator::Modulo => "%",
            Operator::Power => "**",
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = ExpressionError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "/" => Ok(Operator::Divide),
            "//" => Ok(Operator::FloorDivide),
            "*" => Ok(Operator::Multiply),
            "%" => Ok(Operator::Modulo),
            "**" => Ok(Operator::Power),
            _ => Err(ExpressionError::InvalidOperator(value.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
