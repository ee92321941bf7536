use crate::ast::tree::build_tree;
use crate::ast::tokenizer::tokenize;
use crate::ast::{Number, TokenTree};
use crate::error::{ExpressionError, Result};
use crate::functions::{self, Function};
use log::debug;
use std::fmt;

/// Call of a supported function, arguments already tokenized.
#[derive(Clone)]
pub struct FunctionCall {
    name: String,
    function: Function,
    args: Vec<TokenTree>,
}

impl FunctionCall {
    /// Builds a call from the scanned name and raw argument text.
    ///
    /// Arguments are split on commas outside nested parentheses and each one
    /// is tokenized as an independent expression.
    pub fn parse(name: &str, args: &str) -> Result<Self> {
        let function =
            functions::lookup(name).ok_or_else(|| ExpressionError::unknown_function(name))?;
        let args = split_arguments(args)
            .into_iter()
            .map(tokenize)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            function,
            args,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[TokenTree] {
        &self.args
    }

    /// Evaluates every argument, then invokes the function.
    pub fn evaluate(&self) -> Result<Number> {
        let values = self
            .args
            .iter()
            .map(|arg| build_tree(arg.clone())?.evaluate())
            .collect::<Result<Vec<_>>>()?;

        debug!("Calling {}({:?})", self.name, values);
        (self.function)(&values).map_err(|reason| ExpressionError::InvalidFunction {
            name: self.name.clone(),
            reason,
        })
    }
}

fn split_arguments(args: &str) -> Vec<&str> {
    if args.is_empty() {
        return Vec::new();
    }

    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&args[start..]);
    pieces
}

impl PartialEq for FunctionCall {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.args == other.args
    }
}

impl fmt::Debug for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionCall")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish()
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_arguments() {
        assert_eq!(split_arguments(""), Vec::<&str>::new());
        assert_eq!(split_arguments("2"), vec!["2"]);
        assert_eq!(split_arguments("2,3"), vec!["2", "3"]);
        assert_eq!(split_arguments("pow(2,2),3"), vec!["pow(2,2)", "3"]);
        assert_eq!(split_arguments("2,"), vec!["2", ""]);
    }

    #[test]
    fn test_parse_and_evaluate() {
        let call = FunctionCall::parse("pow", "2,1+2").unwrap();
        assert_eq!(call.name(), "pow");
        assert_eq!(call.args().len(), 2);
        assert_eq!(call.evaluate(), Ok(Number::Int(8)));
        assert_eq!(call.to_string(), "pow(2, [1 + 2])");
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            FunctionCall::parse("foo", "1").map(|call| call.name().to_string()),
            Err(ExpressionError::unknown_function("foo"))
        );
    }

    #[test]
    fn test_empty_argument() {
        assert_eq!(
            FunctionCall::parse("pow", "2,").map(|call| call.name().to_string()),
            Err(ExpressionError::EmptyExpression)
        );
    }

    #[test]
    fn test_arity_failure_is_invalid_function() {
        let call = FunctionCall::parse("sqrt", "1,2").unwrap();
        assert!(matches!(
            call.evaluate(),
            Err(ExpressionError::InvalidFunction { name, .. }) if name == "sqrt"
        ));
    }
}
