use crate::ast::operator::OPERATORS;
use crate::error::{ExpressionError, Result};
use crate::functions;

/// Lexical class of a character or an accumulated run of characters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Digits only.
    Number,
    /// `digits.digits`.
    Float,
    Operator,
    /// A lone `.`, only valid while a number is being built.
    Dot,
    /// A prefix of some supported function name.
    FunctionName,
}

/// Classifies `token`, failing with `InvalidToken` when it is none of the
/// known kinds.
///
/// Function names match by prefix so a name can be accumulated one
/// character at a time.
pub fn classify(token: &str) -> Result<TokenKind> {
    if token == "." {
        return Ok(TokenKind::Dot);
    }
    if is_digits(token) {
        return Ok(TokenKind::Number);
    }
    if OPERATORS.contains(&token) {
        return Ok(TokenKind::Operator);
    }
    if is_float(token) {
        return Ok(TokenKind::Float);
    }
    if !token.is_empty() && functions::is_function_prefix(token) {
        return Ok(TokenKind::FunctionName);
    }

    Err(ExpressionError::InvalidToken(token.to_string()))
}

pub fn classify_char(c: char) -> Result<TokenKind> {
    let mut buf = [0u8; 4];
    classify(c.encode_utf8(&mut buf))
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_float(token: &str) -> bool {
    match token.split_once('.') {
        Some((int_part, frac_part)) => is_digits(int_part) && is_digits(frac_part),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_kinds() {
        assert_eq!(classify("."), Ok(TokenKind::Dot));
        assert_eq!(classify("042"), Ok(TokenKind::Number));
        assert_eq!(classify("**"), Ok(TokenKind::Operator));
        assert_eq!(classify("//"), Ok(TokenKind::Operator));
        assert_eq!(classify("3.14"), Ok(TokenKind::Float));
        assert_eq!(classify("sq"), Ok(TokenKind::FunctionName));
        assert_eq!(classify("sqrt"), Ok(TokenKind::FunctionName));
    }

    #[test]
    fn test_classify_rejects() {
        for token in ["+*", "3.", ".5", "1.2.3", "x", "sqrtx", "", "***", ","] {
            assert_eq!(
                classify(token),
                Err(ExpressionError::InvalidToken(token.to_string())),
                "{token}"
            );
        }
    }

    #[test]
    fn test_classify_char() {
        assert_eq!(classify_char('7'), Ok(TokenKind::Number));
        assert_eq!(classify_char('%'), Ok(TokenKind::Operator));
        assert_eq!(classify_char('f'), Ok(TokenKind::FunctionName));
        assert!(classify_char('@').is_err());
    }
}
