use crate::ast::TokenTree;
use crate::error::{ExpressionError, Result};

/// Loosest tier first.
const TIERS: [u8; 3] = [0, 1, 2];

/// Rewrites a flat `operand (operator operand)*` sequence into nested
/// `[left, operator, right]` triples honoring precedence.
///
/// Each call splits once, at the loosest operator present: the rightmost one
/// for the left-associative tiers, the leftmost one for `**`. Both halves are
/// resolved recursively.
pub fn resolve(mut tokens: Vec<TokenTree>) -> Result<TokenTree> {
    match tokens.len() {
        0 => return Err(ExpressionError::EmptyExpression),
        1 => return Ok(tokens.remove(0)),
        3 => return Ok(TokenTree::Sequence(tokens)),
        _ => {}
    }

    for tier in TIERS {
        if let Some(index) = find_split(&tokens, tier) {
            let right = tokens.split_off(index + 1);
            let operator = tokens.pop().ok_or(ExpressionError::EmptyExpression)?;
            return Ok(TokenTree::Sequence(vec![
                resolve(tokens)?,
                operator,
                resolve(right)?,
            ]));
        }
    }

    Err(ExpressionError::UnexpectedToken(
        tokens.last().map(ToString::to_string).unwrap_or_default(),
    ))
}

fn find_split(tokens: &[TokenTree], tier: u8) -> Option<usize> {
    let in_tier = |token: &TokenTree| match token {
        TokenTree::Operator(op) if op.precedence() == tier => Some(op.is_right_associative()),
        _ => None,
    };

    let rightmost = tokens.iter().rposition(|t| in_tier(t) == Some(false));
    if rightmost.is_some() {
        return rightmost;
    }
    tokens.iter().position(|t| in_tier(t) == Some(true))
}
