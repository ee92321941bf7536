use crate::ast::{Number, Operator, TokenTree};
use crate::error::{ExpressionError, Result};
use log::debug;

/// Side of an [`ExpressionNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(Number),
    Node(Box<ExpressionNode>),
}

impl Operand {
    /// Reduces the operand to a number, evaluating a subtree if needed.
    pub fn evaluate(self) -> Result<Number> {
        match self {
            Operand::Number(n) => Ok(n),
            Operand::Node(mut node) => node.evaluate(),
        }
    }

    /// Evaluates a subtree in place, leaving the resolved number behind.
    fn resolve(&mut self) -> Result<Number> {
        match self {
            Operand::Number(n) => Ok(*n),
            Operand::Node(node) => {
                let value = node.evaluate()?;
                *self = Operand::Number(value);
                Ok(value)
            }
        }
    }
}

/// Binary operation in the evaluation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionNode {
    pub left: Operand,
    pub operator: Operator,
    pub right: Operand,
}

impl ExpressionNode {
    pub fn new(left: Operand, operator: Operator, right: Operand) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }

    /// Post-order evaluation. Children are replaced by their values, so a
    /// second call does not recompute them.
    pub fn evaluate(&mut self) -> Result<Number> {
        let left = self.left.resolve()?;
        let right = self.right.resolve()?;
        self.operator.apply(left, right)
    }
}

/// Converts a resolved token tree into an evaluation tree.
///
/// Function calls are evaluated here and inlined as their result.
pub fn build_tree(tokens: TokenTree) -> Result<Operand> {
    match tokens {
        TokenTree::Number(n) => Ok(Operand::Number(n)),
        TokenTree::Call(call) => Ok(Operand::Number(call.evaluate()?)),
        TokenTree::Operator(op) => Err(ExpressionError::UnexpectedToken(op.to_string())),
        TokenTree::Sequence(items) => build_sequence(items),
    }
}

fn build_sequence(mut items: Vec<TokenTree>) -> Result<Operand> {
    match items.len() {
        0 => Err(ExpressionError::EmptyExpression),
        1 => build_tree(items.remove(0)),
        2 => Err(ExpressionError::UnexpectedToken(items[1].to_string())),
        len => {
            let rest = items.split_off(2);
            let operator = match items.pop() {
                Some(TokenTree::Operator(op)) => op,
                Some(other) => return Err(ExpressionError::UnexpectedToken(other.to_string())),
                None => return Err(ExpressionError::EmptyExpression),
            };
            let left = build_tree(items.remove(0))?;
            let right = if len == 3 {
                build_tree(rest.into_iter().next().ok_or(ExpressionError::EmptyExpression)?)?
            } else {
                // unresolved n-ary input, fold the tail to the right
                debug!("Building unresolved sequence of {} tokens", len);
                build_sequence(rest)?
            };
            Ok(Operand::Node(Box::new(ExpressionNode::new(left, operator, right))))
        }
    }
}
