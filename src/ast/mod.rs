mod function_call;
mod number;
mod operator;
mod precedence;
mod token;
mod tokenizer;
mod tree;

pub use function_call::FunctionCall;
pub use number::Number;
pub use operator::{Operator, OPERATORS};
pub use precedence::resolve;
pub use token::{classify, TokenKind};
pub use tokenizer::{tokenize, TokenTree, MAX_COMPLEXITY};
pub use tree::{build_tree, ExpressionNode, Operand};
