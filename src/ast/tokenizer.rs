use crate::ast::precedence::resolve;
use crate::ast::token::{classify, classify_char, TokenKind};
use crate::ast::{FunctionCall, Number, Operator, OPERATORS};
use crate::error::{ExpressionError, Result};
use log::{debug, trace};
use std::fmt;

/// Tokenized expression: a leaf or a nested sequence.
///
/// After tokenizing, every `Sequence` has been resolved by precedence and
/// holds exactly `[left, operator, right]`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenTree {
    Number(Number),
    Operator(Operator),
    Call(FunctionCall),
    Sequence(Vec<TokenTree>),
}

impl TokenTree {
    pub fn is_operand(&self) -> bool {
        !matches!(self, TokenTree::Operator(_))
    }
}

impl fmt::Display for TokenTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenTree::Number(n) => write!(f, "{}", n),
            TokenTree::Operator(op) => write!(f, "{}", op),
            TokenTree::Call(call) => write!(f, "{}", call),
            TokenTree::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Scanner state. Each variant names what the accumulator currently holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Idle,
    InNumber,
    /// Digits followed by a dot, waiting for the fractional part.
    InDot,
    InFloat,
    InOperator,
    InGroup(usize),
    InFunctionName,
    InFunctionArgs(usize),
    AfterGroup,
    AfterFunction,
}

impl State {
    /// A complete operand was just read; only an operator may follow.
    fn holds_operand(self) -> bool {
        matches!(
            self,
            State::InNumber | State::InFloat | State::AfterGroup | State::AfterFunction
        )
    }
}

/// Scanned but not yet converted element of one nesting level.
#[derive(Debug)]
enum RawToken {
    Text(String),
    Group(TokenTree),
    Call { name: String, args: String },
}

struct Tokenizer {
    state: State,
    buffer: String,
    function_name: String,
    tokens: Vec<RawToken>,
}

/// Most operators plus opening parentheses an expression may hold.
///
/// The count bounds the depth of the resolved tree, and with it every
/// recursive pass over the expression.
pub const MAX_COMPLEXITY: usize = 256;

/// Tokenizes `expr` and resolves operator precedence, recursing into
/// parenthesized groups and function arguments.
pub fn tokenize(expr: &str) -> Result<TokenTree> {
    let stripped: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    debug!("Tokenizing expression: {}", stripped);

    if complexity(&stripped) > MAX_COMPLEXITY {
        return Err(ExpressionError::TooComplex(MAX_COMPLEXITY));
    }
    tokenize_stripped(&stripped)
}

/// Operator runs plus opening parentheses.
fn complexity(expr: &str) -> usize {
    let mut count = 0;
    let mut in_operator = false;
    for c in expr.chars() {
        let is_operator = OPERATORS.iter().any(|op| op.starts_with(c));
        if c == '(' || (is_operator && !in_operator) {
            count += 1;
        }
        in_operator = is_operator;
    }
    count
}

fn tokenize_stripped(expr: &str) -> Result<TokenTree> {
    let mut tokenizer = Tokenizer::new();
    for c in expr.chars() {
        tokenizer.step(c)?;
    }
    let raw_tokens = tokenizer.finish()?;

    let flat = raw_tokens
        .into_iter()
        .map(convert_token)
        .collect::<Result<Vec<_>>>()?;
    debug!("Flat tokens: {:?}", flat);

    check_alternation(&flat)?;
    let resolved = resolve(flat)?;
    debug!("Resolved: {}", resolved);
    Ok(resolved)
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            state: State::Idle,
            buffer: String::new(),
            function_name: String::new(),
            tokens: Vec::new(),
        }
    }

    fn step(&mut self, c: char) -> Result<()> {
        trace!("{:?} <- {:?} ({:?})", self.state, c, self.buffer);
        match self.state {
            State::InGroup(depth) => self.step_group(c, depth),
            State::InFunctionArgs(depth) => self.step_function_args(c, depth),
            State::InFunctionName => self.step_function_name(c),
            _ => self.step_outside(c),
        }
    }

    fn step_group(&mut self, c: char, depth: usize) -> Result<()> {
        match c {
            '(' => self.state = State::InGroup(depth + 1),
            ')' if depth == 1 => {
                let inner = std::mem::take(&mut self.buffer);
                self.tokens.push(RawToken::Group(tokenize_stripped(&inner)?));
                self.state = State::AfterGroup;
                return Ok(());
            }
            ')' => self.state = State::InGroup(depth - 1),
            _ => {}
        }
        self.buffer.push(c);
        Ok(())
    }

    fn step_function_args(&mut self, c: char, depth: usize) -> Result<()> {
        match c {
            '(' => self.state = State::InFunctionArgs(depth + 1),
            ')' if depth == 1 => {
                self.tokens.push(RawToken::Call {
                    name: std::mem::take(&mut self.function_name),
                    args: std::mem::take(&mut self.buffer),
                });
                self.state = State::AfterFunction;
                return Ok(());
            }
            ')' => self.state = State::InFunctionArgs(depth - 1),
            _ => {}
        }
        self.buffer.push(c);
        Ok(())
    }

    fn step_function_name(&mut self, c: char) -> Result<()> {
        match c {
            '(' => {
                self.function_name = std::mem::take(&mut self.buffer);
                self.state = State::InFunctionArgs(1);
            }
            ')' => return Err(ExpressionError::BracesMismatch),
            _ => self.buffer.push(c),
        }
        Ok(())
    }

    fn step_outside(&mut self, c: char) -> Result<()> {
        match c {
            '(' => {
                if self.state.holds_operand() {
                    return Err(ExpressionError::UnexpectedToken(format!("{}(", self.buffer)));
                }
                self.flush()?;
                self.state = State::InGroup(1);
                return Ok(());
            }
            ')' => return Err(ExpressionError::BracesMismatch),
            _ => {}
        }

        let kind = classify_char(c)?;
        if matches!(self.state, State::AfterGroup | State::AfterFunction)
            && kind != TokenKind::Operator
        {
            return Err(self.unexpected(c));
        }

        match (kind, self.state) {
            (TokenKind::Dot, State::InNumber) => {
                self.buffer.push(c);
                self.state = State::InDot;
            }
            (TokenKind::Dot, _) => return Err(self.unexpected(c)),

            (TokenKind::Number, State::InNumber | State::InFloat) => self.buffer.push(c),
            (TokenKind::Number, State::InDot) => {
                self.buffer.push(c);
                self.state = State::InFloat;
            }
            (TokenKind::Number, _) => self.start(c, State::InNumber)?,

            (TokenKind::Operator, State::InOperator) => self.buffer.push(c),
            (TokenKind::Operator, _) => self.start(c, State::InOperator)?,

            (TokenKind::FunctionName, State::Idle | State::InOperator) => {
                self.start(c, State::InFunctionName)?
            }
            (TokenKind::FunctionName, _) => return Err(self.unexpected(c)),

            // single characters never classify as a whole float
            (TokenKind::Float, _) => return Err(self.unexpected(c)),
        }
        Ok(())
    }

    fn unexpected(&self, c: char) -> ExpressionError {
        ExpressionError::UnexpectedToken(format!("{}{}", self.buffer, c))
    }

    /// Flushes the accumulator and starts a new one with `c`.
    fn start(&mut self, c: char, state: State) -> Result<()> {
        self.flush()?;
        self.buffer.push(c);
        self.state = state;
        Ok(())
    }

    /// Emits the accumulated text after checking it is a whole token, which
    /// catches doubled operators like `+*` and dangling dots like `3.`.
    fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            classify(&self.buffer)?;
            self.tokens.push(RawToken::Text(std::mem::take(&mut self.buffer)));
        }
        self.state = State::Idle;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<RawToken>> {
        match self.state {
            State::InFunctionName => {
                return Err(ExpressionError::IncompleteFunction(self.buffer));
            }
            State::InFunctionArgs(_) => {
                return Err(ExpressionError::IncompleteFunction(format!(
                    "{}({}",
                    self.function_name, self.buffer
                )));
            }
            State::InGroup(_) => return Err(ExpressionError::BracesMismatch),
            _ => {}
        }
        self.flush()?;
        Ok(self.tokens)
    }
}

fn convert_token(token: RawToken) -> Result<TokenTree> {
    match token {
        RawToken::Group(tree) => Ok(tree),
        RawToken::Call { name, args } => Ok(TokenTree::Call(FunctionCall::parse(&name, &args)?)),
        RawToken::Text(text) => match classify(&text)? {
            TokenKind::Number | TokenKind::Float => Number::parse_literal(&text)
                .map(TokenTree::Number)
                .ok_or(ExpressionError::InvalidToken(text)),
            TokenKind::Operator => Ok(TokenTree::Operator(Operator::try_from(text.as_str())?)),
            _ => Err(ExpressionError::InvalidToken(text)),
        },
    }
}

/// Operands and operators must alternate, starting and ending with an
/// operand.
fn check_alternation(tokens: &[TokenTree]) -> Result<()> {
    if tokens.is_empty() {
        return Err(ExpressionError::EmptyExpression);
    }
    for (i, token) in tokens.iter().enumerate() {
        let expect_operand = i % 2 == 0;
        if token.is_operand() != expect_operand {
            return Err(ExpressionError::UnexpectedToken(token.to_string()));
        }
    }
    match tokens.last() {
        Some(last) if !last.is_operand() => {
            Err(ExpressionError::UnexpectedToken(last.to_string()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: Vec<TokenTree>) -> TokenTree {
        TokenTree::Sequence(items)
    }

    fn int(n: i64) -> TokenTree {
        TokenTree::Number(Number::Int(n))
    }

    fn op(symbol: &str) -> TokenTree {
        TokenTree::Operator(Operator::try_from(symbol).unwrap())
    }

    #[test]
    fn test_single_literals() {
        assert_eq!(tokenize("42"), Ok(int(42)));
        assert_eq!(tokenize(" 4 2 "), Ok(int(42)));
        assert_eq!(tokenize("2.50"), Ok(TokenTree::Number(Number::Float(2.5))));
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(tokenize("2**3"), Ok(seq(vec![int(2), op("**"), int(3)])));
        assert_eq!(tokenize("7 // 2"), Ok(seq(vec![int(7), op("//"), int(2)])));
    }

    #[test]
    fn test_precedence_applied() {
        assert_eq!(
            tokenize("2 + 3 * 4"),
            Ok(seq(vec![int(2), op("+"), seq(vec![int(3), op("*"), int(4)])]))
        );
    }

    #[test]
    fn test_group_becomes_nested_sequence() {
        assert_eq!(
            tokenize("(2 + 3) * 4"),
            Ok(seq(vec![seq(vec![int(2), op("+"), int(3)]), op("*"), int(4)]))
        );
        assert_eq!(tokenize("((7))"), Ok(int(7)));
    }

    #[test]
    fn test_function_call_token() {
        let tree = tokenize("sqrt(16) + 1").unwrap();
        match tree {
            TokenTree::Sequence(items) => {
                assert!(matches!(&items[0], TokenTree::Call(call) if call.name() == "sqrt"));
                assert_eq!(items[1], op("+"));
                assert_eq!(items[2], int(1));
            }
            other => panic!("unexpected tree {other:?}"),
        }
    }

    #[test]
    fn test_braces_mismatch() {
        for expr in ["(2 + 3", "2 + 3)", ")(", "((1)", "sqrt)"] {
            assert_eq!(tokenize(expr), Err(ExpressionError::BracesMismatch), "{expr}");
        }
    }

    #[test]
    fn test_doubled_operator_is_invalid_token() {
        assert_eq!(
            tokenize("2 +* 3"),
            Err(ExpressionError::InvalidToken("+*".to_string()))
        );
        assert_eq!(
            tokenize("2 *** 3"),
            Err(ExpressionError::InvalidToken("***".to_string()))
        );
    }

    #[test]
    fn test_misplaced_dot() {
        assert_eq!(
            tokenize("(2 + 3) .3"),
            Err(ExpressionError::UnexpectedToken(".".to_string()))
        );
        assert_eq!(
            tokenize("2 + .5"),
            Err(ExpressionError::UnexpectedToken("+.".to_string()))
        );
        assert_eq!(
            tokenize("1.2.3"),
            Err(ExpressionError::UnexpectedToken("1.2.".to_string()))
        );
        assert_eq!(tokenize("3. + 1"), Err(ExpressionError::InvalidToken("3.".to_string())));
    }

    #[test]
    fn test_juxtaposition_rejected() {
        assert_eq!(
            tokenize("(2)3"),
            Err(ExpressionError::UnexpectedToken("3".to_string()))
        );
        assert_eq!(
            tokenize("2(3)"),
            Err(ExpressionError::UnexpectedToken("2(".to_string()))
        );
        assert_eq!(
            tokenize("(1)(2)"),
            Err(ExpressionError::UnexpectedToken("(".to_string()))
        );
        assert_eq!(
            tokenize("2sqrt(4)"),
            Err(ExpressionError::UnexpectedToken("2s".to_string()))
        );
        assert_eq!(
            tokenize("sqrt(4)5"),
            Err(ExpressionError::UnexpectedToken("5".to_string()))
        );
    }

    #[test]
    fn test_incomplete_function() {
        assert_eq!(
            tokenize("sqrt"),
            Err(ExpressionError::IncompleteFunction("sqrt".to_string()))
        );
        assert_eq!(
            tokenize("2 + sqrt(4"),
            Err(ExpressionError::IncompleteFunction("sqrt(4".to_string()))
        );
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(tokenize("2 @ 3"), Err(ExpressionError::InvalidToken("@".to_string())));
        assert_eq!(tokenize("x + 1"), Err(ExpressionError::InvalidToken("x".to_string())));
    }

    #[test]
    fn test_unknown_function_name() {
        assert!(matches!(
            tokenize("sqr(3)"),
            Err(ExpressionError::InvalidFunction { name, .. }) if name == "sqr"
        ));
    }

    #[test]
    fn test_dangling_operators() {
        assert_eq!(tokenize("-5"), Err(ExpressionError::UnexpectedToken("-".to_string())));
        assert_eq!(tokenize("5 +"), Err(ExpressionError::UnexpectedToken("+".to_string())));
    }

    #[test]
    fn test_complexity_counts_operator_runs_and_groups() {
        assert_eq!(complexity("1"), 0);
        assert_eq!(complexity("2**3//4"), 2);
        assert_eq!(complexity("sqrt((1+2)*3)"), 4);
    }

    #[test]
    fn test_too_complex_rejected_before_scanning() {
        let limit = vec!["1"; MAX_COMPLEXITY + 1].join("+");
        assert_eq!(tokenize(&limit).map(|_| ()), Ok(()));

        let over = vec!["1"; MAX_COMPLEXITY + 2].join("+");
        assert_eq!(tokenize(&over), Err(ExpressionError::TooComplex(MAX_COMPLEXITY)));

        let nested = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
        assert_eq!(tokenize(&nested), Err(ExpressionError::TooComplex(MAX_COMPLEXITY)));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), Err(ExpressionError::EmptyExpression));
        assert_eq!(tokenize("   "), Err(ExpressionError::EmptyExpression));
        assert_eq!(tokenize("2 * ()"), Err(ExpressionError::EmptyExpression));
    }
}
