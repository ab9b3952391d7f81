//! Arithmetic evaluator for sanitized expressions.
//!
//! A small tokenizer feeds a recursive-descent parser that computes the
//! value while parsing. Only numeric literals, the four arithmetic
//! operators, unary signs and parentheses are understood.
//!
//! Grammar (left-associative, `*` and `/` bind tighter than `+` and `-`):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := number | '(' expr ')'
//! ```

use std::fmt;
use std::iter::Peekable;
use std::vec::IntoIter;
use thiserror::Error;

/// Maximum parenthesis nesting accepted by the parser.
pub const MAX_DEPTH: usize = 256;

/// Success carries the computed value, failure the reason it was rejected.
pub type EvaluationOutcome = Result<f64, EvalError>;

/// Reasons an expression cannot produce a result
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvalError {
    #[error("Expression is empty")]
    Empty,

    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Malformed number '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("Unexpected '{token}' at position {position}")]
    UnexpectedToken { token: Token, position: usize },

    #[error("Expression ends where an operand was expected")]
    UnexpectedEnd,

    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    /// `++` and `--` are increment/decrement, not two signs.
    #[error("Doubled sign '{token}{token}' at position {position}")]
    DoubledSign { token: Token, position: usize },

    #[error("Parentheses nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("Result is not a finite number")]
    NonFinite,
}

/// Lexical unit of an arithmetic expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spanned {
    token: Token,
    position: usize,
}

/// Split `input` into tokens. Positions are byte offsets.
fn tokenize(input: &str) -> Result<Vec<Spanned>, EvalError> {
    let mut tokens: Vec<Spanned> = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let mut end = position + ch.len_utf8();
                let mut seen_dot = ch == '.';
                while let Some(&(i, next)) = chars.peek() {
                    if next.is_ascii_digit() || (next == '.' && !seen_dot) {
                        seen_dot |= next == '.';
                        end = i + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }

                let literal = &input[position..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber {
                        literal: literal.to_string(),
                        position,
                    })?;
                Token::Number(value)
            }
            ch => return Err(EvalError::UnexpectedCharacter { ch, position }),
        };

        if matches!(token, Token::Plus | Token::Minus)
            && tokens.last().is_some_and(|prev| prev.token == token)
        {
            return Err(EvalError::DoubledSign { token, position });
        }

        tokens.push(Spanned { token, position });
    }

    Ok(tokens)
}

struct Parser {
    tokens: Peekable<IntoIter<Spanned>>,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
            depth: 0,
        }
    }

    fn peek_token(&mut self) -> Option<Token> {
        self.tokens.peek().map(|s| s.token)
    }

    fn expr(&mut self) -> EvaluationOutcome {
        let mut lhs = self.term()?;

        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek_token() {
            self.tokens.next();
            let rhs = self.term()?;
            lhs = if op == Token::Plus { lhs + rhs } else { lhs - rhs };
        }

        Ok(lhs)
    }

    fn term(&mut self) -> EvaluationOutcome {
        let mut lhs = self.unary()?;

        while let Some(op @ (Token::Star | Token::Slash)) = self.peek_token() {
            self.tokens.next();
            let rhs = self.unary()?;
            lhs = if op == Token::Star { lhs * rhs } else { lhs / rhs };
        }

        Ok(lhs)
    }

    fn unary(&mut self) -> EvaluationOutcome {
        let mut negate = false;
        while let Some(sign @ (Token::Plus | Token::Minus)) = self.peek_token() {
            self.tokens.next();
            if sign == Token::Minus {
                negate = !negate;
            }
        }

        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> EvaluationOutcome {
        match self.tokens.next() {
            Some(Spanned {
                token: Token::Number(value),
                ..
            }) => Ok(value),
            Some(Spanned {
                token: Token::LParen,
                ..
            }) => {
                self.depth += 1;
                if self.depth > MAX_DEPTH {
                    return Err(EvalError::TooDeep { limit: MAX_DEPTH });
                }
                let value = self.expr()?;
                self.depth -= 1;

                match self.tokens.next() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(value),
                    Some(Spanned { token, position }) => {
                        Err(EvalError::UnexpectedToken { token, position })
                    }
                    None => Err(EvalError::UnbalancedParentheses),
                }
            }
            Some(Spanned { token, position }) => Err(EvalError::UnexpectedToken { token, position }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluate a sanitized arithmetic expression with `f64` arithmetic.
///
/// Any non-finite final value (division by zero, `0/0`, overflow) is a
/// failure rather than a result.
///
/// # Errors
///
/// Returns an [`EvalError`] describing the first problem found.
///
/// # Example
///
/// ```rust
/// use reckon::core::{evaluate, EvalError};
///
/// assert_eq!(evaluate("2+3*4"), Ok(14.0));
/// assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
/// assert_eq!(evaluate("10/0"), Err(EvalError::NonFinite));
/// ```
pub fn evaluate(sanitized: &str) -> EvaluationOutcome {
    if sanitized.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser::new(tokenize(sanitized)?);
    let value = parser.expr()?;

    if let Some(Spanned { token, position }) = parser.tokens.next() {
        return Err(match token {
            Token::RParen => EvalError::UnbalancedParentheses,
            token => EvalError::UnexpectedToken { token, position },
        });
    }

    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }

    Ok(value)
}
