//! Recursive-descent parser for `+ - * /` arithmetic with parentheses.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! ```

use super::error::ParseError;
use std::iter::Peekable;
use std::str::CharIndices;

/// Nesting limit for parentheses and unary signs combined.
const MAX_DEPTH: usize = 256;

/// Parsed arithmetic expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

impl Expr {
    /// Evaluate with IEEE-754 semantics; division by zero yields infinity or NaN.
    pub fn eval(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Neg(inner) => -inner.eval(),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval(), rhs.eval()),
        }
    }
}

/// Parse a sanitized expression string.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.expr()?;

    match parser.peek() {
        Some(token) => Err(ParseError::UnexpectedToken { pos: token.pos }),
        None => Ok(expr),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Kind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Clone, Copy, Debug)]
struct Token {
    kind: Kind,
    pos: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let value = lex_number(input, &mut chars)?;
            tokens.push(Token {
                kind: Kind::Number(value),
                pos,
            });
            continue;
        }

        chars.next();
        let kind = match c {
            '+' | '-' => {
                if let Some(&(_, next)) = chars.peek()
                    && next == c
                {
                    return Err(ParseError::IncrementOperator { pos });
                }
                if c == '+' { Kind::Plus } else { Kind::Minus }
            }
            '*' => Kind::Star,
            '/' => Kind::Slash,
            '(' => Kind::LParen,
            ')' => Kind::RParen,
            other => return Err(ParseError::UnexpectedChar { ch: other, pos }),
        };
        tokens.push(Token { kind, pos });
    }

    Ok(tokens)
}

/// Lex `digits ['.' digits*]` or `'.' digits`.
fn lex_number(input: &str, chars: &mut Peekable<CharIndices<'_>>) -> Result<f64, ParseError> {
    let start = chars.peek().map(|&(pos, _)| pos).unwrap_or(input.len());
    let mut end = start;
    let mut digits = 0usize;
    let mut seen_dot = false;

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else if c == '.' {
            // "1.2.3"
            return Err(ParseError::MalformedNumber { pos: start });
        } else {
            break;
        }
        end = pos + c.len_utf8();
        chars.next();
    }

    if digits == 0 {
        return Err(ParseError::MalformedNumber { pos: start });
    }

    input[start..end]
        .parse()
        .map_err(|_| ParseError::MalformedNumber { pos: start })
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek().and_then(|t| match t.kind {
            Kind::Plus => Some(BinaryOp::Add),
            Kind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }) {
            self.cursor += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().and_then(|t| match t.kind {
            Kind::Star => Some(BinaryOp::Mul),
            Kind::Slash => Some(BinaryOp::Div),
            _ => None,
        }) {
            self.cursor += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().map(|t| t.kind) {
            Some(Kind::Plus) => {
                self.cursor += 1;
                self.descend()?;
                let inner = self.unary();
                self.depth -= 1;
                inner
            }
            Some(Kind::Minus) => {
                self.cursor += 1;
                self.descend()?;
                let inner = self.unary();
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner?)))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        match token.kind {
            Kind::Number(value) => Ok(Expr::Number(value)),
            Kind::LParen => {
                self.descend()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token {
                        kind: Kind::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(ParseError::UnexpectedToken { pos: other.pos }),
                    None => Err(ParseError::UnclosedParen { pos: token.pos }),
                }
            }
            _ => Err(ParseError::UnexpectedToken { pos: token.pos }),
        }
    }
}
