// src/filter/guard.rs

//! Guard expressions over filter results.
//!
//! Grammar:
//!
//! ```text
//! expr := term ("or" term)*
//! term := atom ("and" atom)*
//! atom := label | "(" expr ")"
//! ```
//!
//! `and` binds tighter than `or`. Labels are filter names from `[filter]`
//! (letters, digits, `_`, `-`).

use crate::errors::{Result, anyhow, bail};

use crate::filter::rules::FilterOutcome;

/// A parsed guard expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Label(String),
    And(Vec<Guard>),
    Or(Vec<Guard>),
}

impl Guard {
    /// Parse a guard expression like `"src or pyproject"`.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0 };
        let guard = parser.expr()?;
        if parser.pos != parser.tokens.len() {
            bail!("unexpected trailing input in guard expression {input:?}");
        }
        Ok(guard)
    }

    /// Evaluate against a computed filter outcome.
    pub fn eval(&self, outcome: &FilterOutcome) -> bool {
        match self {
            Guard::Label(label) => outcome.get(label),
            Guard::And(parts) => parts.iter().all(|g| g.eval(outcome)),
            Guard::Or(parts) => parts.iter().any(|g| g.eval(outcome)),
        }
    }

    /// All filter labels referenced by this expression, in source order.
    pub fn labels(&self) -> Vec<&str> {
        fn walk<'a>(guard: &'a Guard, out: &mut Vec<&'a str>) {
            match guard {
                Guard::Label(label) => out.push(label),
                Guard::And(parts) | Guard::Or(parts) => {
                    for part in parts {
                        walk(part, out);
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Label(String),
    Or,
    And,
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '(' => {
                tokens.push(Token::Open);
                chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            c if is_label_char(c) => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if !is_label_char(c) {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(match word.as_str() {
                    "or" => Token::Or,
                    "and" => Token::And,
                    _ => Token::Label(word),
                });
            }
            other => bail!("unexpected character {other:?} in guard expression {input:?}"),
        }
    }

    if tokens.is_empty() {
        bail!("guard expression is empty");
    }

    Ok(tokens)
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Guard> {
        let mut parts = vec![self.term()?];
        while matches!(self.peek(), Some(Token::Or)) {
            self.pos += 1;
            parts.push(self.term()?);
        }
        Ok(collapse(parts, Guard::Or))
    }

    fn term(&mut self) -> Result<Guard> {
        let mut parts = vec![self.atom()?];
        while matches!(self.peek(), Some(Token::And)) {
            self.pos += 1;
            parts.push(self.atom()?);
        }
        Ok(collapse(parts, Guard::And))
    }

    fn atom(&mut self) -> Result<Guard> {
        match self.advance() {
            Some(Token::Label(label)) => Ok(Guard::Label(label)),
            Some(Token::Open) => {
                let inner = self.expr()?;
                match self.advance() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(anyhow!("missing closing parenthesis in guard expression")),
                }
            }
            other => Err(anyhow!(
                "expected filter label or '(' in guard expression, got {other:?}"
            )),
        }
    }
}

fn collapse(mut parts: Vec<Guard>, combine: fn(Vec<Guard>) -> Guard) -> Guard {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        combine(parts)
    }
}
