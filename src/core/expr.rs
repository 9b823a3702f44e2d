//! Calculated-series expression parsing and per-sample evaluation.
//!
//! Expressions reference other series through brace-delimited alias
//! placeholders, e.g. `({cpu}+{mem})/2`. The grammar is deliberately small:
//! `+ - * / ( )`, unary minus, numeric literals and placeholders. Evaluation
//! never fails — any malformed input, unresolved placeholder or NaN result
//! collapses to `0.0` for that sample so one bad sample cannot abort the
//! series build.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::error::{GraphError, GraphResult};

/// Parsed arithmetic expression tree.
#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Placeholder(String),
    Negate(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

/// A compiled calculated-series expression.
///
/// The placeholder set is extracted by a plain brace scan so it is available
/// even when the arithmetic body fails to parse; in that case every sample
/// evaluates to `0.0`.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    placeholders: IndexSet<String>,
    ast: Option<Expr>,
}

impl CompiledExpression {
    /// Compiles an expression, tolerating malformed arithmetic.
    #[must_use]
    pub fn compile(text: &str) -> Self {
        Self {
            placeholders: scan_placeholders(text),
            ast: parse(text).ok(),
        }
    }

    /// Distinct placeholder references, in first-occurrence order.
    ///
    /// Each entry keeps its braces (`{alias}`), matching how the series list
    /// is matched against the expression.
    #[must_use]
    pub fn placeholders(&self) -> &IndexSet<String> {
        &self.placeholders
    }

    /// True when the expression references no series at all.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.placeholders.is_empty()
    }

    /// Evaluates the expression for one sample.
    ///
    /// `values` maps placeholder text (`{alias}`) to that series' value at
    /// the current index; `None` models a null sample. Any failure — parse
    /// error, unresolved placeholder, null input, NaN result — yields `0.0`.
    /// Infinities are preserved.
    #[must_use]
    pub fn evaluate(&self, values: &HashMap<&str, Option<f64>>) -> f64 {
        let Some(ast) = &self.ast else {
            return 0.0;
        };

        match eval(ast, values) {
            Some(result) if !result.is_nan() => result,
            _ => 0.0,
        }
    }
}

fn eval(expr: &Expr, values: &HashMap<&str, Option<f64>>) -> Option<f64> {
    match expr {
        Expr::Number(value) => Some(*value),
        Expr::Placeholder(key) => values.get(key.as_str()).copied().flatten(),
        Expr::Negate(inner) => eval(inner, values).map(|value| -value),
        Expr::Add(lhs, rhs) => Some(eval(lhs, values)? + eval(rhs, values)?),
        Expr::Sub(lhs, rhs) => Some(eval(lhs, values)? - eval(rhs, values)?),
        Expr::Mul(lhs, rhs) => Some(eval(lhs, values)? * eval(rhs, values)?),
        Expr::Div(lhs, rhs) => Some(eval(lhs, values)? / eval(rhs, values)?),
    }
}

/// Extracts every distinct `{...}` reference in first-occurrence order.
fn scan_placeholders(text: &str) -> IndexSet<String> {
    let mut placeholders = IndexSet::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            break;
        };
        placeholders.insert(tail[..=close].to_owned());
        rest = &tail[close + 1..];
    }

    placeholders
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Placeholder(String),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

fn tokenize(text: &str) -> GraphResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        let byte = bytes[index];
        match byte {
            b' ' | b'\t' | b'\n' | b'\r' => index += 1,
            b'+' => {
                tokens.push(Token::Plus);
                index += 1;
            }
            b'-' => {
                tokens.push(Token::Minus);
                index += 1;
            }
            b'*' => {
                tokens.push(Token::Star);
                index += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                index += 1;
            }
            b'(' => {
                tokens.push(Token::Open);
                index += 1;
            }
            b')' => {
                tokens.push(Token::Close);
                index += 1;
            }
            b'{' => {
                let tail = &text[index..];
                let Some(close) = tail.find('}') else {
                    return Err(GraphError::MalformedExpression(
                        "unterminated placeholder".to_owned(),
                    ));
                };
                tokens.push(Token::Placeholder(tail[..=close].to_owned()));
                index += close + 1;
            }
            b'0'..=b'9' | b'.' => {
                let start = index;
                while index < bytes.len() && (bytes[index].is_ascii_digit() || bytes[index] == b'.')
                {
                    index += 1;
                }
                let literal = &text[start..index];
                let value = literal.parse::<f64>().map_err(|_| {
                    GraphError::MalformedExpression(format!("bad numeric literal `{literal}`"))
                })?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(GraphError::MalformedExpression(format!(
                    "unexpected character `{}`",
                    other as char
                )));
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    // expr := term (('+' | '-') term)*
    fn expression(&mut self) -> GraphResult<Expr> {
        let mut node = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.position += 1;
                    node = Expr::Add(Box::new(node), Box::new(self.term()?));
                }
                Some(Token::Minus) => {
                    self.position += 1;
                    node = Expr::Sub(Box::new(node), Box::new(self.term()?));
                }
                _ => return Ok(node),
            }
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> GraphResult<Expr> {
        let mut node = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.position += 1;
                    node = Expr::Mul(Box::new(node), Box::new(self.factor()?));
                }
                Some(Token::Slash) => {
                    self.position += 1;
                    node = Expr::Div(Box::new(node), Box::new(self.factor()?));
                }
                _ => return Ok(node),
            }
        }
    }

    // factor := number | placeholder | '-' factor | '(' expr ')'
    fn factor(&mut self) -> GraphResult<Expr> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Placeholder(key)) => Ok(Expr::Placeholder(key)),
            Some(Token::Minus) => Ok(Expr::Negate(Box::new(self.factor()?))),
            Some(Token::Open) => {
                let inner = self.expression()?;
                match self.advance() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(GraphError::MalformedExpression(
                        "missing closing parenthesis".to_owned(),
                    )),
                }
            }
            other => Err(GraphError::MalformedExpression(format!(
                "unexpected token {other:?}"
            ))),
        }
    }
}

fn parse(text: &str) -> GraphResult<Expr> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(GraphError::MalformedExpression(
            "empty expression".to_owned(),
        ));
    }

    let mut parser = Parser {
        tokens,
        position: 0,
    };
    let expr = parser.expression()?;
    if parser.position != parser.tokens.len() {
        return Err(GraphError::MalformedExpression(
            "trailing input after expression".to_owned(),
        ));
    }
    Ok(expr)
}
