//! Attribute predicates compiled from filter expressions.
//!
//! ```text
//! expr  := and ('||' and)*
//! and   := unary ('&&' unary)*
//! unary := '!' unary | atom
//! atom  := '(' expr ')' | '*' | key (('=' | '!=' | '~') value)?
//! ```
//!
//! `key` may be a dotted path into nested mappings; values are bare words or quoted strings.
//! A bare `key` tests for a truthy value. `~` is an unanchored regex search.

mod lexer;

use crate::error::{Error, Result};
use crate::graphlib::Attrs;
use lexer::{Lexer, Spanned, Tok};
use regex::Regex;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Eq,
    Ne,
}

#[derive(Debug, Clone)]
enum Expr {
    Always,
    Present(String),
    Compare { key: String, op: CmpOp, value: String },
    Search { key: String, regex: Regex },
    Not(Box<Expr>),
    All(Vec<Expr>),
    Any(Vec<Expr>),
}

#[derive(Debug, Clone)]
pub struct Predicate {
    source: String,
    expr: Expr,
}

impl Predicate {
    pub fn compile(source: &str) -> Result<Self> {
        let tokens = Lexer::new(source).collect::<Result<Vec<_>>>()?;
        let expr = if tokens.is_empty() {
            Expr::Always
        } else {
            let mut parser = Parser {
                tokens,
                pos: 0,
                len: source.len(),
            };
            let expr = parser.parse_or()?;
            if let Some((offset, tok, _)) = parser.tokens.get(parser.pos) {
                return Err(Error::PredicateParse {
                    offset: *offset,
                    message: format!("unexpected token {tok:?}"),
                });
            }
            expr
        };
        tracing::trace!(source, "compiled predicate");
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// A predicate accepting every mapping.
    pub fn always() -> Self {
        Self {
            source: "*".to_string(),
            expr: Expr::Always,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, attrs: &Attrs) -> bool {
        eval(&self.expr, attrs)
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos).map(|(_, tok, _)| tok)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.len, |(start, _, _)| *start)
    }

    fn bump(&mut self) -> Option<Tok> {
        let tok = self.tokens.get(self.pos).map(|(_, tok, _)| tok.clone())?;
        self.pos += 1;
        Some(tok)
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::PredicateParse {
            offset: self.offset(),
            message: message.into(),
        }
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut terms = vec![self.parse_and()?];
        while self.peek() == Some(&Tok::Or) {
            self.bump();
            terms.push(self.parse_and()?);
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Expr::Any(terms)
        })
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut terms = vec![self.parse_unary()?];
        while self.peek() == Some(&Tok::And) {
            self.bump();
            terms.push(self.parse_unary()?);
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Expr::All(terms)
        })
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.peek() == Some(&Tok::Not) {
            self.bump();
            return Ok(Expr::Not(Box::new(self.parse_unary()?)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        let key = match self.bump() {
            Some(Tok::LParen) => {
                let inner = self.parse_or()?;
                if self.peek() != Some(&Tok::RParen) {
                    return Err(self.error("expected ')'"));
                }
                self.bump();
                return Ok(inner);
            }
            Some(Tok::Word(w)) if w == "*" => return Ok(Expr::Always),
            Some(Tok::Word(w)) | Some(Tok::Str(w)) => w,
            Some(tok) => {
                self.pos -= 1;
                return Err(self.error(format!("expected attribute name, found {tok:?}")));
            }
            None => return Err(self.error("expected attribute name")),
        };

        let op = match self.peek() {
            Some(Tok::Eq) => Some(CmpOp::Eq),
            Some(Tok::Ne) => Some(CmpOp::Ne),
            Some(Tok::Tilde) => None,
            _ => return Ok(Expr::Present(key)),
        };
        self.bump();
        let value = match self.peek() {
            Some(Tok::Word(v)) | Some(Tok::Str(v)) => v.clone(),
            _ => return Err(self.error(format!("expected a value after '{key}'"))),
        };
        self.bump();

        match op {
            Some(op) => Ok(Expr::Compare { key, op, value }),
            None => {
                let regex = Regex::new(&value).map_err(|source| Error::InvalidRegex {
                    pattern: value.clone(),
                    source,
                })?;
                Ok(Expr::Search { key, regex })
            }
        }
    }
}

/// Resolves `key` literally first, then as a dotted path through nested mappings.
fn lookup<'a>(attrs: &'a Attrs, key: &str) -> Option<&'a Value> {
    if let Some(v) = attrs.get(key) {
        return Some(v);
    }
    let mut segments = key.split('.');
    let mut cur = attrs.get(segments.next()?)?;
    for seg in segments {
        cur = cur.as_object()?.get(seg)?;
    }
    Some(cur)
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Scalars test themselves; arrays test their elements.
fn any_scalar(value: &Value, mut test: impl FnMut(&str) -> bool) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| test(&render(item))),
        other => test(&render(other)),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn eval(expr: &Expr, attrs: &Attrs) -> bool {
    match expr {
        Expr::Always => true,
        Expr::Present(key) => lookup(attrs, key).is_some_and(is_truthy),
        Expr::Compare { key, op, value } => {
            let equal = lookup(attrs, key)
                .is_some_and(|actual| any_scalar(actual, |s| s == value.as_str()));
            match op {
                CmpOp::Eq => equal,
                CmpOp::Ne => !equal,
            }
        }
        Expr::Search { key, regex } => {
            lookup(attrs, key).is_some_and(|actual| any_scalar(actual, |s| regex.is_match(s)))
        }
        Expr::Not(inner) => !eval(inner, attrs),
        Expr::All(terms) => terms.iter().all(|t| eval(t, attrs)),
        Expr::Any(terms) => terms.iter().any(|t| eval(t, attrs)),
    }
}
