//! Advisory predicate evaluation
//!
//! Parses the textual predicate DSL a descriptor carries and applies it to
//! records. The grammar matches what the predicate translator emits:
//!
//! ```text
//! expr      := NOT expr | '(' expr ')' | expr INFIX expr | field | literal
//! INFIX     := '=' | '<' | '<=' | '>' | '>=' | '<>' | 'LIKE' | 'AND' | 'OR'
//! field     := bare identifier (unquoted column name)
//! literal   := number | quoted-string
//! ```
//!
//! A bare identifier naming a known column resolves to that column;
//! otherwise it is a text literal (the escape rules leave safe strings
//! unquoted, so the two are not distinguishable syntactically).
//!
//! Comparison semantics are strict: no coercion across kinds, and a record
//! missing the referenced column never matches the comparison.

use regex::Regex;
use serde_json::Value;

use crate::catalog::{Field, FieldCatalog};

use super::source::extract_value;

/// Comparison operators of the DSL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
    Ne,
    Like,
}

/// One comparison operand
#[derive(Debug, Clone)]
enum Operand {
    /// A base-table column
    Column(Field),
    /// A text literal
    Text(String),
    /// A numeric literal
    Number(f64),
}

/// Parsed predicate tree
#[derive(Debug, Clone)]
enum Pred {
    Cmp {
        op: CmpOp,
        left: Operand,
        right: Operand,
    },
    Like {
        left: Operand,
        pattern: Regex,
    },
    And(Box<Pred>, Box<Pred>),
    Or(Box<Pred>, Box<Pred>),
    Not(Box<Pred>),
}

/// A predicate compiled against a table's catalog
#[derive(Debug, Clone)]
pub struct CompiledPredicate {
    root: Pred,
}

impl CompiledPredicate {
    /// Parses predicate text against a catalog
    ///
    /// Returns `None` when the text does not conform to the grammar; the
    /// caller treats that as "cannot apply" and keeps the rows unfiltered.
    pub fn parse(text: &str, catalog: &FieldCatalog) -> Option<Self> {
        let tokens = tokenize(text)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            catalog,
        };
        let root = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return None; // trailing tokens
        }
        Some(Self { root })
    }

    /// Evaluates the predicate against one record
    pub fn matches(&self, record: &Value) -> bool {
        eval(&self.root, record)
    }
}

// ---- tokenizer ----

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Number(f64),
    Str(String),
    Op(CmpOp),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

fn tokenize(text: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' | '\r' => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '=' => {
                tokens.push(Token::Op(CmpOp::Eq));
                i += 1;
            }
            '<' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::Op(CmpOp::Le));
                    i += 2;
                } else if chars.get(i + 1) == Some(&'>') {
                    tokens.push(Token::Op(CmpOp::Ne));
                    i += 2;
                } else {
                    tokens.push(Token::Op(CmpOp::Lt));
                    i += 1;
                }
            }
            '>' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::Op(CmpOp::Ge));
                    i += 2;
                } else {
                    tokens.push(Token::Op(CmpOp::Gt));
                    i += 1;
                }
            }
            '"' => {
                let mut value = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        Some('\\') => {
                            value.push(*chars.get(i + 1)?);
                            i += 2;
                        }
                        Some('"') => {
                            i += 1;
                            break;
                        }
                        Some(c) => {
                            value.push(*c);
                            i += 1;
                        }
                        None => return None, // unterminated string
                    }
                }
                tokens.push(Token::Str(value));
            }
            c if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric()
                        || chars[i] == '_'
                        || chars[i] == '-'
                        || chars[i] == '.')
                {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                tokens.push(match word.as_str() {
                    "NOT" => Token::Not,
                    "AND" => Token::And,
                    "OR" => Token::Or,
                    "LIKE" => Token::Op(CmpOp::Like),
                    _ => match word.parse::<f64>() {
                        Ok(n) => Token::Number(n),
                        Err(_) => Token::Ident(word),
                    },
                });
            }
            _ => return None, // unknown character
        }
    }

    Some(tokens)
}

// ---- parser ----

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    catalog: &'a FieldCatalog,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> Option<Pred> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.next();
            let right = self.parse_and()?;
            left = Pred::Or(Box::new(left), Box::new(right));
        }
        Some(left)
    }

    fn parse_and(&mut self) -> Option<Pred> {
        let mut left = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.next();
            let right = self.parse_unary()?;
            left = Pred::And(Box::new(left), Box::new(right));
        }
        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Pred> {
        if self.peek() == Some(&Token::Not) {
            self.next();
            let inner = self.parse_unary()?;
            return Some(Pred::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Option<Pred> {
        if self.peek() == Some(&Token::LParen) {
            self.next();
            let inner = self.parse_or()?;
            if self.next()? != Token::RParen {
                return None;
            }
            return Some(inner);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Option<Pred> {
        let left = self.parse_operand()?;
        let op = match self.next()? {
            Token::Op(op) => op,
            _ => return None, // a bare operand is not a predicate
        };
        let right = self.parse_operand()?;

        if op == CmpOp::Like {
            let pattern = match &right {
                Operand::Text(p) => wildcard_regex(p)?,
                _ => return None,
            };
            return Some(Pred::Like { left, pattern });
        }
        Some(Pred::Cmp { op, left, right })
    }

    fn parse_operand(&mut self) -> Option<Operand> {
        match self.next()? {
            Token::Ident(word) => match self.catalog.field_named(&word) {
                Some(field) => Some(Operand::Column(field.clone())),
                // An unquoted safe string literal
                None => Some(Operand::Text(word)),
            },
            Token::Number(n) => Some(Operand::Number(n)),
            // Quoted strings are literals, never columns
            Token::Str(s) => Some(Operand::Text(s)),
            _ => None,
        }
    }
}

/// Builds an anchored regex from a `*`-wildcard pattern
fn wildcard_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::with_capacity(pattern.len() + 2);
    source.push('^');
    for (i, chunk) in pattern.split('*').enumerate() {
        if i > 0 {
            source.push_str(".*");
        }
        source.push_str(&regex::escape(chunk));
    }
    source.push('$');
    Regex::new(&source).ok()
}

// ---- evaluation ----

fn eval(pred: &Pred, record: &Value) -> bool {
    match pred {
        Pred::And(a, b) => eval(a, record) && eval(b, record),
        Pred::Or(a, b) => eval(a, record) || eval(b, record),
        Pred::Not(inner) => !eval(inner, record),
        Pred::Like { left, pattern } => match resolve(left, record) {
            Some(Value::String(s)) => pattern.is_match(&s),
            _ => false,
        },
        Pred::Cmp { op, left, right } => {
            let left = match resolve(left, record) {
                Some(v) => v,
                None => return false, // missing column never matches
            };
            let right = match resolve(right, record) {
                Some(v) => v,
                None => return false,
            };
            compare(*op, &left, &right)
        }
    }
}

fn resolve(operand: &Operand, record: &Value) -> Option<Value> {
    match operand {
        Operand::Column(field) => extract_value(record, field),
        Operand::Text(s) => Some(Value::String(s.clone())),
        Operand::Number(n) => serde_json::Number::from_f64(*n).map(Value::Number),
    }
}

/// Strict comparison: no coercion across kinds
fn compare(op: CmpOp, left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => (a, b),
                _ => return false,
            };
            match op {
                CmpOp::Eq => a == b,
                CmpOp::Lt => a < b,
                CmpOp::Le => a <= b,
                CmpOp::Gt => a > b,
                CmpOp::Ge => a >= b,
                CmpOp::Ne => a != b,
                CmpOp::Like => false,
            }
        }
        (Value::String(a), Value::String(b)) => match op {
            CmpOp::Eq => a == b,
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
            CmpOp::Ne => a != b,
            CmpOp::Like => false,
        },
        _ => false,
    }
}
