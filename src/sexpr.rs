//! A minimal s-expression surface syntax for the bound IR.
//!
//! This is *not* part of the lowering contract (`spec.md` §6.4 treats the
//! lowerer as a pure in-process library with no CLI/file/env surface of its
//! own) — it exists only so `src/bin/lower-dump.rs` and the test suite have
//! a convenient, readable way to write down bound trees by hand, the way
//! the teacher workspace's `cairo-m-test-utils` crate provides fixture
//! parsing for its own tests.
//!
//! Grammar (every list is parenthesized, atoms are whitespace-separated):
//!
//! ```text
//! stmt    := (block stmt...)
//!          | (var name ro|rw type expr)
//!          | (expr expr)
//!          | (if expr stmt) | (if expr stmt stmt)
//!          | (while expr stmt)
//!          | (do-while stmt expr)
//!          | (for name expr expr stmt) | (for name expr expr expr stmt)
//! expr    := (int N) | (bool true|false) | (var name)
//!          | (assign name expr)
//!          | (+ expr expr) | (<= expr expr) | (>= expr expr)
//!          | (< expr expr) | (> expr expr) | (&& expr expr) | (|| expr expr)
//! type    := int | bool
//! ```

use crate::error::{LowerError, LowerResult};
use crate::ir::expr::{BinaryOp, BinaryOpKind, ExpressionKind, Literal};
use crate::ir::stmt::StatementKind;
use crate::ir::{Expression, Statement};
use crate::ops::resolve_binary_op;
use crate::span::Spanned;
use crate::symbol::{Type, VariableSymbol};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Sexpr {
    Atom(String),
    List(Vec<Sexpr>),
}

fn tokenize(src: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in src.chars() {
        match ch {
            '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_sexpr(tokens: &[String], pos: &mut usize) -> LowerResult<Sexpr> {
    let malformed = |message: &str| LowerError::MalformedInput {
        message: message.to_string(),
        span: None,
    };
    let token = tokens.get(*pos).ok_or_else(|| malformed("unexpected end of input"))?;
    if token == "(" {
        *pos += 1;
        let mut items = Vec::new();
        loop {
            match tokens.get(*pos) {
                Some(t) if t == ")" => {
                    *pos += 1;
                    break;
                }
                Some(_) => items.push(parse_sexpr(tokens, pos)?),
                None => return Err(malformed("unterminated list")),
            }
        }
        Ok(Sexpr::List(items))
    } else if token == ")" {
        Err(malformed("unexpected `)`"))
    } else {
        *pos += 1;
        Ok(Sexpr::Atom(token.clone()))
    }
}

/// Parses a single top-level s-expression into a [`Sexpr`] tree.
fn parse(src: &str) -> LowerResult<Sexpr> {
    let tokens = tokenize(src);
    let mut pos = 0;
    let value = parse_sexpr(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(LowerError::MalformedInput {
            message: "trailing input after top-level expression".to_string(),
            span: None,
        });
    }
    Ok(value)
}

struct Translator {
    symbols: FxHashMap<String, VariableSymbol>,
}

impl Translator {
    fn new() -> Self {
        Self {
            symbols: FxHashMap::default(),
        }
    }

    fn malformed(message: impl Into<String>) -> LowerError {
        LowerError::MalformedInput {
            message: message.into(),
            span: None,
        }
    }

    fn list<'a>(node: &'a Sexpr, what: &str) -> LowerResult<&'a [Sexpr]> {
        match node {
            Sexpr::List(items) => Ok(items),
            Sexpr::Atom(_) => Err(Self::malformed(format!("expected a {what} list"))),
        }
    }

    fn atom<'a>(node: &'a Sexpr, what: &str) -> LowerResult<&'a str> {
        match node {
            Sexpr::Atom(name) => Ok(name),
            Sexpr::List(_) => Err(Self::malformed(format!("expected a {what} atom"))),
        }
    }

    fn head<'a>(items: &'a [Sexpr]) -> LowerResult<(&'a str, &'a [Sexpr])> {
        let (head, rest) = items
            .split_first()
            .ok_or_else(|| Self::malformed("empty list"))?;
        Ok((Self::atom(head, "form tag")?, rest))
    }

    fn parse_type(node: &Sexpr) -> LowerResult<Type> {
        match Self::atom(node, "type")? {
            "int" => Ok(Type::Int),
            "bool" => Ok(Type::Bool),
            other => Err(Self::malformed(format!("unknown type `{other}`"))),
        }
    }

    fn declare(&mut self, name: &str, is_read_only: bool, ty: Type) -> VariableSymbol {
        let symbol = VariableSymbol::new(name, is_read_only, ty);
        self.symbols.insert(name.to_string(), symbol.clone());
        symbol
    }

    fn lookup(&self, name: &str) -> LowerResult<VariableSymbol> {
        self.symbols
            .get(name)
            .cloned()
            .ok_or_else(|| Self::malformed(format!("undeclared variable `{name}`")))
    }

    fn binary(&mut self, kind: BinaryOpKind, left: &Sexpr, right: &Sexpr) -> LowerResult<Expression> {
        let left = self.expression(left)?;
        let right = self.expression(right)?;
        let left_ty = self.expr_ty(left.value())?;
        let right_ty = self.expr_ty(right.value())?;
        let result_ty = resolve_binary_op(kind, &left_ty, &right_ty)?;
        Ok(Spanned::synthesized(ExpressionKind::Binary {
            left: Box::new(left),
            op: BinaryOp { kind, result_ty },
            right: Box::new(right),
        }))
    }

    fn expr_ty(&self, expr: &ExpressionKind) -> LowerResult<Type> {
        match expr {
            ExpressionKind::Literal(lit) => Ok(lit.ty()),
            ExpressionKind::VariableReference(sym) | ExpressionKind::Assignment { target: sym, .. } => {
                Ok(sym.ty().clone())
            }
            ExpressionKind::Binary { op, .. } => Ok(op.result_ty.clone()),
            ExpressionKind::Other { .. } => Err(Self::malformed("cannot type a pass-through expression")),
        }
    }

    fn expression(&mut self, node: &Sexpr) -> LowerResult<Expression> {
        let items = Self::list(node, "expression")?;
        let (tag, rest) = Self::head(items)?;
        match tag {
            "int" => {
                let [value] = rest else {
                    return Err(Self::malformed("(int N) takes exactly one argument"));
                };
                let value: i64 = Self::atom(value, "integer literal")?
                    .parse()
                    .map_err(|_| Self::malformed("invalid integer literal"))?;
                Ok(Spanned::synthesized(ExpressionKind::Literal(Literal::Int(value))))
            }
            "bool" => {
                let [value] = rest else {
                    return Err(Self::malformed("(bool true|false) takes exactly one argument"));
                };
                let value = match Self::atom(value, "boolean literal")? {
                    "true" => true,
                    "false" => false,
                    other => return Err(Self::malformed(format!("invalid boolean literal `{other}`"))),
                };
                Ok(Spanned::synthesized(ExpressionKind::Literal(Literal::Bool(value))))
            }
            "var" => {
                let [name] = rest else {
                    return Err(Self::malformed("(var name) takes exactly one argument"));
                };
                let symbol = self.lookup(Self::atom(name, "variable name")?)?;
                Ok(Spanned::synthesized(ExpressionKind::VariableReference(symbol)))
            }
            "assign" => {
                let [name, value] = rest else {
                    return Err(Self::malformed("(assign name expr) takes exactly two arguments"));
                };
                let target = self.lookup(Self::atom(name, "assignment target")?)?;
                let value = self.expression(value)?;
                Ok(Spanned::synthesized(ExpressionKind::Assignment {
                    target,
                    value: Box::new(value),
                }))
            }
            "+" => self.binary(BinaryOpKind::Add, &rest[0], &rest[1]),
            "<=" => self.binary(BinaryOpKind::Le, &rest[0], &rest[1]),
            ">=" => self.binary(BinaryOpKind::Ge, &rest[0], &rest[1]),
            "<" => self.binary(BinaryOpKind::Lt, &rest[0], &rest[1]),
            ">" => self.binary(BinaryOpKind::Gt, &rest[0], &rest[1]),
            "&&" => self.binary(BinaryOpKind::And, &rest[0], &rest[1]),
            "||" => self.binary(BinaryOpKind::Or, &rest[0], &rest[1]),
            other => Err(Self::malformed(format!("unknown expression form `{other}`"))),
        }
    }

    fn statement(&mut self, node: &Sexpr) -> LowerResult<Statement> {
        let items = Self::list(node, "statement")?;
        let (tag, rest) = Self::head(items)?;
        match tag {
            "block" => {
                let statements = rest.iter().map(|s| self.statement(s)).collect::<LowerResult<_>>()?;
                Ok(Spanned::synthesized(StatementKind::Block(statements)))
            }
            "var" => {
                let [name, mutability, ty, initializer] = rest else {
                    return Err(Self::malformed("(var name ro|rw type expr) takes four arguments"));
                };
                let name = Self::atom(name, "variable name")?;
                let is_read_only = match Self::atom(mutability, "mutability flag")? {
                    "ro" => true,
                    "rw" => false,
                    other => return Err(Self::malformed(format!("expected ro|rw, got `{other}`"))),
                };
                let ty = Self::parse_type(ty)?;
                let initializer = self.expression(initializer)?;
                let symbol = self.declare(name, is_read_only, ty);
                Ok(Spanned::synthesized(StatementKind::VariableDeclaration { symbol, initializer }))
            }
            "expr" => {
                let [expr] = rest else {
                    return Err(Self::malformed("(expr expr) takes exactly one argument"));
                };
                Ok(Spanned::synthesized(StatementKind::ExpressionStatement(self.expression(expr)?)))
            }
            "if" => match rest {
                [condition, then_branch] => Ok(Spanned::synthesized(StatementKind::If {
                    condition: self.expression(condition)?,
                    then_branch: Box::new(self.statement(then_branch)?),
                    else_branch: None,
                })),
                [condition, then_branch, else_branch] => Ok(Spanned::synthesized(StatementKind::If {
                    condition: self.expression(condition)?,
                    then_branch: Box::new(self.statement(then_branch)?),
                    else_branch: Some(Box::new(self.statement(else_branch)?)),
                })),
                _ => Err(Self::malformed("(if cond then [else]) takes two or three arguments")),
            },
            "while" => {
                let [condition, body] = rest else {
                    return Err(Self::malformed("(while cond body) takes exactly two arguments"));
                };
                Ok(Spanned::synthesized(StatementKind::While {
                    condition: self.expression(condition)?,
                    body: Box::new(self.statement(body)?),
                }))
            }
            "do-while" => {
                let [body, condition] = rest else {
                    return Err(Self::malformed("(do-while body cond) takes exactly two arguments"));
                };
                Ok(Spanned::synthesized(StatementKind::DoWhile {
                    body: Box::new(self.statement(body)?),
                    condition: self.expression(condition)?,
                }))
            }
            "for" => {
                let (name, lo, hi, step, body) = match rest {
                    [name, lo, hi, body] => (name, lo, hi, None, body),
                    [name, lo, hi, step, body] => (name, lo, hi, Some(step), body),
                    _ => {
                        return Err(Self::malformed(
                            "(for name lo hi [step] body) takes four or five arguments",
                        ))
                    }
                };
                let lower_bound = self.expression(lo)?;
                let upper_bound = self.expression(hi)?;
                let step = step.map(|s| self.expression(s)).transpose()?;
                let variable = self.declare(Self::atom(name, "loop variable")?, false, Type::Int);
                let body = Box::new(self.statement(body)?);
                Ok(Spanned::synthesized(StatementKind::For {
                    variable,
                    lower_bound,
                    upper_bound,
                    step,
                    body,
                }))
            }
            other => Err(Self::malformed(format!("unknown statement form `{other}`"))),
        }
    }
}

/// Parses a bound statement from its s-expression surface syntax.
pub fn parse_statement(src: &str) -> LowerResult<Statement> {
    let node = parse(src)?;
    Translator::new().statement(&node)
}
