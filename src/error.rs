//! Error type for the lowerer.
//!
//! `spec.md` §7 is explicit that the lowerer has no user-facing error
//! surface: malformed input and unresolved operators are contract bugs, not
//! recoverable conditions. This is modeled the same way
//! `cairo-m-compiler-mir::MirError` is — a plain enum with a hand-written
//! `Display`/`Error` impl, not `thiserror`, even though other crates in the
//! same workspace reach for `thiserror`. `LowerError` exists for the few
//! call sites (the CLI's surface parser, test helpers) that want to report
//! a contract violation as a `Result` instead of panicking; the core
//! `lower`/`lower_owned` entry points never construct one on well-typed
//! input.

use crate::span::SimpleSpan;
use crate::symbol::Type;
use crate::ir::BinaryOpKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LowerError {
    /// The input tree violates a precondition the binder is supposed to
    /// guarantee (missing field, unresolved symbol, mistyped expression).
    MalformedInput {
        message: String,
        span: Option<SimpleSpan<usize>>,
    },
    /// The binary-operator oracle (`spec.md` §6.3) was asked for a
    /// resolution outside the required table.
    UnresolvedOperator {
        op: BinaryOpKind,
        left: Type,
        right: Type,
    },
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput { message, span } => {
                write!(f, "malformed bound tree: {message}")?;
                if let Some(span) = span {
                    write!(f, " at {span:?}")?;
                }
                Ok(())
            }
            Self::UnresolvedOperator { op, left, right } => {
                write!(f, "no resolution for {op:?}({left}, {right})")
            }
        }
    }
}

impl std::error::Error for LowerError {}

pub type LowerResult<T> = Result<T, LowerError>;
