//! # treelower
//!
//! The lowering pass of a small imperative-language compiler: rewrites a
//! type-checked, tree-shaped bound IR containing structured control flow
//! (`if`/`else`, `while`, `do-while`, `for`-with-optional-`step`) into an
//! equivalent IR containing only labels, unconditional jumps, conditional
//! jumps, variable declarations, assignments, and expression evaluations —
//! a flat sequence suitable for emission to a stack machine, bytecode, or
//! three-address code.
//!
//! ## Design
//!
//! A single-pass tree rewriter (`lowering::rewrite`) walks the immutable
//! bound tree and returns a new tree; a flattener (`lowering::flatten`)
//! then splices every nested block into one top-level sequence. Both are
//! driven from the one public entry point, [`lower`].
//!
//! ## Architecture
//!
//! ```text
//! Statement (bound tree, may contain If/While/DoWhile/For)
//!   -> Lowerer::rewrite_statement   (desugars control flow to labels/gotos)
//!   -> lowering::flatten::flatten   (splices nested blocks into one)
//!   -> Block                        (flat, ready for a stack machine / bytecode emitter)
//! ```
//!
//! This crate has no user-facing error surface (`spec.md` §7): malformed
//! input is a contract violation between this crate and whatever produced
//! the bound tree, not a condition library users recover from.

pub mod error;
pub mod ir;
pub mod label;
pub mod lowering;
pub mod ops;
pub mod pretty;
pub mod sexpr;
pub mod span;
pub mod symbol;

pub use error::{LowerError, LowerResult};
pub use ir::{BinaryOp, BinaryOpKind, Block, Expression, ExpressionKind, Literal, Statement, StatementKind};
pub use label::{LabelAllocator, LabelId};
pub use lowering::{lower, lower_owned, Lowerer};
pub use pretty::PrettyPrint;
pub use span::{SimpleSpan, Spanned};
pub use symbol::{Type, VariableSymbol};
