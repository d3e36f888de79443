//! IR node definitions and the small amount of shared traversal scaffolding
//! the rewriter builds on.

pub mod expr;
pub mod stmt;

pub use expr::{BinaryOp, BinaryOpKind, Expression, ExpressionKind, Literal};
pub use stmt::{Block, Statement, StatementKind};
