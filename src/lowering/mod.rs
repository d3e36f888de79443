//! The lowering pass: rewrite, then flatten.
//!
//! `Lowerer` is the short-lived, per-invocation value the rest of this
//! module hangs off of — the same shape as the teacher's per-call MIR
//! builders (`MirBuilder` in `cairo-m-compiler-mir::lowering::builder`): it
//! owns exactly the mutable state one lowering needs (here, just the label
//! counter) and is discarded when `lower` returns (`spec.md` §3.4).

mod builder;
mod flatten;
mod rewrite;

use crate::ir::stmt::Block;
use crate::ir::Statement;
use crate::label::LabelAllocator;

pub struct Lowerer {
    labels: LabelAllocator,
}

impl Default for Lowerer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lowerer {
    pub const fn new() -> Self {
        Self {
            labels: LabelAllocator::new(),
        }
    }

    /// Rewrites `statement` to a fixed point and flattens the result into a
    /// single top-level block (`spec.md` §4.1).
    pub fn lower(&mut self, statement: Statement) -> Block {
        log::debug!(target: "treelower", "lowering statement");
        let span = statement.span();
        let rewritten = self.rewrite_statement(statement);
        let statements = flatten::flatten(rewritten);
        Block::new(statements, span)
    }
}

/// Lowers a well-typed bound statement into a flat block of labels, gotos,
/// conditional gotos, declarations, assignments, and expression statements.
///
/// See `spec.md` §4.1. Idempotent on already-lowered input modulo label
/// renumbering.
pub fn lower(statement: &Statement) -> Block {
    Lowerer::new().lower(statement.clone())
}

/// Ergonomic overload of [`lower`] for callers that already own the tree
/// and would otherwise pay for a clone they don't need.
pub fn lower_owned(statement: Statement) -> Block {
    Lowerer::new().lower(statement)
}
