//! The flattener (`spec.md` §4.3): splices every nested `Block` in an
//! already-rewritten tree into a single top-level sequence, preserving
//! order.

use crate::ir::stmt::StatementKind;
use crate::ir::Statement;

/// Treats the tree as a stack problem: push the root, repeatedly pop, and
/// if the popped node is a `Block` push its children in reverse order so
/// they come back off the stack (and so into the output) in their original
/// order.
pub(crate) fn flatten(root: Statement) -> Vec<Statement> {
    let mut stack = vec![root];
    let mut out = Vec::new();

    while let Some(node) = stack.pop() {
        match node.into_parts() {
            (StatementKind::Block(children), _) => {
                for child in children.into_iter().rev() {
                    stack.push(child);
                }
            }
            (other, span) => out.push(crate::span::Spanned::new(other, span)),
        }
    }

    out
}
