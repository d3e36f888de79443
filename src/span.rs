//! Source-span plumbing shared by every IR node.
//!
//! Mirrors `cairo-m-compiler-parser`'s `Spanned<T>` and the
//! `Option<SimpleSpan<usize>>` fields used throughout
//! `cairo-m-compiler-diagnostics`: every node in the bound tree carries its
//! originating span, and every node synthesized during lowering carries the
//! span of the node it was synthesized from.

pub use chumsky::span::SimpleSpan;

/// A value together with the source span it originated from.
///
/// Synthesized nodes reuse the span of the statement they were rewritten
/// from rather than carrying `None`, so diagnostics produced downstream
/// still point at user-written source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spanned<T> {
    value: T,
    span: Option<SimpleSpan<usize>>,
}

impl<T> Spanned<T> {
    pub const fn new(value: T, span: Option<SimpleSpan<usize>>) -> Self {
        Self { value, span }
    }

    /// Build a node with no span of its own, for purely synthetic
    /// constructs that were never backed by source text.
    pub const fn synthesized(value: T) -> Self {
        Self { value, span: None }
    }

    pub const fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Option<SimpleSpan<usize>>) {
        (self.value, self.span)
    }

    pub const fn span(&self) -> Option<SimpleSpan<usize>> {
        self.span
    }

    /// Rewrap a new value under this node's span, e.g. when reconstructing
    /// a statement whose children changed but whose origin did not.
    pub fn with_value<U>(&self, value: U) -> Spanned<U> {
        Spanned::new(value, self.span)
    }
}
