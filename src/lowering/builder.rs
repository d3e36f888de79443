//! Node-construction helpers used by the rewriter.
//!
//! Grounded in `cairo-m-compiler-mir`'s `lowering/control_flow.rs`, which
//! gives its builder a handful of small `goto`/`branch`/`new_block` helpers
//! rather than inlining `Terminator` construction at every call site. Here
//! the equivalent helpers build `Statement`/`Expression` nodes instead of
//! basic blocks and terminators.

use crate::ir::expr::{BinaryOp, BinaryOpKind, ExpressionKind, Literal};
use crate::ir::stmt::StatementKind;
use crate::ir::{Expression, Statement};
use crate::label::LabelId;
use crate::ops::resolve_binary_op;
use crate::span::{SimpleSpan, Spanned};
use crate::symbol::{Type, VariableSymbol};

use super::Lowerer;

impl Lowerer {
    pub fn fresh_label(&mut self) -> LabelId {
        self.labels.fresh()
    }

    /// Declares a fresh, read-only synthetic symbol. Equality between
    /// symbols is by identity (`symbol::VariableSymbol`), so reusing the
    /// same human-readable name across independent loops (`upperBound`,
    /// `stepper`) never introduces an accidental alias.
    pub fn fresh_symbol(&mut self, name: &str, is_read_only: bool, ty: Type) -> VariableSymbol {
        VariableSymbol::new(name, is_read_only, ty)
    }

    pub fn var_ref(&self, symbol: &VariableSymbol, span: Option<SimpleSpan<usize>>) -> Expression {
        Spanned::new(ExpressionKind::VariableReference(symbol.clone()), span)
    }

    pub fn bool_literal(&self, value: bool, span: Option<SimpleSpan<usize>>) -> Expression {
        Spanned::new(ExpressionKind::Literal(Literal::Bool(value)), span)
    }

    pub fn int_literal(&self, value: i64, span: Option<SimpleSpan<usize>>) -> Expression {
        Spanned::new(ExpressionKind::Literal(Literal::Int(value)), span)
    }

    /// Synthesizes a `Binary` node, resolving its result type through the
    /// operator-resolution oracle (`spec.md` §6.3). The lowerer only ever
    /// asks for combinations it knows are valid, so an unresolved operator
    /// here is a bug in the lowerer itself, not a user-facing condition —
    /// matching "the lowerer treats this as a programming bug" (`spec.md`
    /// §6.3).
    pub fn binary(
        &self,
        left: Expression,
        kind: BinaryOpKind,
        right: Expression,
        span: Option<SimpleSpan<usize>>,
    ) -> Expression {
        let left_ty = left
            .value()
            .ty()
            .cloned()
            .unwrap_or_else(|| self.expect_symbol_ty(left.value()));
        let right_ty = right
            .value()
            .ty()
            .cloned()
            .unwrap_or_else(|| self.expect_symbol_ty(right.value()));
        let result_ty = resolve_binary_op(kind, &left_ty, &right_ty)
            .expect("lowerer only synthesizes operator/operand combinations it knows are valid");
        Spanned::new(
            ExpressionKind::Binary {
                left: Box::new(left),
                op: BinaryOp { kind, result_ty },
                right: Box::new(right),
            },
            span,
        )
    }

    /// `ExpressionKind::ty()` only has an opinion about `Binary` nodes;
    /// literals and variable references carry their type on their payload
    /// instead. This resolves that for the builder's own use.
    fn expect_symbol_ty(&self, expr: &ExpressionKind) -> Type {
        match expr {
            ExpressionKind::Literal(lit) => lit.ty(),
            ExpressionKind::VariableReference(sym) => sym.ty().clone(),
            ExpressionKind::Assignment { target, .. } => target.ty().clone(),
            ExpressionKind::Binary { op, .. } => op.result_ty.clone(),
            ExpressionKind::Other { .. } => {
                panic!("cannot infer the type of a pass-through expression")
            }
        }
    }

    pub fn var_decl(
        &self,
        symbol: VariableSymbol,
        initializer: Expression,
        span: Option<SimpleSpan<usize>>,
    ) -> Statement {
        Spanned::new(
            StatementKind::VariableDeclaration { symbol, initializer },
            span,
        )
    }

    pub fn assign(&self, target: VariableSymbol, value: Expression, span: Option<SimpleSpan<usize>>) -> Statement {
        Spanned::new(
            StatementKind::ExpressionStatement(Spanned::new(
                ExpressionKind::Assignment {
                    target,
                    value: Box::new(value),
                },
                span,
            )),
            span,
        )
    }

    pub fn label_stmt(&self, label: LabelId, span: Option<SimpleSpan<usize>>) -> Statement {
        Spanned::new(StatementKind::Label(label), span)
    }

    pub fn goto_stmt(&self, target: LabelId, span: Option<SimpleSpan<usize>>) -> Statement {
        Spanned::new(StatementKind::Goto(target), span)
    }

    pub fn conditional_goto_stmt(
        &self,
        target: LabelId,
        condition: Expression,
        jump_if_true: bool,
        span: Option<SimpleSpan<usize>>,
    ) -> Statement {
        Spanned::new(
            StatementKind::ConditionalGoto {
                target,
                condition,
                jump_if_true,
            },
            span,
        )
    }

    pub fn block_stmt(&self, statements: Vec<Statement>, span: Option<SimpleSpan<usize>>) -> Statement {
        Spanned::new(StatementKind::Block(statements), span)
    }
}
