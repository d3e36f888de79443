//! The rewriter: dispatches on statement kind and desugars structured
//! control flow into labels and gotos (`spec.md` §4.2).
//!
//! Shaped after `cairo-m-compiler-mir::lowering::stmt`'s `lower_statement`
//! match over `Statement::If`/`While`/`For`/... — one method per
//! control-flow kind, a default arm that structurally recurses. The
//! teacher's version threads a mutable basic-block builder through every
//! call; this one is a pure tree-to-tree rewrite, so each `rewrite_*`
//! method returns the replacement `Statement` instead of mutating shared
//! builder state.

use crate::ir::expr::BinaryOpKind;
use crate::ir::stmt::StatementKind;
use crate::ir::Statement;
use crate::symbol::Type;

use super::Lowerer;

impl Lowerer {
    /// Rewrites `stmt` and everything reachable from it until no
    /// `If`/`While`/`DoWhile`/`For` node remains (`spec.md` §3.3,
    /// "Closure under rewriting").
    pub(crate) fn rewrite_statement(&mut self, stmt: Statement) -> Statement {
        log::trace!(target: "treelower::rewrite", "rewriting statement");
        let (kind, span) = stmt.into_parts();
        match kind {
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.rewrite_if(condition, *then_branch, else_branch.map(|b| *b), span),

            StatementKind::While { condition, body } => self.rewrite_while(condition, *body, span),

            StatementKind::DoWhile { body, condition } => self.rewrite_do_while(*body, condition, span),

            StatementKind::For {
                variable,
                lower_bound,
                upper_bound,
                step,
                body,
            } => match step {
                None => self.rewrite_for_no_step(variable, lower_bound, upper_bound, *body, span),
                Some(step) => self.rewrite_for_with_step(variable, lower_bound, upper_bound, step, *body, span),
            },

            StatementKind::Block(children) => {
                let rewritten = children.into_iter().map(|c| self.rewrite_statement(c)).collect();
                crate::span::Spanned::new(StatementKind::Block(rewritten), span)
            }

            // Leaves: variable declarations, expression statements, and the
            // already-low-level forms (Label/Goto/ConditionalGoto) carry no
            // nested statements, so there is nothing to recurse into.
            // Expressions are never themselves lowered (spec.md §4.2.6).
            other @ (StatementKind::VariableDeclaration { .. }
            | StatementKind::ExpressionStatement(_)
            | StatementKind::Label(_)
            | StatementKind::Goto(_)
            | StatementKind::ConditionalGoto { .. }) => crate::span::Spanned::new(other, span),
        }
    }

    /// `spec.md` §4.2.1.
    fn rewrite_if(
        &mut self,
        condition: crate::ir::Expression,
        then_branch: Statement,
        else_branch: Option<Statement>,
        span: Option<crate::span::SimpleSpan<usize>>,
    ) -> Statement {
        let replacement = match else_branch {
            None => {
                // gotoFalse <condition>, end
                // <then>
                // end:
                let end = self.fresh_label();
                self.block_stmt(
                    vec![
                        self.conditional_goto_stmt(end, condition, false, span),
                        then_branch,
                        self.label_stmt(end, span),
                    ],
                    span,
                )
            }
            Some(else_branch) => {
                // gotoFalse <condition>, else
                // <then>
                // goto end
                // else:
                // <else>
                // end:
                let else_label = self.fresh_label();
                let end = self.fresh_label();
                self.block_stmt(
                    vec![
                        self.conditional_goto_stmt(else_label, condition, false, span),
                        then_branch,
                        self.goto_stmt(end, span),
                        self.label_stmt(else_label, span),
                        else_branch,
                        self.label_stmt(end, span),
                    ],
                    span,
                )
            }
        };
        self.rewrite_statement(replacement)
    }

    /// `spec.md` §4.2.2. Check-at-bottom: the condition is tested exactly
    /// once per iteration via a single `gotoTrue`, rather than a check-at-top
    /// form that would need both an entry test and a back edge test.
    fn rewrite_while(
        &mut self,
        condition: crate::ir::Expression,
        body: Statement,
        span: Option<crate::span::SimpleSpan<usize>>,
    ) -> Statement {
        // goto check
        // continue:
        // <body>
        // check:
        // gotoTrue <condition>, continue
        let check = self.fresh_label();
        let continue_label = self.fresh_label();
        let replacement = self.block_stmt(
            vec![
                self.goto_stmt(check, span),
                self.label_stmt(continue_label, span),
                body,
                self.label_stmt(check, span),
                self.conditional_goto_stmt(continue_label, condition, true, span),
            ],
            span,
        );
        self.rewrite_statement(replacement)
    }

    /// `spec.md` §4.2.3. The body always runs once before the first test.
    fn rewrite_do_while(
        &mut self,
        body: Statement,
        condition: crate::ir::Expression,
        span: Option<crate::span::SimpleSpan<usize>>,
    ) -> Statement {
        // continue:
        // <body>
        // gotoTrue <condition>, continue
        let continue_label = self.fresh_label();
        let replacement = self.block_stmt(
            vec![
                self.label_stmt(continue_label, span),
                body,
                self.conditional_goto_stmt(continue_label, condition, true, span),
            ],
            span,
        );
        self.rewrite_statement(replacement)
    }

    /// `spec.md` §4.2.4. `U` is evaluated exactly once, bound to a fresh
    /// read-only `upperBound` symbol, before the desugared `while` is built
    /// and re-rewritten.
    fn rewrite_for_no_step(
        &mut self,
        variable: crate::symbol::VariableSymbol,
        lower_bound: crate::ir::Expression,
        upper_bound: crate::ir::Expression,
        body: Statement,
        span: Option<crate::span::SimpleSpan<usize>>,
    ) -> Statement {
        // {
        //   var v = L
        //   let upperBound = U
        //   while (v <= upperBound) { <body> v = v + 1 }
        // }
        let upper_bound_sym = self.fresh_symbol("upperBound", true, Type::Int);

        let var_decl = self.var_decl(variable.clone(), lower_bound, span);
        let upper_decl = self.var_decl(upper_bound_sym.clone(), upper_bound, span);

        let condition = self.binary(
            self.var_ref(&variable, span),
            BinaryOpKind::Le,
            self.var_ref(&upper_bound_sym, span),
            span,
        );

        let increment = self.assign(
            variable.clone(),
            self.binary(self.var_ref(&variable, span), BinaryOpKind::Add, self.int_literal(1, span), span),
            span,
        );

        let while_body = self.block_stmt(vec![body, increment], span);
        let while_stmt = crate::span::Spanned::new(
            StatementKind::While {
                condition,
                body: Box::new(while_body),
            },
            span,
        );

        let replacement = self.block_stmt(vec![var_decl, upper_decl, while_stmt], span);
        self.rewrite_statement(replacement)
    }

    /// `spec.md` §4.2.5. `L`, `U`, and `S` each evaluate exactly once, in
    /// that source order. The disjunctive condition handles both ascending
    /// and descending counted loops without branching on the step's sign at
    /// compile time; when `stepper == 0` both disjuncts are false and the
    /// loop body never runs, which is the specified (not accidental)
    /// behavior for a zero step.
    #[allow(clippy::too_many_arguments)]
    fn rewrite_for_with_step(
        &mut self,
        variable: crate::symbol::VariableSymbol,
        lower_bound: crate::ir::Expression,
        upper_bound: crate::ir::Expression,
        step: crate::ir::Expression,
        body: Statement,
        span: Option<crate::span::SimpleSpan<usize>>,
    ) -> Statement {
        // {
        //   var v = L
        //   let upperBound = U
        //   let stepper = S
        //   while ((stepper > 0 && v <= upperBound) || (stepper < 0 && v >= upperBound)) {
        //     <body>
        //     v = v + stepper
        //   }
        // }
        let upper_bound_sym = self.fresh_symbol("upperBound", true, Type::Int);
        let stepper_sym = self.fresh_symbol("stepper", true, Type::Int);

        let var_decl = self.var_decl(variable.clone(), lower_bound, span);
        let upper_decl = self.var_decl(upper_bound_sym.clone(), upper_bound, span);
        let stepper_decl = self.var_decl(stepper_sym.clone(), step, span);

        let ascending = self.binary(
            self.binary(self.var_ref(&stepper_sym, span), BinaryOpKind::Gt, self.int_literal(0, span), span),
            BinaryOpKind::And,
            self.binary(self.var_ref(&variable, span), BinaryOpKind::Le, self.var_ref(&upper_bound_sym, span), span),
            span,
        );
        let descending = self.binary(
            self.binary(self.var_ref(&stepper_sym, span), BinaryOpKind::Lt, self.int_literal(0, span), span),
            BinaryOpKind::And,
            self.binary(self.var_ref(&variable, span), BinaryOpKind::Ge, self.var_ref(&upper_bound_sym, span), span),
            span,
        );
        let condition = self.binary(ascending, BinaryOpKind::Or, descending, span);

        let increment = self.assign(
            variable.clone(),
            self.binary(self.var_ref(&variable, span), BinaryOpKind::Add, self.var_ref(&stepper_sym, span), span),
            span,
        );

        let while_body = self.block_stmt(vec![body, increment], span);
        let while_stmt = crate::span::Spanned::new(
            StatementKind::While {
                condition,
                body: Box::new(while_body),
            },
            span,
        );

        let replacement = self.block_stmt(vec![var_decl, upper_decl, stepper_decl, while_stmt], span);
        self.rewrite_statement(replacement)
    }
}
