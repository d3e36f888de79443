//! A pair of tiny tree-walking interpreters — one for the structured bound
//! tree, one for the flat lowered form — used only by this test suite to
//! check invariant 4 from `spec.md` §8 ("behavioral equivalence") and the
//! boundary scenarios S1–S6. This plays the role `spec.md` assigns to "the
//! evaluator/emitter that consumes the lowered form" (§1, §6.2): it is
//! test-only scaffolding standing in for a real downstream consumer, not
//! part of the library's public surface.

use std::collections::HashMap;
use treelower::{
    lower, BinaryOpKind, Block, Expression, ExpressionKind, Literal, Statement, StatementKind, Type, VariableSymbol,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    fn as_int(self) -> i64 {
        match self {
            Self::Int(v) => v,
            Self::Bool(_) => panic!("expected an int value"),
        }
    }

    fn as_bool(self) -> bool {
        match self {
            Self::Bool(v) => v,
            Self::Int(_) => panic!("expected a bool value"),
        }
    }
}

#[derive(Default)]
struct Env(HashMap<usize, Value>);

impl Env {
    fn set(&mut self, symbol: &VariableSymbol, value: Value) {
        self.0.insert(symbol.id(), value);
    }

    fn get(&self, symbol: &VariableSymbol) -> Value {
        *self.0.get(&symbol.id()).unwrap_or_else(|| panic!("undefined variable `{}`", symbol.name()))
    }
}

fn eval(expr: &Expression, env: &mut Env) -> Value {
    match expr.value() {
        ExpressionKind::Literal(Literal::Int(v)) => Value::Int(*v),
        ExpressionKind::Literal(Literal::Bool(v)) => Value::Bool(*v),
        ExpressionKind::VariableReference(symbol) => env.get(symbol),
        ExpressionKind::Assignment { target, value } => {
            let value = eval(value, env);
            env.set(target, value);
            value
        }
        ExpressionKind::Binary { left, op, right } => {
            let left = eval(left, env);
            // `&&`/`||` below rely on Rust's short-circuit evaluation,
            // matching the requirement in spec.md §9 that the synthesized
            // for-with-step condition short-circuits the same way the
            // source language does.
            match op.kind {
                BinaryOpKind::Add => Value::Int(left.as_int() + eval(right, env).as_int()),
                BinaryOpKind::Le => Value::Bool(left.as_int() <= eval(right, env).as_int()),
                BinaryOpKind::Ge => Value::Bool(left.as_int() >= eval(right, env).as_int()),
                BinaryOpKind::Lt => Value::Bool(left.as_int() < eval(right, env).as_int()),
                BinaryOpKind::Gt => Value::Bool(left.as_int() > eval(right, env).as_int()),
                BinaryOpKind::And => Value::Bool(left.as_bool() && eval(right, env).as_bool()),
                BinaryOpKind::Or => Value::Bool(left.as_bool() || eval(right, env).as_bool()),
            }
        }
        ExpressionKind::Other { .. } => panic!("cannot evaluate a pass-through expression"),
    }
}

/// Reference semantics for the structured bound tree, per `spec.md` §4.2's
/// prose description of each construct.
fn exec_structured(stmt: &Statement, env: &mut Env) {
    match stmt.value() {
        StatementKind::Block(children) => {
            for child in children {
                exec_structured(child, env);
            }
        }
        StatementKind::VariableDeclaration { symbol, initializer } => {
            let value = eval(initializer, env);
            env.set(symbol, value);
        }
        StatementKind::ExpressionStatement(expr) => {
            eval(expr, env);
        }
        StatementKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            if eval(condition, env).as_bool() {
                exec_structured(then_branch, env);
            } else if let Some(else_branch) = else_branch {
                exec_structured(else_branch, env);
            }
        }
        StatementKind::While { condition, body } => {
            while eval(condition, env).as_bool() {
                exec_structured(body, env);
            }
        }
        StatementKind::DoWhile { body, condition } => loop {
            exec_structured(body, env);
            if !eval(condition, env).as_bool() {
                break;
            }
        },
        StatementKind::For {
            variable,
            lower_bound,
            upper_bound,
            step,
            body,
        } => {
            let lo = eval(lower_bound, env).as_int();
            env.set(variable, Value::Int(lo));
            let hi = eval(upper_bound, env).as_int();
            let step_value = step.as_ref().map_or(1, |s| eval(s, env).as_int());
            loop {
                let current = env.get(variable).as_int();
                let keep_going = match step_value.cmp(&0) {
                    std::cmp::Ordering::Greater => current <= hi,
                    std::cmp::Ordering::Less => current >= hi,
                    std::cmp::Ordering::Equal => false,
                };
                if !keep_going {
                    break;
                }
                exec_structured(body, env);
                let current = env.get(variable).as_int();
                env.set(variable, Value::Int(current + step_value));
            }
        }
        StatementKind::Label(_) | StatementKind::Goto(_) | StatementKind::ConditionalGoto { .. } => {
            panic!("structured interpreter does not expect low-level forms")
        }
    }
}

/// Reference semantics for the flat lowered form, per the emitter contract
/// in `spec.md` §6.2.
fn exec_lowered(block: &Block, env: &mut Env) {
    let mut label_positions: HashMap<u32, usize> = HashMap::new();
    for (index, stmt) in block.statements.iter().enumerate() {
        if let StatementKind::Label(id) = stmt.value() {
            label_positions.insert(id.ordinal(), index);
        }
    }

    let mut pc = 0usize;
    while pc < block.statements.len() {
        match block.statements[pc].value() {
            StatementKind::Label(_) => pc += 1,
            StatementKind::Goto(target) => pc = label_positions[&target.ordinal()],
            StatementKind::ConditionalGoto {
                target,
                condition,
                jump_if_true,
            } => {
                let taken = eval(condition, env).as_bool() == *jump_if_true;
                pc = if taken { label_positions[&target.ordinal()] } else { pc + 1 };
            }
            StatementKind::VariableDeclaration { symbol, initializer } => {
                let value = eval(initializer, env);
                env.set(symbol, value);
                pc += 1;
            }
            StatementKind::ExpressionStatement(expr) => {
                eval(expr, env);
                pc += 1;
            }
            StatementKind::Block(_)
            | StatementKind::If { .. }
            | StatementKind::While { .. }
            | StatementKind::DoWhile { .. }
            | StatementKind::For { .. } => {
                panic!("lowered block should never contain structured control flow")
            }
        }
    }
}

// --- test fixtures ---

fn var(name: &str, ty: Type) -> VariableSymbol {
    VariableSymbol::new(name, false, ty)
}

fn int(v: i64) -> Expression {
    treelower::Spanned::synthesized(ExpressionKind::Literal(Literal::Int(v)))
}

fn bool_lit(v: bool) -> Expression {
    treelower::Spanned::synthesized(ExpressionKind::Literal(Literal::Bool(v)))
}

fn var_ref(symbol: &VariableSymbol) -> Expression {
    treelower::Spanned::synthesized(ExpressionKind::VariableReference(symbol.clone()))
}

fn assign(target: &VariableSymbol, value: Expression) -> Statement {
    treelower::Spanned::synthesized(StatementKind::ExpressionStatement(treelower::Spanned::synthesized(
        ExpressionKind::Assignment {
            target: target.clone(),
            value: Box::new(value),
        },
    )))
}

fn add(left: Expression, right: Expression) -> Expression {
    treelower::Spanned::synthesized(ExpressionKind::Binary {
        left: Box::new(left),
        op: treelower::BinaryOp {
            kind: BinaryOpKind::Add,
            result_ty: Type::Int,
        },
        right: Box::new(right),
    })
}

/// Runs `source` to completion both directly (structured semantics) and
/// after `lower`ing it (lowered semantics) and asserts both executions
/// leave `checks` holding identical values — invariant 4, `spec.md` §8.
fn assert_behaviorally_equivalent(source: &Statement, checks: &[&VariableSymbol]) {
    let mut structured_env = Env::default();
    exec_structured(source, &mut structured_env);

    let lowered = lower(source);
    assert!(
        lowered.statements.iter().all(|s| !s.value().is_structured_control_flow()),
        "lowered output must contain no structured control flow (invariant 1)"
    );
    assert!(
        lowered.statements.iter().all(|s| !matches!(s.value(), StatementKind::Block(_))),
        "lowered output must contain no nested block (invariant 3)"
    );

    let mut lowered_env = Env::default();
    exec_lowered(&lowered, &mut lowered_env);

    for symbol in checks {
        assert_eq!(
            structured_env.get(symbol),
            lowered_env.get(symbol),
            "symbol `{}` diverged between structured and lowered execution",
            symbol.name()
        );
    }
}

#[test]
fn s1_if_else_true_branch() {
    let x = var("x", Type::Int);
    let source = treelower::Spanned::synthesized(StatementKind::Block(vec![
        assign(&x, int(0)),
        treelower::Spanned::synthesized(StatementKind::If {
            condition: bool_lit(true),
            then_branch: Box::new(assign(&x, int(1))),
            else_branch: Some(Box::new(assign(&x, int(2)))),
        }),
    ]));

    let mut env = Env::default();
    exec_structured(&source, &mut env);
    assert_eq!(env.get(&x), Value::Int(1));
    assert_behaviorally_equivalent(&source, &[&x]);
}

#[test]
fn s2_while_false_never_runs() {
    let x = var("x", Type::Int);
    let source = treelower::Spanned::synthesized(StatementKind::Block(vec![
        assign(&x, int(7)),
        treelower::Spanned::synthesized(StatementKind::While {
            condition: bool_lit(false),
            body: Box::new(assign(&x, add(var_ref(&x), int(1)))),
        }),
    ]));

    let mut env = Env::default();
    exec_structured(&source, &mut env);
    assert_eq!(env.get(&x), Value::Int(7));
    assert_behaviorally_equivalent(&source, &[&x]);
}

#[test]
fn s3_do_while_false_runs_once() {
    let x = var("x", Type::Int);
    let source = treelower::Spanned::synthesized(StatementKind::Block(vec![
        assign(&x, int(0)),
        treelower::Spanned::synthesized(StatementKind::DoWhile {
            body: Box::new(assign(&x, add(var_ref(&x), int(1)))),
            condition: bool_lit(false),
        }),
    ]));

    let mut env = Env::default();
    exec_structured(&source, &mut env);
    assert_eq!(env.get(&x), Value::Int(1));
    assert_behaviorally_equivalent(&source, &[&x]);
}

#[test]
fn s4_for_one_to_five_sums_to_fifteen() {
    let i = var("i", Type::Int);
    let sum = var("sum", Type::Int);
    let source = treelower::Spanned::synthesized(StatementKind::Block(vec![
        assign(&sum, int(0)),
        treelower::Spanned::synthesized(StatementKind::For {
            variable: i.clone(),
            lower_bound: int(1),
            upper_bound: int(5),
            step: None,
            body: Box::new(assign(&sum, add(var_ref(&sum), var_ref(&i)))),
        }),
    ]));

    let mut env = Env::default();
    exec_structured(&source, &mut env);
    assert_eq!(env.get(&sum), Value::Int(15));
    assert_behaviorally_equivalent(&source, &[&sum]);
}

#[test]
fn s5_for_ten_down_to_one_step_negative_one_counts_ten() {
    let i = var("i", Type::Int);
    let count = var("count", Type::Int);
    let source = treelower::Spanned::synthesized(StatementKind::Block(vec![
        assign(&count, int(0)),
        treelower::Spanned::synthesized(StatementKind::For {
            variable: i.clone(),
            lower_bound: int(10),
            upper_bound: int(1),
            step: Some(int(-1)),
            body: Box::new(assign(&count, add(var_ref(&count), int(1)))),
        }),
    ]));

    let mut env = Env::default();
    exec_structured(&source, &mut env);
    assert_eq!(env.get(&count), Value::Int(10));
    assert_behaviorally_equivalent(&source, &[&count]);
}

#[test]
fn s6_for_with_zero_step_never_iterates() {
    let i = var("i", Type::Int);
    let count = var("count", Type::Int);
    let source = treelower::Spanned::synthesized(StatementKind::Block(vec![
        assign(&count, int(0)),
        treelower::Spanned::synthesized(StatementKind::For {
            variable: i.clone(),
            lower_bound: int(1),
            upper_bound: int(10),
            step: Some(int(0)),
            body: Box::new(assign(&count, add(var_ref(&count), int(1)))),
        }),
    ]));

    let mut env = Env::default();
    exec_structured(&source, &mut env);
    assert_eq!(env.get(&count), Value::Int(0));
    assert_behaviorally_equivalent(&source, &[&count]);
}

#[test]
fn nested_for_loops_are_behaviorally_equivalent() {
    let i = var("i", Type::Int);
    let j = var("j", Type::Int);
    let total = var("total", Type::Int);
    let inner = treelower::Spanned::synthesized(StatementKind::For {
        variable: j.clone(),
        lower_bound: int(1),
        upper_bound: int(3),
        step: None,
        body: Box::new(assign(&total, add(var_ref(&total), int(1)))),
    });
    let outer = treelower::Spanned::synthesized(StatementKind::For {
        variable: i.clone(),
        lower_bound: int(1),
        upper_bound: int(3),
        step: None,
        body: Box::new(inner),
    });
    let source = treelower::Spanned::synthesized(StatementKind::Block(vec![assign(&total, int(0)), outer]));

    let mut env = Env::default();
    exec_structured(&source, &mut env);
    assert_eq!(env.get(&total), Value::Int(9));
    assert_behaviorally_equivalent(&source, &[&total]);
}
