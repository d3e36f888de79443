//! Human-readable dumps of the bound and lowered trees.
//!
//! `PrettyPrint` and `indent_str` are carried over verbatim in shape from
//! `cairo-m-compiler-mir::{PrettyPrint, indent_str}`; the lowered form
//! benefits from the same kind of readable dump the teacher produces for
//! its basic-block IR, and both `lower-dump` and the snapshot tests depend
//! on it.

use crate::ir::expr::{BinaryOpKind, ExpressionKind, Literal};
use crate::ir::stmt::{Block, StatementKind};

pub trait PrettyPrint {
    fn pretty_print(&self, indent: usize) -> String;
}

pub(crate) fn indent_str(level: usize) -> String {
    "  ".repeat(level)
}

impl PrettyPrint for Literal {
    fn pretty_print(&self, _indent: usize) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

fn op_symbol(kind: BinaryOpKind) -> &'static str {
    match kind {
        BinaryOpKind::Add => "+",
        BinaryOpKind::Le => "<=",
        BinaryOpKind::Ge => ">=",
        BinaryOpKind::Lt => "<",
        BinaryOpKind::Gt => ">",
        BinaryOpKind::And => "&&",
        BinaryOpKind::Or => "||",
    }
}

impl PrettyPrint for ExpressionKind {
    fn pretty_print(&self, indent: usize) -> String {
        match self {
            Self::Literal(lit) => lit.pretty_print(indent),
            Self::VariableReference(sym) => sym.name().to_string(),
            Self::Assignment { target, value } => {
                format!("{} = {}", target.name(), value.value().pretty_print(indent))
            }
            Self::Binary { left, op, right } => format!(
                "({} {} {})",
                left.value().pretty_print(indent),
                op_symbol(op.kind),
                right.value().pretty_print(indent)
            ),
            Self::Other { tag, children } => {
                let rendered: Vec<String> = children.iter().map(|c| c.value().pretty_print(indent)).collect();
                format!("{tag}({})", rendered.join(", "))
            }
        }
    }
}

impl PrettyPrint for StatementKind {
    fn pretty_print(&self, indent: usize) -> String {
        let pad = indent_str(indent);
        match self {
            Self::Block(children) => {
                let mut out = format!("{pad}{{\n");
                for child in children {
                    out.push_str(&child.value().pretty_print(indent + 1));
                    out.push('\n');
                }
                out.push_str(&format!("{pad}}}"));
                out
            }
            Self::VariableDeclaration { symbol, initializer } => format!(
                "{pad}{} {} = {}",
                if symbol.is_read_only() { "let" } else { "var" },
                symbol.name(),
                initializer.value().pretty_print(indent)
            ),
            Self::ExpressionStatement(expr) => format!("{pad}{}", expr.value().pretty_print(indent)),
            Self::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut out = format!(
                    "{pad}if ({}) \n{}",
                    condition.value().pretty_print(indent),
                    then_branch.value().pretty_print(indent)
                );
                if let Some(else_branch) = else_branch {
                    out.push_str(&format!("\n{pad}else\n{}", else_branch.value().pretty_print(indent)));
                }
                out
            }
            Self::While { condition, body } => format!(
                "{pad}while ({})\n{}",
                condition.value().pretty_print(indent),
                body.value().pretty_print(indent)
            ),
            Self::DoWhile { body, condition } => format!(
                "{pad}do\n{}\n{pad}while ({})",
                body.value().pretty_print(indent),
                condition.value().pretty_print(indent)
            ),
            Self::For {
                variable,
                lower_bound,
                upper_bound,
                step,
                body,
            } => {
                let mut out = format!(
                    "{pad}for {} = {} to {}",
                    variable.name(),
                    lower_bound.value().pretty_print(indent),
                    upper_bound.value().pretty_print(indent)
                );
                if let Some(step) = step {
                    out.push_str(&format!(" step {}", step.value().pretty_print(indent)));
                }
                out.push('\n');
                out.push_str(&body.value().pretty_print(indent));
                out
            }
            Self::Label(label) => format!("{pad}{label}:"),
            Self::Goto(target) => format!("{pad}goto {target}"),
            Self::ConditionalGoto {
                target,
                condition,
                jump_if_true,
            } => format!(
                "{pad}goto{} {}, {}",
                if *jump_if_true { "True" } else { "False" },
                condition.value().pretty_print(indent),
                target
            ),
        }
    }
}

impl PrettyPrint for Block {
    fn pretty_print(&self, indent: usize) -> String {
        let mut out = String::new();
        for stmt in &self.statements {
            out.push_str(&stmt.value().pretty_print(indent));
            out.push('\n');
        }
        out
    }
}
