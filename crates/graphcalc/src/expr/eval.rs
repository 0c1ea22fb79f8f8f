use super::ast::{BinOp, Expression, Func, Node};
use super::error::EvalError;

/// Evaluate `expr` at `x`.
///
/// Plain IEEE-754 double arithmetic: `1/0` is `+inf`, `sqrt(-1)` and
/// `log(-1)` are NaN, `0^-1` is `+inf`. None of these are errors. The error
/// type is uninhabited, so this never fails for a parsed expression.
pub fn evaluate(expr: &Expression, x: f64) -> Result<f64, EvalError> {
    Ok(expr.eval(x))
}

impl Expression {
    /// Infallible form of `evaluate`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        eval_node(self.root(), x)
    }
}

fn eval_node(node: &Node, x: f64) -> f64 {
    match node {
        Node::Number(v) => *v,
        Node::Var => x,
        Node::Neg(inner) => -eval_node(inner, x),
        Node::Binary { op, lhs, rhs } => {
            let a = eval_node(lhs, x);
            let b = eval_node(rhs, x);
            match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
                BinOp::Pow => a.powf(b),
            }
        }
        Node::Call { func, args } => match (func, args.as_slice()) {
            (Func::Sin, [a]) => eval_node(a, x).sin(),
            (Func::Cos, [a]) => eval_node(a, x).cos(),
            (Func::Tan, [a]) => eval_node(a, x).tan(),
            (Func::Sqrt, [a]) => eval_node(a, x).sqrt(),
            (Func::Abs, [a]) => eval_node(a, x).abs(),
            (Func::Log, [a]) => eval_node(a, x).ln(),
            (Func::Log, [a, base]) => eval_node(a, x).ln() / eval_node(base, x).ln(),
            (Func::Pow, [base, exp]) => eval_node(base, x).powf(eval_node(exp, x)),
            (func, args) => unreachable!(
                "{} called with {} args; arity is checked by the parser",
                func.name(),
                args.len()
            ),
        },
    }
}
