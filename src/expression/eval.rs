use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::expression::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ExprValue {
    F64(f64),
    Bool(bool),
}

impl ExprValue {
    pub(crate) fn as_f64(self) -> Result<f64, ExprError> {
        match self {
            Self::F64(v) => Ok(v),
            Self::Bool(v) => Ok(if v { 1.0 } else { 0.0 }),
        }
    }

    pub(crate) fn as_bool(self) -> Result<bool, ExprError> {
        match self {
            Self::Bool(v) => Ok(v),
            Self::F64(v) => Ok(v != 0.0),
        }
    }
}

pub(crate) fn eval_expr(
    expr: &Expr,
    lookup: &dyn Fn(&str) -> Option<f64>,
) -> Result<ExprValue, ExprError> {
    match expr {
        Expr::Lit(Lit::F64(v)) => Ok(ExprValue::F64(*v)),
        Expr::Lit(Lit::Bool(v)) => Ok(ExprValue::Bool(*v)),
        Expr::Ident(name) => lookup(name)
            .map(ExprValue::F64)
            .ok_or_else(|| ExprError::eval(format!("unknown identifier '{name}'"))),
        Expr::Unary { op, expr } => {
            let v = eval_expr(expr, lookup)?;
            match op {
                UnaryOp::Neg => Ok(ExprValue::F64(-v.as_f64()?)),
                UnaryOp::Not => Ok(ExprValue::Bool(!v.as_bool()?)),
            }
        }
        Expr::Binary { op, left, right } => eval_binary(*op, left, right, lookup),
        Expr::Conditional {
            cond,
            then,
            otherwise,
        } => {
            if eval_expr(cond, lookup)?.as_bool()? {
                eval_expr(then, lookup)
            } else {
                eval_expr(otherwise, lookup)
            }
        }
        Expr::Call { func, args } => {
            let args = args
                .iter()
                .map(|a| eval_expr(a, lookup).and_then(ExprValue::as_f64))
                .collect::<Result<Vec<_>, _>>()?;
            call_builtin(func, &args).map(ExprValue::F64)
        }
    }
}

fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    lookup: &dyn Fn(&str) -> Option<f64>,
) -> Result<ExprValue, ExprError> {
    // Short-circuit before touching the right-hand side.
    match op {
        BinaryOp::And => {
            if !eval_expr(left, lookup)?.as_bool()? {
                return Ok(ExprValue::Bool(false));
            }
            return Ok(ExprValue::Bool(eval_expr(right, lookup)?.as_bool()?));
        }
        BinaryOp::Or => {
            if eval_expr(left, lookup)?.as_bool()? {
                return Ok(ExprValue::Bool(true));
            }
            return Ok(ExprValue::Bool(eval_expr(right, lookup)?.as_bool()?));
        }
        _ => {}
    }

    let a = eval_expr(left, lookup)?;
    let b = eval_expr(right, lookup)?;

    if matches!(op, BinaryOp::Eq | BinaryOp::Ne) {
        let eq = match (a, b) {
            (ExprValue::Bool(a), ExprValue::Bool(b)) => a == b,
            (a, b) => a.as_f64()? == b.as_f64()?,
        };
        return Ok(ExprValue::Bool(if op == BinaryOp::Eq { eq } else { !eq }));
    }

    let (a, b) = (a.as_f64()?, b.as_f64()?);
    Ok(match op {
        BinaryOp::Add => ExprValue::F64(a + b),
        BinaryOp::Sub => ExprValue::F64(a - b),
        BinaryOp::Mul => ExprValue::F64(a * b),
        BinaryOp::Div => ExprValue::F64(a / b),
        BinaryOp::Mod => ExprValue::F64(a % b),
        BinaryOp::Lt => ExprValue::Bool(a < b),
        BinaryOp::Le => ExprValue::Bool(a <= b),
        BinaryOp::Gt => ExprValue::Bool(a > b),
        BinaryOp::Ge => ExprValue::Bool(a >= b),
        BinaryOp::Eq | BinaryOp::Ne | BinaryOp::And | BinaryOp::Or => unreachable!(),
    })
}

fn call_builtin(func: &str, args: &[f64]) -> Result<f64, ExprError> {
    let arity = |n: usize| -> Result<(), ExprError> {
        if args.len() == n {
            Ok(())
        } else {
            Err(ExprError::eval(format!("{func} expects {n} arg(s)")))
        }
    };

    match func {
        "abs" => arity(1).map(|_| args[0].abs()),
        "sin" => arity(1).map(|_| args[0].sin()),
        "cos" => arity(1).map(|_| args[0].cos()),
        "floor" => arity(1).map(|_| args[0].floor()),
        "ceil" => arity(1).map(|_| args[0].ceil()),
        "round" => arity(1).map(|_| args[0].round()),
        "sqrt" => arity(1).map(|_| args[0].sqrt()),
        "min" => arity(2).map(|_| args[0].min(args[1])),
        "max" => arity(2).map(|_| args[0].max(args[1])),
        "pow" => arity(2).map(|_| args[0].powf(args[1])),
        "clamp" => {
            arity(3)?;
            if !(args[1] <= args[2]) {
                return Err(ExprError::eval("clamp expects lo <= hi"));
            }
            Ok(args[0].clamp(args[1], args[2]))
        }
        "lerp" => arity(3).map(|_| args[0] + (args[1] - args[0]) * args[2]),
        _ => Err(ExprError::eval(format!("unknown function '{func}'"))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
