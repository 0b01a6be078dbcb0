//! Expression evaluator
//!
//! Evaluates compiled expressions against an [`Env`]. Expressions produce [`Value`]s; turning
//! them into markup is the renderer's job.

use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::compile::CompiledExpr;
use crate::env::Env;
use crate::error::EvalError;
use crate::value::Value;
use std::cmp::Ordering;

/// Evaluate a compiled fragment.
///
/// For an iteration directive this yields the source collection bound to `rhs`; the caller
/// decides whether that value can be iterated.
pub fn evaluate(expr: &CompiledExpr, env: &Env) -> Result<Value, EvalError> {
    let evaluator = Evaluator::new(env);
    match expr {
        CompiledExpr::Value(expr) => evaluator.eval(expr),
        CompiledExpr::Iterate { rhs, .. } => evaluator.lookup(rhs),
    }
}

pub struct Evaluator<'a> {
    env: &'a Env,
}

impl<'a> Evaluator<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Literal(lit) => Ok(literal(lit)),
            Expr::Var(name) => self.lookup(name),
            Expr::List(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Expr::Field { target, name } => {
                let target = self.eval(target)?;
                field(&target, name)
            }
            Expr::Index { target, index } => {
                let target = self.eval(target)?;
                let index = self.eval(index)?;
                self::index(&target, &index)
            }
            Expr::Call { callee, args } => {
                let f = match self.eval(callee)? {
                    Value::Func(f) => f,
                    other => return Err(EvalError::NotCallable(other.type_name())),
                };
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                f(&args)
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                unary(*op, operand)
            }
            Expr::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                if !self.eval(left)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            }
            Expr::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => {
                if self.eval(left)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary(*op, &left, &right)
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.env
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }
}

fn literal(lit: &Literal) -> Value {
    match lit {
        Literal::Nil => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Int(i) => Value::Int(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::Str(s) => Value::Str(s.clone()),
    }
}

fn field(target: &Value, name: &str) -> Result<Value, EvalError> {
    match target {
        Value::Map(map) => map.get(name).cloned().ok_or_else(|| EvalError::UnknownField {
            field: name.to_string(),
            type_name: "map",
        }),
        other => Err(EvalError::UnknownField {
            field: name.to_string(),
            type_name: other.type_name(),
        }),
    }
}

fn position(index: i64, len: usize) -> Result<usize, EvalError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(EvalError::IndexOutOfBounds { index, len })
}

fn index(target: &Value, index: &Value) -> Result<Value, EvalError> {
    match (target, index) {
        (Value::List(items), Value::Int(i)) => Ok(items[position(*i, items.len())?].clone()),
        (Value::Str(s), Value::Int(i)) => {
            let len = s.chars().count();
            let at = position(*i, len)?;
            Ok(s.chars().nth(at).map(|c| Value::Str(c.to_string())).unwrap_or_default())
        }
        (Value::Map(map), Value::Str(key)) => {
            map.get(key).cloned().ok_or_else(|| EvalError::UnknownField {
                field: key.clone(),
                type_name: "map",
            })
        }
        (target, index) => Err(EvalError::InvalidIndex {
            target: target.type_name(),
            index: index.type_name(),
        }),
    }
}

fn unary(op: UnaryOp, operand: Value) -> Result<Value, EvalError> {
    match (op, operand) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| EvalError::Overflow("-".to_string())),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Neg, other) => Err(EvalError::InvalidOperand {
            op: "-".to_string(),
            operand: other.type_name(),
        }),
    }
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        op: op.to_string(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

fn as_float(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => match (as_float(left), as_float(right)) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        },
    };
    ordering.ok_or_else(|| mismatch(op, left, right))
}

fn checked(op: BinaryOp, result: Option<i64>) -> Result<Value, EvalError> {
    result
        .map(Value::Int)
        .ok_or_else(|| EvalError::Overflow(op.to_string()))
}

fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Less => Ok(Value::Bool(compare(op, left, right)?.is_lt())),
        BinaryOp::LessEq => Ok(Value::Bool(compare(op, left, right)?.is_le())),
        BinaryOp::Greater => Ok(Value::Bool(compare(op, left, right)?.is_gt())),
        BinaryOp::GreaterEq => Ok(Value::Bool(compare(op, left, right)?.is_ge())),
        BinaryOp::Add => match (left, right) {
            (Value::Int(a), Value::Int(b)) => checked(op, a.checked_add(*b)),
            (Value::Str(a), b) => Ok(Value::Str(format!("{a}{b}"))),
            (a, Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            (Value::List(a), Value::List(b)) => {
                Ok(Value::List(a.iter().chain(b.iter()).cloned().collect()))
            }
            _ => arithmetic(op, left, right),
        },
        BinaryOp::Sub => match (left, right) {
            (Value::Int(a), Value::Int(b)) => checked(op, a.checked_sub(*b)),
            _ => arithmetic(op, left, right),
        },
        BinaryOp::Mul => match (left, right) {
            (Value::Int(a), Value::Int(b)) => checked(op, a.checked_mul(*b)),
            _ => arithmetic(op, left, right),
        },
        BinaryOp::Div | BinaryOp::Rem => match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(EvalError::DivisionByZero),
            (Value::Int(a), Value::Int(b)) if op == BinaryOp::Div => {
                checked(op, a.checked_div(*b))
            }
            (Value::Int(a), Value::Int(b)) => checked(op, a.checked_rem(*b)),
            _ => arithmetic(op, left, right),
        },
        // Short-circuit operators are handled by the evaluator before operands are computed
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

/// Float arithmetic for mixed or float operands.
fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (Some(a), Some(b)) = (as_float(left), as_float(right)) else {
        return Err(mismatch(op, left, right));
    };
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Rem => a % b,
        _ => return Err(mismatch(op, left, right)),
    };
    Ok(Value::Float(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use crate::value::func;

    fn eval_with(fragment: &str, env: &Env) -> Result<Value, EvalError> {
        let compiled = compile(fragment).expect("compile failed");
        evaluate(&compiled, env)
    }

    fn eval(fragment: &str) -> Result<Value, EvalError> {
        eval_with(fragment, &Env::new())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1 + 2 * 3"), Ok(Value::Int(7)));
        assert_eq!(eval("(1 + 2) * 3"), Ok(Value::Int(9)));
        assert_eq!(eval("7 % 4"), Ok(Value::Int(3)));
        assert_eq!(eval("1 / 2.0"), Ok(Value::Float(0.5)));
        assert_eq!(eval("-3 + 1"), Ok(Value::Int(-2)));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(eval("'a' + 1"), Ok(Value::from("a1")));
        assert_eq!(eval("1 + 'a'"), Ok(Value::from("1a")));
    }

    #[test]
    fn test_comparison_and_logic() {
        assert_eq!(eval("1 < 2 && 'b' > 'a'"), Ok(Value::Bool(true)));
        assert_eq!(eval("1 == 1.0"), Ok(Value::Bool(true)));
        assert_eq!(eval("!nil"), Ok(Value::Bool(true)));
        assert_eq!(eval("false || 0"), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_short_circuit_skips_undefined() {
        assert_eq!(eval("false && missing"), Ok(Value::Bool(false)));
        assert_eq!(eval("true || missing"), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_undefined_variable() {
        assert_eq!(
            eval("foo"),
            Err(EvalError::UndefinedVariable("foo".to_string()))
        );
    }

    #[test]
    fn test_field_and_index_access() {
        let mut env = Env::new();
        env.set(
            "user",
            Value::from(serde_json::json!({"name": "ann", "tags": ["x", "y"]})),
        );
        assert_eq!(eval_with("user.name", &env), Ok(Value::from("ann")));
        assert_eq!(eval_with("user.tags[1]", &env), Ok(Value::from("y")));
        assert_eq!(eval_with("user['name'][0]", &env), Ok(Value::from("a")));
        assert_eq!(
            eval_with("user.tags[2]", &env),
            Err(EvalError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert!(matches!(
            eval_with("user.age", &env),
            Err(EvalError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_calls() {
        let mut env = Env::new();
        env.set(
            "add",
            Value::Func(func(|args| match args {
                [Value::Int(a), Value::Int(b)] => Ok(Value::Int(a + b)),
                _ => Err(EvalError::Func("add expects two ints".to_string())),
            })),
        );
        assert_eq!(eval_with("add(1, 2)", &env), Ok(Value::Int(3)));
        assert_eq!(
            eval_with("add(1)", &env),
            Err(EvalError::Func("add expects two ints".to_string()))
        );
        assert_eq!(eval("1(2)"), Err(EvalError::NotCallable("int")));
    }

    #[test]
    fn test_division_by_zero_and_overflow() {
        assert_eq!(eval("1 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("5 % 0"), Err(EvalError::DivisionByZero));
        assert!(matches!(
            eval("9223372036854775807 + 1"),
            Err(EvalError::Overflow(_))
        ));
    }

    #[test]
    fn test_type_mismatch() {
        assert!(matches!(
            eval("[1] - 1"),
            Err(EvalError::TypeMismatch { .. })
        ));
        assert!(matches!(eval("'a' < 1"), Err(EvalError::TypeMismatch { .. })));
    }

    #[test]
    fn test_iteration_evaluates_to_source() {
        let mut env = Env::new();
        env.set("xs", Value::from(vec![1, 2]));
        assert_eq!(
            eval_with("for x in xs", &env),
            Ok(Value::from(vec![1, 2]))
        );
    }
}
