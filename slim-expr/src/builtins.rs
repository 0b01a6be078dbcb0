//! Standard callables
//!
//! A small set of helpers the CLI attaches to every template. Library users attach their own
//! [`Funcs`] and may merge these in.

use crate::error::EvalError;
use crate::value::{func, Funcs, Value};

/// `len`, `upper`, `lower` and `join`.
pub fn standard() -> Funcs {
    let mut funcs = Funcs::new();
    funcs.insert("len".to_string(), func(len));
    funcs.insert("upper".to_string(), func(upper));
    funcs.insert("lower".to_string(), func(lower));
    funcs.insert("join".to_string(), func(join));
    funcs
}

fn arity(name: &str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::Arity {
            name: name.to_string(),
            expected,
            found: args.len(),
        })
    }
}

fn len(args: &[Value]) -> Result<Value, EvalError> {
    arity("len", args, 1)?;
    let n = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        other => {
            return Err(EvalError::InvalidOperand {
                op: "len".to_string(),
                operand: other.type_name(),
            })
        }
    };
    Ok(Value::Int(n as i64))
}

fn upper(args: &[Value]) -> Result<Value, EvalError> {
    arity("upper", args, 1)?;
    Ok(Value::Str(args[0].to_string().to_uppercase()))
}

fn lower(args: &[Value]) -> Result<Value, EvalError> {
    arity("lower", args, 1)?;
    Ok(Value::Str(args[0].to_string().to_lowercase()))
}

fn join(args: &[Value]) -> Result<Value, EvalError> {
    arity("join", args, 2)?;
    let Some(items) = args[0].as_sequence() else {
        return Err(EvalError::InvalidOperand {
            op: "join".to_string(),
            operand: args[0].type_name(),
        });
    };
    let separator = args[1].to_string();
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&separator);
    Ok(Value::Str(joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> Result<Value, EvalError> {
        let funcs = standard();
        let f = funcs.get(name).expect("builtin missing");
        f(args)
    }

    #[test]
    fn test_len() {
        assert_eq!(call("len", &[Value::from("héllo")]), Ok(Value::Int(5)));
        assert_eq!(call("len", &[Value::from(vec![1, 2])]), Ok(Value::Int(2)));
        assert!(call("len", &[Value::Int(1)]).is_err());
    }

    #[test]
    fn test_case() {
        assert_eq!(call("upper", &[Value::from("ab")]), Ok(Value::from("AB")));
        assert_eq!(call("lower", &[Value::from("AB")]), Ok(Value::from("ab")));
    }

    #[test]
    fn test_join() {
        assert_eq!(
            call("join", &[Value::from(vec!["a", "b"]), Value::from(", ")]),
            Ok(Value::from("a, b"))
        );
    }

    #[test]
    fn test_arity() {
        assert_eq!(
            call("join", &[Value::from("a")]),
            Err(EvalError::Arity {
                name: "join".to_string(),
                expected: 2,
                found: 1
            })
        );
    }
}
