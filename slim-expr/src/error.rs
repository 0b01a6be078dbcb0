//! Error types for compiling and evaluating expressions

use thiserror::Error;

/// A fragment could not be compiled
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot compile `{fragment}`: {message} (at offset {offset})")]
pub struct CompileError {
    /// The fragment as written in the template, trimmed
    pub fragment: String,
    pub message: String,
    /// Byte offset into the trimmed fragment
    pub offset: usize,
}

impl CompileError {
    pub fn new(fragment: &str, message: impl Into<String>, offset: usize) -> Self {
        Self {
            fragment: fragment.to_string(),
            message: message.into(),
            offset,
        }
    }
}

/// Errors raised while evaluating a compiled expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),

    #[error("no field `{field}` on {type_name}")]
    UnknownField {
        field: String,
        type_name: &'static str,
    },

    #[error("cannot index {target} with {index}")]
    InvalidIndex {
        target: &'static str,
        index: &'static str,
    },

    #[error("index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("{0} is not callable")]
    NotCallable(&'static str),

    #[error("unsupported operand types for `{op}`: {left} and {right}")]
    TypeMismatch {
        op: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("unsupported operand type for `{op}`: {operand}")]
    InvalidOperand { op: String, operand: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in `{0}`")]
    Overflow(String),

    #[error("{name}() takes {expected} argument(s), {found} given")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{0}")]
    Func(String),

    #[error("cannot bind {0} as template variables")]
    NotBindable(&'static str),

    #[error("cannot convert value: {0}")]
    Conversion(String),
}
