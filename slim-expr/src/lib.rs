//! # slim-expr
//!
//! The expression language embedded in slim templates.
//!
//!     Template lines starting with `=` or `-` (and tags followed by `=`) carry an expression
//!     fragment. The parser stores those fragments verbatim; they are compiled and evaluated
//!     here, at render time, against an [`Env`] built fresh for every render.
//!
//! Pipeline
//!
//!     fragment ──[token]──> tokens ──[compile]──> CompiledExpr ──[eval]──> Value
//!
//!     Tokenization is a logos lexer (see [token]). Compilation is a small precedence-climbing
//!     parser that produces either an iteration directive (`for x in items`) or a plain
//!     expression tree. Evaluation walks that tree.
//!
//! Layout
//!
//!     .
//!     ├── token.rs      # logos token definitions
//!     ├── ast.rs        # expression tree
//!     ├── compile.rs    # fragment -> CompiledExpr
//!     ├── value.rs      # runtime values and callables
//!     ├── env.rs        # scoped variable bindings
//!     ├── eval.rs       # tree walking evaluator
//!     ├── bind.rs       # Bindable: host values -> variables
//!     ├── builtins.rs   # standard callables
//!     └── error.rs
//!
//! Example
//!
//!     ```ignore
//!     use slim_expr::{compile, evaluate, Env, Value};
//!
//!     let mut env = Env::new();
//!     env.set("name", Value::from("world"));
//!     let expr = compile("'hello ' + name")?;
//!     assert_eq!(evaluate(&expr, &env)?.to_string(), "hello world");
//!     ```

pub mod ast;
pub mod bind;
pub mod builtins;
pub mod compile;
pub mod env;
pub mod error;
pub mod eval;
pub mod token;
pub mod value;

pub use ast::{BinaryOp, Expr, Literal, UnaryOp};
pub use bind::{Bindable, Record};
pub use compile::{compile, CompiledExpr};
pub use env::Env;
pub use error::{CompileError, EvalError};
pub use eval::{evaluate, Evaluator};
pub use value::{func, Func, Funcs, Value};
