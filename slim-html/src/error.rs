use slim_expr::{CompileError, EvalError};
use slim_parser::slim::loader::LoaderError;
use slim_parser::ParseError;
use thiserror::Error;

/// Errors that abort a render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid expression `{fragment}`")]
    Compile {
        fragment: String,
        #[source]
        source: CompileError,
    },

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),

    #[error("cannot iterate over `{name}`: expected a list, found {type_name}")]
    NotIterable {
        name: String,
        type_name: &'static str,
    },

    #[error("cannot bind render context")]
    Bind(#[source] EvalError),
}

/// Errors while building a template from a source.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Load(#[from] LoaderError),
}
