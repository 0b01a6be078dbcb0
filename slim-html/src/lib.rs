//! HTML output for slim templates
//!
//!     A [`Template`] owns a parsed node tree plus the callables exposed to expressions. Rendering
//!     walks the tree in document order and writes HTML to any `io::Write`, asking `slim-expr`
//!     to evaluate the expression fragments found on nodes.
//!
//!     This is a pure lib: it never reads the environment or prints. The CLI wires files, context
//!     loading and configuration around it.
//!
//!     The file structure:
//!     .
//!     ├── error.rs        # RenderError, TemplateError
//!     ├── elements.rs     # Void element registry, attribute escaping
//!     ├── render.rs       # The tree walk
//!     ├── template.rs     # Template: parse, attach callables, execute
//!     └── lib.rs
//!
//! Output Conventions
//!
//!     Nesting is indented two spaces per level (configurable through [`RenderOptions`]). Void
//!     elements self-close with `/>`, `doctype` is written as `<!doctype html>`. A node whose
//!     body is a single value or a line of text is written inline: `<p>Hello</p>`.
//!
//! Errors
//!
//!     A failing expression aborts the render and is returned to the caller. Output written
//!     before the failing node is not rolled back.

pub mod elements;
pub mod error;
pub mod render;
pub mod template;

pub use error::{RenderError, TemplateError};
pub use render::{RenderOptions, Renderer};
pub use template::Template;

pub use slim_expr::{builtins, func, Bindable, Func, Funcs, Record, Value};
