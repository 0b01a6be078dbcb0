//! Templates
//!
//! A `Template` is parsed once and rendered any number of times. The tree is never touched by
//! rendering, and every call to [`Template::execute`] builds its own evaluation environment, so
//! a template can be shared across threads and rendered concurrently.

use crate::error::{RenderError, TemplateError};
use crate::render::{RenderOptions, Renderer};
use slim_expr::{Bindable, Env, Funcs, Value};
use slim_parser::slim::loader::SourceLoader;
use slim_parser::{parse_reader, parse_str, Document, Node};
use std::io::{BufRead, Write};
use std::path::Path;

#[derive(Clone, Default)]
pub struct Template {
    document: Document,
    funcs: Funcs,
    options: RenderOptions,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut funcs: Vec<_> = self.funcs.keys().collect();
        funcs.sort();
        f.debug_struct("Template")
            .field("document", &self.document)
            .field("funcs", &funcs)
            .field("options", &self.options)
            .finish()
    }
}

impl Template {
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, TemplateError> {
        Ok(Self::from_document(parse_reader(reader)?))
    }

    pub fn parse_str(source: &str) -> Self {
        Self::from_document(parse_str(source))
    }

    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let loader = SourceLoader::from_path(path)?;
        Ok(Self::from_document(loader.parse()))
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            funcs: Funcs::new(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Expose callables to expressions under their map keys. Later calls add to (and override)
    /// earlier ones.
    pub fn func_map(&mut self, funcs: Funcs) -> &mut Self {
        self.funcs.extend(funcs);
        self
    }

    pub fn root(&self) -> &Node {
        &self.document.root
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn funcs(&self) -> &Funcs {
        &self.funcs
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render into `out`. Callables are bound first, then the context's entries, so a context
    /// key shadows a callable of the same name.
    pub fn execute<W, B>(&self, out: &mut W, context: &B) -> Result<(), RenderError>
    where
        W: Write + ?Sized,
        B: Bindable + ?Sized,
    {
        let mut env = Env::new();
        for (name, f) in &self.funcs {
            env.set(name.clone(), Value::Func(f.clone()));
        }
        context.bind_into(&mut env).map_err(RenderError::Bind)?;
        tracing::debug!(
            nodes = self.document.node_count(),
            bindings = env.names().len(),
            "rendering template"
        );

        Renderer::new(out, env, &self.options).render(&self.document.root, 0)?;
        out.flush()?;
        tracing::debug!("render finished");
        Ok(())
    }

    pub fn render_to_string<B: Bindable + ?Sized>(&self, context: &B) -> Result<String, RenderError> {
        let mut out = Vec::new();
        self.execute(&mut out, context)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
