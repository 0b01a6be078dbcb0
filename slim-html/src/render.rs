//! The render walk
//!
//!     Nodes are visited depth first. For each element:
//!         nameless:  its children are rendered in its place, at the same depth.
//!         void:      the opening tag self-closes, text and children are ignored.
//!         otherwise: the body is, in order of precedence, the node's expression, its children,
//!                    or its text. Expression values and text are inlined; children and loop
//!                    bodies go on their own lines and the closing tag is re-indented.
//!
//!     An expression is compiled on every visit. The iteration form `for x in xs` renders the
//!     children once per element of the list bound to `xs`, with `x` bound in a scope that is
//!     dropped after the loop. Any other expression is evaluated and its text form inlined,
//!     followed by the node's text.

use crate::elements::{escape_attr, is_void, DOCTYPE};
use crate::error::RenderError;
use slim_expr::{compile, evaluate, CompiledExpr, Env, Value};
use slim_parser::Node;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Written once per nesting level
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

/// One render: an output, the evaluation environment and the options.
pub struct Renderer<'a, W: Write + ?Sized> {
    out: &'a mut W,
    env: Env,
    options: &'a RenderOptions,
}

impl<'a, W: Write + ?Sized> Renderer<'a, W> {
    pub fn new(out: &'a mut W, env: Env, options: &'a RenderOptions) -> Self {
        Self { out, env, options }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Render `node` and everything below it at nesting `depth`.
    pub fn render(&mut self, node: &Node, depth: usize) -> Result<(), RenderError> {
        if node.name.is_empty() {
            return self.children(node, depth);
        }

        let indent = self.options.indent.repeat(depth);
        let name = node.tag_name();
        let doctype = node.name == DOCTYPE;

        if doctype {
            write!(self.out, "{indent}<!{DOCTYPE} html")?;
        } else {
            write!(self.out, "{indent}<{name}")?;
            self.attributes(node)?;
        }

        if is_void(name) {
            self.out.write_all(if doctype { b">\n" } else { b"/>\n" })?;
            return Ok(());
        }
        self.out.write_all(b">")?;

        let inline = if node.has_expr() {
            let inline = self.expression(node, depth)?;
            self.out.write_all(node.text.as_bytes())?;
            inline
        } else if !node.children.is_empty() {
            self.out.write_all(b"\n")?;
            self.children(node, depth + 1)?;
            self.out.write_all(node.text.as_bytes())?;
            false
        } else if !node.text.is_empty() {
            self.out.write_all(node.text.as_bytes())?;
            true
        } else {
            self.out.write_all(b"\n")?;
            false
        };

        if !inline {
            self.out.write_all(indent.as_bytes())?;
        }
        writeln!(self.out, "</{name}>")?;
        Ok(())
    }

    fn children(&mut self, node: &Node, depth: usize) -> Result<(), RenderError> {
        for child in &node.children {
            self.render(child, depth)?;
        }
        Ok(())
    }

    fn attributes(&mut self, node: &Node) -> Result<(), RenderError> {
        if let Some(id) = &node.id {
            write!(self.out, " id=\"{}\"", escape_attr(id))?;
        }
        if !node.class.is_empty() {
            write!(self.out, " class=\"{}\"", escape_attr(&node.class.join(" ")))?;
        }
        for attr in &node.attr {
            if attr.is_bare() {
                write!(self.out, " {}", attr.name)?;
            } else {
                write!(self.out, " {}=\"{}\"", attr.name, escape_attr(&attr.value))?;
            }
        }
        Ok(())
    }

    /// Render the node's expression body. Returns whether it was written inline.
    fn expression(&mut self, node: &Node, depth: usize) -> Result<bool, RenderError> {
        let compiled = compile(&node.expr).map_err(|source| RenderError::Compile {
            fragment: node.expr.trim().to_string(),
            source,
        })?;

        match &compiled {
            CompiledExpr::Iterate { lhs, rhs } => {
                let Some(source) = self.env.get(rhs) else {
                    return Err(RenderError::UndefinedVariable(rhs.clone()));
                };
                let Some(items) = source.as_sequence().map(<[Value]>::to_vec) else {
                    return Err(RenderError::NotIterable {
                        name: rhs.clone(),
                        type_name: source.type_name(),
                    });
                };
                self.out.write_all(b"\n")?;
                self.env.push_scope();
                let result = self.each(node, lhs, items, depth + 1);
                self.env.pop_scope();
                result?;
                Ok(false)
            }
            CompiledExpr::Value(_) => {
                let value = evaluate(&compiled, &self.env)?;
                write!(self.out, "{value}")?;
                Ok(true)
            }
        }
    }

    fn each(
        &mut self,
        node: &Node,
        var: &str,
        items: Vec<Value>,
        depth: usize,
    ) -> Result<(), RenderError> {
        for (index, item) in items.into_iter().enumerate() {
            tracing::trace!(var, index, "loop iteration");
            self.env.set(var, item);
            self.children(node, depth)?;
        }
        Ok(())
    }
}
