//! Parsing
//!
//!     The parser drives the [line lexer](crate::slim::lexing) over the source one line at a
//!     time. It owns the node arena and the [indentation resolver](indentation), and acts as the
//!     lexer's [`NodeSink`]: elements are opened where the resolver says, and everything else on a
//!     line is written into the element opened last.
//!
//!     Before a line reaches the lexer it is stripped of trailing whitespace (line ending
//!     included) and checked against the raw block being captured, if any.
//!
//! Raw Blocks
//!
//!     An element whose tag name ends with `:` (`javascript:`, `pre:`) keeps the lines nested
//!     under it as verbatim text. Every following non-blank line that starts deeper than the
//!     element is appended to its text, joined with newlines, with the indentation of the first
//!     captured line removed. The first line at the element's column or shallower ends the block
//!     and is parsed normally.

pub mod error;
pub mod indentation;

pub use error::ParseError;
pub use indentation::IndentationResolver;

use crate::slim::ast::{Document, Node, NodeArena, NodeId};
use crate::slim::lexing::{lex_line, NodeSink};
use std::io::BufRead;

/// Builds the tree while lines are lexed into it.
#[derive(Debug)]
pub struct TreeBuilder {
    arena: NodeArena,
    resolver: IndentationResolver,
    current: NodeId,
    /// Element opened on the line being lexed, with its column
    opened: Option<(usize, NodeId)>,
}

impl NodeSink for TreeBuilder {
    fn open_element(&mut self, column: usize) -> &mut Node {
        let id = self.resolver.resolve(&mut self.arena, column);
        tracing::trace!(column, node = id.index(), "opened element");
        self.current = id;
        self.opened = Some((column, id));
        self.arena.node_mut(id)
    }

    fn current(&mut self) -> &mut Node {
        self.arena.node_mut(self.current)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            resolver: IndentationResolver::new(),
            current: NodeId::ROOT,
            opened: None,
        }
    }

    /// Lex one line and return the element it opened, if any.
    pub fn line(&mut self, line: &str) -> Option<(usize, NodeId)> {
        self.opened = None;
        let state = lex_line(line, self);
        tracing::trace!(?state, line, "lexed line");
        self.opened
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.arena.node_mut(id)
    }

    pub fn finish(self) -> Document {
        Document::new(self.arena.into_tree())
    }
}

/// A raw block being captured.
#[derive(Debug)]
struct RawCapture {
    column: usize,
    node: NodeId,
    /// Indentation of the first captured line
    base: Option<usize>,
}

/// Line-at-a-time parser.
#[derive(Debug, Default)]
pub struct Parser {
    builder: TreeBuilder,
    raw: Option<RawCapture>,
    lines: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next source line.
    pub fn push_line(&mut self, line: &str) {
        self.lines += 1;
        let line = line.trim_end();
        let Some(first) = line.chars().position(|c| !c.is_whitespace()) else {
            return;
        };

        if let Some(raw) = self.raw.as_mut() {
            if first > raw.column {
                let base = *raw.base.get_or_insert(first);
                let verbatim: String = line.chars().skip(first.min(base)).collect();
                let text = &mut self.builder.node_mut(raw.node).text;
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&verbatim);
                return;
            }
            self.raw = None;
        }

        if let Some((column, id)) = self.builder.line(line) {
            if self.builder.node_mut(id).is_raw_block() {
                self.raw = Some(RawCapture {
                    column,
                    node: id,
                    base: None,
                });
            }
        }
    }

    pub fn finish(self) -> Document {
        let document = self.builder.finish();
        tracing::debug!(
            lines = self.lines,
            nodes = document.node_count(),
            "parsed template"
        );
        document
    }
}

/// Parse template source held in memory.
pub fn parse_str(source: &str) -> Document {
    let mut parser = Parser::new();
    for line in source.lines() {
        parser.push_line(line);
    }
    parser.finish()
}

/// Parse template source from a reader. Fails only if reading fails; nothing is returned then.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Document, ParseError> {
    let mut parser = Parser::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ParseError::Io {
            line: index + 1,
            source,
        })?;
        parser.push_line(&line);
    }
    Ok(parser.finish())
}
