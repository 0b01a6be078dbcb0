//! Line lexer
//!
//!     One pass left to right over the characters of a single line. Columns are counted in
//!     characters, so a tab or a multi-byte character both take one column.
//!
//!     Transitions, by state:
//!         Neutral:   blanks are skipped. `=` and `-` begin an expression line, `|` a text line.
//!                    `#` and `.` open an implicit `div` and begin an id or class. A non-ASCII
//!                    character begins a text line. Anything else opens an element and begins
//!                    its tag name.
//!         Tag:       `#`, `.` and `=` end the name and move to Id, Class or Expr. A blank moves
//!                    to AttrKey.
//!         Id/Class:  name characters accumulate, `.` starts (another) class, anything else
//!                    commits and moves to Eq.
//!         Eq:        skips `=` and blanks, anything else begins the expression.
//!         AttrKey:   `=` after a name moves to AttrValue, `=` with no name begins an expression.
//!                    Whatever is left at end of line becomes the node's text.
//!         AttrValue: a blank outside quotes commits the pair and returns to AttrKey.
//!         Text/Expr: the rest of the line is appended verbatim.

use super::state::{is_name_char, LexState};
use crate::slim::ast::{Attr, Node};

/// Tag given to elements written only as `#id` or `.class`.
pub const DEFAULT_TAG: &str = "div";

/// Receives what the lexer finds on a line.
pub trait NodeSink {
    /// Open a new element whose first character sits at `column`, and make it current.
    fn open_element(&mut self, column: usize) -> &mut Node;

    /// The node that the rest of the line is written into.
    fn current(&mut self) -> &mut Node;
}

#[derive(Debug, Default)]
pub struct LineLexer {
    state: LexState,
    id: String,
    class: String,
    attr_name: String,
    attr_value: String,
}

impl LineLexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    /// Process the character at `column`.
    pub fn feed<S: NodeSink + ?Sized>(&mut self, column: usize, c: char, sink: &mut S) {
        match self.state {
            LexState::Neutral => self.neutral(column, c, sink),
            LexState::Tag => self.tag(c, sink),
            LexState::Id => match c {
                c if is_name_char(c) => self.id.push(c),
                '.' => {
                    self.commit_id(sink);
                    self.state = LexState::Class;
                }
                _ => {
                    self.commit_id(sink);
                    self.state = LexState::Eq;
                }
            },
            LexState::Class => match c {
                c if is_name_char(c) => self.class.push(c),
                '.' => self.commit_class(sink),
                _ => {
                    self.commit_class(sink);
                    self.state = LexState::Eq;
                }
            },
            LexState::Eq => {
                if c != '=' && !c.is_whitespace() {
                    sink.current().expr.push(c);
                    self.state = LexState::Expr;
                }
            }
            LexState::AttrKey => {
                if c != '=' {
                    self.attr_name.push(c);
                } else if self.attr_name.trim().is_empty() {
                    self.attr_name.clear();
                    self.state = LexState::Expr;
                } else {
                    self.state = LexState::AttrValue;
                }
            }
            LexState::AttrValue => self.attr_value(c, sink),
            LexState::Text => sink.current().text.push(c),
            LexState::Expr => sink.current().expr.push(c),
        }
    }

    /// End of line: commit whatever is pending and reset for the next line.
    pub fn finish<S: NodeSink + ?Sized>(&mut self, sink: &mut S) {
        match self.state {
            LexState::Id => self.commit_id(sink),
            LexState::Class => self.commit_class(sink),
            LexState::AttrKey => {
                let text = self.attr_name.trim();
                if !text.is_empty() {
                    sink.current().text.push_str(text);
                }
            }
            LexState::AttrValue => self.commit_attr(sink),
            _ => {}
        }
        *self = Self::default();
    }

    fn neutral<S: NodeSink + ?Sized>(&mut self, column: usize, c: char, sink: &mut S) {
        if c.is_whitespace() {
            return;
        }
        self.state = match c {
            '=' | '-' => LexState::Expr,
            '|' => LexState::Text,
            '#' => {
                sink.open_element(column).name = DEFAULT_TAG.to_string();
                LexState::Id
            }
            '.' => {
                sink.open_element(column).name = DEFAULT_TAG.to_string();
                LexState::Class
            }
            c if !c.is_ascii() => {
                sink.current().text.push(c);
                LexState::Text
            }
            c => {
                sink.open_element(column).name = c.to_string();
                LexState::Tag
            }
        };
    }

    fn tag<S: NodeSink + ?Sized>(&mut self, c: char, sink: &mut S) {
        match c {
            '=' => self.state = LexState::Expr,
            '#' => self.state = LexState::Id,
            '.' => self.state = LexState::Class,
            c if c.is_whitespace() => self.state = LexState::AttrKey,
            c => sink.current().name.push(c),
        }
    }

    fn attr_value<S: NodeSink + ?Sized>(&mut self, c: char, sink: &mut S) {
        if !c.is_whitespace() {
            self.attr_value.push(c);
        } else if self.attr_value.is_empty() {
            // blanks between `=` and the value
        } else if is_open_quote(&self.attr_value) {
            self.attr_value.push(c);
        } else {
            self.commit_attr(sink);
            self.state = LexState::AttrKey;
        }
    }

    fn commit_id<S: NodeSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.id.is_empty() {
            sink.current().id = Some(std::mem::take(&mut self.id));
        }
    }

    fn commit_class<S: NodeSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.class.is_empty() {
            sink.current().class.push(std::mem::take(&mut self.class));
        }
    }

    fn commit_attr<S: NodeSink + ?Sized>(&mut self, sink: &mut S) {
        let name = self.attr_name.trim();
        if !name.is_empty() {
            let attr = Attr::new(name, unquote(&self.attr_value));
            sink.current().attr.push(attr);
        }
        self.attr_name.clear();
        self.attr_value.clear();
    }
}

fn is_open_quote(value: &str) -> bool {
    value.starts_with('"') && (value.len() == 1 || !value.ends_with('"'))
}

/// Strip surrounding quotes. A missing closing quote only loses the opening one.
fn unquote(value: &str) -> &str {
    match value.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').unwrap_or(inner),
        None => value,
    }
}

/// Lex a whole line into `sink`, returning the state the line ended in.
pub fn lex_line<S: NodeSink + ?Sized>(line: &str, sink: &mut S) -> LexState {
    let mut lexer = LineLexer::new();
    for (column, c) in line.chars().enumerate() {
        lexer.feed(column, c, sink);
    }
    let state = lexer.state();
    lexer.finish(sink);
    state
}
