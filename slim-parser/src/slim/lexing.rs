//! Lexer
//!
//!     Slim is lexed one line at a time. Every line is run through a small character state
//!     machine ([`LineLexer`]) which classifies its characters into a tag name, an id, classes,
//!     attributes, trailing text or an expression fragment, and writes them straight into the
//!     node being built.
//!
//!     The lexer does not own the tree. It talks to a [`NodeSink`]: when a character starts a
//!     new element it asks the sink to open one at that column, and everything else on the line
//!     lands in whatever node the sink reports as current. The parser's tree builder is the
//!     sink, and decides where the new element goes with the indentation resolver.
//!
//! Degrading Gracefully
//!
//!     There are no lexing errors. Malformed input falls into the most permissive reading: an
//!     unterminated quoted value keeps its contents, `key=` with nothing after it is a bare
//!     attribute, words after a tag with no `=` become text.

pub mod line_lexer;
pub mod state;

pub use line_lexer::{lex_line, LineLexer, NodeSink};
pub use state::LexState;
