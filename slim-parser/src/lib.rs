//! # slim
//!
//! A parser for the slim template language: one tag, text or expression directive per line,
//! nesting given by indentation alone.
//!
//! File Layout
//!
//!     src/slim
//!       ├── ast          The node tree (owned output) and the arena it is built in
//!       ├── lexing       The per-line character state machine
//!       ├── parsing      Line driver and the indentation resolver
//!       ├── loader       Reading templates from files and strings
//!       ├── formats      Tree dumps (treeviz, json)
//!       └── testing      Fluent assertions over parsed trees
//!
//! Parsing never fails on content: malformed lines degrade into the most permissive reading.
//! The only parse error is failing to read the source.

pub mod slim;

pub use slim::ast::{Attr, Document, Node};
pub use slim::parsing::{parse_reader, parse_str, ParseError};
