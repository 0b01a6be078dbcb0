//! Main module for slim library functionality

pub mod ast;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod testing;
