//! Source loading
//!
//! `SourceLoader` reads template source from a file or a string and parses it. It is used by
//! the CLI, by `slim-html`'s `Template::parse_file` and by tests.
//!
//! ```rust,ignore
//! use slim_parser::slim::loader::SourceLoader;
//!
//! let doc = SourceLoader::from_path("index.slim")?.parse();
//! let doc = SourceLoader::from_string("p Hello\n").parse();
//! ```

use crate::slim::ast::Document;
use crate::slim::parsing::parse_str;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SourceLoader {
    source: String,
    path: Option<PathBuf>,
}

impl SourceLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
            path: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Where the source came from, if it was read from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn parse(&self) -> Document {
        if let Some(path) = &self.path {
            tracing::debug!(path = %path.display(), "parsing template file");
        }
        parse_str(&self.source)
    }
}
