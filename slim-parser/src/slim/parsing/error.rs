use thiserror::Error;

/// Parsing only fails when the source cannot be read; malformed lines never error.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read template source at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}
