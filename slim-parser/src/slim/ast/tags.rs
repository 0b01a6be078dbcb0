//! Tag name conventions
//!
//! A tag name ending in [`RAW_BLOCK_TERMINATOR`] opens a raw block: the lines nested under it
//! are kept as verbatim text instead of being parsed. The terminator is not part of the
//! rendered name, and a few raw-block names are aliases for the real element.

pub const RAW_BLOCK_TERMINATOR: char = ':';

/// Raw-block aliases, `(written, rendered)`.
pub const TAG_ALIASES: &[(&str, &str)] = &[("javascript", "script")];

pub fn is_raw_block(name: &str) -> bool {
    name.ends_with(RAW_BLOCK_TERMINATOR)
}

/// Resolve a raw-block alias; unknown names pass through.
pub fn alias(name: &str) -> &str {
    TAG_ALIASES
        .iter()
        .find(|(written, _)| *written == name)
        .map(|(_, rendered)| *rendered)
        .unwrap_or(name)
}

/// The name to render: raw-block names lose their terminator and are de-aliased, everything
/// else is returned unchanged.
pub fn canonical_name(name: &str) -> &str {
    match name.strip_suffix(RAW_BLOCK_TERMINATOR) {
        Some(stripped) => alias(stripped),
        None => name,
    }
}
