//! Lexer states

/// Where the line lexer is within the current line. State never carries over to the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    /// Before the first significant character
    #[default]
    Neutral,
    Tag,
    Id,
    Class,
    AttrKey,
    AttrValue,
    /// After an id or class: skips `=` and blanks, anything else begins an expression
    Eq,
    Text,
    Expr,
}

/// Characters allowed in `#id` and `.class` shorthands.
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
