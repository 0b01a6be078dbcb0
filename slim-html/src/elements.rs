//! Element registry

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashSet;

pub const DOCTYPE: &str = "doctype";

/// Elements that never have a body or a closing tag.
pub static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        DOCTYPE, "area", "base", "basefont", "br", "col", "frame", "hr", "img", "input",
        "isindex", "link", "meta", "param", "embed", "keygen", "command",
    ]
    .into_iter()
    .collect()
});

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(name)
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_registry() {
        assert_eq!(VOID_ELEMENTS.len(), 17);
        assert!(is_void("meta"));
        assert!(is_void("doctype"));
        assert!(!is_void("div"));
        assert!(!is_void("script"));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("plain"), "plain");
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
        assert!(matches!(escape_attr("plain"), Cow::Borrowed(_)));
    }
}
