//! Treeviz formatter
//!
//! One line per node with box-drawing connectors, so the nesting the indentation resolver
//! produced can be read at a glance:
//!
//!     ⧉ template
//!     └─ ◇ html lang="ja"
//!       ├─ ◇ head
//!       │ └─ ◇ title
//!       └─ ◇ body
//!         └─ ◇ p | Hello
//!
//! Icons
//!     Element: ◇
//!     Raw block: 𝒱
//!     Text only: ◦
//!     Expression only: ƒ
//!
//! Labels longer than 40 characters are truncated.

use super::{FormatError, Formatter};
use crate::slim::ast::{Document, Node};

const MAX_LABEL: usize = 40;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(node: &Node) -> &'static str {
    if node.is_raw_block() {
        "𝒱"
    } else if !node.name.is_empty() {
        "◇"
    } else if node.has_expr() {
        "ƒ"
    } else {
        "◦"
    }
}

fn label(node: &Node) -> String {
    let mut label = node.name.clone();
    if let Some(id) = &node.id {
        label.push('#');
        label.push_str(id);
    }
    for class in &node.class {
        label.push('.');
        label.push_str(class);
    }
    for attr in &node.attr {
        label.push(' ');
        label.push_str(&attr.name);
        if !attr.is_bare() {
            label.push_str(&format!("=\"{}\"", attr.value));
        }
    }
    if node.has_expr() {
        label.push_str(" = ");
        label.push_str(node.expr.trim());
    }
    if !node.text.is_empty() {
        // raw block text spans lines
        let first = node.text.lines().next().unwrap_or_default();
        label.push_str(" | ");
        label.push_str(first);
    }
    label.trim_start().to_string()
}

fn format_node(node: &Node, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon(node),
        truncate(&label(node), MAX_LABEL)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        format_node(child, &child_prefix, i == count - 1, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = String::from("⧉ template\n");
    let count = doc.root.children.len();
    for (i, child) in doc.root.children.iter().enumerate() {
        format_node(child, "", i == count - 1, &mut output);
    }
    output
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree with one line per node"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }
}
