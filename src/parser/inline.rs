//! Inline content reconstruction.
//!
//! Section titles, entry headers, and body paragraphs are stored as text with
//! inline markup preserved (`**bold**`, `*emphasis*`, `` `code` ``, links),
//! so downstream renderers that re-interpret fields as markup lose nothing.
//! A plain-text flatten is also provided for the few places that want bare
//! words, such as recovering a name from a heading.

use comrak::nodes::{AstNode, NodeValue};

/// Reconstruct the inline content of a container node (heading, paragraph,
/// list item) as literal markup text. Soft and hard breaks become `\n`.
pub(crate) fn markup_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.children() {
        push_markup(child, &mut out);
    }
    out
}

fn push_markup<'a>(node: &'a AstNode<'a>, out: &mut String) {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => {
            out.push('`');
            out.push_str(&code.literal);
            out.push('`');
        }
        NodeValue::Emph => {
            out.push('*');
            push_children(node, out);
            out.push('*');
        }
        NodeValue::Strong => {
            out.push_str("**");
            push_children(node, out);
            out.push_str("**");
        }
        NodeValue::Strikethrough => {
            out.push_str("~~");
            push_children(node, out);
            out.push_str("~~");
        }
        NodeValue::Link(link) => {
            out.push('[');
            push_children(node, out);
            out.push_str("](");
            out.push_str(&link.url);
            out.push(')');
        }
        NodeValue::Image(link) => {
            out.push_str("![");
            push_children(node, out);
            out.push_str("](");
            out.push_str(&link.url);
            out.push(')');
        }
        NodeValue::HtmlInline(html) => out.push_str(html),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push('\n'),
        _ => push_children(node, out),
    }
}

fn push_children<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        push_markup(child, out);
    }
}

/// Flatten the inline content of a container node to plain text, dropping
/// markup delimiters and raw HTML. Breaks become single spaces.
pub(crate) fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.children() {
        push_plain(child, &mut out);
    }
    out
}

fn push_plain<'a>(node: &'a AstNode<'a>, out: &mut String) {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        NodeValue::HtmlInline(_) => {}
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
        _ => {
            for child in node.children() {
                push_plain(child, out);
            }
        }
    }
}
