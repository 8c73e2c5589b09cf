//! Styled HTML rendering.
//!
//! The rendering pass is independent of section segmentation: the body is
//! rendered to HTML, sanitized against the allow-list, and then re-serialized
//! with inline styles injected from the design tokens. User-supplied markup
//! flows through the sanitizer unsoftened, so only allow-listed tags and
//! attributes ever reach the output.

use comrak::{format_html, parse_document, Arena, Options};
use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

use super::sanitize;
use super::style::{StyleConfig, StyleSheet};

/// Tags serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Renders a document body to sanitized HTML with inline styling.
///
/// Construction flattens the style configuration once; the renderer itself
/// is immutable and may be reused across documents and threads.
pub struct StyledRenderer {
    sheet: StyleSheet,
}

impl StyledRenderer {
    /// Create a renderer from an externally supplied style configuration.
    pub fn new(config: &StyleConfig) -> Self {
        Self {
            sheet: StyleSheet::new(config),
        }
    }

    /// The flattened design tokens, keyed by dot-joined path.
    pub fn style_variables(&self) -> &BTreeMap<String, String> {
        self.sheet.variables()
    }

    /// Render a document body to styled markup.
    ///
    /// Pipeline: markdown to HTML with GFM tables and strikethrough, raw
    /// HTML passed through to the sanitizer, sanitize, then inject per-tag
    /// inline styles while re-serializing.
    pub fn render(&self, body: &str) -> Result<String> {
        let options = markdown_options();
        let arena = Arena::new();
        let root = parse_document(&arena, body, &options);

        let mut html = Vec::new();
        format_html(root, &options, &mut html)
            .map_err(|err| Error::Render(format!("markdown serialization failed: {err}")))?;
        let html = String::from_utf8(html)
            .map_err(|err| Error::Render(format!("rendered markup is not UTF-8: {err}")))?;

        let clean = sanitize::sanitize(&html);
        log::debug!(
            "rendered {} bytes of markdown into {} bytes of sanitized markup",
            body.len(),
            clean.len()
        );
        Ok(self.apply_styles(&clean))
    }

    /// Walk the sanitized fragment and re-serialize it with injected styles.
    fn apply_styles(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let mut out = String::with_capacity(html.len() + html.len() / 2);
        self.serialize_children(fragment.tree.root(), &mut out);
        out
    }

    fn serialize_children(&self, node: NodeRef<'_, Node>, out: &mut String) {
        for child in node.children() {
            self.serialize_node(child, out);
        }
    }

    fn serialize_node(&self, node: NodeRef<'_, Node>, out: &mut String) {
        match node.value() {
            Node::Text(text) => push_escaped_text(out, text),
            Node::Element(element) => {
                // Fragment parsing wraps content in a synthetic <html>
                // element; the sanitizer has already removed any authored one.
                if element.name() == "html" {
                    self.serialize_children(node, out);
                } else {
                    self.serialize_element(node, element, out);
                }
            }
            Node::Document | Node::Fragment => self.serialize_children(node, out),
            _ => {}
        }
    }

    fn serialize_element(&self, node: NodeRef<'_, Node>, element: &Element, out: &mut String) {
        let tag = element.name();
        let injected = self.injected_style(node, tag);

        out.push('<');
        out.push_str(tag);
        let mut style_written = false;
        for (name, value) in element.attrs() {
            if name == "style" {
                style_written = true;
                match &injected {
                    // Authored style first, template style appended after.
                    Some(injected) => push_attr(out, "style", &merge_styles(value, injected)),
                    None => push_attr(out, "style", value),
                }
            } else {
                push_attr(out, name, value);
            }
        }
        if !style_written {
            if let Some(injected) = &injected {
                push_attr(out, "style", injected);
            }
        }
        out.push('>');

        if VOID_TAGS.contains(&tag) {
            return;
        }
        self.serialize_children(node, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    /// Template style for a tag, plus the nesting override for lists.
    fn injected_style(&self, node: NodeRef<'_, Node>, tag: &str) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(style) = self.sheet.tag_style(tag) {
            parts.push(style);
        }
        if matches!(tag, "ul" | "ol") {
            if let Some(style) = self.sheet.list_depth_style(list_depth(node)) {
                parts.push(style);
            }
        }
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

/// Count of ancestor list and list-item elements. Top-level lists sit at
/// depth 0 and get no nesting override.
fn list_depth(node: NodeRef<'_, Node>) -> usize {
    node.ancestors()
        .filter(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| matches!(element.name(), "ul" | "ol" | "li"))
        })
        .count()
}

/// Join an authored inline style and an injected one, authored side first.
fn merge_styles(existing: &str, injected: &str) -> String {
    let existing = existing.trim().trim_end_matches(';').trim_end();
    if existing.is_empty() {
        injected.to_string()
    } else {
        format!("{existing}; {injected}")
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn push_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Markdown options for the rendering pass: GFM tables and strikethrough,
/// raw HTML kept so the sanitizer sees it rather than comrak suppressing it.
fn markdown_options() -> Options {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.render.unsafe_ = true;
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer() -> StyledRenderer {
        StyledRenderer::new(&json!({
            "colors": {
                "heading": "#1a1a2e",
                "text": "#333",
                "link": "#0f3460",
                "list": { "level1": "#111", "level2": "#222", "level3": "#333" },
            },
            "font": { "size": { "h1": "28px", "h2": "22px", "body": "14px" }, "line-height": "1.6" },
            "spacing": {
                "heading": { "margin": "16px 0 8px" },
                "paragraph": { "margin": "0 0 12px" },
                "list": { "margin": "0 0 12px", "indent": "1.5em", "item": "4px" },
            },
        }))
    }

    #[test]
    fn test_heading_and_paragraph_styled() {
        let html = renderer().render("# Title\n\nBody text.").unwrap();
        assert!(html.contains("<h1 style=\""));
        assert!(html.contains("color: #1a1a2e"));
        assert!(html.contains("font-size: 28px"));
        assert!(html.contains("<p style=\""));
        assert!(html.contains("font-size: 14px"));
    }

    #[test]
    fn test_unstyled_without_tokens() {
        let renderer = StyledRenderer::new(&json!({}));
        let html = renderer.render("Body text.").unwrap();
        // Every p declaration references a token; none resolve, so the
        // paragraph comes through bare.
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn test_script_never_survives() {
        let html = renderer()
            .render("hello\n\n<script>alert(1)</script>\n")
            .unwrap();
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert(1)"));
    }

    #[test]
    fn test_event_handler_attrs_removed() {
        let html = renderer()
            .render("<div onmouseover=\"x()\">t</div>\n")
            .unwrap();
        // div is not allow-listed: the tag goes, its text stays.
        assert!(!html.contains("onmouseover"));
        assert_eq!(html.trim(), "t");
    }

    #[test]
    fn test_authored_style_precedes_injected() {
        let html = renderer()
            .render("<p style=\"color: purple\">note</p>\n")
            .unwrap();
        let style_start = html.find("style=\"").unwrap() + "style=\"".len();
        let style = &html[style_start..html[style_start..].find('"').unwrap() + style_start];
        assert!(style.starts_with("color: purple; "));
        assert!(style.contains("font-size: 14px"));
    }

    #[test]
    fn test_nested_list_depth_styles() {
        let html = renderer()
            .render("- Top\n  - Mid\n    - Deep\n")
            .unwrap();
        // The first nesting level sits under a li and a ul, landing in the
        // second depth bucket; the next one caps at the third.
        assert!(html.contains("#222"));
        assert!(html.contains("#333"));
        assert_eq!(html.matches("margin-left: 1.5em").count(), 2);
    }

    #[test]
    fn test_gfm_table_and_strikethrough() {
        let html = renderer()
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n")
            .unwrap();
        assert!(html.contains("<table"));
        assert!(html.contains("<td"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_link_keeps_href_and_gets_color() {
        let html = renderer()
            .render("[site](https://example.com)")
            .unwrap();
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("color: #0f3460"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = renderer();
        let body = "# T\n\n- a\n  - b\n\n**bold** text\n";
        assert_eq!(renderer.render(body).unwrap(), renderer.render(body).unwrap());
    }
}
