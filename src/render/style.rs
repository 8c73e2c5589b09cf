//! Design-token styling.
//!
//! The style configuration is an opaque nested JSON object owned by an
//! external template layer. It is consumed defensively: scalar leaves are
//! flattened to dot-joined variable paths once, and tag templates reference
//! them as `{{path}}`. A declaration whose token is missing is dropped
//! rather than emitted half-empty; nothing here ever fails.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Externally defined design tokens (colors, font sizes, spacing).
pub type StyleConfig = serde_json::Value;

static TOKEN_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([\w.-]+)\}\}").unwrap());

/// Inline style templates per tag name. Declarations may mix literal CSS
/// with `{{token}}` references.
const TAG_TEMPLATES: &[(&str, &str)] = &[
    (
        "h1",
        "color: {{colors.heading}}; font-size: {{font.size.h1}}; margin: {{spacing.heading.margin}}",
    ),
    (
        "h2",
        "color: {{colors.heading}}; font-size: {{font.size.h2}}; border-bottom: 1px solid {{colors.accent}}; margin: {{spacing.heading.margin}}",
    ),
    (
        "h3",
        "color: {{colors.heading}}; font-size: {{font.size.h3}}; margin: {{spacing.heading.margin}}",
    ),
    (
        "p",
        "color: {{colors.text}}; font-size: {{font.size.body}}; line-height: {{font.line-height}}; margin: {{spacing.paragraph.margin}}",
    ),
    ("a", "color: {{colors.link}}"),
    ("ul", "margin: {{spacing.list.margin}}; padding-left: {{spacing.list.indent}}"),
    ("ol", "margin: {{spacing.list.margin}}; padding-left: {{spacing.list.indent}}"),
    ("li", "color: {{colors.text}}; margin-bottom: {{spacing.list.item}}"),
    (
        "code",
        "color: {{colors.code.text}}; background-color: {{colors.code.background}}; padding: 1px 4px; border-radius: 3px",
    ),
    (
        "pre",
        "background-color: {{colors.code.background}}; padding: {{spacing.cell}}; overflow-x: auto",
    ),
    (
        "blockquote",
        "color: {{colors.muted}}; border-left: 3px solid {{colors.accent}}; margin: {{spacing.paragraph.margin}}; padding-left: {{spacing.list.indent}}",
    ),
    ("table", "border-collapse: collapse; width: 100%"),
    (
        "th",
        "color: {{colors.heading}}; border: 1px solid {{colors.border}}; padding: {{spacing.cell}}",
    ),
    ("td", "border: 1px solid {{colors.border}}; padding: {{spacing.cell}}"),
    ("img", "max-width: 100%"),
];

/// Indent and color overrides for nested lists, one per depth bucket.
const LIST_DEPTH_TEMPLATES: [&str; 3] = [
    "margin-left: {{spacing.list.indent}}; color: {{colors.list.level1}}",
    "margin-left: {{spacing.list.indent}}; color: {{colors.list.level2}}",
    "margin-left: {{spacing.list.indent}}; color: {{colors.list.level3}}",
];

/// Flattened token table plus template rendering.
pub(crate) struct StyleSheet {
    vars: BTreeMap<String, String>,
}

impl StyleSheet {
    pub(crate) fn new(config: &StyleConfig) -> Self {
        Self {
            vars: flatten_tokens(config),
        }
    }

    /// The flattened variables, keyed by dot-joined path.
    pub(crate) fn variables(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Rendered inline style for a tag, if its template yields anything.
    pub(crate) fn tag_style(&self, tag: &str) -> Option<String> {
        let template = TAG_TEMPLATES
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, template)| *template)?;
        let rendered = render_template(template, &self.vars);
        (!rendered.is_empty()).then_some(rendered)
    }

    /// Depth override for a nested list, `depth` counting ancestor list and
    /// list-item nodes. Top-level lists (depth 0) get none; deeper buckets
    /// cap at 3.
    pub(crate) fn list_depth_style(&self, depth: usize) -> Option<String> {
        if depth == 0 {
            return None;
        }
        let rendered = render_template(LIST_DEPTH_TEMPLATES[depth.min(3) - 1], &self.vars);
        (!rendered.is_empty()).then_some(rendered)
    }
}

/// Substitute `{{token}}` references in a template. Declarations that
/// reference a missing token are dropped whole.
fn render_template(template: &str, vars: &BTreeMap<String, String>) -> String {
    let mut declarations = Vec::new();
    for declaration in template.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let mut missing = false;
        let substituted = TOKEN_REF_RE.replace_all(declaration, |caps: &regex::Captures| {
            match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => {
                    missing = true;
                    String::new()
                }
            }
        });
        if !missing {
            declarations.push(substituted.into_owned());
        }
    }
    declarations.join("; ")
}

fn flatten_tokens(config: &StyleConfig) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    match config {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                flatten_into(key.clone(), value, &mut vars);
            }
        }
        _ => log::debug!("style configuration is not an object, no tokens available"),
    }
    vars
}

fn flatten_into(path: String, value: &serde_json::Value, out: &mut BTreeMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                flatten_into(format!("{path}.{key}"), value, out);
            }
        }
        serde_json::Value::String(s) => {
            out.insert(path, s.clone());
        }
        serde_json::Value::Number(n) => {
            out.insert(path, n.to_string());
        }
        serde_json::Value::Bool(b) => {
            out.insert(path, b.to_string());
        }
        serde_json::Value::Null | serde_json::Value::Array(_) => {
            log::trace!("style token {path} is not a scalar, skipped");
        }
    }
}
