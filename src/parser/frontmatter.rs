//! Metadata extraction.
//!
//! A document may open with a YAML frontmatter block fenced by `---` lines.
//! When present, its mapping is lifted into [`Metadata`]: known contact keys
//! become typed fields, everything else is preserved verbatim. When absent,
//! a best-effort fallback recovers contact details from the body itself
//! (first top-level heading, email token scan, prefix-tagged contact lines).

use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::parser::inline;
use crate::parser::options::ParseOptions;
use comrak::nodes::{AstNode, NodeValue};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

static EMAIL_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s()./-]{7,}$").unwrap());

static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?[A-Za-z0-9][\w.-]*\.[A-Za-z]{2,}(?:/\S*)?$").unwrap()
});

static LINKEDIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://)?(?:www\.)?linkedin\.com/\S+$").unwrap());

static GITHUB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/\S+$").unwrap());

/// URL-shaped token: scheme or www forms always, bare domains only for a
/// fixed set of common endings so ordinary dotted words are not swallowed.
static URL_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://\S+|www\.\S+|[a-z0-9][\w-]*(?:\.[\w-]+)*\.(?:com|org|net|io|dev|me|co|app)(?:/\S*)?)")
        .unwrap()
});

const PHONE_PREFIXES: &[&str] = &["phone:", "tel:", "mobile:", "📞", "☎", "📱"];
const LOCATION_PREFIXES: &[&str] = &["location:", "address:", "📍", "🏠"];
const WEBSITE_PREFIXES: &[&str] = &["website:", "site:", "portfolio:", "🌐"];
const LINKEDIN_PREFIXES: &[&str] = &["linkedin:", "💼"];
const GITHUB_PREFIXES: &[&str] = &["github:"];

/// Strip a leading UTF-8 byte order mark if present.
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Split a document into `(yaml, body)` when it opens with a fenced
/// frontmatter block. Returns `None` when there is no complete block, in
/// which case the whole document is body.
pub(crate) fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let text = strip_bom(text);
    let (first_line, rest) = text.split_once('\n')?;
    if first_line.trim_end() != "---" {
        return None;
    }
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    // Opening fence without a closing one: not a frontmatter block.
    None
}

/// Build [`Metadata`] from the YAML inside a frontmatter block, applying the
/// option-gated required/format checks.
pub(crate) fn metadata_from_yaml(yaml: &str, options: &ParseOptions) -> Result<Metadata> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let mapping = match value {
        serde_yaml::Value::Null => serde_yaml::Mapping::new(),
        serde_yaml::Value::Mapping(mapping) => mapping,
        other => {
            return Err(Error::DocumentParse(format!(
                "metadata block must be a mapping, got {}",
                yaml_kind(&other)
            )))
        }
    };

    let mut metadata = Metadata::default();
    for (key, value) in mapping {
        let Some(key) = scalar_to_string(&key) else {
            log::debug!("skipping non-scalar frontmatter key: {key:?}");
            continue;
        };
        match key.as_str() {
            "name" => metadata.name = scalar_field(&value).map(|s| s.trim().to_string()),
            "email" => {
                metadata.email = scalar_field(&value).map(|s| s.trim().to_lowercase());
            }
            "phone" => metadata.phone = scalar_field(&value),
            "location" => metadata.location = scalar_field(&value),
            "website" => metadata.website = scalar_field(&value),
            "linkedin" => metadata.linkedin = scalar_field(&value),
            "github" => metadata.github = scalar_field(&value),
            _ => match serde_json::to_value(&value) {
                Ok(json) => {
                    metadata.extra.insert(key, json);
                }
                Err(err) => log::debug!("dropping unconvertible frontmatter field {key}: {err}"),
            },
        }
    }
    // Re-apply the empty-means-absent rule after trimming.
    metadata.name = metadata.name.filter(|s| !s.is_empty());
    metadata.email = metadata.email.filter(|s| !s.is_empty());

    if options.validate_required {
        check_required(&metadata)?;
    }
    if options.strict_frontmatter {
        check_formats(&metadata)?;
    }
    Ok(metadata)
}

fn check_required(metadata: &Metadata) -> Result<()> {
    for (field, value) in [("name", &metadata.name), ("email", &metadata.email)] {
        if value.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err(Error::FrontmatterMissingField(field.to_string()));
        }
    }
    Ok(())
}

fn check_formats(metadata: &Metadata) -> Result<()> {
    let checks: [(&str, &Option<String>, fn(&str) -> bool); 5] = [
        ("email", &metadata.email, valid_email),
        ("phone", &metadata.phone, valid_phone),
        ("website", &metadata.website, |v| WEBSITE_RE.is_match(v)),
        ("linkedin", &metadata.linkedin, |v| LINKEDIN_RE.is_match(v)),
        ("github", &metadata.github, |v| GITHUB_RE.is_match(v)),
    ];
    for (field, value, valid) in checks {
        if let Some(value) = value {
            if !valid(value) {
                return Err(Error::FrontmatterInvalidField {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Whole-string email grammar check, shared with the pre-parse validator.
pub(crate) fn valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    PHONE_RE.is_match(trimmed) && trimmed.chars().filter(char::is_ascii_digit).count() >= 7
}

/// Recover metadata from the body when no frontmatter block exists.
/// Every field is optional here; first match per field wins.
pub(crate) fn extract_fallback<'a>(root: &'a AstNode<'a>) -> Metadata {
    let mut metadata = Metadata::default();
    for node in root.descendants() {
        let data = node.data.borrow();
        match &data.value {
            NodeValue::Heading(heading) if heading.level == 1 => {
                if metadata.name.is_none() {
                    let name = inline::plain_text(node).trim().to_string();
                    if !name.is_empty() {
                        log::debug!("fallback name from top-level heading: {name}");
                        metadata.name = Some(name);
                    }
                }
            }
            NodeValue::Paragraph => {
                scan_contact_paragraph(&inline::markup_text(node), &mut metadata);
            }
            _ => {}
        }
    }
    metadata
}

/// Scan one paragraph's lines for contact details (prefix tags, email
/// tokens, URLs). Each check is independent and only fills unset fields.
fn scan_contact_paragraph(text: &str, metadata: &mut Metadata) {
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if metadata.email.is_none() {
            if let Some(found) = EMAIL_TOKEN_RE.find(line) {
                metadata.email = Some(found.as_str().to_lowercase());
            }
        }
        if metadata.phone.is_none() {
            if let Some(value) = strip_field_prefix(line, PHONE_PREFIXES) {
                metadata.phone = Some(value.to_string());
            }
        }
        if metadata.location.is_none() {
            if let Some(value) = strip_field_prefix(line, LOCATION_PREFIXES) {
                metadata.location = Some(value.to_string());
            }
        }
        if metadata.linkedin.is_none() {
            if let Some(value) = strip_field_prefix(line, LINKEDIN_PREFIXES) {
                metadata.linkedin = Some(value.to_string());
            }
        }
        if metadata.github.is_none() {
            if let Some(value) = strip_field_prefix(line, GITHUB_PREFIXES) {
                metadata.github = Some(value.to_string());
            }
        }
        if metadata.website.is_none() {
            if let Some(value) = strip_field_prefix(line, WEBSITE_PREFIXES) {
                metadata.website = Some(value.to_string());
            }
        }

        for found in URL_TOKEN_RE.find_iter(line) {
            // The domain half of an email token is not a URL.
            if line[..found.start()].ends_with('@') {
                continue;
            }
            let url = found.as_str().trim_end_matches(['.', ',', ';', ')']);
            let lower = url.to_lowercase();
            if lower.contains("linkedin") {
                if metadata.linkedin.is_none() {
                    metadata.linkedin = Some(url.to_string());
                }
            } else if lower.contains("github") {
                if metadata.github.is_none() {
                    metadata.github = Some(url.to_string());
                }
            } else if metadata.website.is_none() {
                metadata.website = Some(url.to_string());
            }
            break;
        }
    }
}

/// Strip a recognized field prefix (keyword or pictograph) from a line,
/// returning the trimmed remainder when non-empty.
fn strip_field_prefix<'a>(line: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    for prefix in prefixes {
        if let Some(rest) = strip_prefix_ci(line, prefix) {
            let value = rest.trim_start_matches([':', '：']).trim();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() < prefix.len() || !s.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, tail) = s.split_at(prefix.len());
    head.eq_ignore_ascii_case(prefix).then_some(tail)
}

fn scalar_field(value: &serde_yaml::Value) -> Option<String> {
    scalar_to_string(value).filter(|s| !s.trim().is_empty())
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
