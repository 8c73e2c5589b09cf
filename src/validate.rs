//! Cheap document pre-checks.
//!
//! Answers "is this worth a full parse?" without building a document tree.
//! With a frontmatter block present, the identity fields strict callers will
//! demand are checked up front; without one, the only requirement is a
//! top-level heading a name could be recovered from. Problems come back as
//! data, never as an error.

use crate::parser::frontmatter;
use crate::parser::ParseOptions;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// An ATX top-level heading at the start of a line.
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+\S").unwrap());

/// Outcome of a pre-parse document check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Whether the document passed every check
    pub valid: bool,

    /// One human-readable message per violation
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check a document before committing to a full parse.
///
/// With a frontmatter block: `name` and `email` must be present and
/// non-empty and `email` must look like an email address; every violation
/// becomes one error string, and an unparseable block becomes a single
/// error rather than an exception. Without a block: the body must contain a
/// top-level heading, and an email is optional.
///
/// # Example
///
/// ```
/// let report = cvparse::validate("---\nname: Jane Doe\n---\nbody");
/// assert!(!report.valid);
/// assert_eq!(report.errors.len(), 1);
/// ```
pub fn validate(text: &str) -> ValidationReport {
    let mut errors = Vec::new();

    match frontmatter::split_frontmatter(text) {
        Some((yaml, _body)) => match frontmatter::metadata_from_yaml(yaml, &ParseOptions::default())
        {
            Ok(metadata) => {
                if metadata.name.is_none() {
                    errors.push("Frontmatter is missing required field: name".to_string());
                }
                match metadata.email.as_deref() {
                    None => {
                        errors.push("Frontmatter is missing required field: email".to_string());
                    }
                    Some(email) if !frontmatter::valid_email(email) => {
                        errors.push(format!("Invalid email format: {email}"));
                    }
                    Some(_) => {}
                }
            }
            Err(err) => errors.push(err.to_string()),
        },
        None => {
            if !H1_RE.is_match(frontmatter::strip_bom(text)) {
                errors.push(
                    "Document has no top-level heading (# Name) to identify its owner".to_string(),
                );
            }
        }
    }

    ValidationReport::from_errors(errors)
}
