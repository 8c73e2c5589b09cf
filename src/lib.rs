//! # cvparse
//!
//! Heuristic CV document parsing for Rust.
//!
//! This library converts a semi-structured CV document (an optional YAML
//! frontmatter block followed by a Markdown body) into a normalized, typed
//! record, and can additionally render the body to sanitized HTML with
//! inline styling derived from externally supplied design tokens.
//!
//! ## Quick Start
//!
//! ```
//! use cvparse::SectionKind;
//!
//! let text = "---\nname: Jane Doe\nemail: jane@example.com\n---\n\n## Experience\n\n### Senior Engineer | Acme Corp\n\n*Jan 2020 – Present*\n";
//!
//! let doc = cvparse::parse(text)?;
//! assert_eq!(doc.metadata.name.as_deref(), Some("Jane Doe"));
//! assert_eq!(doc.sections[0].kind, SectionKind::Experience);
//! assert_eq!(doc.entry_count(), 1);
//! # Ok::<(), cvparse::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Frontmatter metadata**: YAML identity block with optional strict and
//!   required-field validation modes
//! - **Best-effort fallback**: name, email, and contact lines recovered from
//!   the body when no frontmatter exists
//! - **Section segmentation**: headings become typed sections, entries, and
//!   skill taxonomies via ordered pattern heuristics
//! - **Inline markup preserved**: `**bold**`, links, and code spans survive
//!   into parsed fields verbatim
//! - **Styled rendering**: sanitized HTML with design-token inline styles
//! - **Parallel processing**: uses Rayon for multi-document batches

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod validate;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Entry, Metadata, ParsedDocument, Section, SectionBlock, SectionKind, SkillGroup,
};
pub use parser::{CvParser, ParseOptions};
pub use render::{StyleConfig, StyledRenderer};
pub use validate::{validate, ValidationReport};

use rayon::prelude::*;

/// Parse a CV document with default options.
///
/// # Arguments
///
/// * `text` - The document text (frontmatter block plus Markdown body)
///
/// # Example
///
/// ```
/// let doc = cvparse::parse("# Jane Doe\n\n## Skills\n\n- Rust\n").unwrap();
/// assert_eq!(doc.metadata.name.as_deref(), Some("Jane Doe"));
/// ```
pub fn parse(text: &str) -> Result<ParsedDocument> {
    CvParser::new().parse(text)
}

/// Parse a CV document with custom options.
///
/// # Example
///
/// ```
/// use cvparse::{Error, ParseOptions};
///
/// let options = ParseOptions::new().validate_required();
/// let err = cvparse::parse_with_options("---\nname: Jane\n---\nbody", options).unwrap_err();
/// assert!(matches!(err, Error::FrontmatterMissingField(field) if field == "email"));
/// ```
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<ParsedDocument> {
    CvParser::with_options(options).parse(text)
}

/// Parse a CV document and attach sanitized, styled markup rendered against
/// the given style configuration.
///
/// The configuration is a nested object of design tokens defined by an
/// external template layer; missing tokens simply produce absent style
/// substitutions.
///
/// # Example
///
/// ```
/// use cvparse::ParseOptions;
/// use serde_json::json;
///
/// let style = json!({ "colors": { "heading": "#1a1a2e" } });
/// let doc = cvparse::parse_styled("## Summary\n\nHello.", ParseOptions::new(), &style)?;
/// assert!(doc.rendered_markup.unwrap().contains("<h2"));
/// # Ok::<(), cvparse::Error>(())
/// ```
pub fn parse_styled(
    text: &str,
    options: ParseOptions,
    style: &StyleConfig,
) -> Result<ParsedDocument> {
    CvParser::with_options(options).parse_styled(text, style)
}

/// Parse independent documents in parallel, one result per input in order.
///
/// # Example
///
/// ```
/// use cvparse::ParseOptions;
///
/// let docs = ["# Jane\n", "# John\n"];
/// let results = cvparse::parse_batch(&docs, &ParseOptions::default());
/// assert_eq!(results.len(), 2);
/// assert!(results.iter().all(|r| r.is_ok()));
/// ```
pub fn parse_batch<S>(texts: &[S], options: &ParseOptions) -> Vec<Result<ParsedDocument>>
where
    S: AsRef<str> + Sync,
{
    let parser = CvParser::with_options(*options);
    texts
        .par_iter()
        .map(|text| parser.parse(text.as_ref()))
        .collect()
}
