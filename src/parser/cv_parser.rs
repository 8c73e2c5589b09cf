//! CV document parser built on a markdown AST.

use comrak::{parse_document, Arena, Options};

use crate::error::Result;
use crate::model::ParsedDocument;
use crate::render::{StyleConfig, StyledRenderer};

use super::options::ParseOptions;
use super::{frontmatter, segmenter};

/// CV document parser.
///
/// Holds only immutable options: one instance may be shared across threads
/// and reused for any number of documents without leaking state between
/// calls.
#[derive(Debug, Clone, Default)]
pub struct CvParser {
    options: ParseOptions,
}

impl CvParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse a document into its normalized form.
    pub fn parse(&self, text: &str) -> Result<ParsedDocument> {
        self.parse_inner(text, None)
    }

    /// Parse a document and additionally attach sanitized, styled markup
    /// rendered against the given style configuration.
    pub fn parse_styled(&self, text: &str, style: &StyleConfig) -> Result<ParsedDocument> {
        self.parse_inner(text, Some(style))
    }

    fn parse_inner(&self, text: &str, style: Option<&StyleConfig>) -> Result<ParsedDocument> {
        let (block, body) = match frontmatter::split_frontmatter(text) {
            Some((yaml, body)) => (Some(yaml), body),
            None => (None, frontmatter::strip_bom(text)),
        };

        let arena = Arena::new();
        let root = parse_document(&arena, body, &markdown_options());

        let metadata = match block {
            Some(yaml) => frontmatter::metadata_from_yaml(yaml, &self.options)?,
            None => {
                log::debug!("no frontmatter block, falling back to body extraction");
                frontmatter::extract_fallback(root)
            }
        };

        let sections = segmenter::segment(root);
        let mut document = ParsedDocument::new(metadata, sections);

        if let Some(style) = style {
            let renderer = StyledRenderer::new(style);
            document.rendered_markup = Some(renderer.render(body)?);
            document.style_variables = Some(renderer.style_variables().clone());
        }
        Ok(document)
    }
}

/// Markdown options for the segmentation pass: GFM tables and strikethrough
/// enabled so the tree dialect matches the rendering pass.
fn markdown_options() -> Options {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options
}
