//! Document-level types.

use super::{Section, SectionBlock, SectionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A parsed CV document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Identity and contact metadata
    pub metadata: Metadata,

    /// Sections in document order
    pub sections: Vec<Section>,

    /// Sanitized, styled HTML body; present only for styled parses
    pub rendered_markup: Option<String>,

    /// Flattened design tokens used for styling; present only for styled parses
    pub style_variables: Option<BTreeMap<String, String>>,
}

impl ParsedDocument {
    /// Create a new document from metadata and sections.
    pub fn new(metadata: Metadata, sections: Vec<Section>) -> Self {
        Self {
            metadata,
            sections,
            rendered_markup: None,
            style_variables: None,
        }
    }

    /// Get the number of sections (page breaks included).
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Get the total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries().count()).sum()
    }

    /// Iterate over the sections of a given kind.
    pub fn sections_of_kind(&self, kind: SectionKind) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }

    /// Check if the document has neither metadata nor sections.
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.sections.is_empty()
    }

    /// Get plain text content of the document, inline markup included.
    ///
    /// Useful for search indexing and keyword screens; not a faithful
    /// reconstruction of the source.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref name) = self.metadata.name {
            parts.push(name.clone());
        }
        for section in &self.sections {
            if !section.title.is_empty() {
                parts.push(section.title.clone());
            }
            for block in &section.content {
                match block {
                    SectionBlock::Text(text) => parts.push(text.clone()),
                    SectionBlock::Entry(entry) => {
                        for field in [&entry.title, &entry.company, &entry.date, &entry.description]
                        {
                            if !field.is_empty() {
                                parts.push(field.clone());
                            }
                        }
                        parts.extend(entry.bullets.iter().cloned());
                    }
                    SectionBlock::Skills(group) => {
                        parts.push(format!("{}: {}", group.category, group.skills.join(", ")));
                    }
                }
            }
        }
        parts.join("\n")
    }
}

/// Identity and contact metadata, from frontmatter or body fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Full name
    pub name: Option<String>,

    /// Email address, trimmed and lower-cased
    pub email: Option<String>,

    /// Phone number, stored as written
    pub phone: Option<String>,

    /// City / region line
    pub location: Option<String>,

    /// Personal website or portfolio URL
    pub website: Option<String>,

    /// LinkedIn profile URL
    pub linkedin: Option<String>,

    /// GitHub profile URL
    pub github: Option<String>,

    /// Frontmatter fields beyond the known set, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Metadata {
    /// Check if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.website.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
            && self.extra.is_empty()
    }

    /// Check if the identity fields required by strict callers are present
    /// and non-empty.
    pub fn has_identity(&self) -> bool {
        self.name.as_deref().is_some_and(|s| !s.trim().is_empty())
            && self.email.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}
