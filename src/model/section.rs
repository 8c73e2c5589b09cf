//! Section-level types.

use serde::{Deserialize, Serialize};

/// The recognized categories of CV sections.
///
/// Inferred from section headings by keyword lookup; headings that match no
/// keyword become [`SectionKind::Custom`]. [`SectionKind::Break`] marks a
/// synthetic page-break section rather than authored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Languages,
    Certifications,
    Interests,
    References,
    Custom,
    Break,
}

impl SectionKind {
    /// Stable lowercase label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Languages => "languages",
            SectionKind::Certifications => "certifications",
            SectionKind::Interests => "interests",
            SectionKind::References => "references",
            SectionKind::Custom => "custom",
            SectionKind::Break => "break",
        }
    }
}

/// A top-level section of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Inferred category of the section
    pub kind: SectionKind,

    /// Heading text with inline markup preserved
    pub title: String,

    /// Heading depth that opened the section (2 for authored sections,
    /// 0 for synthetic break sections)
    pub level: u8,

    /// Ordered content blocks
    pub content: Vec<SectionBlock>,

    /// Whether a page break precedes this section
    pub break_before: bool,
}

impl Section {
    /// Create a new empty section opened by a depth-2 heading.
    pub fn new(kind: SectionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            level: 2,
            content: Vec::new(),
            break_before: false,
        }
    }

    /// Create a synthetic page-break section.
    pub fn page_break() -> Self {
        Self {
            kind: SectionKind::Break,
            title: String::new(),
            level: 0,
            content: Vec::new(),
            break_before: true,
        }
    }

    /// Check if the section carries no content blocks.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Iterate over the entries nested in this section.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.content.iter().filter_map(|block| match block {
            SectionBlock::Entry(entry) => Some(entry),
            _ => None,
        })
    }
}

/// One content block inside a section.
///
/// Serialized untagged: plain text becomes a JSON string, entries and skill
/// groups become objects distinguished by their fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionBlock {
    /// A plain paragraph or loose list item
    Text(String),

    /// A dated entry (position, degree, project)
    Entry(Entry),

    /// A named group of skills
    Skills(SkillGroup),
}

/// A dated entry within a section, opened by a depth-3 heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry title (left side of the heading split)
    pub title: String,

    /// Organization or company name
    pub company: String,

    /// Date or date range, stored as written
    pub date: String,

    /// Location; no heuristic populates this, callers may
    pub location: String,

    /// Free-form description, paragraphs joined by blank lines
    pub description: String,

    /// Bulleted detail lines
    pub bullets: Vec<String>,
}

impl Entry {
    /// Check if every field of the entry is empty.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.company.is_empty()
            && self.date.is_empty()
            && self.location.is_empty()
            && self.description.is_empty()
            && self.bullets.is_empty()
    }
}

/// A named group of skills parsed from a list in a skills section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    /// Group label (e.g. "Frontend"); the fallback group uses "Skills"
    pub category: String,

    /// Individual skill names, trimmed
    pub skills: Vec<String>,
}

impl SkillGroup {
    /// Create a new skill group.
    pub fn new(category: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            category: category.into(),
            skills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_kind_serialization() {
        let json = serde_json::to_string(&SectionKind::Experience).unwrap();
        assert_eq!(json, "\"experience\"");
        let kind: SectionKind = serde_json::from_str("\"break\"").unwrap();
        assert_eq!(kind, SectionKind::Break);
    }

    #[test]
    fn test_page_break_section() {
        let section = Section::page_break();
        assert!(section.break_before);
        assert!(section.is_empty());
        assert_eq!(section.level, 0);
        assert_eq!(section.kind, SectionKind::Break);
    }

    #[test]
    fn test_section_block_untagged() {
        let blocks = vec![
            SectionBlock::Text("Led the platform team.".to_string()),
            SectionBlock::Skills(SkillGroup::new("Frontend", vec!["React".to_string()])),
        ];
        let json = serde_json::to_string(&blocks).unwrap();
        assert!(json.starts_with("[\"Led the platform team.\""));
        let back: Vec<SectionBlock> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, blocks);
    }

    #[test]
    fn test_entries_iterator() {
        let mut section = Section::new(SectionKind::Experience, "Experience");
        section.content.push(SectionBlock::Text("intro".to_string()));
        section.content.push(SectionBlock::Entry(Entry {
            title: "Engineer".to_string(),
            ..Default::default()
        }));
        assert_eq!(section.entries().count(), 1);
    }
}
