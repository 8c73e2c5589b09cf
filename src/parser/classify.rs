//! Content classification heuristics.
//!
//! Per-paragraph rules that decide whether a line inside an entry is a
//! company/date header, a date line, or narrative description, plus the
//! heading-to-kind keyword table, the entry-title split, and skill-group
//! parsing. All of this is best-effort and total: an unrecognized pattern
//! falls through to the most general bucket instead of failing the parse.
//! The rule order below is pinned; entries in real documents depend on it.

use crate::model::{SectionKind, SkillGroup};
use regex::Regex;
use std::sync::LazyLock;

/// A 4-digit year anywhere in the line, 1900–2099.
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());

/// `**Company** <sep> rest` where `<sep>` is one of the separator glyphs
/// seen between a bolded organization and its date range.
static BOLD_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+?)\*\*\s*[|•·–—-]\s*(.+)$").unwrap());

/// A line that is nothing but one bolded span.
static BOLD_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^*]+)\*\*$").unwrap());

/// The word "at" between a title and a company, case-insensitive.
static TITLE_AT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+at\s+").unwrap());

/// `**Category:** rest` with the colon inside or outside the bold span.
static SKILL_LABEL_BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+?):\*\*\s*(.*)$|^\*\*(.+?)\*\*:\s*(.*)$").unwrap());

/// `Category: rest` without bold markers.
static SKILL_LABEL_PLAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]+):\s*(.*)$").unwrap());

/// Ordered keyword table mapping heading substrings to section kinds.
/// First row with any hit wins.
const KIND_KEYWORDS: &[(&[&str], SectionKind)] = &[
    (&["experience", "work", "employment"], SectionKind::Experience),
    (&["education", "academic"], SectionKind::Education),
    (&["skill", "technolog", "competenc"], SectionKind::Skills),
    (&["project"], SectionKind::Projects),
    (&["language"], SectionKind::Languages),
    (&["certification", "award"], SectionKind::Certifications),
    (&["interest", "hobbi"], SectionKind::Interests),
    (&["reference"], SectionKind::References),
    (&["summary", "profile", "about"], SectionKind::Summary),
];

/// Outcome of classifying one paragraph inside an entry.
///
/// Header fields are applied set-if-unset by the segmenter; a header line
/// never also reaches the description buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntryLine {
    Header {
        company: Option<String>,
        date: Option<String>,
    },
    Description,
}

/// Classify one reconstructed paragraph line inside an entry.
///
/// Rules, in order, first match wins:
/// 1. `**Company** <sep> Date` with a year on the right
/// 2. a lone bolded span (company)
/// 3. a pipe split with a year on the right; a pipe line without a year is
///    description outright and never reaches rule 4
/// 4. any line containing a year (date, emphasis wrappers and all)
/// 5. description
pub(crate) fn classify_entry_line(text: &str) -> EntryLine {
    let line = text.trim();

    if let Some(caps) = BOLD_HEADER_RE.captures(line) {
        let rest = caps[2].trim();
        if YEAR_RE.is_match(rest) {
            return EntryLine::Header {
                company: Some(caps[1].trim().to_string()),
                date: Some(rest.to_string()),
            };
        }
    }

    if let Some(caps) = BOLD_ONLY_RE.captures(line) {
        return EntryLine::Header {
            company: Some(caps[1].trim().to_string()),
            date: None,
        };
    }

    if let Some((left, right)) = line.split_once('|') {
        let right = right.trim();
        if YEAR_RE.is_match(right) {
            return EntryLine::Header {
                company: Some(left.trim().to_string()),
                date: Some(right.to_string()),
            };
        }
        return EntryLine::Description;
    }

    if YEAR_RE.is_match(line) {
        return EntryLine::Header {
            company: None,
            date: Some(line.to_string()),
        };
    }

    EntryLine::Description
}

/// Split an entry heading into `(title, company)`.
///
/// Tries `Title | Company` on the first pipe, then `Title at Company` on the
/// first case-insensitive " at ", otherwise the whole heading is the title.
pub(crate) fn split_entry_title(text: &str) -> (String, String) {
    if let Some((title, company)) = text.split_once('|') {
        return (title.trim().to_string(), company.trim().to_string());
    }
    if let Some(found) = TITLE_AT_RE.find(text) {
        return (
            text[..found.start()].trim().to_string(),
            text[found.end()..].trim().to_string(),
        );
    }
    (text.trim().to_string(), String::new())
}

/// Infer a section kind from its heading text.
pub(crate) fn infer_section_kind(title: &str) -> SectionKind {
    let lower = title.to_lowercase();
    for (keywords, kind) in KIND_KEYWORDS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *kind;
        }
    }
    SectionKind::Custom
}

/// Parse the top-level items of a list in a skills section into groups.
///
/// Recognizes `**Category:** a, b, c` and `Category: a, b, c` items, and a
/// label-only item whose values sit on the following plain item. With no
/// category detected anywhere, the whole list becomes one fallback group.
pub(crate) fn parse_skill_groups(items: &[String]) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    let mut index = 0;

    while index < items.len() {
        let item = items[index].trim();
        if let Some((category, rest)) = match_skill_label(item) {
            if !rest.is_empty() {
                groups.push(SkillGroup::new(category, split_skill_tokens(&rest)));
            } else if let Some(next) = items.get(index + 1).map(|s| s.trim()) {
                if match_skill_label(next).is_none() {
                    // Label-only item; the next plain item carries its values.
                    groups.push(SkillGroup::new(category, split_skill_tokens(next)));
                    index += 2;
                    continue;
                }
                groups.push(SkillGroup::new(category, Vec::new()));
            } else {
                groups.push(SkillGroup::new(category, Vec::new()));
            }
        } else if !groups.is_empty() {
            log::trace!("skill item without category label ignored: {item:?}");
        }
        index += 1;
    }

    if groups.is_empty() && !items.is_empty() {
        return vec![SkillGroup::new(
            "Skills",
            items.iter().map(|s| s.trim().to_string()).collect(),
        )];
    }
    groups
}

/// Match a skills category label, returning `(category, rest)`.
fn match_skill_label(item: &str) -> Option<(String, String)> {
    if let Some(caps) = SKILL_LABEL_BOLD_RE.captures(item) {
        let category = caps.get(1).or_else(|| caps.get(3))?.as_str().trim();
        let rest = caps.get(2).or_else(|| caps.get(4)).map_or("", |m| m.as_str());
        return Some((category.to_string(), rest.trim().to_string()));
    }
    if let Some(caps) = SKILL_LABEL_PLAIN_RE.captures(item) {
        return Some((caps[1].trim().to_string(), caps[2].trim().to_string()));
    }
    None
}

fn split_skill_tokens(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
