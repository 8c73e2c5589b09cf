//! Section segmentation.
//!
//! A single left-to-right pass over the document's top-level nodes, driven
//! by a small state machine: no section, inside a section, inside an entry
//! within a section. Depth-2 headings open sections, depth-3 headings open
//! entries, page-break marker comments emit synthetic break sections, and
//! paragraphs and lists attach to whatever is open. The state lives in an
//! explicit struct so transitions stay testable apart from AST walking.

use crate::model::{Entry, Section, SectionBlock, SectionKind};
use crate::parser::classify::{self, EntryLine};
use crate::parser::inline;
use comrak::nodes::{AstNode, NodeValue};
use regex::Regex;
use std::sync::LazyLock;

static PAGE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--\s*pagebreak\s*-->").unwrap());

/// Segment the document body into ordered sections.
pub(crate) fn segment<'a>(root: &'a AstNode<'a>) -> Vec<Section> {
    let mut segmenter = Segmenter::default();
    for node in root.children() {
        let data = node.data.borrow();
        match &data.value {
            NodeValue::Heading(heading) => match heading.level {
                // Top-level headings carry the name, not structure.
                1 => {}
                2 => segmenter.open_section(inline::markup_text(node)),
                3 => segmenter.open_entry(&inline::markup_text(node)),
                _ => {}
            },
            NodeValue::Paragraph => segmenter.paragraph(inline::markup_text(node)),
            NodeValue::List(_) => {
                if segmenter.in_skills_section() {
                    segmenter.skills_list(&top_level_items(node));
                } else {
                    let mut items = Vec::new();
                    flatten_items(node, &mut items);
                    segmenter.list_items(items);
                }
            }
            NodeValue::HtmlBlock(html) => {
                if PAGE_BREAK_RE.is_match(&html.literal) {
                    segmenter.page_break();
                }
            }
            _ => {}
        }
    }
    segmenter.finish()
}

/// Accumulates sections across one traversal.
#[derive(Default)]
struct Segmenter {
    sections: Vec<Section>,
    current: Option<OpenSection>,
}

struct OpenSection {
    section: Section,
    entry: Option<EntryBuilder>,
}

/// Buffered entry fields. The description stays a paragraph list until the
/// entry closes; the only path to a finished [`Entry`] joins it into one
/// blank-line-separated string.
#[derive(Default)]
struct EntryBuilder {
    title: String,
    company: String,
    date: String,
    description: Vec<String>,
    bullets: Vec<String>,
}

impl EntryBuilder {
    fn new(title: String, company: String) -> Self {
        Self {
            title,
            company,
            ..Default::default()
        }
    }

    fn finish(self) -> Entry {
        Entry {
            title: self.title,
            company: self.company,
            date: self.date,
            location: String::new(),
            description: self.description.join("\n\n"),
            bullets: self.bullets,
        }
    }
}

impl Segmenter {
    fn open_section(&mut self, title: String) {
        self.close_section();
        let kind = classify::infer_section_kind(&title);
        log::debug!("section opened: {title:?} kind={}", kind.as_str());
        self.current = Some(OpenSection {
            section: Section::new(kind, title),
            entry: None,
        });
    }

    fn open_entry(&mut self, heading_text: &str) {
        let Some(open) = self.current.as_mut() else {
            log::debug!("entry heading outside any section skipped: {heading_text:?}");
            return;
        };
        Self::close_entry(open);
        let (title, company) = classify::split_entry_title(heading_text);
        open.entry = Some(EntryBuilder::new(title, company));
    }

    fn paragraph(&mut self, text: String) {
        let Some(open) = self.current.as_mut() else {
            log::trace!("paragraph before any section skipped");
            return;
        };
        match open.entry.as_mut() {
            Some(builder) => match classify::classify_entry_line(&text) {
                EntryLine::Header { company, date } => {
                    if let Some(company) = company {
                        if builder.company.is_empty() {
                            builder.company = company;
                        }
                    }
                    if let Some(date) = date {
                        if builder.date.is_empty() {
                            builder.date = date;
                        }
                    }
                }
                EntryLine::Description => builder.description.push(text),
            },
            None => open.section.content.push(SectionBlock::Text(text)),
        }
    }

    fn in_skills_section(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|open| open.section.kind == SectionKind::Skills)
    }

    /// A list inside a skills section replaces whatever content the section
    /// had accumulated so far.
    fn skills_list(&mut self, items: &[String]) {
        let Some(open) = self.current.as_mut() else {
            return;
        };
        let groups = classify::parse_skill_groups(items);
        log::debug!("skills list parsed into {} group(s)", groups.len());
        open.section.content = groups.into_iter().map(SectionBlock::Skills).collect();
    }

    fn list_items(&mut self, items: Vec<String>) {
        let Some(open) = self.current.as_mut() else {
            log::trace!("list before any section skipped");
            return;
        };
        match open.entry.as_mut() {
            Some(builder) => builder.bullets.extend(items),
            None => open
                .section
                .content
                .extend(items.into_iter().map(SectionBlock::Text)),
        }
    }

    fn page_break(&mut self) {
        self.close_section();
        log::debug!("page break marker at section {}", self.sections.len());
        self.sections.push(Section::page_break());
    }

    fn close_entry(open: &mut OpenSection) {
        if let Some(builder) = open.entry.take() {
            open.section.content.push(SectionBlock::Entry(builder.finish()));
        }
    }

    fn close_section(&mut self) {
        if let Some(mut open) = self.current.take() {
            Self::close_entry(&mut open);
            self.sections.push(open.section);
        }
    }

    fn finish(mut self) -> Vec<Section> {
        self.close_section();
        // Empty sections are noise; break markers survive on their own.
        self.sections
            .retain(|section| section.break_before || !section.content.is_empty());
        self.sections
    }
}

/// Text of each top-level item, from its own paragraphs only.
fn top_level_items<'a>(list: &'a AstNode<'a>) -> Vec<String> {
    let mut items = Vec::new();
    for item in list.children() {
        let text = item_text(item);
        if !text.is_empty() {
            items.push(text);
        }
    }
    items
}

/// Item texts including nested list items, flattened depth-first.
fn flatten_items<'a>(list: &'a AstNode<'a>, out: &mut Vec<String>) {
    for item in list.children() {
        let text = item_text(item);
        if !text.is_empty() {
            out.push(text);
        }
        for child in item.children() {
            let data = child.data.borrow();
            if matches!(&data.value, NodeValue::List(_)) {
                flatten_items(child, out);
            }
        }
    }
}

fn item_text<'a>(item: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in item.children() {
        let data = child.data.borrow();
        if matches!(&data.value, NodeValue::Paragraph) {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(inline::markup_text(child).trim());
        }
    }
    text
}
