//! Integration tests for document parsing and segmentation.

use cvparse::{
    CvParser, Error, ParseOptions, SectionBlock, SectionKind, SkillGroup,
};

const FULL_CV: &str = r#"---
name: Jane Doe
email: Jane.Doe@Example.COM
phone: "+1 (555) 010-0100"
location: Portland, OR
pronouns: they/them
---

## Summary

Engineer who likes **parsers** and *clean* text. See [notes](https://janedoe.dev/notes).

## Work Experience

### Senior Engineer | Acme Corp

*Jan 2020 – Present*

Leading the document platform team.

- Cut parse latency in half
- Mentored four engineers

### Engineer at Globex

**Globex** | Mar 2017 – Dec 2019

Built the ingestion pipeline.

<!-- pagebreak -->

## Education

### BSc Computer Science at State University

*2013 – 2017*

## Skills

- **Languages:** Rust, Go, Python
- **Tools:** git, docker , make
"#;

#[test]
fn test_metadata_lifted_and_normalized() {
    let doc = cvparse::parse(FULL_CV).unwrap();

    assert_eq!(doc.metadata.name.as_deref(), Some("Jane Doe"));
    assert_eq!(doc.metadata.email.as_deref(), Some("jane.doe@example.com"));
    assert_eq!(doc.metadata.phone.as_deref(), Some("+1 (555) 010-0100"));
    assert_eq!(doc.metadata.location.as_deref(), Some("Portland, OR"));
    assert_eq!(
        doc.metadata.extra["pronouns"],
        serde_json::json!("they/them")
    );
}

#[test]
fn test_sections_in_document_order() {
    let doc = cvparse::parse(FULL_CV).unwrap();

    let kinds: Vec<SectionKind> = doc.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Break,
            SectionKind::Education,
            SectionKind::Skills,
        ]
    );
}

#[test]
fn test_entry_field_extraction() {
    let doc = cvparse::parse(FULL_CV).unwrap();

    let experience = doc
        .sections_of_kind(SectionKind::Experience)
        .next()
        .unwrap();
    let entries: Vec<_> = experience.entries().collect();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].title, "Senior Engineer");
    assert_eq!(entries[0].company, "Acme Corp");
    assert!(entries[0].date.contains("Jan 2020"));
    assert!(entries[0].date.contains("Present"));
    assert_eq!(entries[0].description, "Leading the document platform team.");
    assert_eq!(
        entries[0].bullets,
        vec!["Cut parse latency in half", "Mentored four engineers"]
    );

    // The heading set the company; the bold header line only fills the date.
    assert_eq!(entries[1].title, "Engineer");
    assert_eq!(entries[1].company, "Globex");
    assert!(entries[1].date.contains("Mar 2017"));
    assert_eq!(entries[1].description, "Built the ingestion pipeline.");
}

/// Mirrors the Quick Start document from the crate docs.
#[test]
fn test_quick_start_example() {
    let text = "---\nname: Jane Doe\nemail: jane@example.com\n---\n\n## Experience\n\n### Senior Engineer | Acme Corp\n\n*Jan 2020 – Present*\n";
    let doc = cvparse::parse(text).unwrap();

    assert_eq!(doc.metadata.name.as_deref(), Some("Jane Doe"));
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].kind, SectionKind::Experience);
    assert_eq!(doc.entry_count(), 1);

    let entry = doc.sections[0].entries().next().unwrap();
    assert_eq!(entry.title, "Senior Engineer");
    assert_eq!(entry.company, "Acme Corp");
    // Dates are kept as written, emphasis markers included.
    assert_eq!(entry.date, "*Jan 2020 – Present*");
    // No heuristic fills location.
    assert_eq!(entry.location, "");
}

#[test]
fn test_break_marker_position_and_shape() {
    let doc = cvparse::parse(FULL_CV).unwrap();

    let break_section = &doc.sections[2];
    assert!(break_section.break_before);
    assert!(break_section.content.is_empty());
    assert!(break_section.title.is_empty());
    assert_eq!(doc.sections[1].kind, SectionKind::Experience);
    assert_eq!(doc.sections[3].kind, SectionKind::Education);
}

#[test]
fn test_skill_groups_split_and_trimmed() {
    let doc = cvparse::parse(FULL_CV).unwrap();

    let skills = doc.sections_of_kind(SectionKind::Skills).next().unwrap();
    let groups: Vec<&SkillGroup> = skills
        .content
        .iter()
        .filter_map(|block| match block {
            SectionBlock::Skills(group) => Some(group),
            _ => None,
        })
        .collect();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category, "Languages");
    assert_eq!(groups[0].skills, vec!["Rust", "Go", "Python"]);
    assert_eq!(groups[1].category, "Tools");
    assert_eq!(groups[1].skills, vec!["git", "docker", "make"]);
}

#[test]
fn test_inline_markup_round_trip() {
    let doc = cvparse::parse(FULL_CV).unwrap();

    let summary = doc.sections_of_kind(SectionKind::Summary).next().unwrap();
    let SectionBlock::Text(text) = &summary.content[0] else {
        panic!("expected a text block");
    };
    assert!(text.contains("**parsers**"));
    assert!(text.contains("*clean*"));
    assert!(text.contains("[notes](https://janedoe.dev/notes)"));
}

#[test]
fn test_parse_is_idempotent() {
    let first = cvparse::parse(FULL_CV).unwrap();
    let second = cvparse::parse(FULL_CV).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_validate_required_missing_email() {
    let text = "---\nname: Jane Doe\n---\n\n## Summary\n\nHi.\n";
    let options = ParseOptions::new().validate_required();
    let err = cvparse::parse_with_options(text, options).unwrap_err();
    assert!(matches!(err, Error::FrontmatterMissingField(field) if field == "email"));
}

#[test]
fn test_strict_frontmatter_rejects_bad_phone() {
    let text = "---\nname: Jane\nemail: jane@example.com\nphone: call me\n---\nbody\n";
    let err = cvparse::parse_with_options(text, ParseOptions::new().strict()).unwrap_err();
    assert!(matches!(
        err,
        Error::FrontmatterInvalidField { field, .. } if field == "phone"
    ));
}

#[test]
fn test_fallback_name_from_heading() {
    let doc = cvparse::parse("#   Jane Doe  \n\nSome intro.\n").unwrap();
    assert_eq!(doc.metadata.name.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_fallback_contact_lines() {
    let doc = cvparse::parse(
        "# Jane Doe\n\n\
         jane@example.com\n\n\
         📞 +1 555 0100\n\
         📍 Portland, OR\n\n\
         https://www.linkedin.com/in/janedoe\n\n\
         https://janedoe.dev\n",
    )
    .unwrap();

    assert_eq!(doc.metadata.email.as_deref(), Some("jane@example.com"));
    assert_eq!(doc.metadata.phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(doc.metadata.location.as_deref(), Some("Portland, OR"));
    assert_eq!(
        doc.metadata.linkedin.as_deref(),
        Some("https://www.linkedin.com/in/janedoe")
    );
    assert_eq!(doc.metadata.website.as_deref(), Some("https://janedoe.dev"));
}

#[test]
fn test_no_frontmatter_requires_nothing() {
    let doc = cvparse::parse("Just a paragraph.\n").unwrap();
    assert!(doc.metadata.name.is_none());
    assert!(doc.metadata.email.is_none());
    assert!(doc.sections.is_empty());
}

#[test]
fn test_pipe_line_without_year_stays_description() {
    let doc = cvparse::parse(
        "## Experience\n\n### Engineer\n\nRan the budget review | finance team\n",
    )
    .unwrap();
    let entry = doc.sections[0].entries().next().unwrap();
    assert_eq!(entry.company, "");
    assert_eq!(entry.date, "");
    assert_eq!(entry.description, "Ran the budget review | finance team");
}

#[test]
fn test_description_never_a_list() {
    let doc = cvparse::parse(
        "## Experience\n\n### Engineer\n\nFirst paragraph.\n\nSecond paragraph.\n",
    )
    .unwrap();
    let entry = doc.sections[0].entries().next().unwrap();
    assert_eq!(entry.description, "First paragraph.\n\nSecond paragraph.");
}

#[test]
fn test_skills_fallback_group() {
    let doc = cvparse::parse("## Skills\n\n- Rust\n- Go\n").unwrap();
    let SectionBlock::Skills(group) = &doc.sections[0].content[0] else {
        panic!("expected a skills block");
    };
    assert_eq!(group.category, "Skills");
    assert_eq!(group.skills, vec!["Rust", "Go"]);
}

#[test]
fn test_custom_section_kind() {
    let doc = cvparse::parse("## Volunteering\n\nLocal library.\n").unwrap();
    assert_eq!(doc.sections[0].kind, SectionKind::Custom);
    assert_eq!(doc.sections[0].title, "Volunteering");
}

#[test]
fn test_parse_batch_preserves_order() {
    let texts = vec![
        FULL_CV.to_string(),
        "# Solo\n".to_string(),
        "## Skills\n\n- Rust\n".to_string(),
    ];
    let results = cvparse::parse_batch(&texts, &ParseOptions::default());

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap().metadata.name.as_deref(),
        Some("Jane Doe")
    );
    assert_eq!(
        results[1].as_ref().unwrap().metadata.name.as_deref(),
        Some("Solo")
    );
    assert_eq!(results[2].as_ref().unwrap().sections[0].kind, SectionKind::Skills);
}

#[test]
fn test_shared_parser_parses_documents_independently() {
    let parser = CvParser::with_options(ParseOptions::new().validate_required());

    // A failing parse must not affect the next call on the same instance.
    assert!(parser.parse("---\nname: only\n---\nbody").is_err());
    let doc = parser
        .parse("---\nname: Jane\nemail: jane@example.com\n---\nbody")
        .unwrap();
    assert_eq!(doc.metadata.name.as_deref(), Some("Jane"));
}

#[test]
fn test_document_serialization_shape() {
    let doc = cvparse::parse(FULL_CV).unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["metadata"]["name"], "Jane Doe");
    assert_eq!(json["sections"][0]["kind"], "summary");
    // Plain content blocks serialize as bare strings, entries as objects.
    assert!(json["sections"][0]["content"][0].is_string());
    assert!(json["sections"][1]["content"][0].is_object());
}
