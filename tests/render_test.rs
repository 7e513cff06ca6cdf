//! End-to-end tests for the export path: flattening, rendering, section
//! splitting, and the Markdown round-trip marker.

use ungdoc::model::{
    ContentElement, Paragraph, SectionBreak, StructuralDocument, Tab, Table, TextRun, TextStyle,
};
use ungdoc::{interop, render, RenderOptions, SplitMode};

fn para(text: &str) -> ContentElement {
    ContentElement::Paragraph(Paragraph::with_text(text))
}

fn heading(text: &str, level: u8) -> ContentElement {
    ContentElement::Paragraph(Paragraph::heading(text, level))
}

#[test]
fn test_end_to_end_markdown() {
    // One tab, one H1, one bold+italic run, one 2x2 blank table.
    let mut run_para = Paragraph::new();
    run_para.add_run(TextRun::styled(
        "hi",
        TextStyle {
            bold: true,
            italic: true,
            ..Default::default()
        },
    ));

    let mut tab = Tab::new("Notes Tab");
    tab.add_element(heading("Notes", 1));
    tab.add_element(ContentElement::Paragraph(run_para));
    tab.add_element(ContentElement::Table(Table::from_strings([
        vec!["", ""],
        vec!["", ""],
    ])));

    let mut doc = StructuralDocument::new();
    doc.add_tab(tab);

    assert_eq!(
        render::to_markdown(&doc),
        "# Notes\n***hi***\n| | |\n| --- | --- |\n| | |\n\n"
    );
}

#[test]
fn test_multi_tab_document_combined() {
    let mut first = Tab::new("Plan");
    first.add_element(heading("Goals", 2));
    first.add_element(para("ship it"));

    let mut second = Tab::new("Log");
    second.add_element(para("day one"));
    second.add_element(ContentElement::SectionBreak(SectionBreak::new()));
    second.add_element(para("day two"));

    let mut doc = StructuralDocument::new();
    doc.add_tab(first);
    doc.add_tab(second);

    assert_eq!(
        render::to_markdown(&doc),
        "\n# Plan\n\n## Goals\nship it\n\n# Log\n\nday one\n\n---\n\nday two\n"
    );
}

#[test]
fn test_sections_by_heading_across_tabs() {
    let mut first = Tab::new("Overview");
    first.add_element(para("lead-in"));
    let mut second = Tab::new("Details");
    second.add_element(heading("Setup", 1));
    second.add_element(para("steps"));

    let mut doc = StructuralDocument::new();
    doc.add_tab(first);
    doc.add_tab(second);

    let sections =
        render::to_sections(&doc, &RenderOptions::new().with_split(SplitMode::ByHeading));
    let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Overview", "Setup"]);
    assert_eq!(sections[1].body, "# Setup\nsteps\n");
}

#[test]
fn test_sections_by_tab() {
    let mut first = Tab::new("Kept");
    first.add_element(para("something"));
    let second = Tab::new("Dropped");

    let mut doc = StructuralDocument::new();
    doc.add_tab(first);
    doc.add_tab(second);

    let sections = render::to_sections(&doc, &RenderOptions::new().with_split(SplitMode::ByTab));
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Kept");
    assert_eq!(sections[0].body, "something\n");
}

#[test]
fn test_marker_survives_render_round_trip() {
    let mut doc = StructuralDocument::with_title("My Doc");
    doc.add_element(heading("My Doc", 1));
    doc.add_element(para("body"));

    let markdown = render::to_markdown(&doc);
    let saved = interop::set_doc_id(&markdown, "doc-id-1");
    let resaved = interop::set_doc_id(&saved, "doc-id-2");

    let (id, clean) = interop::extract_doc_id(&resaved);
    assert_eq!(id.as_deref(), Some("doc-id-2"));
    assert_eq!(clean, markdown);
    assert_eq!(resaved.matches("google-doc-id").count(), 1);
}

#[test]
fn test_hardening_rendered_bullet_lists() {
    let mut doc = StructuralDocument::new();
    doc.add_element(para("Shopping:"));
    doc.add_element(ContentElement::Paragraph(
        Paragraph::with_text("milk").with_bullet("l", 0),
    ));
    doc.add_element(ContentElement::Paragraph(
        Paragraph::with_text("eggs").with_bullet("l", 0),
    ));

    let markdown = render::to_markdown(&doc);
    assert_eq!(markdown, "Shopping:\n- milk\n- eggs\n");

    let hardened = interop::harden_lists(&markdown);
    assert_eq!(hardened, "Shopping:\n\n- milk\n- eggs\n");
}

#[test]
fn test_section_filenames() {
    let mut doc = StructuralDocument::new();
    doc.add_element(heading("Q3: Review / Plans", 1));
    doc.add_element(para("content"));

    let sections =
        render::to_sections(&doc, &RenderOptions::new().with_split(SplitMode::ByHeading));
    assert_eq!(sections.len(), 1);
    assert_eq!(
        interop::sanitize_filename(&sections[0].title),
        "q3-review-plans"
    );
}

#[test]
fn test_marker_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");

    let mut doc = StructuralDocument::with_title("Notes");
    doc.add_element(heading("Notes", 1));
    let markdown = render::to_markdown(&doc);

    std::fs::write(&path, interop::set_doc_id(&markdown, "file-doc-1")).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let (id, clean) = interop::extract_doc_id(&content);
    assert_eq!(id.as_deref(), Some("file-doc-1"));
    assert_eq!(clean, markdown);
}
