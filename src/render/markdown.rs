//! Markdown rendering for structural document elements.

use crate::model::{ContentElement, NamedStyle, Paragraph, TextRun};

use super::table::render_table;

/// Render a sequence of content elements to Markdown.
pub fn render_elements(elements: &[ContentElement]) -> String {
    let mut output = String::new();
    for element in elements {
        output.push_str(&render_element(element));
    }
    output
}

/// Render one content element to Markdown.
pub fn render_element(element: &ContentElement) -> String {
    match element {
        ContentElement::Paragraph(p) => render_paragraph(p),
        ContentElement::Table(t) => render_table(t),
        ContentElement::SectionBreak(_) => "\n---\n\n".to_string(),
    }
}

/// Render a paragraph to Markdown.
///
/// Run formatting composes innermost-out: bold/italic markers, then the
/// `<u>` underline fallback, then the link wrapper. Heading style wins over
/// bullet membership when a paragraph carries both.
pub fn render_paragraph(para: &Paragraph) -> String {
    let text: String = para.runs.iter().map(render_run).collect();
    let text = text.trim_end();

    if let NamedStyle::Heading(level) = para.style {
        return format!("{} {}\n", "#".repeat(level as usize), text);
    }

    if let Some(ref bullet) = para.bullet {
        // All nesting levels past the first collapse into one extra indent
        // step; multi-level indentation is intentionally not reproduced.
        let marker = if bullet.nesting_level == 0 {
            "- "
        } else {
            "  - "
        };
        return format!("{marker}{text}\n");
    }

    if !text.trim().is_empty() {
        format!("{text}\n")
    } else {
        "\n".to_string()
    }
}

fn render_run(run: &TextRun) -> String {
    let style = &run.style;
    let mut text = run.text.clone();

    if style.bold && style.italic {
        text = format!("***{text}***");
    } else if style.bold {
        text = format!("**{text}**");
    } else if style.italic {
        text = format!("*{text}*");
    }

    if style.underline {
        text = format!("<u>{text}</u>");
    }

    // Links wrap the already-formatted text. Bookmark and heading targets
    // have no address outside the source document, so they render plain.
    if let Some(url) = style.link_url() {
        text = format!("[{text}]({url})");
    }

    text
}
