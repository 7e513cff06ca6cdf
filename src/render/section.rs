//! Partitioning of rendered output into named sections.

use regex::Regex;

use crate::model::{ContentElement, NamedStyle, StructuralDocument};

use super::markdown::{render_element, render_elements, render_paragraph};
use super::options::SplitMode;

/// Default title for content accumulated before the first heading.
pub const INTRODUCTION: &str = "Introduction";

/// Default title for content after a section break with no following heading.
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// A titled piece of rendered Markdown. Never mutated after creation; the
/// splitter only regroups fragments that are already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    /// Section title (possibly synthesized)
    pub title: String,

    /// Rendered Markdown body
    pub body: String,
}

impl RenderedSection {
    /// Create a new rendered section.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Partitions a flattened, rendered element stream into named sections.
pub struct SectionSplitter {
    title_markup: Regex,
}

impl SectionSplitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self {
            title_markup: Regex::new(r"\*\*?([^*]+)\*\*?").unwrap(),
        }
    }

    /// Split a document according to `mode`.
    pub fn split(&self, doc: &StructuralDocument, mode: SplitMode) -> Vec<RenderedSection> {
        match mode {
            SplitMode::ByTab => self.by_tabs(doc),
            SplitMode::ByHeading => self.by_headings(doc),
            SplitMode::Combined => {
                let title = doc
                    .metadata
                    .title
                    .clone()
                    .unwrap_or_else(|| crate::model::UNTITLED_DOCUMENT.to_string());
                vec![RenderedSection::new(title, self.combined(doc))]
            }
        }
    }

    /// One section per flattened tab. Tabs whose rendered body is empty or
    /// whitespace-only are dropped entirely.
    pub fn by_tabs(&self, doc: &StructuralDocument) -> Vec<RenderedSection> {
        doc.flatten_tabs()
            .into_iter()
            .filter_map(|tab| {
                let body = render_elements(tab.elements);
                if body.trim().is_empty() {
                    None
                } else {
                    Some(RenderedSection::new(tab.title, body))
                }
            })
            .collect()
    }

    /// Sections bounded by level-1 headings and section breaks, scanned
    /// across all flattened tabs in order. A tab boundary flushes before any
    /// heading inside the tab is considered, and seeds the next section's
    /// title from the tab title.
    pub fn by_headings(&self, doc: &StructuralDocument) -> Vec<RenderedSection> {
        let flat = doc.flatten_tabs();
        let multiple_tabs = flat.len() > 1;

        let mut sections = Vec::new();
        let mut title: Option<String> = None;
        let mut body = String::new();

        for tab in &flat {
            if multiple_tabs {
                flush(&mut sections, &mut title, &mut body, INTRODUCTION);
                title = Some(tab.title.clone());
            }

            for element in tab.elements {
                match element {
                    ContentElement::Paragraph(p)
                        if p.style == NamedStyle::Heading(1) =>
                    {
                        flush(&mut sections, &mut title, &mut body, INTRODUCTION);
                        title = Some(self.heading_title(&p.plain_text()));
                        body.push_str(&render_paragraph(p));
                    }
                    ContentElement::SectionBreak(_) => {
                        flush(&mut sections, &mut title, &mut body, UNTITLED_SECTION);
                        title = Some(UNTITLED_SECTION.to_string());
                    }
                    ContentElement::Paragraph(p) => {
                        body.push_str(&render_paragraph(p));
                        if title.is_none() {
                            title = Some(INTRODUCTION.to_string());
                        }
                    }
                    other => {
                        body.push_str(&render_element(other));
                    }
                }
            }
        }

        flush(&mut sections, &mut title, &mut body, UNTITLED_SECTION);

        if sections.is_empty() {
            sections.push(RenderedSection::new(INTRODUCTION, ""));
        }
        sections
    }

    /// All tabs concatenated into one body. When more than one tab
    /// contributed content, each tab's content is preceded by an H1 line
    /// naming the tab.
    pub fn combined(&self, doc: &StructuralDocument) -> String {
        let flat = doc.flatten_tabs();
        let multiple_tabs = flat.len() > 1;

        let mut output = String::new();
        for tab in &flat {
            if multiple_tabs {
                output.push_str(&format!("\n# {}\n\n", tab.title));
            }
            output.push_str(&render_elements(tab.elements));
        }
        output
    }

    /// Section title from a heading's plain text: bold/italic markdown
    /// markers stripped, falling back when nothing is left.
    fn heading_title(&self, raw: &str) -> String {
        let stripped = self.title_markup.replace_all(raw.trim(), "$1");
        let stripped = stripped.trim();
        if stripped.is_empty() {
            UNTITLED_SECTION.to_string()
        } else {
            stripped.to_string()
        }
    }
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn flush(
    sections: &mut Vec<RenderedSection>,
    title: &mut Option<String>,
    body: &mut String,
    default_title: &str,
) {
    if body.is_empty() {
        return;
    }
    let resolved = title
        .take()
        .unwrap_or_else(|| default_title.to_string());
    sections.push(RenderedSection::new(resolved, std::mem::take(body)));
}
