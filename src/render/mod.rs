//! Rendering module for converting structural documents to Markdown.

mod markdown;
mod options;
mod section;
mod table;

pub use markdown::{render_element, render_elements, render_paragraph};
pub use options::{RenderOptions, SplitMode};
pub use section::{RenderedSection, SectionSplitter, INTRODUCTION, UNTITLED_SECTION};
pub use table::render_table;

use crate::model::StructuralDocument;

/// Convert a document to a single Markdown stream.
pub fn to_markdown(doc: &StructuralDocument) -> String {
    SectionSplitter::new().combined(doc)
}

/// Convert a document to titled sections according to the options.
pub fn to_sections(doc: &StructuralDocument, options: &RenderOptions) -> Vec<RenderedSection> {
    SectionSplitter::new().split(doc, options.split)
}
