//! # ungdoc
//!
//! Structural document conversion and replication for Rust.
//!
//! This library converts between two document representations: a rich
//! structural tree (ordered tabs of paragraphs, styled text runs, tables,
//! section breaks) and a flat Markdown stream — and, in the reverse
//! direction, replicates a structural document's content into another live
//! document through a store that only accepts index-addressed edits.
//!
//! ## Quick Start
//!
//! ```
//! use ungdoc::render;
//! use ungdoc::model::{ContentElement, Paragraph, StructuralDocument};
//!
//! let mut doc = StructuralDocument::with_title("Notes");
//! doc.add_element(ContentElement::Paragraph(Paragraph::heading("Notes", 1)));
//! doc.add_element(ContentElement::Paragraph(Paragraph::with_text("hello")));
//!
//! let markdown = render::to_markdown(&doc);
//! assert_eq!(markdown, "# Notes\nhello\n");
//! ```
//!
//! ## Features
//!
//! - **Markdown export**: headings, bold/italic/underline/link composition,
//!   nested bullets, pipe tables, section splitting by tab or heading
//! - **Content replication**: replays paragraphs, styles, bullets, and
//!   tables into a destination document while tracking offset drift across
//!   batched, rate-limited mutations
//! - **Round-trip markers**: a document-id comment ties an exported
//!   Markdown file back to its source document

pub mod error;
pub mod interop;
pub mod model;
pub mod render;
pub mod replicate;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Bullet, ContentElement, DocumentMetadata, FlatTab, GlyphType, LinkTarget, ListDefinition,
    NamedStyle, Paragraph, SectionBreak, Span, StructuralDocument, Tab, Table, TableCell,
    TableRow, TextRun, TextStyle, WeightedFont,
};
pub use render::{RenderOptions, RenderedSection, SectionSplitter, SplitMode};
pub use replicate::{
    clear_document, replicate_into, BatchConfig, BatchScheduler, ContentReplicator,
    ReplicationStats, StyleApplicator, StyleConfig,
};
pub use store::{BulletPreset, DocumentStore, InsertLocation, MutationOperation};

/// Convert a document to a single Markdown stream.
pub fn to_markdown(doc: &StructuralDocument) -> String {
    render::to_markdown(doc)
}

/// Convert a document to titled sections according to the options.
pub fn to_sections(doc: &StructuralDocument, options: &RenderOptions) -> Vec<RenderedSection> {
    render::to_sections(doc, options)
}

/// Deserialize a structural document from JSON.
pub fn from_json(data: &str) -> Result<StructuralDocument> {
    Ok(serde_json::from_str(data)?)
}

/// Replicate `source`'s content into the (already emptied) destination
/// document, with default batching.
pub fn replicate<S: DocumentStore + ?Sized>(
    store: &mut S,
    source: &StructuralDocument,
    destination_id: &str,
) -> Result<ReplicationStats> {
    ContentReplicator::new().replicate(store, source, destination_id)
}

/// Apply the supplementary formatting pass (heading fonts, paragraph
/// spacing, table borders) to a document's current content.
pub fn apply_styles<S: DocumentStore + ?Sized>(
    store: &mut S,
    document_id: &str,
) -> Result<()> {
    StyleApplicator::new().apply(store, &BatchScheduler::new(), document_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_round_trip() {
        let mut doc = StructuralDocument::with_title("T");
        doc.add_element(ContentElement::Paragraph(Paragraph::with_text("x")));

        let json = serde_json::to_string(&doc).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(back.metadata.title.as_deref(), Some("T"));
        assert_eq!(back.body.len(), 1);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(from_json("not json"), Err(Error::Deserialize(_))));
    }

    #[test]
    fn test_to_markdown_convenience() {
        let mut doc = StructuralDocument::new();
        doc.add_element(ContentElement::Paragraph(Paragraph::heading("Hi", 1)));
        assert_eq!(to_markdown(&doc), "# Hi\n");
    }
}
