//! Document model types for structural document representation.
//!
//! This module defines the tree the rest of the crate operates on: ordered
//! tabs of paragraphs, styled text runs, tables, and section breaks, plus
//! the list definitions bulleted paragraphs reference. Every variant is a
//! closed tagged union; there are no open maps to probe.

mod document;
mod element;
mod table;

pub use document::{
    DocumentMetadata, FlatTab, GlyphType, ListDefinition, NestingLevel, SectionBreak,
    StructuralDocument, Tab, MAIN_DOCUMENT, UNTITLED_DOCUMENT, UNTITLED_TAB,
};
pub use element::{
    Bullet, ContentElement, LinkTarget, NamedStyle, Paragraph, Span, TextRun, TextStyle,
    WeightedFont,
};
pub use table::{Table, TableCell, TableRow};
