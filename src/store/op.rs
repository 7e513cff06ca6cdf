//! Index-addressed mutation operations.

use serde::{Deserialize, Serialize};

use crate::model::{NamedStyle, Span, TextStyle};

/// Where an insertion lands in the destination document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertLocation {
    /// A concrete character offset in the current snapshot
    At(usize),
    /// The document's end-of-content marker
    EndOfBody,
}

/// One index-addressed edit against a destination document.
///
/// Ranges are half-open `[start, end)` character offsets into the
/// destination's text stream *as of the last fetched snapshot*. Any
/// operation that changes document length invalidates every not-yet-issued
/// offset past its position; such offsets must be recomputed or the
/// destination re-fetched before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationOperation {
    /// Insert text at a location
    InsertText {
        /// Insertion point
        at: InsertLocation,
        /// Text to insert
        text: String,
    },

    /// Apply text-style attributes over a range. Non-default fields of the
    /// patch are applied; default fields are left untouched.
    UpdateTextStyle {
        /// Target range
        range: Span,
        /// Style patch
        style: TextStyle,
    },

    /// Apply paragraph-style attributes over a range.
    UpdateParagraphStyle {
        /// Target range
        range: Span,
        /// Style patch
        style: ParagraphStyleUpdate,
    },

    /// Turn the paragraphs covered by a range into list items
    CreateBullets {
        /// Target range
        range: Span,
        /// Numbered or unordered rendering
        preset: BulletPreset,
    },

    /// Strip list membership from the paragraphs covered by a range
    DeleteBullets {
        /// Target range
        range: Span,
    },

    /// Insert an empty table at an offset
    InsertTable {
        /// Insertion offset
        at: usize,
        /// Row count
        rows: usize,
        /// Column count
        columns: usize,
    },

    /// Delete a range of content
    DeleteRange {
        /// Range to delete
        range: Span,
    },

    /// Apply cell styling over a rectangular region of a table
    UpdateTableCellStyle {
        /// Start offset of the table element in the snapshot
        table_start: usize,
        /// Number of rows covered, starting at the first row
        row_span: usize,
        /// Number of columns covered, starting at the first column
        column_span: usize,
        /// Style patch
        style: TableCellStyleUpdate,
    },
}

impl MutationOperation {
    /// Whether applying this operation changes the document's length,
    /// shifting every downstream offset.
    pub fn changes_length(&self) -> bool {
        matches!(
            self,
            MutationOperation::InsertText { .. }
                | MutationOperation::InsertTable { .. }
                | MutationOperation::DeleteRange { .. }
        )
    }
}

/// Paragraph-style patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyleUpdate {
    /// Named style to assign
    pub named_style: Option<NamedStyle>,

    /// Spacing below the paragraph, in points
    pub space_below_pt: Option<f32>,
}

impl ParagraphStyleUpdate {
    /// Patch that assigns a named style.
    pub fn named(style: NamedStyle) -> Self {
        Self {
            named_style: Some(style),
            ..Default::default()
        }
    }

    /// Patch that sets spacing below the paragraph.
    pub fn space_below(points: f32) -> Self {
        Self {
            space_below_pt: Some(points),
            ..Default::default()
        }
    }
}

/// Whether a created list renders numbered or unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletPreset {
    /// Decimal/alpha/roman numbering
    Numbered,
    /// Disc/circle/square bullets
    Unordered,
}

/// Table-cell style patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCellStyleUpdate {
    /// Border applied to all four cell edges
    pub borders: Option<CellBorder>,

    /// Cell background color (hex)
    pub background_color: Option<String>,

    /// Vertically center cell content
    pub middle_aligned: bool,
}

/// A solid cell border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellBorder {
    /// Border width in points
    pub width_pt: f32,

    /// Border color (hex)
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_length() {
        let insert = MutationOperation::InsertText {
            at: InsertLocation::At(5),
            text: "x".into(),
        };
        assert!(insert.changes_length());

        let table = MutationOperation::InsertTable {
            at: 5,
            rows: 2,
            columns: 2,
        };
        assert!(table.changes_length());

        let style = MutationOperation::UpdateTextStyle {
            range: Span::new(1, 4),
            style: TextStyle::default(),
        };
        assert!(!style.changes_length());
    }

    #[test]
    fn test_paragraph_patch_constructors() {
        let patch = ParagraphStyleUpdate::named(NamedStyle::Heading(2));
        assert_eq!(patch.named_style, Some(NamedStyle::Heading(2)));
        assert!(patch.space_below_pt.is_none());

        let patch = ParagraphStyleUpdate::space_below(6.0);
        assert_eq!(patch.space_below_pt, Some(6.0));
    }

    #[test]
    fn test_operation_serialization_round_trip() {
        let op = MutationOperation::CreateBullets {
            range: Span::new(1, 12),
            preset: BulletPreset::Numbered,
        };
        let json = serde_json::to_string(&op).unwrap();
        let back: MutationOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }
}
