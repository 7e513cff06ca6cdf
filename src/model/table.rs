//! Table types.

use serde::{Deserialize, Serialize};

use super::{ContentElement, Paragraph, Span};

/// A table structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Character range in the owning document, if snapshotted
    pub span: Option<Span>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            span: None,
        }
    }

    /// Create a table from rows of cell texts.
    pub fn from_strings<S: Into<String>>(
        rows: impl IntoIterator<Item = impl IntoIterator<Item = S>>,
    ) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.add_row(TableRow::from_strings(row));
        }
        table
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns: the maximum cell count across all rows.
    /// Short rows are padded at render/replication time, never truncated.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }
}

/// A table cell, owning its own content element sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content (typically one paragraph)
    pub content: Vec<ContentElement>,

    /// Character range in the owning document, if snapshotted
    pub span: Option<Span>,
}

impl TableCell {
    /// Create an empty cell.
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            span: None,
        }
    }

    /// Create a cell with a single plain text paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentElement::Paragraph(Paragraph::with_text(text))],
            span: None,
        }
    }

    /// Create a cell with content elements.
    pub fn with_content(content: Vec<ContentElement>) -> Self {
        Self {
            content,
            span: None,
        }
    }

    /// Paragraphs in the cell, in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|e| e.as_paragraph())
    }

    /// Get plain text content: paragraph texts joined with spaces, trimmed.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Check if the cell carries no visible text.
    pub fn is_empty(&self) -> bool {
        self.plain_text().is_empty()
    }
}
