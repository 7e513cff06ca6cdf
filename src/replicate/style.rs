//! Supplementary formatting pass over a replicated document.

use crate::error::Result;
use crate::model::{ContentElement, Span, StructuralDocument, TextStyle, WeightedFont};
use crate::store::{
    CellBorder, DocumentStore, MutationOperation, ParagraphStyleUpdate, TableCellStyleUpdate,
};

use super::batch::BatchScheduler;

/// Visual constants applied on top of replicated content.
#[derive(Debug, Clone)]
pub struct StyleConfig {
    /// Font override for heading text
    pub heading_font: WeightedFont,

    /// Spacing added below every non-empty paragraph, in points
    pub paragraph_space_below_pt: f32,

    /// Width of table cell borders, in points
    pub table_border_width_pt: f32,

    /// Color of table cell borders (hex)
    pub table_border_color: String,

    /// Background color of table header rows (hex)
    pub header_background_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            heading_font: WeightedFont {
                family: "Proxima Nova".to_string(),
                weight: 700,
            },
            paragraph_space_below_pt: 6.0,
            table_border_width_pt: 0.5,
            table_border_color: "#b7b7b7".to_string(),
            header_background_color: "#f3f3f3".to_string(),
        }
    }
}

/// Computes supplementary formatting operations against a document's
/// current structural snapshot: heading font overrides, uniform paragraph
/// spacing, and table borders with header-row emphasis.
///
/// All offsets are re-derived from the single snapshot passed in; this pass
/// runs once, after replication has finished and indices are stable, so no
/// cross-step re-fetch is needed.
#[derive(Debug, Clone, Default)]
pub struct StyleApplicator {
    config: StyleConfig,
}

impl StyleApplicator {
    /// Create an applicator with default styling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an applicator with the given styling.
    pub fn with_config(config: StyleConfig) -> Self {
        Self { config }
    }

    /// Compute the formatting operations for a snapshot.
    pub fn operations(&self, snapshot: &StructuralDocument) -> Vec<MutationOperation> {
        let mut ops = Vec::new();

        for element in &snapshot.body {
            match element {
                ContentElement::Paragraph(p) => {
                    let Some(span) = p.span else { continue };

                    // Headings get the font override; zero-length text
                    // ranges (the terminator alone) are skipped.
                    if p.is_heading() && span.end > span.start + 1 {
                        ops.push(MutationOperation::UpdateTextStyle {
                            range: Span::new(span.start, span.end - 1),
                            style: TextStyle {
                                font: Some(self.config.heading_font.clone()),
                                ..Default::default()
                            },
                        });
                    }

                    if span.end > span.start {
                        ops.push(MutationOperation::UpdateParagraphStyle {
                            range: span,
                            style: ParagraphStyleUpdate::space_below(
                                self.config.paragraph_space_below_pt,
                            ),
                        });
                    }
                }
                ContentElement::Table(table) => {
                    let Some(span) = table.span else { continue };
                    let rows = table.row_count();
                    let columns = table.column_count();
                    if rows == 0 || columns == 0 {
                        continue;
                    }

                    // Borders and vertical centering across every cell.
                    ops.push(MutationOperation::UpdateTableCellStyle {
                        table_start: span.start,
                        row_span: rows,
                        column_span: columns,
                        style: TableCellStyleUpdate {
                            borders: Some(CellBorder {
                                width_pt: self.config.table_border_width_pt,
                                color: self.config.table_border_color.clone(),
                            }),
                            background_color: None,
                            middle_aligned: true,
                        },
                    });

                    // Header-row shading.
                    ops.push(MutationOperation::UpdateTableCellStyle {
                        table_start: span.start,
                        row_span: 1,
                        column_span: columns,
                        style: TableCellStyleUpdate {
                            borders: None,
                            background_color: Some(
                                self.config.header_background_color.clone(),
                            ),
                            middle_aligned: false,
                        },
                    });

                    // Header-row text in bold.
                    if let Some(first_row) = table.rows.first() {
                        for cell in &first_row.cells {
                            for paragraph in cell.paragraphs() {
                                let Some(cell_span) = paragraph.span else { continue };
                                if cell_span.end > cell_span.start + 1 {
                                    ops.push(MutationOperation::UpdateTextStyle {
                                        range: Span::new(cell_span.start, cell_span.end - 1),
                                        style: TextStyle {
                                            bold: true,
                                            ..Default::default()
                                        },
                                    });
                                }
                            }
                        }
                    }
                }
                ContentElement::SectionBreak(_) => {}
            }
        }

        ops
    }

    /// Fetch the document's current snapshot, compute the formatting
    /// operations, and hand them to the scheduler.
    pub fn apply<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        scheduler: &BatchScheduler,
        document_id: &str,
    ) -> Result<()> {
        let snapshot = store.get(document_id)?;
        let ops = self.operations(&snapshot);

        let headings = ops
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    MutationOperation::UpdateTextStyle { style, .. } if style.font.is_some()
                )
            })
            .count();
        let tables = snapshot
            .body
            .iter()
            .filter(|e| e.as_table().is_some())
            .count();

        scheduler.submit(store, document_id, &ops)?;
        log::info!(
            "applied document styles: {} heading font overrides, {} tables, {} operations total",
            headings,
            tables,
            ops.len()
        );
        Ok(())
    }
}
