//! Replication of a source document's content into a live destination
//! document through index-addressed mutations.
//!
//! The destination API only supports offset-addressed edits, and every
//! insertion or deletion shifts all downstream offsets. The replicator
//! therefore works in strict stages, each computed against a single known
//! layout: one bulk text insertion, a styling pass, a bullet pass, and a
//! reverse-order table replay that re-fetches the destination whenever the
//! store alone can know the resulting layout.

mod batch;
mod style;

pub use batch::{BatchConfig, BatchScheduler};
pub use style::{StyleApplicator, StyleConfig};

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{
    Bullet, ContentElement, NamedStyle, Span, StructuralDocument, Table, TableCell, TextRun,
    TextStyle,
};
use crate::store::{
    BulletPreset, DocumentStore, InsertLocation, MutationOperation, ParagraphStyleUpdate,
};

/// Font size forced onto every replicated table cell, normalizing styling
/// inherited from the destination's previous content.
const CELL_FONT_SIZE_PT: f32 = 11.0;

/// Counters for one replication run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplicationStats {
    /// Paragraphs written to the destination
    pub paragraphs: usize,
    /// Paragraphs that received a named style
    pub styled_paragraphs: usize,
    /// Text runs that received style attributes
    pub styled_runs: usize,
    /// Paragraphs turned into list items
    pub bullets: usize,
    /// Tables fully replayed
    pub tables: usize,
    /// Tables skipped after a structural mismatch
    pub skipped_tables: usize,
}

/// One source paragraph, linearized for replication.
///
/// A paragraph standing in for a table has no runs, carries no style, and
/// is flagged as a placeholder; it contributes a single newline to the
/// bulk text so the table can later be placed at a known offset.
#[derive(Debug)]
struct FlatParagraph {
    style: NamedStyle,
    bullet: Option<Bullet>,
    runs: Vec<TextRun>,
    placeholder: bool,
}

impl FlatParagraph {
    fn text_len(&self) -> usize {
        self.runs.iter().map(TextRun::char_len).sum()
    }

    /// Length including the paragraph terminator.
    fn total_len(&self) -> usize {
        self.text_len() + 1
    }

    fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Replays paragraphs, runs, and tables into a destination document that is
/// assumed already emptied of prior content.
#[derive(Debug, Clone, Default)]
pub struct ContentReplicator {
    scheduler: BatchScheduler,
}

impl ContentReplicator {
    /// Create a replicator with default batching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a replicator using the given scheduler.
    pub fn with_scheduler(scheduler: BatchScheduler) -> Self {
        Self { scheduler }
    }

    /// Reproduce `source`'s flattened content inside the destination.
    ///
    /// Loss of a styling or bullet batch degrades the result and is logged
    /// as a warning; loss of the bulk text insertion or of a table
    /// placeholder swap would leave the structure unrecoverable and is
    /// fatal. A table whose created shape disagrees with the source aborts
    /// that table only.
    pub fn replicate<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        source: &StructuralDocument,
        destination_id: &str,
    ) -> Result<ReplicationStats> {
        let (paragraphs, tables) = flatten_source(source);
        let mut stats = ReplicationStats {
            paragraphs: paragraphs.iter().filter(|p| !p.placeholder).count(),
            ..Default::default()
        };

        self.insert_body_text(store, destination_id, &paragraphs)?;

        let style_ops = paragraph_style_ops(&paragraphs, &mut stats);
        if let Err(e) = self.scheduler.submit(store, destination_id, &style_ops) {
            log::warn!("could not apply some paragraph/run styling: {e}");
        }

        // Bullets go in a separate pass so their index math never interacts
        // with the style pass above.
        let bullet_ops = bullet_ops(&paragraphs, source, &mut stats);
        if let Err(e) = self.scheduler.submit(store, destination_id, &bullet_ops) {
            log::warn!("could not apply some bullet formatting: {e}");
        }

        self.replay_tables(store, destination_id, &paragraphs, &tables, &mut stats)?;

        log::info!(
            "replicated {} paragraphs, {} styled runs, {} bullets, {} tables ({} skipped)",
            stats.paragraphs,
            stats.styled_runs,
            stats.bullets,
            stats.tables,
            stats.skipped_tables
        );
        Ok(stats)
    }

    /// Stage 1: insert every paragraph's text in a single operation at the
    /// end-of-content marker, so the offsets computed by the later stages
    /// are valid against one known layout.
    fn insert_body_text<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        destination_id: &str,
        paragraphs: &[FlatParagraph],
    ) -> Result<()> {
        let mut text = String::new();
        for paragraph in paragraphs {
            text.push_str(&paragraph.text());
            text.push('\n');
        }
        if text.is_empty() {
            return Ok(());
        }

        self.scheduler.submit(
            store,
            destination_id,
            &[MutationOperation::InsertText {
                at: InsertLocation::EndOfBody,
                text,
            }],
        )
    }

    /// Stage 4: replay tables last-first, so the offset shift from
    /// expanding an earlier table can never invalidate an already-computed
    /// later-table offset.
    fn replay_tables<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        destination_id: &str,
        paragraphs: &[FlatParagraph],
        tables: &[(usize, &Table)],
        stats: &mut ReplicationStats,
    ) -> Result<()> {
        for (position, table) in tables.iter().rev() {
            if table.row_count() == 0 || table.column_count() == 0 {
                log::debug!("empty source table left as a blank paragraph");
                continue;
            }

            let placeholder_start = 1 + paragraphs[..*position]
                .iter()
                .map(FlatParagraph::total_len)
                .sum::<usize>();

            let ops = [
                MutationOperation::DeleteRange {
                    range: Span::new(placeholder_start, placeholder_start + 1),
                },
                MutationOperation::InsertTable {
                    at: placeholder_start,
                    rows: table.row_count(),
                    columns: table.column_count(),
                },
            ];
            self.scheduler.submit(store, destination_id, &ops)?;

            match self.fill_table(store, destination_id, placeholder_start, table) {
                Ok(()) => stats.tables += 1,
                Err(e) if e.is_localized() => {
                    log::warn!("skipping table at offset {placeholder_start}: {e}");
                    stats.skipped_tables += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn fill_table<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        destination_id: &str,
        table_offset: usize,
        source: &Table,
    ) -> Result<()> {
        let cell_runs = collect_cell_runs(source);

        // The store alone determines the created table's per-cell offsets;
        // they cannot be predicted locally.
        let snapshot = store.get(destination_id)?;
        let dest = require_table(&snapshot, table_offset)?;
        if dest.row_count() != source.row_count()
            || dest.column_count() != source.column_count()
        {
            return Err(Error::StructuralMismatch(format!(
                "destination table is {}x{}, expected {}x{}",
                dest.row_count(),
                dest.column_count(),
                source.row_count(),
                source.column_count()
            )));
        }

        // Fill cells deepest-offset first so each insertion leaves the
        // still-pending ones valid.
        let mut inserts: Vec<(usize, String)> = Vec::new();
        for (r, row) in dest.rows.iter().enumerate() {
            for (c, cell) in row.cells.iter().enumerate() {
                let Some(runs) = cell_runs.get(&(r, c)) else {
                    continue;
                };
                let text: String = runs.iter().map(|(t, _)| t.as_str()).collect();
                if text.is_empty() {
                    continue;
                }
                if let Some(at) = cell_insert_point(cell) {
                    inserts.push((at, text));
                }
            }
        }

        if !inserts.is_empty() {
            inserts.sort_by(|a, b| b.0.cmp(&a.0));
            let ops: Vec<_> = inserts
                .into_iter()
                .map(|(at, text)| MutationOperation::InsertText {
                    at: InsertLocation::At(at),
                    text,
                })
                .collect();
            self.scheduler.submit(store, destination_id, &ops)?;

            // Per-run styles need the post-insertion offsets.
            let snapshot = store.get(destination_id)?;
            let dest = require_table(&snapshot, table_offset)?;
            let mut style_ops = Vec::new();
            for (r, row) in dest.rows.iter().enumerate() {
                for (c, cell) in row.cells.iter().enumerate() {
                    let Some(runs) = cell_runs.get(&(r, c)) else {
                        continue;
                    };
                    let Some(mut cursor) = cell_insert_point(cell) else {
                        continue;
                    };
                    for (text, style) in runs {
                        let len = text.chars().count();
                        if len > 0 {
                            if let Some(patch) = inline_style_patch(style) {
                                style_ops.push(MutationOperation::UpdateTextStyle {
                                    range: Span::new(cursor, cursor + len),
                                    style: patch,
                                });
                            }
                        }
                        cursor += len;
                    }
                }
            }
            if let Err(e) = self.scheduler.submit(store, destination_id, &style_ops) {
                log::warn!("could not apply some table cell styles: {e}");
            }
        }

        // Normalize the font size across every cell.
        let snapshot = store.get(destination_id)?;
        let dest = require_table(&snapshot, table_offset)?;
        let mut font_ops = Vec::new();
        for row in &dest.rows {
            for cell in &row.cells {
                for paragraph in cell.paragraphs() {
                    let Some(span) = paragraph.span else { continue };
                    if span.end > span.start + 1 {
                        font_ops.push(MutationOperation::UpdateTextStyle {
                            range: Span::new(span.start, span.end - 1),
                            style: TextStyle {
                                font_size_pt: Some(CELL_FONT_SIZE_PT),
                                ..Default::default()
                            },
                        });
                    }
                }
            }
        }
        if let Err(e) = self.scheduler.submit(store, destination_id, &font_ops) {
            log::warn!("could not normalize table cell font size: {e}");
        }

        Ok(())
    }
}

/// Delete all content from a document, leaving it empty.
///
/// The surviving empty paragraph can still carry list membership from the
/// previous content; it is stripped so re-replicated text does not inherit
/// bullet formatting.
pub fn clear_document<S: DocumentStore + ?Sized>(
    store: &mut S,
    document_id: &str,
) -> Result<()> {
    let snapshot = store.get(document_id)?;

    if let Some(span) = snapshot.body.last().and_then(ContentElement::span) {
        // The final newline of the body cannot be deleted, nor can the
        // reserved offset 0.
        let end = span.end.saturating_sub(1);
        if end > 1 {
            store.batch_update(
                document_id,
                &[MutationOperation::DeleteRange {
                    range: Span::new(1, end),
                }],
            )?;
        }
    }

    store.batch_update(
        document_id,
        &[MutationOperation::DeleteBullets {
            range: Span::new(1, 2),
        }],
    )?;
    Ok(())
}

/// Replicate the content of `source_id` into `destination_id`, then delete
/// the source document.
///
/// The destination is cleared first. The source is deleted only after
/// replication fully succeeds; on a fatal error it is left untouched so no
/// content is lost.
pub fn replicate_into<S: DocumentStore + ?Sized>(
    store: &mut S,
    source_id: &str,
    destination_id: &str,
) -> Result<ReplicationStats> {
    let source = store.get(source_id)?;
    clear_document(store, destination_id)?;
    let stats = ContentReplicator::new().replicate(store, &source, destination_id)?;
    store.delete(source_id)?;
    log::info!("replicated {source_id} into {destination_id} and removed the source");
    Ok(stats)
}

/// Linearize the source's flattened tabs into the paragraph list that
/// drives all offset arithmetic, plus each table's position within it.
fn flatten_source(source: &StructuralDocument) -> (Vec<FlatParagraph>, Vec<(usize, &Table)>) {
    let mut paragraphs = Vec::new();
    let mut tables = Vec::new();

    for tab in source.flatten_tabs() {
        for element in tab.elements {
            match element {
                ContentElement::Paragraph(p) => {
                    let mut runs = Vec::new();
                    // Nesting is communicated through leading tabs, which
                    // the bullet pass later consumes.
                    if let Some(bullet) = &p.bullet {
                        if bullet.nesting_level > 0 {
                            runs.push(TextRun::new(
                                "\t".repeat(bullet.nesting_level as usize),
                            ));
                        }
                    }
                    runs.extend(p.runs.iter().filter(|r| !r.text.is_empty()).cloned());
                    paragraphs.push(FlatParagraph {
                        style: p.style,
                        bullet: p.bullet.clone(),
                        runs,
                        placeholder: false,
                    });
                }
                ContentElement::Table(table) => {
                    tables.push((paragraphs.len(), table));
                    paragraphs.push(FlatParagraph {
                        style: NamedStyle::NormalText,
                        bullet: None,
                        runs: Vec::new(),
                        placeholder: true,
                    });
                }
                ContentElement::SectionBreak(_) => {}
            }
        }
    }

    (paragraphs, tables)
}

/// Stage 2: paragraph and run styling over the bulk-inserted text, walking
/// a cursor from offset 1 (offset 0 is reserved). Styled run ranges never
/// include the paragraph terminator.
fn paragraph_style_ops(
    paragraphs: &[FlatParagraph],
    stats: &mut ReplicationStats,
) -> Vec<MutationOperation> {
    let mut ops = Vec::new();
    let mut cursor = 1usize;

    for paragraph in paragraphs {
        let start = cursor;

        if !paragraph.placeholder && paragraph.style != NamedStyle::NormalText {
            ops.push(MutationOperation::UpdateParagraphStyle {
                range: Span::new(start, start + paragraph.total_len()),
                style: ParagraphStyleUpdate::named(paragraph.style),
            });
            stats.styled_paragraphs += 1;
        }

        for run in &paragraph.runs {
            let len = run.char_len();
            if len > 0 && run.style.has_styling() {
                ops.push(MutationOperation::UpdateTextStyle {
                    range: Span::new(cursor, cursor + len),
                    style: run.style.clone(),
                });
                stats.styled_runs += 1;
            }
            cursor += len;
        }
        cursor += 1;
    }

    ops
}

/// Stage 3: list formatting, in its own pass so the index math stays
/// independent of the style pass.
fn bullet_ops(
    paragraphs: &[FlatParagraph],
    source: &StructuralDocument,
    stats: &mut ReplicationStats,
) -> Vec<MutationOperation> {
    let mut ops = Vec::new();
    let mut cursor = 1usize;

    for paragraph in paragraphs {
        let len = paragraph.total_len();
        if let Some(bullet) = &paragraph.bullet {
            let preset = match source.list(&bullet.list_id) {
                Some(def) if def.is_ordered() => BulletPreset::Numbered,
                _ => BulletPreset::Unordered,
            };
            ops.push(MutationOperation::CreateBullets {
                range: Span::new(cursor, cursor + len),
                preset,
            });
            stats.bullets += 1;
        }
        cursor += len;
    }

    ops
}

/// Source cell contents keyed by (row, column): each cell's runs in order,
/// with interior paragraph breaks preserved as literal newline runs.
fn collect_cell_runs(table: &Table) -> HashMap<(usize, usize), Vec<(String, TextStyle)>> {
    let mut cells = HashMap::new();
    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.cells.iter().enumerate() {
            let mut runs: Vec<(String, TextStyle)> = Vec::new();
            let paragraphs: Vec<_> = cell.paragraphs().collect();
            for (i, paragraph) in paragraphs.iter().enumerate() {
                for run in &paragraph.runs {
                    if !run.text.is_empty() {
                        runs.push((run.text.clone(), run.style.clone()));
                    }
                }
                if i + 1 < paragraphs.len() {
                    runs.push(("\n".to_string(), TextStyle::default()));
                }
            }
            if !runs.is_empty() {
                cells.insert((r, c), runs);
            }
        }
    }
    cells
}

/// Insertion point of a cell: the start of its first paragraph, as
/// reported by the snapshot.
fn cell_insert_point(cell: &TableCell) -> Option<usize> {
    cell.paragraphs().next().and_then(|p| p.span).map(|s| s.start)
}

/// Only inline emphasis and links survive into replicated table cells;
/// fonts and colors are normalized by the later font-size pass.
fn inline_style_patch(style: &TextStyle) -> Option<TextStyle> {
    if !style.bold && !style.italic && !style.underline && style.link.is_none() {
        return None;
    }
    Some(TextStyle {
        bold: style.bold,
        italic: style.italic,
        underline: style.underline,
        link: style.link.clone(),
        ..Default::default()
    })
}

fn find_table_near(snapshot: &StructuralDocument, offset: usize) -> Option<&Table> {
    snapshot
        .body
        .iter()
        .filter_map(ContentElement::as_table)
        .find(|t| t.span.is_some_and(|s| s.start + 1 >= offset))
}

fn require_table(snapshot: &StructuralDocument, offset: usize) -> Result<&Table> {
    find_table_near(snapshot, offset).ok_or_else(|| {
        Error::StructuralMismatch(format!("no table found at offset {offset} in snapshot"))
    })
}
