//! Pipe-table rendering.

use crate::model::Table;

/// Render a table to a GitHub-flavored pipe table.
///
/// The column count is the maximum cell count across all rows; short rows
/// are padded with empty cells, no row is truncated. The first row becomes
/// the header and is always followed by a `---` separator row, even when
/// every cell is blank. A table with zero rows renders to nothing.
pub fn render_table(table: &Table) -> String {
    if table.is_empty() {
        return String::new();
    }

    let mut grid: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|c| escape_cell(&c.plain_text())).collect())
        .collect();

    let num_cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return String::new();
    }
    for row in &mut grid {
        row.resize(num_cols, String::new());
    }

    let mut lines = Vec::with_capacity(grid.len() + 1);
    lines.push(format_row(&grid[0]));
    lines.push(format_row(&vec!["---".to_string(); num_cols]));
    for row in &grid[1..] {
        lines.push(format_row(row));
    }

    lines.join("\n") + "\n\n"
}

/// Escape characters that would break the pipe-table layout.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn format_row(cells: &[String]) -> String {
    let mut row = String::new();
    for cell in cells {
        row.push_str("| ");
        if !cell.is_empty() {
            row.push_str(cell);
            row.push(' ');
        }
    }
    row.push('|');
    row
}
