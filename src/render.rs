//! Plain-text rendering of the merged table.

use crate::merger::TableMerger;

const EMPTY: &str = "(empty table)";
const COLUMN_GAP: &str = "  ";

/// Render the table as an aligned text grid: a header line, a rule, then one line per row.
///
/// Columns are padded to their widest value (in `char`s). Cells a row has no value for are
/// rendered blank. Trailing padding is trimmed from each line.
pub fn render_table(merger: &TableMerger) -> String {
    let headers = merger.headers();
    if headers.is_empty() {
        return EMPTY.to_string();
    }

    let width = headers.len();
    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in merger.rows() {
        for (i, w) in col_widths.iter_mut().enumerate() {
            *w = (*w).max(row.cell(i).chars().count());
        }
    }

    let mut lines = Vec::with_capacity(merger.row_count() + 2);
    lines.push(format_line(headers.iter(), &col_widths));
    lines.push(
        col_widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP),
    );
    for row in merger.rows() {
        lines.push(format_line((0..width).map(|i| row.cell(i)), &col_widths));
    }
    lines.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, col_widths: &[usize]) -> String {
    let line = cells
        .zip(col_widths.iter().copied())
        .map(|(cell, w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}
