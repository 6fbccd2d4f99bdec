//! Table assembly: cells are buffered while the table is walked, then laid
//! out and drawn in one go when the table closes.

use crate::markdown::style::{Painter, StyleSlot};
use crate::markdown::tree::CellAlign;
use crate::markdown::wrap::{ELLIPSIS, MAX_LINE_WIDTH, display_width, truncate_with_ellipsis};

/// Narrowest a column is ever drawn.
pub const MIN_COLUMN_WIDTH: usize = 3;

/// Per-table accumulation state. Exists only between table enter and exit.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// Finished rows; the first one is the header.
    pub rows: Vec<Vec<String>>,
    pub current_row: Option<Vec<String>>,
    /// Column alignments, taken from the header cells.
    pub alignments: Vec<CellAlign>,
    pub is_header: bool,
    /// Text of the cell being walked, if any.
    pub cell_buffer: Option<String>,
}

impl TableState {
    pub fn in_cell(&self) -> bool {
        self.cell_buffer.is_some()
    }

    pub fn start_row(&mut self) {
        self.current_row = Some(Vec::new());
    }

    pub fn finish_row(&mut self) {
        if let Some(row) = self.current_row.take()
            && !row.is_empty()
        {
            self.rows.push(row);
        }
    }

    pub fn start_cell(&mut self, align: CellAlign) {
        let column = self.current_row.as_ref().map_or(0, Vec::len);
        if self.is_header && self.alignments.len() <= column {
            self.alignments.push(align);
        }
        self.cell_buffer = Some(String::new());
    }

    pub fn finish_cell(&mut self) {
        let content = self.cell_buffer.take().unwrap_or_default();
        self.current_row
            .get_or_insert_with(Vec::new)
            .push(content.trim().to_owned());
    }

    /// Append literal text to the open cell. Returns `false` if no cell is open.
    pub fn push_cell_text(&mut self, text: &str) -> bool {
        match self.cell_buffer.as_mut() {
            Some(buf) => {
                buf.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Lay out and draw the buffered table.
    pub fn render(&self, painter: &Painter) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        let widths = column_widths(&self.rows);
        let mut out = String::new();
        out.push('\n');
        out.push_str(&border_line(painter, &widths, ['┌', '┬', '┐']));

        for (row_idx, row) in self.rows.iter().enumerate() {
            let slot = if row_idx == 0 {
                StyleSlot::TableHeader
            } else {
                StyleSlot::Plain
            };
            out.push_str(&painter.paint(StyleSlot::Border, "│"));
            for (col, &width) in widths.iter().enumerate() {
                let cell = row.get(col).map_or("", String::as_str);
                let align = self.alignments.get(col).copied().unwrap_or_default();
                out.push(' ');
                out.push_str(&painter.paint(slot, &pad_cell(cell, width, align)));
                out.push(' ');
                out.push_str(&painter.paint(StyleSlot::Border, "│"));
            }
            out.push('\n');

            if row_idx == 0 {
                out.push_str(&border_line(painter, &widths, ['├', '┼', '┤']));
            }
        }

        out.push_str(&border_line(painter, &widths, ['└', '┴', '┘']));
        out
    }
}

/// Visible width of a table drawn with `widths`: one leading border, then
/// per column the content, two padding spaces and a border.
pub fn table_width(widths: &[usize]) -> usize {
    1 + widths.iter().map(|w| w + 3).sum::<usize>()
}

/// Column widths for `rows`, sized to content and scaled to fit the line.
///
/// The header row fixes the column count; extra cells in other rows are
/// ignored.
pub fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let Some(header) = rows.first() else {
        return Vec::new();
    };

    let mut widths = vec![0; header.len()];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }
    for width in &mut widths {
        *width = (*width).max(MIN_COLUMN_WIDTH);
    }

    fit_to_line(&mut widths);
    widths
}

/// Shrink columns proportionally until the table fits in [`MAX_LINE_WIDTH`].
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn fit_to_line(widths: &mut [usize]) {
    let total = table_width(widths);
    if total <= MAX_LINE_WIDTH {
        return;
    }

    let overhead = table_width(&[]) + 3 * widths.len();
    let available = MAX_LINE_WIDTH.saturating_sub(overhead);
    let scale = available as f64 / (total - overhead) as f64;
    for width in widths.iter_mut() {
        *width = ((*width as f64 * scale) as usize).max(MIN_COLUMN_WIDTH);
    }

    // The minimum width can push the total back over; take the difference
    // from the widest columns.
    while table_width(widths) > MAX_LINE_WIDTH {
        let Some(widest) = widths
            .iter_mut()
            .filter(|w| **w > MIN_COLUMN_WIDTH)
            .max_by_key(|w| **w)
        else {
            break;
        };
        *widest -= 1;
    }

    tracing::trace!(total, scaled = table_width(widths), "table scaled to fit");
}

/// Truncate and pad `cell` to exactly `width` columns.
pub fn pad_cell(cell: &str, width: usize, align: CellAlign) -> String {
    let content = if display_width(cell) > width {
        truncate_with_ellipsis(cell, width.saturating_sub(ELLIPSIS.len()))
    } else {
        cell.to_owned()
    };
    let pad = width.saturating_sub(display_width(&content));

    match align {
        CellAlign::Left => format!("{content}{}", " ".repeat(pad)),
        CellAlign::Right => format!("{}{content}", " ".repeat(pad)),
        CellAlign::Center => {
            let left = pad / 2;
            format!("{}{content}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}

fn border_line(painter: &Painter, widths: &[usize], [left, junction, right]: [char; 3]) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(junction);
        }
        line.push_str(&"─".repeat(width + 2));
    }
    line.push(right);

    let mut out = painter.paint(StyleSlot::Border, &line);
    out.push('\n');
    out
}
