//! Greedy word-wrap cell splitting
//!
//! Walks the validated column top to bottom. Each over-long text cell is
//! broken at the last whitespace before the character limit, the remainder
//! moves one column right, and the check repeats on the freshly written
//! cell, so overflow cascades as far as the text demands. A cell whose
//! first `max_chars` characters contain no whitespace cannot be broken and
//! is left in place whole.
//!
//! Callers must run [`crate::validate`] first: the splitter writes into the
//! columns right of the target without checking what it overwrites, which
//! is only sound once validation has proven those columns blank.

use textready_core::{CellData, CellValue, ColumnRef, DisplayFormat, Result, Worksheet};

/// What one split pass did, for logging and assertions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Rows in which at least one break was made
    pub rows_split: usize,
    /// Overflow cells written
    pub cells_written: usize,
    /// Rows left over-length because no break point existed
    pub unsplittable: usize,
}

/// Split every over-long text cell of `target`, cascading overflow into the
/// columns to its right.
///
/// The whole target column is forced to the text display format first, so
/// even cells that need no splitting come out tagged as literal text; every
/// overflow cell written is tagged the same way.
pub fn split_column(
    sheet: &mut Worksheet,
    target: ColumnRef,
    max_chars: usize,
) -> Result<SplitStats> {
    let mut stats = SplitStats::default();

    let Some(range) = sheet.used_range() else {
        return Ok(stats);
    };
    let (min_row, max_row) = (range.start.row, range.end.row);

    // Tag the column as text up front, blanks included
    for row in min_row..=max_row {
        sheet.set_display_format_at(row, target.index(), DisplayFormat::Text)?;
    }

    for row in min_row..=max_row {
        let mut col = target.index();
        let mut row_was_split = false;

        loop {
            let trimmed = match sheet.cell_at(row, col).map(|c| &c.value) {
                Some(CellValue::Text(s)) => s.trim().to_owned(),
                _ => break,
            };
            if trimmed.chars().count() <= max_chars {
                break;
            }

            let Some((head, rest)) = break_at_last_space(&trimmed, max_chars) else {
                // A single unbreakable token; leave the row as it stands
                stats.unsplittable += 1;
                break;
            };

            sheet.set_cell_at(
                row,
                col,
                CellData::with_format(CellValue::Text(head), DisplayFormat::Text),
            )?;
            // Anything already at (row, col + 1) is overwritten; validation
            // guarantees there is nothing
            sheet.set_cell_at(
                row,
                col + 1,
                CellData::with_format(CellValue::Text(rest), DisplayFormat::Text),
            )?;

            stats.cells_written += 1;
            row_was_split = true;
            col += 1;
        }

        if row_was_split {
            stats.rows_split += 1;
        }
    }

    log::debug!(
        "split column {}: {} row(s) split, {} overflow cell(s), {} unsplittable",
        target,
        stats.rows_split,
        stats.cells_written,
        stats.unsplittable
    );

    Ok(stats)
}

/// Break `text` at the last whitespace among its first `max_chars`
/// characters, trimming both halves. `text` must already be trimmed.
///
/// Returns `None` when no whitespace exists in that window.
fn break_at_last_space(text: &str, max_chars: usize) -> Option<(String, String)> {
    let mut break_point = None;
    for (count, (idx, ch)) in text.char_indices().enumerate() {
        if count >= max_chars {
            break;
        }
        if ch.is_whitespace() {
            break_point = Some((idx, ch.len_utf8()));
        }
    }

    let (idx, width) = break_point?;
    let head = text[..idx].trim_end().to_string();
    let rest = text[idx + width..].trim_start().to_string();
    Some((head, rest))
}
