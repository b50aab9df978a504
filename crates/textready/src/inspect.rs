//! Advisory workbook inspection
//!
//! A read-only report answering "is this file ready to process, and with
//! what parameters?" before anything is committed to. Columns are profiled
//! so a caller can show the user what was found; when the layout is valid
//! the report carries ready-to-use suggested parameters.

use std::path::Path;

use crate::config::LimitBounds;
use crate::process::{sniff_signature, ProcessError};
use crate::validate::{is_non_blank, ValidationError};
use textready_core::{CellAddress, CellValue, Worksheet};
use textready_xlsx::XlsxReader;

/// Length a sample value is truncated to
const SAMPLE_LEN: usize = 50;

/// Profile of one column that holds data
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    /// Column letters ("A", "B", ...)
    pub letter: String,
    /// First non-blank value, truncated to a preview length
    pub sample: String,
    /// Average trimmed length of the column's text cells
    pub avg_length: f64,
    /// Longest trimmed text cell
    pub max_length: usize,
}

/// Parameters a caller can feed straight into processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The single column that holds data
    pub column: String,
    /// Recommended character limit
    pub max_chars: usize,
}

/// What an advisory inspection found
#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    /// Name of the (single) sheet
    pub sheet_name: String,
    /// Rows in the populated rectangle
    pub total_rows: u32,
    /// Columns in the populated rectangle
    pub total_columns: u16,
    /// Every column that holds data
    pub columns: Vec<ColumnStats>,
    /// Present when the layout is valid for processing
    pub suggestion: Option<Suggestion>,
}

/// Inspect a workbook document without modifying anything.
///
/// Multi-sheet and empty workbooks are rejected with the same errors the
/// processing gate would raise; a sheet with data in several columns still
/// produces a report (with no suggestion) so the caller can name them.
pub fn inspect(path: &Path, bounds: &LimitBounds) -> Result<SheetReport, ProcessError> {
    sniff_signature(path)?;
    let workbook = XlsxReader::read_file(path)?;

    if workbook.sheet_count() != 1 {
        return Err(ValidationError::MultiSheet {
            found: workbook.sheet_count(),
            names: workbook.sheet_names(),
        }
        .into());
    }
    let sheet = workbook.worksheet(0).ok_or(ValidationError::EmptySheet)?;

    let Some(range) = sheet.used_range() else {
        return Err(ValidationError::EmptySheet.into());
    };

    let mut columns = Vec::new();
    for col in range.start.col..=range.end.col {
        if let Some(stats) = profile_column(sheet, col, range.start.row, range.end.row) {
            columns.push(stats);
        }
    }

    if columns.is_empty() {
        return Err(ValidationError::EmptySheet.into());
    }

    let suggestion = match columns.as_slice() {
        [only] => Some(Suggestion {
            column: only.letter.clone(),
            max_chars: bounds.suggested,
        }),
        _ => None,
    };

    Ok(SheetReport {
        sheet_name: sheet.name().to_string(),
        total_rows: range.row_count(),
        total_columns: range.col_count(),
        columns,
        suggestion,
    })
}

/// Profile a single column; `None` when it holds no data.
fn profile_column(sheet: &Worksheet, col: u16, min_row: u32, max_row: u32) -> Option<ColumnStats> {
    let mut sample = None;
    let mut lengths = Vec::new();

    for row in min_row..=max_row {
        let Some(cell) = sheet.cell_at(row, col) else {
            continue;
        };
        if !is_non_blank(Some(&cell.value)) {
            continue;
        }
        if sample.is_none() {
            sample = Some(truncate_chars(&cell.value.to_string(), SAMPLE_LEN));
        }
        if let CellValue::Text(s) = &cell.value {
            lengths.push(s.trim().chars().count());
        }
    }

    let sample = sample?;
    let avg_length = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };
    let max_length = lengths.into_iter().max().unwrap_or(0);

    Some(ColumnStats {
        letter: CellAddress::column_to_letters(col),
        sample,
        avg_length,
        max_length,
    })
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
