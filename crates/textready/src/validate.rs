//! Workbook and column validation
//!
//! Every check here is a read-only scan, run both as the mandatory gate
//! before splitting and standalone as an advisory pre-check. Checks run in a
//! fixed order and the first failure wins.

use thiserror::Error;

use textready_core::{CellAddress, CellValue, ColumnRef, Workbook, Worksheet};

/// A workbook layout the splitter cannot or must not process
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The workbook holds more than one sheet (or none)
    #[error("The workbook must contain exactly ONE sheet. Found {found} sheet(s): {}", .names.join(", "))]
    MultiSheet { found: usize, names: Vec<String> },

    /// The column reference fails the letters-only, max-3 syntax check
    #[error("Invalid column name: '{0}'")]
    InvalidColumnName(String),

    /// No populated cell anywhere in the sheet
    #[error("The sheet is empty (no data found).")]
    EmptySheet,

    /// The target column lies outside the populated rectangle
    #[error("Column '{column}' does not exist in the sheet. Available columns: {min} to {max}")]
    ColumnNotFound {
        column: String,
        min: String,
        max: String,
    },

    /// The target column exists but holds no non-blank cell
    #[error("No data found in column '{0}'. The column exists but is empty.")]
    EmptyColumn(String),

    /// Other columns hold data; all offenders are listed
    #[error("Data exists in multiple columns. Found data in columns: {}. Data must exist ONLY in column '{target}'.", .columns.join(", "))]
    MultipleColumnsWithData {
        target: String,
        columns: Vec<String>,
    },
}

/// Validate a workbook against a target column, returning the parsed
/// reference on success.
///
/// Check order: sheet count, column syntax, sheet emptiness, column
/// existence, column data, other-column data. The sheet-count check runs
/// first so a multi-sheet workbook is reported as such even when the column
/// reference is also bad.
pub fn validate(workbook: &Workbook, column: &str) -> Result<ColumnRef, ValidationError> {
    if workbook.sheet_count() != 1 {
        return Err(ValidationError::MultiSheet {
            found: workbook.sheet_count(),
            names: workbook.sheet_names(),
        });
    }

    let target = ColumnRef::parse(column)
        .map_err(|_| ValidationError::InvalidColumnName(column.to_string()))?;

    // Exactly one sheet, so index 0 is present
    let sheet = workbook.worksheet(0).ok_or(ValidationError::EmptySheet)?;
    validate_column_data(sheet, target)?;

    Ok(target)
}

/// Validate that data exists in the target column and only there.
pub fn validate_column_data(sheet: &Worksheet, target: ColumnRef) -> Result<(), ValidationError> {
    let Some(range) = sheet.used_range() else {
        return Err(ValidationError::EmptySheet);
    };

    let (min_col, max_col) = (range.start.col, range.end.col);
    if target.index() < min_col || target.index() > max_col {
        return Err(ValidationError::ColumnNotFound {
            column: target.letters(),
            min: CellAddress::column_to_letters(min_col),
            max: CellAddress::column_to_letters(max_col),
        });
    }

    let column_has_data = (range.start.row..=range.end.row)
        .any(|row| is_non_blank(sheet.cell_at(row, target.index()).map(|c| &c.value)));
    if !column_has_data {
        return Err(ValidationError::EmptyColumn(target.letters()));
    }

    // Collect every other column holding data, not just the first
    let mut offenders = Vec::new();
    for col in min_col..=max_col {
        if col == target.index() {
            continue;
        }
        let has_data = (range.start.row..=range.end.row)
            .any(|row| is_non_blank(sheet.cell_at(row, col).map(|c| &c.value)));
        if has_data {
            offenders.push(CellAddress::column_to_letters(col));
        }
    }
    if !offenders.is_empty() {
        return Err(ValidationError::MultipleColumnsWithData {
            target: target.letters(),
            columns: offenders,
        });
    }

    Ok(())
}

/// A cell counts as data when it has a value whose string form survives
/// whitespace trimming.
pub(crate) fn is_non_blank(value: Option<&CellValue>) -> bool {
    match value {
        None | Some(CellValue::Empty) => false,
        Some(CellValue::Text(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
