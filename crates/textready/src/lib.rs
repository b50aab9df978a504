//! # textready
//!
//! Rewrites any cell of a single-column spreadsheet whose text exceeds a
//! character limit, wrapping the overflow into adjacent cells on the same
//! row. Breaks happen only at word boundaries, overflow cascades as far
//! right as the text demands, and every touched cell is tagged as literal
//! text so nothing gets reinterpreted downstream.
//!
//! ## Example
//!
//! ```rust
//! use textready::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("B1", "the quick brown fox jumps").unwrap();
//!
//! let target = validate(&workbook, "B").unwrap();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! split_column(sheet, target, 10).unwrap();
//!
//! assert_eq!(sheet.get_value("B1").unwrap(), CellValue::text("the quick"));
//! assert_eq!(sheet.get_value("C1").unwrap(), CellValue::text("brown fox"));
//! assert_eq!(sheet.get_value("D1").unwrap(), CellValue::text("jumps"));
//! ```
//!
//! For whole documents, [`process`] runs the full load → validate → split →
//! save pipeline and [`inspect`] produces a read-only advisory report.

pub mod config;
pub mod inspect;
pub mod prelude;
pub mod process;
pub mod split;
pub mod validate;

// Re-export the pipeline surface
pub use config::{ConfigError, LimitBounds, SplitConfig};
pub use inspect::{inspect, ColumnStats, SheetReport, Suggestion};
pub use process::{output_path, process, process_into, Outcome, ProcessError, OUTPUT_SUFFIX};
pub use split::{split_column, SplitStats};
pub use validate::{validate, validate_column_data, ValidationError};

// Re-export core types
pub use textready_core::{
    CellAddress,
    CellData,
    CellRange,
    // Cell types
    CellValue,
    ColumnRef,
    DisplayFormat,
    // Error types
    Error,
    Result,
    // Main types
    Workbook,
    Worksheet,
    MAX_COLS,
    MAX_COLUMN_NAME_LEN,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use textready_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Save the workbook to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => {
                XlsxReader::read_file(path).map_err(|e| Error::other(e.to_string()))
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => {
                XlsxWriter::write_file(self, path).map_err(|e| Error::other(e.to_string()))
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }
}
