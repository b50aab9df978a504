//! # textready-core
//!
//! Core data structures for the textready column-wrapping tool.
//!
//! This crate provides the fundamental types used throughout textready:
//! - [`CellValue`] - Represents cell values (text, numbers, booleans, dates)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`ColumnRef`] - A validated column reference ("A", "B", ... "ZZZ")
//! - [`DisplayFormat`] - The general/text display tag carried by each cell
//! - [`Workbook`], [`Worksheet`] - The main document structures
//!
//! ## Example
//!
//! ```rust
//! use textready_core::{Workbook, CellValue};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! // Using string addresses
//! sheet.set_cell_value("B1", "Hello").unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(1, 1, CellValue::text("World")).unwrap();
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellRange, CellValue, DisplayFormat};
pub use column::ColumnRef;
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum length of a column reference ("ZZZ")
pub const MAX_COLUMN_NAME_LEN: usize = 3;
