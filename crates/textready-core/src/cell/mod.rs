//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`DisplayFormat`] - The general/text display tag
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellData`] - Complete cell data including value and display format

mod address;
mod format;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use format::DisplayFormat;
pub use storage::{CellData, CellStorage};
pub use value::{datetime_to_serial, serial_to_datetime, CellValue};
