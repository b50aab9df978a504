//! XLSX (Office Open XML) reader and writer for textready
//!
//! Reads the cell values and number-format tags the column splitter needs,
//! and writes workbooks back out with inline strings and a minimal style
//! table (general / text / datetime).

pub mod error;
mod reader;
mod styles;
mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
