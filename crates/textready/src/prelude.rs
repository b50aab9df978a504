//! Prelude module - common imports for textready users
//!
//! ```rust
//! use textready::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellAddress,
    CellRange,
    CellValue,
    ColumnRef,
    DisplayFormat,
    // Error types
    Error,
    // Configuration
    LimitBounds,
    Outcome,
    ProcessError,
    Result,
    SplitConfig,
    ValidationError,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
    // I/O types
    XlsxReader,
    XlsxWriter,
    // Operations
    inspect,
    process,
    split_column,
    validate,
};
