//! End-to-end processing pipeline
//!
//! Load, validate, split, save - in that order, with all validation ahead of
//! any mutation and the destination written in a single step only after the
//! transformation has completed in memory. The source document is never
//! touched.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ConfigError, SplitConfig};
use crate::split::split_column;
use crate::validate::{validate, ValidationError};
use textready_xlsx::{XlsxError, XlsxReader, XlsxWriter};

/// Suffix appended to the source stem when naming the destination document
pub const OUTPUT_SUFFIX: &str = "_ProjectTextReady";

/// Magic bytes opening a ZIP archive (XLSX and friends)
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Magic bytes opening an OLE2 compound document (legacy .xls)
const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Anything that can stop a processing run
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The workbook layout was rejected before any mutation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The configuration was rejected before the document was opened
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The document is not a format this tool processes
    #[error("Invalid input document: {0}")]
    Format(String),

    /// The document could not be read or written
    #[error(transparent)]
    Xlsx(#[from] XlsxError),

    /// Filesystem error outside the XLSX layer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cell-model error during the transformation
    #[error(transparent)]
    Core(#[from] textready_core::Error),
}

/// A successful processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Human-readable success message
    pub message: String,
    /// The newly created document
    pub output: PathBuf,
}

/// Process `input`, writing the result next to it.
pub fn process(input: &Path, config: &SplitConfig) -> Result<Outcome, ProcessError> {
    process_into(input, None, config)
}

/// Process `input`, writing the result into `out_dir` when given.
pub fn process_into(
    input: &Path,
    out_dir: Option<&Path>,
    config: &SplitConfig,
) -> Result<Outcome, ProcessError> {
    sniff_signature(input)?;

    let mut workbook = XlsxReader::read_file(input)?;
    let target = validate(&workbook, &config.column)?;

    // Validation passed, so sheet 0 exists
    let sheet = workbook
        .worksheet_mut(0)
        .ok_or(ValidationError::EmptySheet)?;
    let stats = split_column(sheet, target, config.max_chars)?;
    log::debug!(
        "{}: {} row(s) split into {} overflow cell(s)",
        input.display(),
        stats.rows_split,
        stats.cells_written
    );

    // Serialize fully in memory first so a failing save never leaves a
    // half-written destination behind
    let mut buffer = Cursor::new(Vec::new());
    XlsxWriter::write(&workbook, &mut buffer)?;

    let output = output_path(input, out_dir);
    std::fs::write(&output, buffer.into_inner())?;

    Ok(Outcome {
        message: "File successfully processed.".into(),
        output,
    })
}

/// Derive the destination name: source stem + suffix + original extension.
pub fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("workbook");
    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("xlsx");
    let name = format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext);

    match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Check the document's magic bytes before handing it to the ZIP layer.
///
/// Catches renamed non-spreadsheet files early and turns the legacy OLE2
/// container into a clear message instead of a ZIP parse failure.
pub(crate) fn sniff_signature(path: &Path) -> Result<(), ProcessError> {
    let mut header = [0u8; 8];
    let mut file = File::open(path)?;
    let n = file.read(&mut header)?;

    if n >= 4 && header[..4] == ZIP_MAGIC {
        return Ok(());
    }
    if n >= 8 && header == OLE2_MAGIC {
        return Err(ProcessError::Format(
            "legacy .xls (OLE2) workbooks are not supported; re-save the file as .xlsx".into(),
        ));
    }
    Err(ProcessError::Format(
        "file does not appear to be a valid Excel workbook (bad file signature)".into(),
    ))
}
