//! Worksheet type

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue, DisplayFormat};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get a cell value by address string (empty if the cell does not exist)
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get a cell value by indices (empty if the cell does not exist)
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Get a cell's display format (general if the cell does not exist)
    pub fn display_format_at(&self, row: u32, col: u16) -> DisplayFormat {
        self.cells
            .get(row, col)
            .map(|c| c.format)
            .unwrap_or_default()
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set a cell's display format by row and column indices
    pub fn set_display_format_at(&mut self, row: u32, col: u16, format: DisplayFormat) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_format(row, col, format);
        Ok(())
    }

    /// Set a complete cell (value and display format) by indices
    pub fn set_cell_at(&mut self, row: u32, col: u16, data: CellData) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set(row, col, data);
        Ok(())
    }

    /// Clear a cell by indices
    pub fn clear_cell_at(&mut self, row: u32, col: u16) {
        self.cells.remove(row, col);
    }

    // === Range Operations ===

    /// Get the used range (bounds of all populated cells)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    /// Get the number of populated cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the sheet has no populated cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all populated cells in row order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    /// Iterate over the populated cells of a single row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.cells.iter_row(row)
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut sheet = Worksheet::new("Sheet1");

        sheet.set_cell_value("A1", "hello").unwrap();
        sheet.set_cell_value_at(0, 1, 42.0).unwrap();

        assert_eq!(sheet.get_value("A1").unwrap(), CellValue::text("hello"));
        assert_eq!(sheet.get_value_at(0, 1), CellValue::Number(42.0));
        assert_eq!(sheet.get_value_at(5, 5), CellValue::Empty);
    }

    #[test]
    fn test_display_format() {
        let mut sheet = Worksheet::new("Sheet1");

        assert_eq!(sheet.display_format_at(0, 0), DisplayFormat::General);

        sheet.set_cell_value_at(0, 0, "text").unwrap();
        sheet
            .set_display_format_at(0, 0, DisplayFormat::Text)
            .unwrap();
        assert_eq!(sheet.display_format_at(0, 0), DisplayFormat::Text);

        // Format sticks on a cell with no value too
        sheet
            .set_display_format_at(3, 0, DisplayFormat::Text)
            .unwrap();
        assert_eq!(sheet.display_format_at(3, 0), DisplayFormat::Text);
    }

    #[test]
    fn test_used_range() {
        let mut sheet = Worksheet::new("Sheet1");
        assert!(sheet.used_range().is_none());

        sheet.set_cell_value("B2", "x").unwrap();
        sheet.set_cell_value("D5", "y").unwrap();

        let range = sheet.used_range().unwrap();
        assert_eq!(range.to_string(), "B2:D5");
    }

    #[test]
    fn test_position_bounds() {
        let mut sheet = Worksheet::new("Sheet1");
        assert!(sheet.set_cell_value_at(crate::MAX_ROWS, 0, "x").is_err());
        assert!(sheet.set_cell_value_at(0, crate::MAX_COLS, "x").is_err());
    }
}
