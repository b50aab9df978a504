//! Cell display format tag

/// How a cell's value should be rendered by spreadsheet software.
///
/// The processed column and every column it overflows into are forced to
/// [`DisplayFormat::Text`] so downstream tools never reinterpret the wrapped
/// fragments as numbers or dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayFormat {
    /// General format (default)
    #[default]
    General,

    /// Literal text format (number format `@`)
    Text,
}

impl DisplayFormat {
    /// The XLSX built-in number format id for literal text (`@`)
    pub const TEXT_NUM_FMT_ID: u32 = 49;

    /// Check if this is the text format
    pub fn is_text(&self) -> bool {
        matches!(self, DisplayFormat::Text)
    }
}
