//! Column reference type

use crate::cell::CellAddress;
use crate::error::{Error, Result};
use crate::MAX_COLUMN_NAME_LEN;
use std::fmt;
use std::str::FromStr;

/// A validated column reference ("A", "B", ... "ZZZ")
///
/// Column references name the column the caller wants processed. Unlike the
/// looser letter handling in [`CellAddress`], references arriving from the
/// outside are held to the strict form: 1 to [`MAX_COLUMN_NAME_LEN`]
/// uppercase ASCII letters, mapped to a 0-based index by the usual bijective
/// base-26 rule (A=0, Z=25, AA=26). Whether the column actually exists in a
/// sheet is a separate question answered by validation, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef(u16);

impl ColumnRef {
    /// Largest index expressible in [`MAX_COLUMN_NAME_LEN`] letters ("ZZZ")
    pub const MAX_INDEX: u16 = 18_277;

    /// Create a column reference from a 0-based index
    pub fn new(index: u16) -> Result<Self> {
        if index > Self::MAX_INDEX {
            return Err(Error::ColumnOutOfBounds(index, Self::MAX_INDEX));
        }
        Ok(Self(index))
    }

    /// Parse a column reference from its letter form
    ///
    /// # Examples
    /// ```
    /// use textready_core::ColumnRef;
    ///
    /// assert_eq!(ColumnRef::parse("A").unwrap().index(), 0);
    /// assert_eq!(ColumnRef::parse("AA").unwrap().index(), 26);
    /// assert!(ColumnRef::parse("a").is_err());
    /// assert!(ColumnRef::parse("AAAA").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty()
            || s.len() > MAX_COLUMN_NAME_LEN
            || !s.bytes().all(|b| b.is_ascii_uppercase())
        {
            return Err(Error::InvalidColumnName(s.to_string()));
        }

        let mut index: u32 = 0;
        for b in s.bytes() {
            index = index * 26 + (b - b'A' + 1) as u32;
        }
        // "ZZZ" is 18277, well inside the sheet column limit
        Self::new((index - 1) as u16)
    }

    /// Get the 0-based column index
    pub fn index(&self) -> u16 {
        self.0
    }

    /// Get the letter form of this reference
    pub fn letters(&self) -> String {
        CellAddress::column_to_letters(self.0)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letters())
    }
}

impl FromStr for ColumnRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(ColumnRef::parse("A").unwrap().index(), 0);
        assert_eq!(ColumnRef::parse("B").unwrap().index(), 1);
        assert_eq!(ColumnRef::parse("Z").unwrap().index(), 25);
        assert_eq!(ColumnRef::parse("AA").unwrap().index(), 26);
        assert_eq!(ColumnRef::parse("ZZ").unwrap().index(), 701);
        assert_eq!(ColumnRef::parse("AAA").unwrap().index(), 702);
        assert_eq!(ColumnRef::parse("ZZZ").unwrap().index(), 18277);
    }

    #[test]
    fn test_parse_rejects_bad_syntax() {
        assert!(ColumnRef::parse("").is_err());
        assert!(ColumnRef::parse("a").is_err()); // Lowercase
        assert!(ColumnRef::parse("AAAA").is_err()); // Too long
        assert!(ColumnRef::parse("A1").is_err()); // Digits
        assert!(ColumnRef::parse("A ").is_err()); // Whitespace
        assert!(ColumnRef::parse("Ä").is_err()); // Non-ASCII
    }

    #[test]
    fn test_display_round_trip() {
        for letters in ["A", "Z", "AA", "AZ", "BA", "ZZ", "AAA", "ZZZ"] {
            let col = ColumnRef::parse(letters).unwrap();
            assert_eq!(col.to_string(), letters);
        }
    }
}
