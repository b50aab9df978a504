//! Processing configuration

use thiserror::Error;

/// Allowed window for the per-cell character limit.
///
/// The downstream import format that motivated this tool only renders
/// 18-23 characters per cell cleanly, so requests outside that window are
/// refused at the edge. Carried as a value (not process globals) so
/// differently-configured invocations can run side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitBounds {
    /// Smallest accepted limit
    pub min: usize,
    /// Largest accepted limit
    pub max: usize,
    /// Value suggested to callers that ask
    pub suggested: usize,
}

impl Default for LimitBounds {
    fn default() -> Self {
        Self {
            min: 18,
            max: 23,
            suggested: 20,
        }
    }
}

impl LimitBounds {
    /// Check a requested character limit against this window
    pub fn check(&self, max_chars: usize) -> Result<(), ConfigError> {
        if max_chars < self.min {
            return Err(ConfigError::BelowMinimum {
                min: self.min,
                suggested: self.suggested,
            });
        }
        if max_chars > self.max {
            return Err(ConfigError::AboveMaximum {
                max: self.max,
                min: self.min,
                suggested: self.suggested,
            });
        }
        Ok(())
    }
}

/// One invocation's processing configuration: which column to wrap and how
/// many characters a cell may hold. Constructed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Target column reference, as supplied by the caller (e.g. "B")
    pub column: String,
    /// Maximum characters per cell
    pub max_chars: usize,
}

impl SplitConfig {
    /// Create a new configuration
    pub fn new<S: Into<String>>(column: S, max_chars: usize) -> Self {
        Self {
            column: column.into(),
            max_chars,
        }
    }

    /// Check the character limit against an accepted window
    pub fn check_bounds(&self, bounds: &LimitBounds) -> Result<(), ConfigError> {
        bounds.check(self.max_chars)
    }
}

/// Configuration rejected before any document is touched
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Requested limit below the accepted window
    #[error("Max characters must be at least {min} (recommended: {min}-{suggested})")]
    BelowMinimum { min: usize, suggested: usize },

    /// Requested limit above the accepted window
    #[error("Max characters cannot exceed {max} (recommended: {min}-{suggested})")]
    AboveMaximum {
        max: usize,
        min: usize,
        suggested: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let bounds = LimitBounds::default();
        assert_eq!((bounds.min, bounds.max, bounds.suggested), (18, 23, 20));
    }

    #[test]
    fn test_check_bounds() {
        let bounds = LimitBounds::default();
        assert!(bounds.check(18).is_ok());
        assert!(bounds.check(20).is_ok());
        assert!(bounds.check(23).is_ok());
        assert!(matches!(
            bounds.check(17),
            Err(ConfigError::BelowMinimum { .. })
        ));
        assert!(matches!(
            bounds.check(24),
            Err(ConfigError::AboveMaximum { .. })
        ));
    }
}
