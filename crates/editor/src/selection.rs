//! Selection Management
//! 
//! A selection is a half-open range of character offsets into a buffer.
//! An empty selection is a caret.

use std::ops::Range;

use wikipad_core::{Result, WikipadError};

/// A text selection range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Start offset (always the lesser)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Selection {
    /// Create a new selection; reversed bounds are normalized
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Create an empty selection at an offset
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// Check if the selection is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if an offset is within the selection
    pub fn contains(&self, pos: usize) -> bool {
        self.range().contains(&pos)
    }

    /// Fail with `InvalidSelection` unless the range fits a buffer of `len` chars
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.start > self.end || self.end > len {
            return Err(WikipadError::invalid_selection(self.start, self.end, len));
        }
        Ok(())
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Selection::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_normalized() {
        let sel = Selection::new(10, 5);
        assert_eq!(sel, Selection { start: 5, end: 10 });
        assert_eq!(sel.len(), 5);
    }

    #[test]
    fn test_caret() {
        let sel = Selection::caret(4);
        assert!(sel.is_empty());
        assert!(!sel.contains(4));
        assert!(Selection::new(2, 6).contains(4));
    }

    #[test]
    fn test_validate() {
        assert!(Selection::new(0, 5).validate(5).is_ok());
        assert!(Selection::caret(5).validate(5).is_ok());
        assert!(matches!(
            Selection::new(2, 6).validate(5),
            Err(WikipadError::InvalidSelection { start: 2, end: 6, len: 5 })
        ));
    }
}
