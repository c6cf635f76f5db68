//! Text Surface
//! 
//! The capability interface the markup editor needs from an editable text
//! area: read the text, read and set the selection, replace a range and
//! keep the scroll position.

use std::ops::Range;

use wikipad_core::Result;

use crate::selection::Selection;

/// Opaque display position of a text area. Preserved, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset(pub i64);

/// An editable text area
pub trait TextSurface {
    /// Full text content
    fn text(&self) -> String;

    /// Length in characters
    fn char_len(&self) -> usize;

    /// Current selection
    fn selection(&self) -> Selection;

    /// Replace a char range with `text`
    fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<()>;

    /// Set the selection; fails if it does not fit the text
    fn set_selection(&mut self, selection: Selection) -> Result<()>;

    fn scroll_offset(&self) -> ScrollOffset;

    fn set_scroll_offset(&mut self, offset: ScrollOffset);
}
