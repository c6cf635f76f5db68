//! Text Buffer
//! 
//! Rope-backed edit area. Offsets are character indices, matching the
//! selection model of a browser text area.

use ropey::Rope;
use std::ops::Range;
use tracing::debug;

use wikipad_core::{Result, WikipadError};

use crate::selection::Selection;
use crate::surface::{ScrollOffset, TextSurface};

/// A recorded replacement, for undo/redo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub position: usize,
    pub old_text: String,
    pub new_text: String,
}

impl EditOperation {
    /// Get the inverse operation for undo
    pub fn inverse(&self) -> Self {
        Self {
            position: self.position,
            old_text: self.new_text.clone(),
            new_text: self.old_text.clone(),
        }
    }
}

/// In-memory edit area
pub struct TextBuffer {
    /// The rope containing the text
    rope: Rope,
    /// Whether the buffer has been modified
    dirty: bool,
    /// Undo stack
    undo_stack: Vec<EditOperation>,
    /// Redo stack
    redo_stack: Vec<EditOperation>,
    /// Maximum undo history size
    max_undo_history: usize,
    /// Current selection
    selection: Selection,
    /// Scroll position, carried for the view
    scroll: ScrollOffset,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::from_str("")
    }

    /// Create a buffer from a string
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            dirty: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_history: 1000,
            selection: Selection::default(),
            scroll: ScrollOffset::default(),
        }
    }

    /// Set the maximum undo history size
    pub fn with_max_undo_history(mut self, max: usize) -> Self {
        self.max_undo_history = max;
        self
    }

    pub fn max_undo_history(&self) -> usize {
        self.max_undo_history
    }

    /// Get the full text content
    pub fn to_text(&self) -> String {
        self.rope.to_string()
    }

    /// Get the total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Check if the buffer has been modified
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get selected text
    pub fn selected_text(&self) -> String {
        self.rope.slice(self.selection.range()).to_string()
    }

    /// Replace text in a char range
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        let len = self.rope.len_chars();
        if range.start > range.end || range.end > len {
            return Err(WikipadError::invalid_selection(range.start, range.end, len));
        }

        let old_text = self.rope.slice(range.clone()).to_string();
        
        // Record operation for undo
        self.push_undo(EditOperation {
            position: range.start,
            old_text,
            new_text: text.to_string(),
        });
        
        self.rope.remove(range.clone());
        self.rope.insert(range.start, text);
        self.dirty = true;
        self.selection = Selection::caret(range.start + text.chars().count());

        debug!("Replaced {:?} with {} chars", range, text.chars().count());
        Ok(())
    }

    /// Push an operation to the undo stack
    fn push_undo(&mut self, op: EditOperation) {
        self.undo_stack.push(op);
        self.redo_stack.clear();
        
        // Trim undo history if needed
        if self.undo_stack.len() > self.max_undo_history {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        if let Some(op) = self.undo_stack.pop() {
            self.apply_operation(&op.inverse());
            self.redo_stack.push(op);
            true
        } else {
            false
        }
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        if let Some(op) = self.redo_stack.pop() {
            self.apply_operation(&op);
            self.undo_stack.push(op);
            true
        } else {
            false
        }
    }

    /// Apply an edit operation without recording it
    fn apply_operation(&mut self, op: &EditOperation) {
        let len = self.rope.len_chars();
        let pos = op.position.min(len);
        let end = (pos + op.old_text.chars().count()).min(len);
        self.rope.remove(pos..end);
        self.rope.insert(pos, &op.new_text);
        self.selection = Selection::caret(pos + op.new_text.chars().count());
        self.dirty = true;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for TextBuffer {
    fn text(&self) -> String {
        self.to_text()
    }

    fn char_len(&self) -> usize {
        self.char_count()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        self.replace(range, text)
    }

    fn set_selection(&mut self, selection: Selection) -> Result<()> {
        selection.validate(self.char_count())?;
        self.selection = selection;
        Ok(())
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) {
        self.scroll = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = TextBuffer::from_str("Hello, World!");
        assert_eq!(buffer.to_text(), "Hello, World!");
        assert_eq!(buffer.char_count(), 13);
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_replace_counts_chars() {
        let mut buffer = TextBuffer::from_str("héllo wörld");
        buffer.replace(6..11, "monde").unwrap();
        assert_eq!(buffer.to_text(), "héllo monde");
        assert_eq!(buffer.selection(), Selection::caret(11));
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_replace_out_of_range() {
        let mut buffer = TextBuffer::from_str("abc");
        assert!(buffer.replace(2..4, "x").is_err());
        assert_eq!(buffer.to_text(), "abc");
    }

    #[test]
    fn test_set_selection() {
        let mut buffer = TextBuffer::from_str("Hello, World!");
        buffer.set_selection(Selection::new(7, 12)).unwrap();
        assert_eq!(buffer.selected_text(), "World");
        assert!(buffer.set_selection(Selection::new(7, 14)).is_err());
        assert_eq!(buffer.selection(), Selection::new(7, 12));
    }

    #[test]
    fn test_undo_redo() {
        let mut buffer = TextBuffer::from_str("Hello");
        buffer.replace(5..5, " Wörld").unwrap();
        assert_eq!(buffer.to_text(), "Hello Wörld");
        
        assert!(buffer.undo());
        assert_eq!(buffer.to_text(), "Hello");
        
        assert!(buffer.redo());
        assert_eq!(buffer.to_text(), "Hello Wörld");
        assert!(!buffer.redo());
    }

    #[test]
    fn test_undo_history_is_bounded() {
        let mut buffer = TextBuffer::from_str("").with_max_undo_history(2);
        for c in ["a", "b", "c"] {
            let end = buffer.char_count();
            buffer.replace(end..end, c).unwrap();
        }
        assert!(buffer.undo());
        assert!(buffer.undo());
        assert!(!buffer.undo());
        assert_eq!(buffer.to_text(), "a");
    }
}
