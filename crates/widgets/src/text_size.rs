//! Text Size
//! 
//! Font size buttons of the edit area. The choice is remembered as a
//! preference string and restored on the next page load.

use std::sync::Arc;
use tracing::debug;

use wikipad_core::{Event, EventBus, TextSize};

/// Current font size of the edit area
pub struct TextSizeControl {
    size: TextSize,
    events: Option<Arc<EventBus>>,
}

impl TextSizeControl {
    pub fn new(size: TextSize) -> Self {
        Self { size, events: None }
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn size(&self) -> TextSize {
        self.size
    }

    /// CSS `font-size` value for the edit area
    pub fn font_size(&self) -> String {
        format!("{}em", self.size.font_scale())
    }

    /// Change the size; returns the preference value to store
    pub fn set(&mut self, size: TextSize) -> &'static str {
        self.size = size;
        debug!("Edit area text size set to {}", size.as_str());
        if let Some(events) = &self.events {
            events.emit(Event::TextSizeChanged(size));
        }
        size.as_str()
    }

    /// Apply a stored preference; unknown or missing values change nothing
    pub fn restore(&mut self, stored: Option<&str>) -> bool {
        match stored.and_then(TextSize::parse) {
            Some(size) => {
                self.set(size);
                true
            }
            None => false,
        }
    }
}
