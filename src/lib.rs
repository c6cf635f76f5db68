//! Wikipad - reStructuredText markup editing for CMS edit forms
//! 
//! Wikipad implements the behavior behind a wiki page editor toolbar:
//! wrapping the selection of an edit area in markup, inserting hyperlink
//! targets, and the page widgets around it.
//! 
//! ## Architecture
//! 
//! - `wikipad-core`: errors, configuration and the event bus
//! - `wikipad-editor`: selection model, text buffer, markup engine, commands
//! - `wikipad-widgets`: navigation, popups, visibility, upload progress

#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use wikipad_core as core;
pub use wikipad_editor as editor;
pub use wikipad_widgets as widgets;

/// Prelude module for convenient imports
pub mod prelude {
    pub use wikipad_core::{AppConfig, Event, EventBus, WikipadError};
    pub use wikipad_editor::{
        apply_markup, Command, CommandExecutor, LinkTarget, MarkupCommand, MarkupRequest,
        Selection, SurfaceBinding, TextBuffer, TextSurface,
    };
    pub use wikipad_widgets::{NavigationTrigger, ProgressReporter, RecurrenceFields};
}
