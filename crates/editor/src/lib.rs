//! Wikipad Editor
//! 
//! Selection-based reStructuredText markup editing for wiki edit areas:
//! - Character-indexed selection model and rope-backed buffer
//! - Markup insertion with placeholder samples and hyperlink targets
//! - Toolbar commands and edit-area resolution

pub mod binding;
pub mod buffer;
pub mod commands;
pub mod markup;
pub mod selection;
pub mod surface;

pub use binding::{FieldId, SurfaceBinding};
pub use buffer::TextBuffer;
pub use commands::{Command, CommandExecutor, CommandResult, MarkupCommand};
pub use markup::{apply_markup, apply_to_surface, EditResult, LinkTarget, MarkupRequest};
pub use selection::Selection;
pub use surface::{ScrollOffset, TextSurface};
