//! Wikipad Widgets
//! 
//! Page behavior around the editor: following links, popup dialogs, field
//! group visibility, tabs, upload progress and tracker helpers.

pub mod navigation;
pub mod text_size;
pub mod tracker;
pub mod upload;
pub mod visibility;

pub use navigation::{NavigationTrigger, Navigator, PopupKind, PopupWindow, WindowHandle};
pub use text_size::TextSizeControl;
pub use upload::{format_size, parse_status, ProgressReporter, UploadStatusSource};
pub use visibility::{RecurrenceFields, TabSet, VisibilityToggler};
