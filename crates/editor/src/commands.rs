//! Editor Commands
//! 
//! Toolbar actions of the wiki edit form. Each markup command is a fixed
//! `MarkupRequest`; the literal delimiters are what the reStructuredText
//! renderer expects and must not change.

use std::sync::Arc;
use tracing::{debug, warn};

use wikipad_core::{Event, EventBus, Result};

use crate::markup::{apply_to_surface, EditResult, LinkTarget, MarkupRequest};
use crate::surface::TextSurface;

/// Markup toolbar command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupCommand {
    Bold,
    Italic,
    BulletList,
    NumberedList,
    Table,
    Preformatted,
    Heading1,
    Heading2,
    Heading3,
    /// Figure picked in the add-image dialog
    InsertFigure { path: String, caption: String },
    /// Resource picked in the add-link dialog
    InsertLink { name: String },
    /// External URI typed in the add-link dialog
    InsertUri { uri: String },
}

impl MarkupCommand {
    /// Parse a toolbar command name (commands without arguments only)
    pub fn parse(name: &str) -> Option<Self> {
        let command = match name {
            "bold" => MarkupCommand::Bold,
            "italic" => MarkupCommand::Italic,
            "bullist" => MarkupCommand::BulletList,
            "numlist" => MarkupCommand::NumberedList,
            "table" => MarkupCommand::Table,
            "preformatted" => MarkupCommand::Preformatted,
            "heading1" => MarkupCommand::Heading1,
            "heading2" => MarkupCommand::Heading2,
            "heading3" => MarkupCommand::Heading3,
            _ => return None,
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkupCommand::Bold => "bold",
            MarkupCommand::Italic => "italic",
            MarkupCommand::BulletList => "bullist",
            MarkupCommand::NumberedList => "numlist",
            MarkupCommand::Table => "table",
            MarkupCommand::Preformatted => "preformatted",
            MarkupCommand::Heading1 => "heading1",
            MarkupCommand::Heading2 => "heading2",
            MarkupCommand::Heading3 => "heading3",
            MarkupCommand::InsertFigure { .. } => "figure",
            MarkupCommand::InsertLink { .. } => "link",
            MarkupCommand::InsertUri { .. } => "uri",
        }
    }

    /// Commands picked from the format menu close it
    pub fn hides_format_menu(&self) -> bool {
        matches!(
            self,
            MarkupCommand::Preformatted
                | MarkupCommand::Heading1
                | MarkupCommand::Heading2
                | MarkupCommand::Heading3
        )
    }

    /// The markup request this command applies
    pub fn request(&self) -> MarkupRequest {
        match self {
            MarkupCommand::Bold => MarkupRequest::new("**", "**", "Bold Text"),
            MarkupCommand::Italic => MarkupRequest::new("*", "*", "Italic Text"),
            MarkupCommand::BulletList => MarkupRequest::new("\n\n* ", "\n* \n", "List Item"),
            MarkupCommand::NumberedList => MarkupRequest::new("\n\n1. ", "\n2. \n", "List Item"),
            MarkupCommand::Table => {
                MarkupRequest::new("\n\n===== =====\n", "\n===== =====\n\n", "Cell1 Cell2")
            }
            MarkupCommand::Preformatted => MarkupRequest::new(
                "\n\n::\n\n  ",
                "\n\n",
                "Type text not to interpret with identation",
            ),
            MarkupCommand::Heading1 => MarkupRequest::new("\n\n=====\n", "\n=====\n\n", "Title"),
            MarkupCommand::Heading2 => MarkupRequest::new("\n\n", "\n=====\n\n", "Title"),
            MarkupCommand::Heading3 => MarkupRequest::new("\n\n", "\n-----\n\n", "Title"),
            MarkupCommand::InsertFigure { path, caption } => {
                MarkupRequest::new(format!("\n\n.. figure:: {}\n\n   ", path), "\n\n", caption.clone())
            }
            MarkupCommand::InsertLink { name } => {
                MarkupRequest::new("`", "`_", name.clone()).with_target(LinkTarget::ReuseSample)
            }
            MarkupCommand::InsertUri { uri } => MarkupRequest::new("`", "`_", uri_label(uri))
                .with_target(LinkTarget::Explicit(uri.clone())),
        }
    }
}

/// Link label for a URI: its host part, e.g. `python.org` for
/// `http://python.org/about`
pub fn uri_label(uri: &str) -> String {
    let chars: Vec<char> = uri.chars().collect();
    let start = chars
        .iter()
        .position(|&c| c == '/')
        .map_or(1, |i| i + 2)
        .min(chars.len());
    let stop = chars[start..]
        .iter()
        .position(|&c| c == '/')
        .map_or(chars.len(), |i| start + i);
    chars[start..stop].iter().collect()
}

/// Editor command type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Markup(MarkupCommand),
    ToggleFormatMenu,
}

/// Visibility of the format picker next to the toolbar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatMenu {
    visible: bool,
}

impl FormatMenu {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Command execution result
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    pub message: Option<String>,
    pub edit: Option<EditResult>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            edit: None,
        }
    }

    /// Nothing to act on
    pub fn noop(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            edit: None,
        }
    }

    pub fn with_edit(edit: EditResult) -> Self {
        Self {
            success: true,
            message: None,
            edit: Some(edit),
        }
    }
}

/// Command executor
#[derive(Default)]
pub struct CommandExecutor {
    format_menu: FormatMenu,
    events: Option<Arc<EventBus>>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish executed commands on an event bus
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn format_menu(&self) -> FormatMenu {
        self.format_menu
    }

    /// Execute a command on the bound edit area, if there is one
    pub fn execute(
        &mut self,
        command: Command,
        surface: Option<&mut dyn TextSurface>,
    ) -> Result<CommandResult> {
        match command {
            Command::ToggleFormatMenu => {
                let visible = self.format_menu.toggle();
                self.emit(Event::FormatMenuToggled { visible });
                Ok(CommandResult::ok())
            }

            Command::Markup(markup) => {
                if markup.hides_format_menu() {
                    self.format_menu.hide();
                    self.emit(Event::FormatMenuToggled { visible: false });
                }

                let Some(surface) = surface else {
                    warn!("No edit area for {} command", markup.name());
                    return Ok(CommandResult::noop("No edit area"));
                };

                let edit = apply_to_surface(surface, &markup.request())?;
                debug!("{} applied, sample used: {}", markup.name(), edit.used_sample);
                self.emit(Event::MarkupApplied {
                    command: markup.name().to_string(),
                    used_sample: edit.used_sample,
                });
                Ok(CommandResult::with_edit(edit))
            }
        }
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::selection::Selection;

    fn run(command: MarkupCommand, text: &str, selection: Selection) -> TextBuffer {
        let mut buffer = TextBuffer::from_str(text);
        buffer.set_selection(selection).unwrap();
        let mut executor = CommandExecutor::new();
        executor
            .execute(Command::Markup(command), Some(&mut buffer))
            .unwrap();
        buffer
    }

    #[test]
    fn test_bold_sample() {
        let buffer = run(MarkupCommand::Bold, "", Selection::caret(0));
        assert_eq!(buffer.to_text(), "**Bold Text**");
        assert_eq!(buffer.selected_text(), "Bold Text");
    }

    #[test]
    fn test_bullet_list() {
        let buffer = run(MarkupCommand::BulletList, "intro", Selection::caret(5));
        assert_eq!(buffer.to_text(), "intro\n\n* List Item\n* \n");
        assert_eq!(buffer.selected_text(), "List Item");
    }

    #[test]
    fn test_numbered_list_wraps_selection() {
        let buffer = run(MarkupCommand::NumberedList, "first", Selection::new(0, 5));
        assert_eq!(buffer.to_text(), "\n\n1. first\n2. \n");
        assert_eq!(buffer.selection(), Selection::caret(15));
    }

    #[test]
    fn test_table_and_headings() {
        assert_eq!(
            run(MarkupCommand::Table, "", Selection::caret(0)).to_text(),
            "\n\n===== =====\nCell1 Cell2\n===== =====\n\n"
        );
        assert_eq!(
            run(MarkupCommand::Heading1, "Intro", Selection::new(0, 5)).to_text(),
            "\n\n=====\nIntro\n=====\n\n"
        );
        assert_eq!(
            run(MarkupCommand::Heading3, "", Selection::caret(0)).to_text(),
            "\n\nTitle\n-----\n\n"
        );
    }

    #[test]
    fn test_figure() {
        let command = MarkupCommand::InsertFigure {
            path: "images/logo.png".into(),
            caption: "Our logo".into(),
        };
        let buffer = run(command, "", Selection::caret(0));
        assert_eq!(buffer.to_text(), "\n\n.. figure:: images/logo.png\n\n   Our logo\n\n");
        assert_eq!(buffer.selected_text(), "Our logo");
    }

    #[test]
    fn test_link_reuses_name_as_target() {
        let command = MarkupCommand::InsertLink { name: "front-page".into() };
        let buffer = run(command, "read the docs", Selection::new(9, 13));
        assert_eq!(buffer.to_text(), "read the `docs`_\n\n.. _`docs`: front-page\n");
    }

    #[test]
    fn test_uri_label() {
        assert_eq!(uri_label("http://python.org/about"), "python.org");
        assert_eq!(uri_label("https://example.com"), "example.com");
        assert_eq!(uri_label("x"), "");
    }

    #[test]
    fn test_heading_always_hides_format_menu() {
        let mut executor = CommandExecutor::new();
        let mut buffer = TextBuffer::new();

        executor.execute(Command::ToggleFormatMenu, None).unwrap();
        assert!(executor.format_menu().is_visible());
        executor
            .execute(Command::Markup(MarkupCommand::Heading2), Some(&mut buffer))
            .unwrap();
        assert!(!executor.format_menu().is_visible());

        executor
            .execute(Command::Markup(MarkupCommand::Heading1), Some(&mut buffer))
            .unwrap();
        assert!(!executor.format_menu().is_visible());

        executor.execute(Command::ToggleFormatMenu, None).unwrap();
        let result = executor
            .execute(Command::Markup(MarkupCommand::Heading3), None)
            .unwrap();
        assert!(!result.success);
        assert!(!executor.format_menu().is_visible());

        executor.execute(Command::ToggleFormatMenu, None).unwrap();
        executor
            .execute(Command::Markup(MarkupCommand::Preformatted), Some(&mut buffer))
            .unwrap();
        assert!(!executor.format_menu().is_visible());

        executor.execute(Command::ToggleFormatMenu, None).unwrap();
        executor
            .execute(Command::Markup(MarkupCommand::Bold), Some(&mut buffer))
            .unwrap();
        assert!(executor.format_menu().is_visible());
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let mut executor = CommandExecutor::new();
        let result = executor
            .execute(Command::Markup(MarkupCommand::Italic), None)
            .unwrap();
        assert!(!result.success);
        assert!(result.edit.is_none());
    }

    #[test]
    fn test_events_emitted() {
        let bus = Arc::new(EventBus::new());
        let sub = bus.subscribe();
        let mut executor = CommandExecutor::new().with_events(bus);
        let mut buffer = TextBuffer::from_str("x");
        buffer.set_selection(Selection::new(0, 1)).unwrap();

        executor
            .execute(Command::Markup(MarkupCommand::Preformatted), Some(&mut buffer))
            .unwrap();
        assert_eq!(
            sub.drain(),
            vec![
                Event::FormatMenuToggled { visible: false },
                Event::MarkupApplied { command: "preformatted".into(), used_sample: false },
            ]
        );
    }

    #[test]
    fn test_parse_roundtrips_names() {
        for name in ["bold", "italic", "bullist", "numlist", "table", "preformatted", "heading1"] {
            assert_eq!(MarkupCommand::parse(name).unwrap().name(), name);
        }
        assert!(MarkupCommand::parse("figure").is_none());
    }
}
