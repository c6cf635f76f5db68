//! CLI commands for Wikipad
//! 
//! Apply toolbar markup to a file from scripts, outside a browser.

use std::path::PathBuf;
use anyhow::{anyhow, Result};
use tracing::info;

use wikipad_core::config::EditorConfig;
use wikipad_editor::{
    Command, CommandExecutor, EditResult, FieldId, MarkupCommand, Selection, SurfaceBinding,
    TextSurface,
};

/// Build a markup command from its toolbar name and optional argument
pub fn markup_command(
    name: &str,
    argument: Option<&str>,
    caption: Option<&str>,
) -> Result<MarkupCommand> {
    if let Some(command) = MarkupCommand::parse(name) {
        return Ok(command);
    }

    let required = || {
        argument
            .map(str::to_string)
            .ok_or_else(|| anyhow!("The {} command needs an argument", name))
    };
    match name {
        "link" => Ok(MarkupCommand::InsertLink { name: required()? }),
        "uri" => Ok(MarkupCommand::InsertUri { uri: required()? }),
        "figure" => Ok(MarkupCommand::InsertFigure {
            path: required()?,
            caption: caption.unwrap_or_default().to_string(),
        }),
        _ => Err(anyhow!("Unknown markup command: {}", name)),
    }
}

/// Apply markup to a selection of a text file, in place
pub struct ApplyCommand {
    pub file: PathBuf,
    pub command: MarkupCommand,
    pub selection: Selection,
    /// Edit area settings the file is loaded with
    pub editor: EditorConfig,
}

impl ApplyCommand {
    /// Execute the apply command
    pub async fn execute(&self) -> Result<EditResult> {
        info!("Applying {} to {:?}", self.command.name(), self.file);

        let content = tokio::fs::read_to_string(&self.file).await?;
        let mut binding = SurfaceBinding::from_config(&self.editor);
        binding.add_text(
            FieldId::new(Some(self.editor.edit_form.as_str()), &self.editor.edit_field),
            &content,
        );
        let buffer = binding
            .resolve_mut()
            .ok_or_else(|| anyhow!("No edit area for {:?}", self.file))?;
        buffer.set_selection(self.selection)?;

        let mut executor = CommandExecutor::new();
        let result = executor.execute(Command::Markup(self.command.clone()), Some(&mut *buffer))?;
        let edit = result
            .edit
            .ok_or_else(|| anyhow!("Markup was not applied"))?;

        tokio::fs::write(&self.file, buffer.to_text()).await?;
        Ok(edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_command_names() {
        assert_eq!(markup_command("bold", None, None).unwrap(), MarkupCommand::Bold);
        assert_eq!(
            markup_command("uri", Some("http://python.org/"), None).unwrap(),
            MarkupCommand::InsertUri { uri: "http://python.org/".into() }
        );
        assert_eq!(
            markup_command("figure", Some("a.png"), None).unwrap(),
            MarkupCommand::InsertFigure { path: "a.png".into(), caption: String::new() }
        );
        assert!(markup_command("link", None, None).is_err());
        assert!(markup_command("blink", None, None).is_err());
    }

    #[tokio::test]
    async fn test_apply_command_edits_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.rst");
        tokio::fs::write(&file, "Hello world\n").await.unwrap();

        let command = ApplyCommand {
            file: file.clone(),
            command: MarkupCommand::Italic,
            selection: Selection::new(6, 11),
            editor: EditorConfig::default(),
        };
        let edit = command.execute().await.unwrap();

        assert_eq!(edit.selection, Selection::caret(13));
        assert_eq!(tokio::fs::read_to_string(&file).await.unwrap(), "Hello *world*\n");
    }

    #[tokio::test]
    async fn test_apply_command_with_custom_editor_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.rst");
        tokio::fs::write(&file, "").await.unwrap();

        let command = ApplyCommand {
            file: file.clone(),
            command: MarkupCommand::Heading2,
            selection: Selection::caret(0),
            editor: EditorConfig {
                edit_form: "comments".into(),
                edit_field: "body".into(),
                max_undo_history: 1,
                ..EditorConfig::default()
            },
        };
        let edit = command.execute().await.unwrap();

        assert!(edit.used_sample);
        assert_eq!(tokio::fs::read_to_string(&file).await.unwrap(), "\n\nTitle\n=====\n\n");
    }

    #[tokio::test]
    async fn test_apply_command_rejects_bad_selection() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.rst");
        tokio::fs::write(&file, "short").await.unwrap();

        let command = ApplyCommand {
            file: file.clone(),
            command: MarkupCommand::Bold,
            selection: Selection::new(2, 40),
            editor: EditorConfig::default(),
        };
        assert!(command.execute().await.is_err());
        assert_eq!(tokio::fs::read_to_string(&file).await.unwrap(), "short");
    }
}
