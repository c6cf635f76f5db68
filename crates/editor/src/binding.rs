//! Surface Binding
//! 
//! Finds the edit area a toolbar action applies to: the configured field of
//! the edit form when the page has one, otherwise the first text area.

use tracing::debug;

use wikipad_core::config::EditorConfig;

use crate::buffer::TextBuffer;

/// Identifies a text area on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    /// Owning form, if any
    pub form: Option<String>,
    pub name: String,
}

impl FieldId {
    pub fn new(form: Option<&str>, name: &str) -> Self {
        Self {
            form: form.map(str::to_string),
            name: name.to_string(),
        }
    }
}

/// The text areas of a page, in document order
pub struct SurfaceBinding {
    edit_form: String,
    edit_field: String,
    max_undo_history: usize,
    areas: Vec<(FieldId, TextBuffer)>,
}

impl SurfaceBinding {
    pub fn new(edit_form: impl Into<String>, edit_field: impl Into<String>) -> Self {
        Self {
            edit_form: edit_form.into(),
            edit_field: edit_field.into(),
            max_undo_history: EditorConfig::default().max_undo_history,
            areas: Vec::new(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        let mut binding = Self::new(config.edit_form.clone(), config.edit_field.clone());
        binding.max_undo_history = config.max_undo_history;
        binding
    }

    /// Register a text area
    pub fn add(&mut self, id: FieldId, buffer: TextBuffer) {
        self.areas.push((id, buffer));
    }

    /// Register a text area holding `text`, with the configured undo history
    pub fn add_text(&mut self, id: FieldId, text: &str) {
        let buffer = TextBuffer::from_str(text).with_max_undo_history(self.max_undo_history);
        self.add(id, buffer);
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn get(&self, id: &FieldId) -> Option<&TextBuffer> {
        self.areas.iter().find(|(area, _)| area == id).map(|(_, buffer)| buffer)
    }

    /// Resolve the edit area toolbar actions apply to
    pub fn resolve_mut(&mut self) -> Option<&mut TextBuffer> {
        let index = self
            .areas
            .iter()
            .position(|(id, _)| {
                id.form.as_deref() == Some(self.edit_form.as_str()) && id.name == self.edit_field
            })
            .or_else(|| (!self.areas.is_empty()).then_some(0))?;

        debug!("Resolved edit area {:?}", self.areas[index].0);
        Some(&mut self.areas[index].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TextSurface;

    #[test]
    fn test_prefers_edit_form_field() {
        let mut binding = SurfaceBinding::from_config(&EditorConfig::default());
        binding.add(FieldId::new(Some("search"), "q"), TextBuffer::from_str("query"));
        binding.add(FieldId::new(Some("editform"), "data"), TextBuffer::from_str("page body"));

        let surface = binding.resolve_mut().unwrap();
        assert_eq!(surface.text(), "page body");
    }

    #[test]
    fn test_falls_back_to_first_area() {
        let mut binding = SurfaceBinding::new("editform", "data");
        binding.add(FieldId::new(None, "comment"), TextBuffer::from_str("first"));
        binding.add(FieldId::new(Some("other"), "data"), TextBuffer::from_str("second"));

        assert_eq!(binding.resolve_mut().unwrap().text(), "first");
    }

    #[test]
    fn test_added_text_uses_configured_undo_history() {
        let config = EditorConfig {
            max_undo_history: 1,
            ..EditorConfig::default()
        };
        let mut binding = SurfaceBinding::from_config(&config);
        binding.add_text(FieldId::new(Some("editform"), "data"), "");

        let surface = binding.resolve_mut().unwrap();
        assert_eq!(surface.max_undo_history(), 1);
        surface.replace(0..0, "a").unwrap();
        surface.replace(1..1, "b").unwrap();
        assert!(surface.undo());
        assert!(!surface.undo());
        assert_eq!(surface.text(), "a");
    }

    #[test]
    fn test_empty_page() {
        let mut binding = SurfaceBinding::new("editform", "data");
        assert!(binding.is_empty());
        assert!(binding.resolve_mut().is_none());
    }
}
