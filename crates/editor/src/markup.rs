//! Selection Markup
//! 
//! Wraps the selected text of an edit area in a pair of reStructuredText
//! delimiters, or inserts a placeholder sample when nothing is selected.
//! Link markup may also append a hyperlink target line below the current
//! line.
//!
//! All offsets are character offsets.

use ropey::Rope;
use tracing::debug;

use wikipad_core::Result;

use crate::selection::Selection;
use crate::surface::TextSurface;

/// Where a hyperlink target line points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Point to the request's sample text
    ReuseSample,
    /// Point to this URI
    Explicit(String),
}

/// Parameters of a markup insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRequest {
    pub open: String,
    pub close: String,
    pub sample: String,
    pub target: Option<LinkTarget>,
}

impl MarkupRequest {
    pub fn new(open: impl Into<String>, close: impl Into<String>, sample: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            sample: sample.into(),
            target: None,
        }
    }

    /// Also insert a hyperlink target line
    pub fn with_target(mut self, target: LinkTarget) -> Self {
        self.target = Some(target);
        self
    }
}

/// Outcome of a markup insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// New buffer content
    pub buffer: String,
    /// Selection to apply after the edit
    pub selection: Selection,
    /// Whether the sample replaced an empty selection
    pub used_sample: bool,
}

/// The hyperlink target line appended for link markup
pub fn link_target_line(label: &str, target: &str) -> String {
    format!("\n\n.. _`{}`: {}\n", label, target)
}

/// Apply `request` to `selection` of `buffer`.
///
/// Fails with `InvalidSelection` when the selection does not fit the buffer.
pub fn apply_markup(buffer: &str, selection: Selection, request: &MarkupRequest) -> Result<EditResult> {
    let mut rope = Rope::from_str(buffer);
    selection.validate(rope.len_chars())?;
    let Selection { start, end } = selection;

    let mut sel_text = rope.slice(start..end).to_string();
    let mut close = request.close.clone();
    let used_sample = if sel_text.is_empty() {
        sel_text = request.sample.clone();
        true
    } else {
        // Only one trailing space moves outside the markup
        if sel_text.ends_with(' ') {
            sel_text.pop();
            close.push(' ');
        }
        false
    };

    rope.remove(start..end);
    rope.insert(start, &format!("{}{}{}", request.open, sel_text, close));

    if let (Some(target), false) = (&request.target, used_sample) {
        let target = match target {
            LinkTarget::ReuseSample => request.sample.as_str(),
            LinkTarget::Explicit(uri) => uri.as_str(),
        };
        let line_end = rope
            .chars_at(start)
            .position(|c| c == '\n')
            .map(|i| start + i)
            .unwrap_or_else(|| rope.len_chars());
        rope.insert(line_end, &link_target_line(&sel_text, target));
    }

    let open_len = request.open.chars().count();
    let sel_len = sel_text.chars().count();
    let selection = if used_sample {
        Selection::new(start + open_len, start + open_len + sel_len)
    } else {
        Selection::caret(start + open_len + sel_len + close.chars().count())
    };

    debug!(
        "Markup applied at {}..{} (sample: {}), new selection {:?}",
        start, end, used_sample, selection
    );

    Ok(EditResult {
        buffer: rope.to_string(),
        selection,
        used_sample,
    })
}

/// Apply `request` to the current selection of `surface`.
///
/// The text is written back with a single replacement starting at the
/// selection, then the new selection is set and the scroll offset read
/// before the edit is restored.
pub fn apply_to_surface<S>(surface: &mut S, request: &MarkupRequest) -> Result<EditResult>
where
    S: TextSurface + ?Sized,
{
    let scroll = surface.scroll_offset();
    let selection = surface.selection();
    let len = surface.char_len();
    let result = apply_markup(&surface.text(), selection, request)?;

    let tail: String = result.buffer.chars().skip(selection.start).collect();
    surface.replace_range(selection.start..len, &tail)?;
    surface.set_selection(result.selection)?;
    surface.set_scroll_offset(scroll);

    Ok(result)
}
