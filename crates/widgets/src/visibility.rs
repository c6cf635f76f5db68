//! Visibility Toggling
//! 
//! Shows and hides named field groups of a form depending on the value of
//! another field, switches tab panels and checks or clears checkbox columns.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use wikipad_core::{Event, EventBus};

/// Visibility state of named groups
#[derive(Debug, Clone, Default)]
pub struct VisibilityToggler {
    groups: BTreeMap<String, bool>,
}

impl VisibilityToggler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group with its initial visibility
    pub fn register(&mut self, group: impl Into<String>, visible: bool) {
        self.groups.insert(group.into(), visible);
    }

    pub fn is_visible(&self, group: &str) -> bool {
        self.groups.get(group).copied().unwrap_or(false)
    }

    pub fn show(&mut self, group: &str) {
        self.set(group, true);
    }

    pub fn hide(&mut self, group: &str) {
        self.set(group, false);
    }

    pub fn set(&mut self, group: &str, visible: bool) {
        if let Some(state) = self.groups.get_mut(group) {
            *state = visible;
        }
    }

    /// Among the groups named `prefix*`, show only `prefix` + `value`.
    /// Returns the shown group, if one matched.
    pub fn show_only(&mut self, prefix: &str, value: &str) -> Option<String> {
        let wanted = format!("{}{}", prefix, value);
        let mut shown = None;
        for (name, visible) in self.groups.iter_mut().filter(|(name, _)| name.starts_with(prefix)) {
            *visible = *name == wanted;
            if *visible {
                shown = Some(name.clone());
            }
        }
        shown
    }

    pub fn visible_groups(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

const INTERVAL_BLOCK: &str = "block-widget-rrule_interval";
const UNTIL_BLOCK: &str = "block-widget-rrule_until";
const BYDAY_BLOCK: &str = "block-widget-rrule_byday";
const INTERVAL_LABEL: &str = "rrule_interval-";
const FREQUENCIES: [&str; 4] = ["daily", "weekly", "monthly", "yearly"];

/// Recurrence parameters of a calendar event form
pub struct RecurrenceFields {
    groups: VisibilityToggler,
    events: Option<Arc<EventBus>>,
}

impl RecurrenceFields {
    pub fn new() -> Self {
        let mut groups = VisibilityToggler::new();
        for group in [INTERVAL_BLOCK, UNTIL_BLOCK, BYDAY_BLOCK] {
            groups.register(group, true);
        }
        for frequency in FREQUENCIES {
            groups.register(format!("{}{}", INTERVAL_LABEL, frequency), true);
        }
        Self { groups, events: None }
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn groups(&self) -> &VisibilityToggler {
        &self.groups
    }

    /// Update the form for a new frequency value (`""` means no recurrence)
    pub fn update(&mut self, value: &str) {
        if value.is_empty() {
            self.groups.hide(INTERVAL_BLOCK);
            self.groups.hide(UNTIL_BLOCK);
        } else {
            self.groups.show(INTERVAL_BLOCK);
            self.groups.show(UNTIL_BLOCK);
            if let Some(group) = self.groups.show_only(INTERVAL_LABEL, value) {
                if let Some(events) = &self.events {
                    events.emit(Event::GroupShown { group });
                }
            }
        }

        self.groups.set(BYDAY_BLOCK, value == "weekly");
        debug!("Recurrence fields for {:?}: {:?}", value, self.groups.visible_groups());
    }
}

impl Default for RecurrenceFields {
    fn default() -> Self {
        Self::new()
    }
}

/// Tab menu of the add-link and add-image dialogs
pub struct TabSet {
    tabs: Vec<String>,
    selected: Option<usize>,
    events: Option<Arc<EventBus>>,
}

impl TabSet {
    /// Tabs are identified by the anchor of their panel, e.g. `#browse`
    pub fn new<I, S>(tabs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tabs: tabs.into_iter().map(Into::into).collect(),
            selected: None,
            events: None,
        }
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// Show the tab named by the location hash, else the first one
    pub fn init(&mut self, location_hash: Option<&str>) -> Option<&str> {
        let index = location_hash
            .and_then(|hash| self.tabs.iter().position(|tab| tab == hash))
            .or_else(|| (!self.tabs.is_empty()).then_some(0))?;
        self.selected = Some(index);
        Some(self.tabs[index].as_str())
    }

    /// Show exactly the panel of `id`; unknown ids leave the state unchanged
    pub fn select(&mut self, id: &str) -> bool {
        let Some(index) = self.tabs.iter().position(|tab| tab == id) else {
            return false;
        };
        self.selected = Some(index);
        if let Some(events) = &self.events {
            events.emit(Event::TabSelected { id: id.to_string() });
        }
        true
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|index| self.tabs[index].as_str())
    }

    pub fn is_shown(&self, id: &str) -> bool {
        self.selected() == Some(id)
    }
}

/// Checkbox column of a browse table
#[derive(Debug, Clone)]
pub struct CheckboxGroup {
    checked: Vec<bool>,
}

impl CheckboxGroup {
    pub fn new(count: usize) -> Self {
        Self {
            checked: vec![false; count],
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(state) = self.checked.get_mut(index) {
            *state = !*state;
        }
    }

    /// Select all or none
    pub fn set_all(&mut self, checked: bool) {
        self.checked.iter_mut().for_each(|state| *state = checked);
    }

    pub fn checked_count(&self) -> usize {
        self.checked.iter().filter(|state| **state).count()
    }
}
