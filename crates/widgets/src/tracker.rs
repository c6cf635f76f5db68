//! Tracker Helpers
//! 
//! Comment quoting for issue replies, and option lists that depend on the
//! selected products.

use std::collections::{HashMap, HashSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use wikipad_core::Result;

static LINK_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<a href=""#).expect("valid regex"));
static LINK_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"">.*</a>"#).expect("valid regex"));

/// Quote a rendered comment as the start of a reply
pub fn quote_reply(id: u32, html: &str) -> String {
    let mut comment = html
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
        .replace("&nbsp;", " ");

    // Keep the URL of an auto-linked comment, drop the markup
    if LINK_OPEN.is_match(&comment) && LINK_CLOSE.is_match(&comment) {
        comment = LINK_OPEN.replace_all(&comment, "").into_owned();
        comment = LINK_CLOSE.replace_all(&comment, "").into_owned();
    }

    let mut reply = format!("(In reply to comment #{})\n", id);
    for line in comment.split(['\r', '\n']) {
        reply.push_str("> ");
        reply.push_str(line);
        reply.push('\n');
    }
    reply.push('\n');
    reply
}

/// An entry of a product's dependent list
#[derive(Debug, Clone, Deserialize)]
pub struct ListOption {
    pub id: Value,
    pub value: String,
}

impl ListOption {
    fn id_string(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// An `<option>` of a select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }

    /// Placeholder entries (`""` and `"-1"`) are not tied to a product
    fn is_placeholder(&self) -> bool {
        self.value.is_empty() || self.value == "-1"
    }
}

/// Per-product lists (versions, components, ...) of a tracker
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: HashMap<String, HashMap<String, Vec<ListOption>>>,
}

impl ProductCatalog {
    /// Load the catalog embedded in the tracker page
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the options of `list` for the selected products, keeping the
    /// placeholder entries and the current selection
    pub fn rebuild_options(
        &self,
        list: &str,
        current: &[SelectOption],
        selected_products: &[&str],
    ) -> Vec<SelectOption> {
        let selected: HashSet<&str> = current
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.as_str())
            .collect();

        let mut options: Vec<SelectOption> = current
            .iter()
            .filter(|option| option.is_placeholder())
            .cloned()
            .collect();

        for product in selected_products {
            let Some(entries) = self.products.get(*product).and_then(|lists| lists.get(list)) else {
                continue;
            };
            for entry in entries {
                let id = entry.id_string();
                let is_selected = selected.contains(id.as_str());
                options.push(SelectOption::new(id, entry.value.clone(), is_selected));
            }
        }
        options
    }
}
