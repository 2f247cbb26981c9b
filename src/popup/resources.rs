// src/popup/resources.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::item::ResourceId;

/// Resolves resource ids to displayable strings.
pub trait Resources {
    fn text(&self, id: ResourceId) -> Option<&str>;
    fn icon(&self, id: ResourceId) -> Option<&str>;
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResourceEntry {
    pub id: ResourceId,
    pub value: String,
}

/// In-memory resource table, usually loaded from the `[resources]` config section.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(from = "RawResourceTable", into = "RawResourceTable")]
pub struct ResourceTable {
    strings: HashMap<ResourceId, String>,
    icons: HashMap<ResourceId, String>,
}

// TOML tables only have string keys, so the on-disk form is a list of entries.
#[derive(Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
struct RawResourceTable {
    #[serde(default)]
    strings: Vec<ResourceEntry>,
    #[serde(default)]
    icons: Vec<ResourceEntry>,
}

impl From<RawResourceTable> for ResourceTable {
    fn from(raw: RawResourceTable) -> Self {
        let mut table = ResourceTable::default();
        for entry in raw.strings {
            table.insert_text(entry.id, entry.value);
        }
        for entry in raw.icons {
            table.insert_icon(entry.id, entry.value);
        }
        table
    }
}

impl From<ResourceTable> for RawResourceTable {
    fn from(table: ResourceTable) -> Self {
        let mut strings: Vec<ResourceEntry> = table
            .strings
            .into_iter()
            .map(|(id, value)| ResourceEntry { id, value })
            .collect();
        let mut icons: Vec<ResourceEntry> = table
            .icons
            .into_iter()
            .map(|(id, value)| ResourceEntry { id, value })
            .collect();
        strings.sort_by_key(|e| e.id);
        icons.sort_by_key(|e| e.id);
        RawResourceTable { strings, icons }
    }
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, id: ResourceId, value: impl Into<String>) {
        if id > 0 {
            self.strings.insert(id, value.into());
        }
    }

    pub fn insert_icon(&mut self, id: ResourceId, value: impl Into<String>) {
        if id > 0 {
            self.icons.insert(id, value.into());
        }
    }

    pub fn with_text(mut self, id: ResourceId, value: impl Into<String>) -> Self {
        self.insert_text(id, value);
        self
    }

    pub fn with_icon(mut self, id: ResourceId, value: impl Into<String>) -> Self {
        self.insert_icon(id, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.icons.is_empty()
    }
}

impl Resources for ResourceTable {
    fn text(&self, id: ResourceId) -> Option<&str> {
        self.strings.get(&id).map(String::as_str)
    }

    fn icon(&self, id: ResourceId) -> Option<&str> {
        self.icons.get(&id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_and_non_positive_ids_do_not_resolve() {
        let table = ResourceTable::new().with_text(0, "zero").with_text(-1, "neg").with_text(1, "one");
        assert_eq!(table.text(1), Some("one"));
        assert_eq!(table.text(0), None);
        assert_eq!(table.text(-1), None);
        assert_eq!(table.icon(1), None);
    }

    #[test]
    fn loads_from_toml_entry_lists() {
        let src = r#"
            strings = [{ id = 1, value = "Open" }, { id = 2, value = "Close" }]
            icons = [{ id = 42, value = "★" }]
        "#;
        let table: ResourceTable = toml::from_str(src).unwrap();
        assert_eq!(table.text(2), Some("Close"));
        assert_eq!(table.icon(42), Some("★"));
        assert!(!table.is_empty());
    }
}
