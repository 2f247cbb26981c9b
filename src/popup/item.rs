// src/popup/item.rs
use serde::{Deserialize, Serialize};

/// Integer handle resolved through [`crate::popup::Resources`].
/// Zero and negative values never resolve to anything.
pub type ResourceId = i32;

/// One entry of a popup menu.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MenuItem {
    #[serde(default)]
    id: i32,
    #[serde(default)]
    icon: ResourceId,
    label: ResourceId,
}

impl MenuItem {
    pub fn new(label: ResourceId) -> Self {
        Self { id: 0, icon: 0, label }
    }

    pub fn with_icon(icon: ResourceId, label: ResourceId) -> Self {
        Self { id: 0, icon, label }
    }

    pub fn with_id(id: i32, icon: ResourceId, label: ResourceId) -> Self {
        Self { id, icon, label }
    }

    pub fn with_id_and_label(id: i32, label: ResourceId) -> Self {
        Self { id, icon: 0, label }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn icon(&self) -> ResourceId {
        self.icon
    }

    pub fn label(&self) -> ResourceId {
        self.label
    }

    /// True when the icon reference can resolve to something.
    pub fn has_icon(&self) -> bool {
        self.icon > 0
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    pub fn set_icon(&mut self, icon: ResourceId) {
        self.icon = icon;
    }

    pub fn set_label(&mut self, label: ResourceId) {
        self.label = label;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_leave_unset_fields_at_zero() {
        let plain = MenuItem::new(7);
        assert_eq!((plain.id(), plain.icon(), plain.label()), (0, 0, 7));
        assert!(!plain.has_icon());

        let iconed = MenuItem::with_icon(42, 8);
        assert_eq!((iconed.id(), iconed.icon(), iconed.label()), (0, 42, 8));
        assert!(iconed.has_icon());

        let full = MenuItem::with_id(3, 42, 9);
        assert_eq!((full.id(), full.icon(), full.label()), (3, 42, 9));

        let no_icon = MenuItem::with_id_and_label(4, 10);
        assert_eq!((no_icon.id(), no_icon.icon(), no_icon.label()), (4, 0, 10));
    }

    #[test]
    fn zero_label_is_accepted() {
        let item = MenuItem::new(0);
        assert_eq!(item.label(), 0);
    }

    #[test]
    fn setters_replace_fields() {
        let mut item = MenuItem::new(1);
        item.set_icon(-5);
        assert!(!item.has_icon());
        item.set_icon(12);
        item.set_id(99);
        item.set_label(2);
        assert_eq!(item, MenuItem::with_id(99, 12, 2));
    }

    #[test]
    fn deserializes_with_optional_id_and_icon() {
        let item: MenuItem = toml::from_str("label = 5").unwrap();
        assert_eq!(item, MenuItem::new(5));
        let item: MenuItem = toml::from_str("id = 2\nicon = 3\nlabel = 4").unwrap();
        assert_eq!(item, MenuItem::with_id(2, 3, 4));
    }
}
