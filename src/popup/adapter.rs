// src/popup/adapter.rs
use tracing::{debug, trace};

use super::item::{MenuItem, ResourceId};
use super::theme::{PopupTheme, RowStyle};

/// Called with the row position and its entry whenever a row is clicked.
pub type OnMenuItemClick = Box<dyn FnMut(usize, &MenuItem)>;

/// Which background a row gets, based on where it sits in the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionClass {
    Top,
    Middle,
    Bottom,
}

impl PositionClass {
    /// The first row is always `Top`, even when it is also the last one.
    pub fn of(position: usize, count: usize) -> Self {
        if position == 0 {
            Self::Top
        } else if position + 1 == count {
            Self::Bottom
        } else {
            Self::Middle
        }
    }

    pub fn row_style<'a>(&self, theme: &'a PopupTheme) -> &'a RowStyle {
        match self {
            Self::Top => &theme.row_top,
            Self::Middle => &theme.row_middle,
            Self::Bottom => &theme.row_bottom,
        }
    }

    pub fn style(&self, theme: &PopupTheme, pressed: bool) -> ratatui::style::Style {
        self.row_style(theme).pick(pressed)
    }
}

/// Everything the renderer needs to draw one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowBinding {
    pub position: usize,
    pub icon: Option<ResourceId>,
    pub label: ResourceId,
    pub class: PositionClass,
}

pub struct MenuAdapter {
    items: Vec<MenuItem>,
    show_icon: bool,
    on_menu_item_click: Option<OnMenuItemClick>,
}

impl MenuAdapter {
    pub fn new(items: Vec<MenuItem>, show_icon: bool) -> Self {
        Self {
            items,
            show_icon,
            on_menu_item_click: None,
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, position: usize) -> Option<&MenuItem> {
        self.items.get(position)
    }

    pub fn show_icon(&self) -> bool {
        self.show_icon
    }

    pub fn set_data(&mut self, items: Vec<MenuItem>) {
        debug!("Menu adapter data replaced: {} rows", items.len());
        self.items = items;
    }

    pub fn set_show_icon(&mut self, show_icon: bool) {
        self.show_icon = show_icon;
    }

    pub fn set_on_menu_item_click(&mut self, listener: OnMenuItemClick) {
        self.on_menu_item_click = Some(listener);
    }

    pub fn bind(&self, position: usize) -> Option<RowBinding> {
        let item = self.items.get(position)?;
        let icon = if self.show_icon && item.has_icon() {
            Some(item.icon())
        } else {
            None
        };
        Some(RowBinding {
            position,
            icon,
            label: item.label(),
            class: PositionClass::of(position, self.items.len()),
        })
    }

    pub fn bind_all(&self) -> impl Iterator<Item = RowBinding> + '_ {
        (0..self.items.len()).filter_map(move |p| self.bind(p))
    }

    /// Closes the owning popup through `dismiss`, then notifies the click
    /// listener. The order lets the listener open another popup.
    pub fn on_row_click(&mut self, position: usize, dismiss: impl FnOnce()) -> bool {
        let Some(item) = self.items.get(position).cloned() else {
            debug!("Ignoring click on missing row {}", position);
            return false;
        };
        trace!("Row {} clicked (item id {})", position, item.id());
        dismiss();
        if let Some(listener) = self.on_menu_item_click.as_mut() {
            listener(position, &item);
        }
        true
    }
}
