// src/popup/mod.rs

pub mod adapter;
pub mod animation;
pub mod dim;
pub mod item;
pub mod menu;
pub mod resources;
pub mod theme;
pub mod widget;

pub use adapter::{MenuAdapter, OnMenuItemClick, PositionClass, RowBinding};
pub use animation::AnimationStyle;
pub use dim::{Backdrop, BackdropWidget};
pub use item::{MenuItem, ResourceId};
pub use menu::{Dimension, Overlay, OverlayWindow, PopupConfig, PopupMenu, PopupState};
pub use resources::{ResourceEntry, ResourceTable, Resources};
pub use theme::{PopupTheme, RowStyle};
pub use widget::PopupMenuWidget;
