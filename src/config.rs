// src/config.rs
use popmenu::popup::{
    menu::{MATCH_PARENT, WRAP_CONTENT},
    MenuItem, PopupMenu, ResourceTable,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use xdg::BaseDirectories;

use crate::errors::PopmenuError;

pub const APP_NAME: &str = "popmenu";
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

// Ids used by the built-in demo menu.
pub const ITEM_REFRESH: i32 = 1;
pub const ITEM_TOGGLE_ICONS: i32 = 2;
pub const ITEM_REOPEN: i32 = 3;
pub const ITEM_CLEAR_LOG: i32 = 4;
pub const ITEM_QUIT: i32 = 5;

// Main configuration structure, mapping to config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default)]
    pub popup: PopupSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_items")]
    pub items: Vec<MenuItem>,
    #[serde(default = "default_resources")]
    pub resources: ResourceTable,
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_anchor_label")]
    pub anchor_label: String,
    #[serde(default = "default_max_log_entries")]
    pub max_log_entries: usize,
}

fn default_refresh_interval_ms() -> u64 {
    16
}
fn default_anchor_label() -> String {
    " Menu ▾ ".to_string()
}
fn default_max_log_entries() -> usize {
    500
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        InterfaceConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
            anchor_label: default_anchor_label(),
            max_log_entries: default_max_log_entries(),
        }
    }
}

/// The `[popup]` section; mirrors the `PopupMenu` setters.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PopupSettings {
    #[serde(default = "default_width")]
    pub width: i32, // -1 = match parent, -2 = wrap content
    #[serde(default)]
    pub height: Option<i32>, // unset = one row per item
    #[serde(default = "default_true")]
    pub show_icon: bool,
    #[serde(default = "default_true")]
    pub background_dark: bool,
    #[serde(default = "default_true")]
    pub show_animation: bool,
    #[serde(default = "default_animation_style")]
    pub animation_style: i32,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_reset_duration_ms")]
    pub reset_duration_ms: u64,
}

fn default_width() -> i32 {
    WRAP_CONTENT
}
fn default_true() -> bool {
    true
}
fn default_animation_style() -> i32 {
    popmenu::popup::animation::DEFAULT_ANIMATION_STYLE
}
fn default_alpha() -> f32 {
    0.75
}
fn default_duration_ms() -> u64 {
    240
}
fn default_reset_duration_ms() -> u64 {
    300
}

impl Default for PopupSettings {
    fn default() -> Self {
        PopupSettings {
            width: default_width(),
            height: None,
            show_icon: default_true(),
            background_dark: default_true(),
            show_animation: default_true(),
            animation_style: default_animation_style(),
            alpha: default_alpha(),
            duration_ms: default_duration_ms(),
            reset_duration_ms: default_reset_duration_ms(),
        }
    }
}

impl PopupSettings {
    /// Applies the settings to a fresh menu. Out-of-range values are dropped
    /// by the setters and the library defaults stay in place.
    pub fn to_menu(&self) -> PopupMenu {
        let mut menu = PopupMenu::new()
            .width(self.width)
            .show_icon(self.show_icon)
            .enable_background_dark(self.background_dark)
            .show_animation(self.show_animation)
            .animation_style(self.animation_style)
            .alpha(self.alpha)
            .duration(Duration::from_millis(self.duration_ms))
            .reset_duration(Duration::from_millis(self.reset_duration_ms));
        if let Some(height) = self.height {
            menu = menu.height(height);
        }
        menu
    }

    pub fn describe_width(&self) -> String {
        match self.width {
            MATCH_PARENT => "match parent".to_string(),
            w if w <= 0 => "wrap content".to_string(),
            w => w.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_dir")]
    pub log_dir: String, // Path, can use ~
    #[serde(default = "default_log_file")]
    pub file_name: String,
    #[serde(default = "default_rotate_daily")]
    pub rotate_daily: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.local/state/popmenu".to_string()
}
fn default_log_file() -> String {
    "popmenu.log".to_string()
}
fn default_rotate_daily() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            log_dir: default_log_dir(),
            file_name: default_log_file(),
            rotate_daily: default_rotate_daily(),
        }
    }
}

impl LoggingConfig {
    pub fn expanded_log_dir(&self) -> Result<PathBuf, PopmenuError> {
        shellexpand::full(&self.log_dir)
            .map(|dir| PathBuf::from(dir.into_owned()))
            .map_err(|e| PopmenuError::LogDirError {
                path: self.log_dir.clone(),
                message: e.to_string(),
            })
    }
}

fn default_items() -> Vec<MenuItem> {
    vec![
        MenuItem::with_id(ITEM_REFRESH, 101, ITEM_REFRESH),
        MenuItem::with_id(ITEM_TOGGLE_ICONS, 102, ITEM_TOGGLE_ICONS),
        MenuItem::with_id_and_label(ITEM_REOPEN, ITEM_REOPEN),
        MenuItem::with_id(ITEM_CLEAR_LOG, 104, ITEM_CLEAR_LOG),
        MenuItem::with_id(ITEM_QUIT, 105, ITEM_QUIT),
    ]
}

fn default_resources() -> ResourceTable {
    ResourceTable::new()
        .with_text(ITEM_REFRESH, "Refresh")
        .with_text(ITEM_TOGGLE_ICONS, "Toggle icons")
        .with_text(ITEM_REOPEN, "Reopen menu")
        .with_text(ITEM_CLEAR_LOG, "Clear log")
        .with_text(ITEM_QUIT, "Quit")
        .with_icon(101, "↻")
        .with_icon(102, "◐")
        .with_icon(104, "✗")
        .with_icon(105, "⏻")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            interface: InterfaceConfig::default(),
            popup: PopupSettings::default(),
            logging: LoggingConfig::default(),
            items: default_items(),
            resources: default_resources(),
            source_path: None,
        }
    }
}

impl Config {
    /// Loads `config_path_override`, or the XDG config file if one exists.
    /// Without either, the built-in defaults are used.
    pub fn load(config_path_override: Option<&Path>) -> Result<Self, PopmenuError> {
        let config_path = match config_path_override {
            Some(path) => {
                debug!("Using provided config path override: {}", path.display());
                path.to_path_buf()
            }
            None => {
                let xdg_dirs = BaseDirectories::with_prefix(APP_NAME)?;
                match xdg_dirs.find_config_file(DEFAULT_CONFIG_FILENAME) {
                    Some(path) => path,
                    None => {
                        info!("No {} found, using built-in configuration", DEFAULT_CONFIG_FILENAME);
                        return Ok(Config::default());
                    }
                }
            }
        };

        info!("Loading configuration from {}", config_path.display());
        let config_str = std::fs::read_to_string(&config_path)?;
        let mut config = Self::from_toml(&config_str)?;
        config.source_path = Some(config_path);
        Ok(config)
    }

    pub fn from_toml(config_str: &str) -> Result<Self, PopmenuError> {
        Ok(toml::from_str(config_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popmenu::popup::menu::Dimension;
    use popmenu::popup::Resources;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.items.len(), 5);
        assert_eq!(config.resources.text(ITEM_QUIT), Some("Quit"));
        assert_eq!(config.popup.alpha, 0.75);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.interface.refresh_interval_ms, 16);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let src = r#"
            [popup]
            width = 30
            background_dark = false

            [[items]]
            id = 7
            label = 70

            [resources]
            strings = [{ id = 70, value = "Only item" }]
        "#;
        let config = Config::from_toml(src).unwrap();
        assert_eq!(config.popup.width, 30);
        assert!(!config.popup.background_dark);
        assert!(config.popup.show_icon);
        assert_eq!(config.items, vec![MenuItem::with_id_and_label(7, 70)]);
        assert_eq!(config.resources.text(70), Some("Only item"));
        assert_eq!(config.resources.text(ITEM_QUIT), None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("[popup]\nopacity = 0.5").unwrap_err();
        assert!(matches!(err, PopmenuError::TomlError(_)));
    }

    #[test]
    fn settings_build_a_matching_menu() {
        let settings = PopupSettings {
            width: MATCH_PARENT,
            height: Some(4),
            alpha: 2.0,
            ..PopupSettings::default()
        };
        let menu = settings.to_menu();
        assert_eq!(menu.config().width, Dimension::MatchParent);
        assert_eq!(menu.config().height, Some(Dimension::Exact(4)));
        assert_eq!(menu.config().alpha, 0.75);
        assert_eq!(settings.describe_width(), "match parent");
    }

    #[test]
    fn log_dir_expands_home() {
        std::env::set_var("HOME", "/home/tester");
        let logging = LoggingConfig {
            log_dir: "~/logs".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(logging.expanded_log_dir().unwrap(), PathBuf::from("/home/tester/logs"));
    }
}
