// src/tui/app.rs

use popmenu::popup::{MenuItem, PopupMenu, Resources};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Level};

use crate::config::{Config, ITEM_CLEAR_LOG, ITEM_QUIT, ITEM_REFRESH, ITEM_REOPEN, ITEM_TOGGLE_ICONS};

use super::theme::AppTheme;

// New struct for TUI log entries
#[derive(Clone, Debug)]
pub struct UILogEntry {
    pub timestamp: String, // Formatted in the tracing layer
    pub level: Level,
    pub target: String,
    pub message: String,
}

// App-level events, posted from popup callbacks and handled by the loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    MenuItemClicked { position: usize, item: MenuItem },
    MenuDismissed,
}

pub struct App {
    pub should_quit: bool,
    pub config: Arc<Config>,
    pub theme: Arc<AppTheme>,

    pub menu: PopupMenu,
    pub anchor_area: Rect, // Set by the header widget on every draw
    pub last_selection: Option<String>,
    pub refresh_count: u32,
    pub dismiss_count: u32,

    pub log_entries: Vec<UILogEntry>,
    pub log_receiver: Option<mpsc::UnboundedReceiver<UILogEntry>>,

    pub event_sender: mpsc::UnboundedSender<AppEvent>,
    pub event_receiver: Option<mpsc::UnboundedReceiver<AppEvent>>,
}

impl App {
    pub fn new(config: Arc<Config>, log_receiver: Option<mpsc::UnboundedReceiver<UILogEntry>>) -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        let click_sender = event_sender.clone();
        let dismiss_sender = event_sender.clone();
        let menu = config
            .popup
            .to_menu()
            .add_menu_items(config.items.iter().cloned())
            .on_menu_item_click(move |position, item| {
                let _ = click_sender.send(AppEvent::MenuItemClicked {
                    position,
                    item: item.clone(),
                });
            })
            .on_before_show(|window| debug!("Showing popup with animation {:?}", window.animation()))
            .on_dismiss(move || {
                let _ = dismiss_sender.send(AppEvent::MenuDismissed);
            });

        Self {
            should_quit: false,
            config,
            theme: Arc::new(AppTheme::default()),
            menu,
            anchor_area: Rect::default(),
            last_selection: None,
            refresh_count: 0,
            dismiss_count: 0,
            log_entries: Vec::new(),
            log_receiver,
            event_sender,
            event_receiver: Some(event_receiver),
        }
    }

    pub fn open_menu(&mut self) {
        if self.anchor_area.width == 0 {
            warn!("Menu anchor not laid out yet, ignoring open request");
            return;
        }
        self.menu.show_as_dropdown_with_offset(self.anchor_area, 0, 0);
    }

    pub fn tick(&mut self, now: Instant) {
        self.menu.tick(now);
        self.drain_logs();
    }

    pub fn drain_logs(&mut self) {
        if let Some(ref mut receiver) = self.log_receiver {
            while let Ok(log_entry) = receiver.try_recv() {
                self.log_entries.push(log_entry);
            }
        }
        let max_logs = self.config.interface.max_log_entries;
        if self.log_entries.len() > max_logs {
            let overflow = self.log_entries.len() - max_logs;
            self.log_entries.drain(0..overflow);
        }
    }

    pub fn label_for(&self, item: &MenuItem) -> String {
        self.config
            .resources
            .text(item.label())
            .map(str::to_string)
            .unwrap_or_else(|| format!("item #{}", item.id()))
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::MenuItemClicked { position, item } => {
                let label = self.label_for(&item);
                info!("Menu item {} clicked: {}", position, label);
                self.last_selection = Some(label);
                self.run_item_action(&item);
            }
            AppEvent::MenuDismissed => {
                self.dismiss_count += 1;
            }
        }
    }

    fn run_item_action(&mut self, item: &MenuItem) {
        match item.id() {
            ITEM_REFRESH => {
                self.refresh_count += 1;
                info!("Refreshed ({} so far)", self.refresh_count);
            }
            ITEM_TOGGLE_ICONS => {
                if let Some(adapter) = self.menu.adapter_mut() {
                    let show = !adapter.show_icon();
                    adapter.set_show_icon(show);
                    info!("Menu icons {}", if show { "shown" } else { "hidden" });
                }
            }
            ITEM_REOPEN => self.open_menu(),
            ITEM_CLEAR_LOG => self.log_entries.clear(),
            ITEM_QUIT => self.should_quit = true,
            other => debug!("No action bound to menu item id {}", other),
        }
    }
}
