// src/popup/menu.rs
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

use super::adapter::{MenuAdapter, OnMenuItemClick};
use super::animation::{AnimationStyle, DEFAULT_ANIMATION_STYLE};
use super::dim::{Backdrop, OPAQUE};
use super::item::MenuItem;

/// Raw size sentinel: fill the available frame.
pub const MATCH_PARENT: i32 = -1;
/// Raw size sentinel: size to the content.
pub const WRAP_CONTENT: i32 = -2;
/// Terminal rows taken by one menu row.
pub const ROW_HEIGHT: u16 = 1;

pub const DEFAULT_ALPHA: f32 = 0.75;
pub const DEFAULT_DIM_DURATION: Duration = Duration::from_millis(240);
pub const DEFAULT_RESET_DURATION: Duration = Duration::from_millis(300);

pub type OnBeforeShow = Box<dyn FnMut(&OverlayWindow)>;
pub type OnDismiss = Box<dyn FnMut()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    MatchParent,
    WrapContent,
    Exact(u16),
}

impl Dimension {
    /// Non-positive values other than `MATCH_PARENT` mean wrap-content.
    pub fn from_raw(raw: i32) -> Self {
        if raw == MATCH_PARENT {
            Self::MatchParent
        } else if raw <= 0 {
            Self::WrapContent
        } else {
            Self::Exact(raw.min(u16::MAX as i32) as u16)
        }
    }
}

/// Height used when none was configured.
pub fn default_height(item_count: usize) -> u16 {
    let rows = item_count.max(1).min(u16::MAX as usize) as u16;
    rows.saturating_mul(ROW_HEIGHT)
}

#[derive(Clone, Debug, PartialEq)]
pub struct PopupConfig {
    /// `None` until set; resolved from the entry count when the overlay is built.
    pub height: Option<Dimension>,
    pub width: Dimension,
    pub show_icon: bool,
    pub background_dark: bool,
    pub show_animation: bool,
    pub animation_style: i32,
    pub alpha: f32,
    pub duration: Duration,
    pub reset_duration: Duration,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            height: None,
            width: Dimension::WrapContent,
            show_icon: true,
            background_dark: true,
            show_animation: true,
            animation_style: DEFAULT_ANIMATION_STYLE,
            alpha: DEFAULT_ALPHA,
            duration: DEFAULT_DIM_DURATION,
            reset_duration: DEFAULT_RESET_DURATION,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupState {
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Dropdown { anchor: Rect, x_offset: i16, y_offset: i16 },
    Location { x: u16, y: u16 },
}

impl Placement {
    /// Top-left corner before clamping to the frame.
    pub fn origin(&self) -> (i32, i32) {
        match *self {
            Self::Dropdown { anchor, x_offset, y_offset } => (
                anchor.x as i32 + x_offset as i32,
                anchor.bottom() as i32 + y_offset as i32,
            ),
            Self::Location { x, y } => (x as i32, y as i32),
        }
    }
}

/// The floating surface. Its size, animation and dim settings are fixed when
/// it is built.
#[derive(Debug)]
pub struct OverlayWindow {
    width: Dimension,
    height: Dimension,
    animation: Option<AnimationStyle>,
    background_dark: bool,
    alpha: f32,
    duration: Duration,
    reset_duration: Duration,

    state: PopupState,
    placement: Option<Placement>,
    shown_at: Option<Instant>,
    selected: Option<usize>,
    pressed: Option<usize>,

    // Filled in by the widget on every draw, used for hit testing.
    area: Option<Rect>,
    rows_area: Option<Rect>,
    first_row: usize,
    visible_rows: usize,
}

impl OverlayWindow {
    fn new(config: &PopupConfig, height: Dimension) -> Self {
        Self {
            width: config.width,
            height,
            animation: config
                .show_animation
                .then(|| AnimationStyle::from_id(config.animation_style)),
            background_dark: config.background_dark,
            alpha: config.alpha,
            duration: config.duration,
            reset_duration: config.reset_duration,
            state: PopupState::Hidden,
            placement: None,
            shown_at: None,
            selected: None,
            pressed: None,
            area: None,
            rows_area: None,
            first_row: 0,
            visible_rows: 0,
        }
    }

    pub fn width(&self) -> Dimension {
        self.width
    }

    pub fn height(&self) -> Dimension {
        self.height
    }

    pub fn animation(&self) -> Option<AnimationStyle> {
        self.animation
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn is_showing(&self) -> bool {
        self.state == PopupState::Visible
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn shown_at(&self) -> Option<Instant> {
        self.shown_at
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn pressed(&self) -> Option<usize> {
        self.pressed
    }

    /// Pressed or keyboard-activated rows use the pressed appearance.
    pub fn is_row_active(&self, position: usize) -> bool {
        self.pressed == Some(position) || self.selected == Some(position)
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    pub fn first_row(&self) -> usize {
        self.first_row
    }

    pub fn set_layout(&mut self, area: Rect, rows_area: Rect, first_row: usize, visible_rows: usize) {
        self.area = Some(area);
        self.rows_area = Some(rows_area);
        self.first_row = first_row;
        self.visible_rows = visible_rows;
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.is_some_and(|area| rect_contains(area, column, row))
    }

    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let rows = self.rows_area?;
        if !rect_contains(rows, column, row) {
            return None;
        }
        let offset = ((row - rows.y) / ROW_HEIGHT) as usize;
        (offset < self.visible_rows).then_some(self.first_row + offset)
    }

    fn open(&mut self, placement: Placement) {
        self.placement = Some(placement);
        self.shown_at = Some(Instant::now());
        self.pressed = None;
        self.state = PopupState::Visible;
    }

    fn close(&mut self) {
        self.state = PopupState::Hidden;
        self.pressed = None;
        self.area = None;
        self.rows_area = None;
    }
}

fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.left() && column < area.right() && row >= area.top() && row < area.bottom()
}

pub struct Overlay {
    pub window: OverlayWindow,
    pub adapter: MenuAdapter,
}

/// A dropdown menu: configure with the chained setters, add items, then show
/// it below an anchor area.
///
/// The overlay is built on the first show (or an explicit [`PopupMenu::build`])
/// and reused afterwards. Size, animation and dim settings are copied into it
/// at that point, so setters called later only affect the stored config.
pub struct PopupMenu {
    config: PopupConfig,
    items: Vec<MenuItem>,
    on_menu_item_click: Option<OnMenuItemClick>,
    on_before_show: Option<OnBeforeShow>,
    on_dismiss: Option<OnDismiss>,
    overlay: Option<Overlay>,
    backdrop: Backdrop,
}

impl Default for PopupMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupMenu {
    pub fn new() -> Self {
        Self::with_config(PopupConfig::default())
    }

    pub fn with_config(config: PopupConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            on_menu_item_click: None,
            on_before_show: None,
            on_dismiss: None,
            overlay: None,
            backdrop: Backdrop::new(),
        }
    }

    fn note_if_built(&self, setting: &str) {
        if self.overlay.is_some() {
            debug!("Popup overlay already built, '{}' change applies to config only", setting);
        }
    }

    /// Row area height in cells. An explicit size excludes the border, so
    /// `height(4)` draws a six-row window. See [`Dimension::from_raw`] for
    /// the sentinels.
    pub fn height(mut self, height: i32) -> Self {
        self.note_if_built("height");
        self.config.height = Some(Dimension::from_raw(height));
        self
    }

    /// Content width in cells, border excluded: `width(20)` draws a window 22
    /// columns wide. `MATCH_PARENT` takes the whole frame, border included.
    pub fn width(mut self, width: i32) -> Self {
        self.note_if_built("width");
        self.config.width = Dimension::from_raw(width);
        self
    }

    pub fn show_icon(mut self, show: bool) -> Self {
        self.note_if_built("show_icon");
        self.config.show_icon = show;
        self
    }

    pub fn enable_background_dark(mut self, enable: bool) -> Self {
        self.note_if_built("background_dark");
        self.config.background_dark = enable;
        self
    }

    /// Ignored unless `alpha` is within `0.0..=1.0`.
    pub fn alpha(mut self, alpha: f32) -> Self {
        if (0.0..=1.0).contains(&alpha) {
            self.note_if_built("alpha");
            self.config.alpha = alpha;
        }
        self
    }

    /// Dim duration. Zero is ignored.
    pub fn duration(mut self, duration: Duration) -> Self {
        if !duration.is_zero() {
            self.note_if_built("duration");
            self.config.duration = duration;
        }
        self
    }

    /// Undim duration. Zero is ignored.
    pub fn reset_duration(mut self, duration: Duration) -> Self {
        if !duration.is_zero() {
            self.note_if_built("reset_duration");
            self.config.reset_duration = duration;
        }
        self
    }

    pub fn show_animation(mut self, show: bool) -> Self {
        self.note_if_built("show_animation");
        self.config.show_animation = show;
        self
    }

    /// Ignored unless `style` is positive.
    pub fn animation_style(mut self, style: i32) -> Self {
        if style > 0 {
            self.note_if_built("animation_style");
            self.config.animation_style = style;
        }
        self
    }

    pub fn add_menu_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self.refresh_adapter();
        self
    }

    pub fn add_menu_items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.items.extend(items);
        self.refresh_adapter();
        self
    }

    // Rows added after the build show up, the snapshotted height does not change.
    fn refresh_adapter(&mut self) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.adapter.set_data(self.items.clone());
        }
    }

    pub fn on_menu_item_click(mut self, listener: impl FnMut(usize, &MenuItem) + 'static) -> Self {
        let listener: OnMenuItemClick = Box::new(listener);
        match self.overlay.as_mut() {
            Some(overlay) => overlay.adapter.set_on_menu_item_click(listener),
            None => self.on_menu_item_click = Some(listener),
        }
        self
    }

    pub fn on_before_show(mut self, listener: impl FnMut(&OverlayWindow) + 'static) -> Self {
        self.on_before_show = Some(Box::new(listener));
        self
    }

    pub fn on_dismiss(mut self, listener: impl FnMut() + 'static) -> Self {
        self.on_dismiss = Some(Box::new(listener));
        self
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    /// Live adapter settings (data, icon visibility). `None` before the build.
    pub fn adapter_mut(&mut self) -> Option<&mut MenuAdapter> {
        self.overlay.as_mut().map(|overlay| &mut overlay.adapter)
    }

    pub fn state(&self) -> PopupState {
        self.overlay
            .as_ref()
            .map_or(PopupState::Hidden, |overlay| overlay.window.state())
    }

    pub fn is_showing(&self) -> bool {
        self.state() == PopupState::Visible
    }

    /// Builds the overlay on first use and returns it.
    pub fn build(&mut self) -> &mut Overlay {
        let overlay = match self.overlay.take() {
            Some(overlay) => overlay,
            None => self.create_overlay(),
        };
        self.overlay.insert(overlay)
    }

    fn create_overlay(&mut self) -> Overlay {
        let height = self
            .config
            .height
            .unwrap_or_else(|| Dimension::Exact(default_height(self.items.len())));
        info!(
            "Building popup overlay: {} items, height {:?}, width {:?}",
            self.items.len(),
            height,
            self.config.width
        );
        let window = OverlayWindow::new(&self.config, height);
        let mut adapter = MenuAdapter::new(self.items.clone(), self.config.show_icon);
        if let Some(listener) = self.on_menu_item_click.take() {
            adapter.set_on_menu_item_click(listener);
        }
        Overlay { window, adapter }
    }

    pub fn show_as_dropdown(&mut self, anchor: Rect) -> bool {
        self.show_as_dropdown_with_offset(anchor, 0, 0)
    }

    pub fn show_as_dropdown_with_offset(&mut self, anchor: Rect, x_offset: i16, y_offset: i16) -> bool {
        self.show(Placement::Dropdown { anchor, x_offset, y_offset })
    }

    pub fn show_at_location(&mut self, x: u16, y: u16) -> bool {
        self.show(Placement::Location { x, y })
    }

    /// Returns `false` when the popup was already visible.
    fn show(&mut self, placement: Placement) -> bool {
        self.build();
        let Self {
            overlay,
            on_before_show,
            backdrop,
            ..
        } = self;
        let Some(Overlay { window, .. }) = overlay.as_mut() else {
            return false;
        };
        if window.is_showing() {
            trace!("Popup already showing, ignoring show");
            return false;
        }
        if let Some(listener) = on_before_show.as_mut() {
            listener(&*window);
        }
        if window.background_dark {
            backdrop.start(OPAQUE, window.alpha, window.duration);
        }
        window.open(placement);
        debug!("Popup shown at {:?}", placement);
        true
    }

    /// Returns `false` when the popup was not visible.
    pub fn dismiss(&mut self) -> bool {
        let Self {
            overlay,
            backdrop,
            on_dismiss,
            ..
        } = self;
        match overlay.as_mut() {
            Some(overlay) => Self::close(&mut overlay.window, backdrop, on_dismiss),
            None => false,
        }
    }

    fn close(window: &mut OverlayWindow, backdrop: &mut Backdrop, on_dismiss: &mut Option<OnDismiss>) -> bool {
        if !window.is_showing() {
            return false;
        }
        window.close();
        if window.background_dark {
            backdrop.start(window.alpha, OPAQUE, window.reset_duration);
        }
        debug!("Popup dismissed");
        if let Some(listener) = on_dismiss.as_mut() {
            listener();
        }
        true
    }

    /// Clicks a row: the popup closes first, then the click listener runs.
    pub fn click_row(&mut self, position: usize) -> bool {
        let Self {
            overlay,
            backdrop,
            on_dismiss,
            ..
        } = self;
        let Some(Overlay { window, adapter }) = overlay.as_mut() else {
            return false;
        };
        if !window.is_showing() {
            return false;
        }
        adapter.on_row_click(position, || {
            Self::close(window, backdrop, on_dismiss);
        })
    }

    pub fn tick(&mut self, now: Instant) {
        self.backdrop.tick(now);
    }

    fn move_selection(&mut self, forward: bool) {
        let Some(Overlay { window, adapter }) = self.overlay.as_mut() else {
            return;
        };
        let count = adapter.item_count();
        if count == 0 {
            return;
        }
        let next = match (window.selected, forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        window.selected = Some(next);
    }

    /// A visible popup holds focus and consumes every key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.is_showing() {
            return false;
        }
        if key.kind != KeyEventKind::Press {
            return true;
        }
        match key.code {
            KeyCode::Esc => {
                self.dismiss();
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Enter => {
                let selected = self.overlay.as_ref().and_then(|o| o.window.selected);
                if let Some(position) = selected {
                    self.click_row(position);
                }
            }
            _ => {}
        }
        true
    }

    /// Presses outside the popup dismiss it. A row is clicked when the left
    /// button is released over the row it was pressed on.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if !self.is_showing() {
            return false;
        }
        let Some(overlay) = self.overlay.as_mut() else {
            return false;
        };
        let window = &mut overlay.window;
        let inside = window.contains(mouse.column, mouse.row);
        let hit = window.row_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !inside {
                    trace!("Press outside popup at ({}, {})", mouse.column, mouse.row);
                    self.dismiss();
                } else if hit.is_some() {
                    window.pressed = hit;
                    window.selected = hit;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if window.pressed.is_some() && window.pressed != hit {
                    window.pressed = None;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = window.pressed.take();
                if let Some(position) = pressed.filter(|p| hit == Some(*p)) {
                    self.click_row(position);
                }
            }
            MouseEventKind::ScrollDown if inside => self.move_selection(true),
            MouseEventKind::ScrollUp if inside => self.move_selection(false),
            _ => {}
        }
        true
    }
}
