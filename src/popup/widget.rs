// src/popup/widget.rs
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

use super::adapter::RowBinding;
use super::dim::{BackdropWidget, OPAQUE};
use super::menu::{default_height, Dimension, Overlay, PopupMenu, ROW_HEIGHT};
use super::resources::Resources;
use super::theme::PopupTheme;

// One cell of padding on each side of a row, plus the border.
const ROW_PADDING: u16 = 2;
const BORDER: u16 = 2;

pub struct PopupMenuWidget<'a, R: Resources + ?Sized> {
    resources: &'a R,
    theme: &'a PopupTheme,
}

impl<'a, R: Resources + ?Sized> PopupMenuWidget<'a, R> {
    pub fn new(resources: &'a R, theme: &'a PopupTheme) -> Self {
        Self { resources, theme }
    }

    pub fn render(&self, f: &mut Frame, menu: &mut PopupMenu, now: Instant) {
        let area = f.size();
        self.render_to_buffer(area, f.buffer_mut(), menu, now);
    }

    /// Dims `area` by the backdrop alpha, then draws the popup if it is visible.
    /// The backdrop is applied even while hidden so the undim transition shows.
    pub fn render_to_buffer(&self, area: Rect, buf: &mut Buffer, menu: &mut PopupMenu, now: Instant) {
        let alpha = menu.backdrop().alpha();
        if alpha < OPAQUE {
            BackdropWidget { alpha }.render(area, buf);
        }

        let Some(Overlay { window, adapter }) = menu.overlay_mut() else {
            return;
        };
        if !window.is_showing() || area.width == 0 || area.height == 0 {
            return;
        }

        let rows: Vec<RowBinding> = adapter.bind_all().collect();
        let icon_column = rows
            .iter()
            .filter_map(|row| row.icon.and_then(|id| self.resources.icon(id)))
            .map(|icon| columns(icon).saturating_add(1))
            .max()
            .unwrap_or(0);

        let width = match window.width() {
            Dimension::MatchParent => area.width,
            Dimension::WrapContent => {
                let label_width = rows
                    .iter()
                    .map(|row| columns(self.label(row)))
                    .max()
                    .unwrap_or(0);
                icon_column
                    .saturating_add(label_width)
                    .saturating_add(ROW_PADDING + BORDER)
            }
            Dimension::Exact(w) => w.saturating_add(BORDER),
        }
        .min(area.width);
        let height = match window.height() {
            Dimension::MatchParent => area.height,
            Dimension::WrapContent => default_height(rows.len()).saturating_add(BORDER),
            Dimension::Exact(h) => h.saturating_add(BORDER),
        }
        .min(area.height);

        let (width, height) = match (window.animation(), window.shown_at()) {
            (Some(style), Some(shown_at)) => style.clip(width, height, now.saturating_duration_since(shown_at)),
            _ => (width, height),
        };

        let (origin_x, origin_y) = window.placement().map_or((0, 0), |p| p.origin());
        let max_x = (area.right() - width) as i32;
        let max_y = (area.bottom() - height) as i32;
        let popup_area = Rect::new(
            origin_x.clamp(area.x as i32, max_x) as u16,
            origin_y.clamp(area.y as i32, max_y) as u16,
            width,
            height,
        );

        Clear.render(popup_area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border)
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let capacity = (inner.height / ROW_HEIGHT) as usize;
        let first_row = scroll_offset(window.first_row(), window.selected(), capacity, rows.len());
        let visible = rows.len().saturating_sub(first_row).min(capacity);

        for (slot, row) in rows.iter().skip(first_row).take(visible).enumerate() {
            let row_area = Rect::new(inner.x, inner.y + slot as u16 * ROW_HEIGHT, inner.width, ROW_HEIGHT);
            let style = row.class.style(self.theme, window.is_row_active(row.position));
            buf.set_style(row_area, style);

            let mut spans = vec![Span::raw(" ")];
            if icon_column > 0 {
                let icon = row.icon.and_then(|id| self.resources.icon(id)).unwrap_or("");
                let pad = (icon_column as usize).saturating_sub(icon.width());
                spans.push(Span::styled(icon, style.patch(self.theme.icon)));
                spans.push(Span::raw(" ".repeat(pad)));
            }
            spans.push(Span::raw(self.label(row)));
            buf.set_line(row_area.x, row_area.y, &Line::from(spans), row_area.width);
        }

        let rows_area = Rect::new(inner.x, inner.y, inner.width, visible as u16 * ROW_HEIGHT);
        window.set_layout(popup_area, rows_area, first_row, visible);
    }

    fn label(&self, row: &RowBinding) -> &'a str {
        let resources: &'a R = self.resources;
        resources.text(row.label).unwrap_or("")
    }
}

// Display width in cells, saturating for text wider than any terminal.
fn columns(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// First row to draw so the selected row stays in view.
fn scroll_offset(current: usize, selected: Option<usize>, capacity: usize, count: usize) -> usize {
    if capacity == 0 || count <= capacity {
        return 0;
    }
    let mut first = current.min(count - capacity);
    if let Some(selected) = selected {
        if selected < first {
            first = selected;
        } else if selected >= first + capacity {
            first = selected + 1 - capacity;
        }
    }
    first
}
