use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::App;

pub struct HeaderWidget;

impl HeaderWidget {
    /// Draws the title and the menu button, and records the button area as
    /// the popup anchor.
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;
        let label = app.config.interface.anchor_label.as_str();
        let button_style = if app.menu.is_showing() {
            theme.anchor_button_open
        } else {
            theme.anchor_button
        };

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(label, button_style),
            Span::raw("  "),
            Span::styled("popmenu", theme.header_title),
        ]);
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(theme.header_background)),
            area,
        );

        let width = (label.width() as u16).min(area.width.saturating_sub(1));
        app.anchor_area = Rect::new(area.x + 1, area.y, width, area.height.min(1));
    }
}
