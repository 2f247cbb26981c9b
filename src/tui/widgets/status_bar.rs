use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let status_bar_style = Style::default()
            .fg(theme.status_bar_foreground)
            .bg(theme.status_bar_background);

        let status_bar_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(area);

        let hints: &[(&str, &str)] = if app.menu.is_showing() {
            &[("↑↓", "move"), ("Enter", "select"), ("Esc", "close")]
        } else {
            &[("m", "menu"), ("q", "quit")]
        };
        let mut spans = vec![Span::styled(" ", status_bar_style)];
        for (key, action) in hints {
            spans.push(Span::styled(*key, theme.status_bar_key.bg(theme.status_bar_background)));
            spans.push(Span::styled(format!(" {}  ", action), status_bar_style));
        }
        f.render_widget(
            Paragraph::new(Line::from(spans)).style(status_bar_style),
            status_bar_layout[0],
        );

        f.render_widget(
            Paragraph::new(Local::now().format("%H:%M:%S").to_string())
                .style(status_bar_style)
                .alignment(Alignment::Right),
            status_bar_layout[1],
        );
    }
}
