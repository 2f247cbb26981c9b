use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::App;

pub struct SummaryWidget;

impl SummaryWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let label_style = Style::default().fg(theme.secondary_foreground);
        let value_style = Style::default()
            .fg(theme.primary_foreground)
            .add_modifier(Modifier::BOLD);
        let settings = &app.config.popup;

        let row = |label: &'static str, value: String| {
            Line::from(vec![Span::styled(label, label_style), Span::styled(value, value_style)])
        };
        let on_off = |flag: bool| (if flag { "on" } else { "off" }).to_string();

        let lines = vec![
            row(
                "Last selection: ",
                app.last_selection.clone().unwrap_or_else(|| "-".to_string()),
            ),
            row("Refreshes:      ", app.refresh_count.to_string()),
            row("Dismissals:     ", app.dismiss_count.to_string()),
            Line::from(""),
            row("Items:          ", app.config.items.len().to_string()),
            row("Width:          ", settings.describe_width()),
            row("Icons:          ", on_off(settings.show_icon)),
            row("Dim background: ", on_off(settings.background_dark)),
            row("Dim alpha:      ", format!("{:.2}", app.menu.backdrop().alpha())),
            row("Animation:      ", on_off(settings.show_animation)),
        ];

        let block = Block::default()
            .title("Popup")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary))
            .style(Style::default().bg(theme.primary_background));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
