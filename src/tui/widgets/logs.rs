use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use tracing::Level;

use crate::tui::App;

pub struct LogsWidget;

impl LogsWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let block = Block::default()
            .title(Span::styled("Logs", theme.log_title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary))
            .style(Style::default().bg(theme.primary_background));

        if app.log_entries.is_empty() {
            let placeholder = Paragraph::new("No log entries yet.")
                .block(block)
                .style(Style::default().fg(theme.secondary_foreground));
            f.render_widget(placeholder, area);
            return;
        }

        // Newest entries at the bottom; only what fits is built.
        let visible = area.height.saturating_sub(2) as usize;
        let skip = app.log_entries.len().saturating_sub(visible);
        let log_items: Vec<ListItem> = app
            .log_entries
            .iter()
            .skip(skip)
            .map(|log_entry| {
                let level_style = match log_entry.level {
                    Level::ERROR => theme.log_level_error,
                    Level::WARN => theme.log_level_warn,
                    Level::INFO => theme.log_level_info,
                    Level::DEBUG => theme.log_level_debug,
                    Level::TRACE => theme.log_level_trace,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", log_entry.timestamp), theme.log_timestamp),
                    Span::styled(format!("{:<5} ", log_entry.level.as_str()), level_style),
                    Span::styled(format!("[{}] ", log_entry.target), theme.log_target),
                    Span::raw(log_entry.message.clone()),
                ]))
            })
            .collect();

        f.render_widget(List::new(log_items).block(block), area);
    }
}
