use popmenu::popup::PopupMenuWidget;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use std::time::Instant;

use super::app::App;
use super::widgets::{
    header::HeaderWidget, logs::LogsWidget, status_bar::StatusBarWidget, summary::SummaryWidget,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    // Header with the menu anchor on top, content in the middle, status bar at the bottom.
    let main_layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(f.size());

    HeaderWidget::render(f, app, main_layout_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_layout_chunks[1]);

    SummaryWidget::render(f, app, content_chunks[0]);
    LogsWidget::render(f, app, content_chunks[1]);
    StatusBarWidget::render(f, app, main_layout_chunks[2]);

    // Backdrop and popup go over everything else
    PopupMenuWidget::new(&app.config.resources, &app.theme.popup).render(f, &mut app.menu, Instant::now());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    #[test]
    fn draw_records_anchor_and_shows_popup() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut app = App::new(Arc::new(Config::default()), None);

        terminal.draw(|f| ui(f, &mut app)).unwrap();
        assert!(app.anchor_area.width > 0);
        assert_eq!(app.anchor_area.y, 0);

        app.open_menu();
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        let popup = app.menu.overlay().unwrap().window.area().unwrap();
        assert_eq!(popup.y, 1);
        assert_eq!(popup.x, app.anchor_area.x);
    }
}
