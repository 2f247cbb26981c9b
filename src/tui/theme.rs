use popmenu::popup::PopupTheme;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct AppTheme {
    // General
    pub primary_background: Color,
    pub primary_foreground: Color,
    pub secondary_foreground: Color,
    pub border_primary: Color,

    // Header / anchor button
    pub header_background: Color,
    pub header_title: Style,
    pub anchor_button: Style,
    pub anchor_button_open: Style,

    // Status Bar
    pub status_bar_background: Color,
    pub status_bar_foreground: Color,
    pub status_bar_key: Style,

    // Log View
    pub log_title: Style,
    pub log_level_trace: Style,
    pub log_level_debug: Style,
    pub log_level_info: Style,
    pub log_level_warn: Style,
    pub log_level_error: Style,
    pub log_timestamp: Style,
    pub log_target: Style,

    // Popup
    pub popup: PopupTheme,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // General
            primary_background: Color::Rgb(24, 24, 32),
            primary_foreground: Color::Rgb(220, 220, 220),
            secondary_foreground: Color::Gray,
            border_primary: Color::DarkGray,

            // Header / anchor button
            header_background: Color::Rgb(36, 36, 60),
            header_title: Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
            anchor_button: Style::default().fg(Color::Black).bg(Color::Rgb(120, 160, 220)),
            anchor_button_open: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(200, 220, 255))
                .add_modifier(Modifier::BOLD),

            // Status Bar
            status_bar_background: Color::Blue,
            status_bar_foreground: Color::White,
            status_bar_key: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),

            // Log View
            log_title: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            log_level_trace: Style::default().fg(Color::Magenta),
            log_level_debug: Style::default().fg(Color::Blue),
            log_level_info: Style::default().fg(Color::Green),
            log_level_warn: Style::default().fg(Color::Yellow),
            log_level_error: Style::default().fg(Color::Red),
            log_timestamp: Style::default().fg(Color::DarkGray),
            log_target: Style::default().fg(Color::Cyan),

            // Popup
            popup: PopupTheme::default(),
        }
    }
}
