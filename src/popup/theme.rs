// src/popup/theme.rs
use ratatui::style::{Color, Modifier, Style};

/// Two-state appearance of a row: resting, and pressed/activated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub resting: Style,
    pub pressed: Style,
}

impl RowStyle {
    pub fn pick(&self, pressed: bool) -> Style {
        if pressed {
            self.pressed
        } else {
            self.resting
        }
    }
}

#[derive(Debug, Clone)]
pub struct PopupTheme {
    pub border: Style,
    pub background: Color,
    pub icon: Style,

    // Rows, by position class
    pub row_top: RowStyle,
    pub row_middle: RowStyle,
    pub row_bottom: RowStyle,
}

impl Default for PopupTheme {
    fn default() -> Self {
        let base = Color::Rgb(48, 48, 48);
        let resting = |bg: Color| Style::default().fg(Color::White).bg(bg);
        let pressed = |bg: Color| {
            Style::default()
                .fg(Color::Black)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        };
        Self {
            border: Style::default().fg(base).bg(base),
            background: base,
            icon: Style::default().fg(Color::Yellow),

            // The top and bottom rows sit against the rounded border and get
            // their own shade; each class also has its own pressed colour.
            row_top: RowStyle {
                resting: resting(Color::Rgb(58, 58, 66)),
                pressed: pressed(Color::Rgb(150, 190, 235)),
            },
            row_middle: RowStyle {
                resting: resting(base),
                pressed: pressed(Color::Rgb(200, 200, 200)),
            },
            row_bottom: RowStyle {
                resting: resting(Color::Rgb(40, 40, 46)),
                pressed: pressed(Color::Rgb(235, 190, 150)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_has_its_own_look() {
        let theme = PopupTheme::default();
        let rows = [theme.row_top, theme.row_middle, theme.row_bottom];
        for (i, a) in rows.iter().enumerate() {
            assert_ne!(a.resting, a.pressed);
            for b in &rows[i + 1..] {
                assert_ne!(a.resting, b.resting);
                assert_ne!(a.pressed, b.pressed);
            }
        }
    }
}
