// src/popup/dim.rs
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use std::time::{Duration, Instant};
use tracing::trace;

pub const OPAQUE: f32 = 1.0;

#[derive(Debug, Clone)]
struct Transition {
    from: f32,
    to: f32,
    duration: Duration,
    started: Option<Instant>,
}

impl Transition {
    fn value_at(&mut self, now: Instant) -> (f32, bool) {
        let started = *self.started.get_or_insert_with(|| now);
        let elapsed = now.saturating_duration_since(started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.from + (self.to - self.from) * t, false)
    }
}

/// Opacity of the content behind a popup.
///
/// Transitions are fire-and-forget: each one runs to completion and nothing
/// cancels it. When two overlap, both keep writing and the one started last
/// wins each tick.
#[derive(Debug, Clone)]
pub struct Backdrop {
    alpha: f32,
    transitions: Vec<Transition>,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            alpha: OPAQUE,
            transitions: Vec::new(),
        }
    }
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a linear transition. Its clock starts on the next `tick`.
    pub fn start(&mut self, from: f32, to: f32, duration: Duration) {
        trace!("Backdrop transition {:.2} -> {:.2} over {:?}", from, to, duration);
        self.transitions.push(Transition {
            from,
            to,
            duration,
            started: None,
        });
    }

    pub fn tick(&mut self, now: Instant) {
        let mut alpha = self.alpha;
        self.transitions.retain_mut(|transition| {
            let (value, finished) = transition.value_at(now);
            alpha = value;
            !finished
        });
        self.alpha = alpha;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_animating(&self) -> bool {
        !self.transitions.is_empty()
    }

    pub fn is_dimmed(&self) -> bool {
        self.alpha < OPAQUE || self.is_animating()
    }
}

/// Darkens everything already drawn in the area by the backdrop alpha.
pub struct BackdropWidget {
    pub alpha: f32,
}

impl Widget for BackdropWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.alpha >= OPAQUE {
            return;
        }
        let alpha = self.alpha.clamp(0.0, OPAQUE);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = buf.get_mut(x, y);
                cell.fg = scale_color(cell.fg, alpha, true);
                cell.bg = scale_color(cell.bg, alpha, false);
            }
        }
    }
}

/// Scales a colour toward black. Terminal defaults are treated as a light
/// foreground and a black background.
pub fn scale_color(color: Color, alpha: f32, foreground: bool) -> Color {
    let (r, g, b) = match color {
        Color::Reset if foreground => (229, 229, 229),
        Color::Reset => return Color::Reset,
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Indexed(_) => return color,
    };
    let scale = |c: u8| (c as f32 * alpha).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_opaque_and_idle() {
        let backdrop = Backdrop::new();
        assert_eq!(backdrop.alpha(), OPAQUE);
        assert!(!backdrop.is_animating());
        assert!(!backdrop.is_dimmed());
    }

    #[test]
    fn transition_is_linear_and_finishes() {
        let mut backdrop = Backdrop::new();
        let t0 = Instant::now();
        backdrop.start(1.0, 0.5, ms(200));
        backdrop.tick(t0);
        assert_eq!(backdrop.alpha(), 1.0);
        backdrop.tick(t0 + ms(100));
        assert!((backdrop.alpha() - 0.75).abs() < 1e-4);
        backdrop.tick(t0 + ms(250));
        assert_eq!(backdrop.alpha(), 0.5);
        assert!(!backdrop.is_animating());
    }

    #[test]
    fn overlapping_transitions_last_write_wins() {
        let mut backdrop = Backdrop::new();
        let t0 = Instant::now();
        backdrop.start(1.0, 0.75, ms(240));
        backdrop.tick(t0);
        backdrop.start(0.75, 1.0, ms(300));
        backdrop.tick(t0 + ms(120));
        // Second transition started at t0 + 120, so it reports its start value.
        assert_eq!(backdrop.alpha(), 0.75);
        backdrop.tick(t0 + ms(240));
        assert!(backdrop.is_animating());
        backdrop.tick(t0 + ms(500));
        assert_eq!(backdrop.alpha(), 1.0);
        assert!(!backdrop.is_animating());
    }

    #[test]
    fn scale_color_darkens() {
        assert_eq!(scale_color(Color::Rgb(200, 100, 0), 0.5, true), Color::Rgb(100, 50, 0));
        assert_eq!(scale_color(Color::White, 0.0, true), Color::Rgb(0, 0, 0));
        assert_eq!(scale_color(Color::Reset, 0.5, false), Color::Reset);
        assert_eq!(scale_color(Color::Indexed(17), 0.5, true), Color::Indexed(17));
    }

    #[test]
    fn backdrop_widget_dims_cells() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        buf.get_mut(0, 0).fg = Color::Rgb(100, 100, 100);
        BackdropWidget { alpha: 0.5 }.render(area, &mut buf);
        assert_eq!(buf.get(0, 0).fg, Color::Rgb(50, 50, 50));

        let mut untouched = Buffer::empty(area);
        untouched.get_mut(0, 0).fg = Color::Rgb(100, 100, 100);
        BackdropWidget { alpha: 1.0 }.render(area, &mut untouched);
        assert_eq!(untouched.get(0, 0).fg, Color::Rgb(100, 100, 100));
    }
}
