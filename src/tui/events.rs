// src/tui/events.rs

use anyhow::{anyhow, Result};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tracing::trace;

use super::app::App;
use super::ui::ui;

pub async fn run_app_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut event_receiver = app
        .event_receiver
        .take()
        .ok_or_else(|| anyhow!("App event receiver already taken"))?;
    let mut crossterm_events = EventStream::new();
    let tick_duration = Duration::from_millis(app.config.interface.refresh_interval_ms.max(1));

    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui(f, &mut app))?;

        tokio::select! {
            // Events posted by popup callbacks
            Some(event) = event_receiver.recv() => {
                app.handle_app_event(event);
            }

            // Handle terminal events
            Some(Ok(event)) = crossterm_events.next() => {
                match event {
                    CrosstermEvent::Key(key) => on_key(&mut app, key),
                    CrosstermEvent::Mouse(mouse) => on_mouse_event(&mut app, mouse),
                    _ => {}
                }
            }

            // Redraw at the refresh rate so dim transitions animate
            _ = tokio::time::sleep(tick_duration) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn on_key(app: &mut App, key_event: KeyEvent) {
    // A visible popup has focus and takes every key.
    if app.menu.handle_key(key_event) {
        return;
    }
    if key_event.kind != KeyEventKind::Press {
        return;
    }
    match key_event.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        KeyCode::Char('m') | KeyCode::Enter | KeyCode::Char(' ') => app.open_menu(),
        _ => {}
    }
}

pub fn on_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.menu.handle_mouse(mouse_event) {
        return;
    }
    if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
        let anchor = app.anchor_area;
        let on_anchor = mouse_event.column >= anchor.left()
            && mouse_event.column < anchor.right()
            && mouse_event.row >= anchor.top()
            && mouse_event.row < anchor.bottom();
        if on_anchor {
            trace!("Anchor clicked");
            app.open_menu();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::layout::Rect;
    use std::sync::Arc;

    fn app() -> App {
        let mut app = App::new(Arc::new(Config::default()), None);
        app.anchor_area = Rect::new(1, 0, 8, 1);
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn menu_key_opens_and_popup_swallows_quit() {
        let mut app = app();
        on_key(&mut app, press(KeyCode::Char('m')));
        assert!(app.menu.is_showing());

        on_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);

        on_key(&mut app, press(KeyCode::Esc));
        assert!(!app.menu.is_showing());
        on_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn clicking_the_anchor_opens_the_menu() {
        let mut app = app();
        on_mouse_event(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 3,
                row: 0,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert!(app.menu.is_showing());
    }
}
