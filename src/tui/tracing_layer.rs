use chrono::Local;
use std::fmt;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::tui::UILogEntry;

/// Formatted `message` field of an event, if it has one.
#[derive(Default)]
struct MessageField(Option<String>);

impl Visit for MessageField {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

/// Feeds the log panel: every event with a message becomes a `UILogEntry`.
pub struct LogPanelLayer {
    panel: mpsc::UnboundedSender<UILogEntry>,
}

impl LogPanelLayer {
    pub fn new(panel: mpsc::UnboundedSender<UILogEntry>) -> Self {
        Self { panel }
    }
}

impl<S: Subscriber> Layer<S> for LogPanelLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut field = MessageField::default();
        event.record(&mut field);
        let Some(message) = field.0 else {
            return;
        };

        let metadata = event.metadata();
        // Sending fails once the TUI has exited; nothing is left to show it.
        let _ = self.panel.send(UILogEntry {
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn events_reach_the_panel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscriber = tracing_subscriber::registry().with(LogPanelLayer::new(tx));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "popmenu::test", "popup {} dismissed", 3);
            tracing::info!(target: "popmenu::test", row = 2);
        });

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.level, Level::WARN);
        assert_eq!(entry.target, "popmenu::test");
        assert_eq!(entry.message, "popup 3 dismissed");
        // Field-only events carry no message and are skipped.
        assert!(rx.try_recv().is_err());
    }
}
