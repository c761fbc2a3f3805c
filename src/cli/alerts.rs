//! Terminal alert sink

use async_trait::async_trait;

use crate::application::ports::{Alert, AlertKind, AlertSink};
use crate::infrastructure::NotifyRustAlerts;

use super::presenter::Presenter;

/// Prints alerts to stderr, optionally mirroring them as desktop notifications
pub struct CliAlerts {
    presenter: Presenter,
    mirror: Option<NotifyRustAlerts>,
}

impl CliAlerts {
    pub fn new(notify: bool) -> Self {
        Self {
            presenter: Presenter::new(),
            mirror: notify.then(NotifyRustAlerts::new),
        }
    }
}

/// Single-line rendering used on the terminal
pub fn render(alert: &Alert) -> String {
    let message = alert.message.trim_end().replace('\n', "\n  ");
    format!("{}: {}", alert.title, message)
}

#[async_trait]
impl AlertSink for CliAlerts {
    async fn show(&self, alert: Alert) {
        let line = render(&alert);
        match alert.kind {
            AlertKind::Info => self.presenter.info(&line),
            AlertKind::Confirm => self.presenter.warn(&line),
            AlertKind::Error => self.presenter.error(&line),
        }

        if let Some(mirror) = &self.mirror {
            mirror.show(alert).await;
        }
    }
}
