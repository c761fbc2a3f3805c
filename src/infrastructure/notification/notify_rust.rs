//! Cross-platform notification adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux.

use async_trait::async_trait;

use crate::application::ports::{Alert, AlertKind, AlertSink};

/// Alert sink that raises a desktop notification per alert
pub struct NotifyRustAlerts {
    /// Application name for notifications
    app_name: String,
}

impl NotifyRustAlerts {
    pub fn new() -> Self {
        Self {
            app_name: "MediaShelf".to_string(),
        }
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for NotifyRustAlerts {
    fn default() -> Self {
        Self::new()
    }
}

/// Freedesktop icon name for an alert kind
fn icon_name(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Info => "dialog-information",
        AlertKind::Confirm => "dialog-question",
        AlertKind::Error => "dialog-error",
    }
}

#[async_trait]
impl AlertSink for NotifyRustAlerts {
    async fn show(&self, alert: Alert) {
        let app_name = self.app_name.clone();

        // notify-rust operations can block, so run in spawn_blocking
        let result = tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(&app_name)
                .summary(&alert.title)
                .body(&alert.message)
                .icon(icon_name(alert.kind))
                .show()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("Desktop notification failed: {}", e),
            Err(e) => log::warn!("Notification task join error: {}", e),
        }
    }
}
