//! User-facing alert side channel

use std::fmt;

use async_trait::async_trait;

/// Alert categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// Help text or a non-failure outcome
    Info,
    /// A destructive action awaits confirmation
    Confirm,
    /// An operation failed
    Error,
}

impl AlertKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Confirm => "confirm",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, title, message)
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Confirm, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, title, message)
    }

    fn new(kind: AlertKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Port for showing alerts. Delivery is best effort.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn show(&self, alert: Alert);
}

#[async_trait]
impl<A: AlertSink + ?Sized> AlertSink for std::sync::Arc<A> {
    async fn show(&self, alert: Alert) {
        self.as_ref().show(alert).await
    }
}
