//! Notification infrastructure module
//!
//! Mirrors alerts as desktop notifications using notify-rust.

mod notify_rust;

pub use notify_rust::NotifyRustAlerts;
