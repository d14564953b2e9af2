// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::style::Style;
use std::time::Instant;

/// Unique identifier for a notification, stable for the entry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single toast entry: identity, style, message, and creation time.
///
/// The queue owns every entry; handles and render snapshots see clones.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    style: Style,
    message: String,
    created_at: Instant,
}

impl Notification {
    /// Creates a notification with the given style and message.
    pub fn new(style: Style, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            style,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    /// Creates a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Style::Success, message)
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Style::Error, message)
    }

    /// Creates an info notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Style::Info, message)
    }

    /// Creates a persistent loading notification.
    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(Style::Loading, message)
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the visual style.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when this notification was created.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Whether this entry resists gesture dismissal.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.style.is_persistent()
    }

    /// Swaps style and message in place, keeping id and creation time.
    pub(crate) fn replace(&mut self, style: Style, message: String) {
        self.style = style;
        self.message = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let a = Notification::success("one");
        let b = Notification::success("one");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn constructors_set_style() {
        assert_eq!(*Notification::success("").style(), Style::Success);
        assert_eq!(*Notification::error("").style(), Style::Error);
        assert_eq!(*Notification::info("").style(), Style::Info);
        assert_eq!(*Notification::loading("").style(), Style::Loading);
    }

    #[test]
    fn loading_entries_are_persistent() {
        assert!(Notification::loading("sync").is_persistent());
        assert!(!Notification::info("sync").is_persistent());
    }

    #[test]
    fn replace_keeps_identity() {
        let mut n = Notification::loading("working");
        let id = n.id();
        let created = n.created_at();

        n.replace(Style::Success, "done".to_string());

        assert_eq!(n.id(), id);
        assert_eq!(n.created_at(), created);
        assert_eq!(*n.style(), Style::Success);
        assert_eq!(n.message(), "done");
    }
}
