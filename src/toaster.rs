// SPDX-License-Identifier: MPL-2.0
//! External-facing coordinator surface.
//!
//! [`Toaster`] is the capability the host application holds: it shows,
//! updates, and dismisses entries, toggles the display mode, and feeds
//! gestures in. Every call locks the single manager mutex, so host calls
//! and countdown firings serialize onto one writer.
//!
//! [`ToastHandle`] is the narrower capability returned per entry: it keeps
//! only the entry id and a weak back-reference, so holding one neither
//! keeps the coordinator alive nor can it fail. Operations on a gone
//! coordinator or a gone entry are silent no-ops.

use crate::config::Config;
use crate::diagnostics::DiagnosticsHandle;
use crate::drag::{DragFrame, DragOutcome};
use crate::manager::{lock, Manager};
use crate::notification::{Notification, NotificationId};
use crate::style::Style;
use iced_core::Vector;
use std::future::Future;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

/// Coordinator facade held by the host application.
#[derive(Debug, Clone)]
pub struct Toaster {
    inner: Arc<Mutex<Manager>>,
}

impl Toaster {
    /// Creates a coordinator on the ambient tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime context. Hosts that own a
    /// runtime elsewhere should use [`Toaster::with_runtime`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_runtime(config, tokio::runtime::Handle::current())
    }

    /// Creates a coordinator that spawns its countdown tasks on `runtime`.
    #[must_use]
    pub fn with_runtime(config: Config, runtime: tokio::runtime::Handle) -> Self {
        let inner = Arc::new_cyclic(|weak| {
            Mutex::new(Manager::new(config, runtime, weak.clone()))
        });
        Self { inner }
    }

    /// Shows a notification with the default duration.
    ///
    /// Persistent styles (loading and custom sheets that say so) get no
    /// countdown; they stay until updated or dismissed.
    pub fn show(&self, notification: Notification) -> ToastHandle {
        let mut manager = lock(&self.inner);
        let duration = if notification.is_persistent() {
            Duration::ZERO
        } else {
            manager.config().default_duration
        };
        let id = manager.push(notification, duration);
        self.handle(id)
    }

    /// Shows a notification with an explicit duration; zero disables the
    /// countdown.
    pub fn show_for(&self, notification: Notification, duration: Duration) -> ToastHandle {
        let id = lock(&self.inner).push(notification, duration);
        self.handle(id)
    }

    /// Dismisses an entry; absent ids are a no-op. Returns whether the entry
    /// was found.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        lock(&self.inner).dismiss(id)
    }

    /// Swaps an entry's style and message and restarts its countdown with
    /// `duration`. Absent ids are a no-op. Returns whether the entry was
    /// found.
    pub fn update(
        &self,
        id: NotificationId,
        style: Style,
        message: impl Into<String>,
        duration: Duration,
    ) -> bool {
        lock(&self.inner).update(id, style, message.into(), duration)
    }

    /// Flips between collapsed and expanded display modes.
    pub fn toggle_expanded(&self) {
        lock(&self.inner).toggle_expanded();
    }

    /// Whether the queue is in expanded display mode.
    #[must_use]
    pub fn expanded(&self) -> bool {
        lock(&self.inner).expanded()
    }

    /// Snapshot of the live entries, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.inner).notifications().cloned().collect()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    /// Whether no entries are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_empty()
    }

    /// Attaches a lifecycle event log.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        lock(&self.inner).set_diagnostics(handle);
    }

    /// Feeds an in-progress gesture translation for `id`.
    ///
    /// Returns the damped frame to render, or `None` for an unknown id.
    pub fn drag_update(&self, id: NotificationId, translation: Vector) -> Option<DragFrame> {
        lock(&self.inner).drag_update(id, translation)
    }

    /// Resolves a gesture for `id` from its final translation.
    pub fn drag_end(&self, id: NotificationId, translation: Vector) -> Option<DragOutcome> {
        lock(&self.inner).drag_end(id, translation)
    }

    /// Runs an async operation behind a persistent loading toast.
    ///
    /// On completion the toast transitions to a success or error toast with
    /// the formatter's message and `done_duration`. The operation's own
    /// result is returned untouched: a failure is rendered, never retried
    /// and never converted into a coordinator error.
    pub async fn show_while<F, T, E>(
        &self,
        message: impl Into<String>,
        operation: F,
        on_success: impl FnOnce(&T) -> String,
        on_failure: impl FnOnce(&E) -> String,
        done_duration: Duration,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let handle = self.show(Notification::loading(message));
        let result = operation.await;
        match &result {
            Ok(value) => handle.update(Style::Success, on_success(value), done_duration),
            Err(error) => handle.update(Style::Error, on_failure(error), done_duration),
        }
        result
    }

    /// Builds a handle for an entry of this coordinator.
    fn handle(&self, id: NotificationId) -> ToastHandle {
        ToastHandle {
            id,
            manager: Arc::downgrade(&self.inner),
        }
    }
}

/// Caller-held capability over one entry.
///
/// Holds only the entry id and a weak reference, so it can be stored
/// anywhere without keeping the coordinator alive.
#[derive(Debug, Clone)]
pub struct ToastHandle {
    id: NotificationId,
    manager: Weak<Mutex<Manager>>,
}

impl ToastHandle {
    /// The referenced entry's id.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Whether the coordinator and the entry both still exist.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.manager
            .upgrade()
            .is_some_and(|manager| lock(&manager).contains(self.id))
    }

    /// Dismisses the entry. A gone coordinator or entry is a silent no-op.
    pub fn dismiss(&self) {
        if let Some(manager) = self.manager.upgrade() {
            lock(&manager).dismiss(self.id);
        }
    }

    /// Updates the entry's style, message, and countdown. A gone coordinator
    /// or entry is a silent no-op.
    pub fn update(&self, style: Style, message: impl Into<String>, duration: Duration) {
        if let Some(manager) = self.manager.upgrade() {
            lock(&manager).update(self.id, style, message.into(), duration);
        }
    }
}
