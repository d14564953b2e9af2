// SPDX-License-Identifier: MPL-2.0
//! Lifecycle event log for host instrumentation.
//!
//! The coordinator emits an event at each lifecycle transition when a
//! [`DiagnosticsHandle`] is attached. Events travel over a bounded channel
//! with a non-blocking send: a full channel drops the event rather than
//! stalling the writer. Hosts drain the collector whenever convenient.

use crate::notification::NotificationId;
use crossbeam_channel::{bounded, Receiver, Sender};

/// Default capacity of the event channel.
const DEFAULT_EVENT_CAPACITY: usize = 256;

/// A lifecycle transition observed by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// An entry was appended to the queue.
    Shown { id: NotificationId },
    /// An entry's style/message were swapped in place.
    Updated { id: NotificationId },
    /// An entry was removed by an explicit dismiss call.
    Dismissed { id: NotificationId },
    /// An entry was removed to make room at capacity.
    Evicted { id: NotificationId },
    /// An entry was removed by its countdown firing.
    Expired { id: NotificationId },
    /// The display mode changed.
    ExpandedChanged { expanded: bool },
}

/// Handle for sending lifecycle events to a collector.
///
/// Cheap to clone and safe to share across threads; sends never block.
#[derive(Debug, Clone)]
pub struct DiagnosticsHandle {
    event_tx: Sender<LifecycleEvent>,
}

impl DiagnosticsHandle {
    /// Records an event; silently dropped when the channel is full or the
    /// collector is gone.
    pub fn log(&self, event: LifecycleEvent) {
        let _ = self.event_tx.try_send(event);
    }
}

/// Receiving side of the lifecycle event log.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    event_rx: Receiver<LifecycleEvent>,
    event_tx: Sender<LifecycleEvent>,
}

impl DiagnosticsCollector {
    /// Creates a collector with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Creates a collector with an explicit channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (event_tx, event_rx) = bounded(capacity);
        Self { event_rx, event_tx }
    }

    /// Returns a handle to attach to a coordinator.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Removes and returns all buffered events, oldest first.
    pub fn drain(&self) -> Vec<LifecycleEvent> {
        self.event_rx.try_iter().collect()
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new()
    }
}
