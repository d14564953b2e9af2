// SPDX-License-Identifier: MPL-2.0
//! Per-entry countdown state.
//!
//! Each live entry with auto-dismiss enabled owns exactly one countdown,
//! which is either *running* (a spawned expiry task plus an absolute
//! deadline) or *paused* (a banked remaining duration and no task). The
//! registry never holds two live tasks for one id: every insert cancels the
//! previous record for that key first.
//!
//! A running record carries a `seq` stamp allocated at arming time. A fired
//! expiry task must present its stamp before it is allowed to touch the
//! queue, so a task that slept through a cancel-and-rearm cannot act on the
//! entry it no longer owns.

use crate::notification::NotificationId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug)]
enum CountdownState {
    Running {
        task: JoinHandle<()>,
        deadline: Instant,
        seq: u64,
    },
    Paused {
        remaining: Duration,
    },
}

/// Registry of countdowns, keyed 1:1 with live entry ids.
#[derive(Debug, Default)]
pub(crate) struct CountdownRegistry {
    states: HashMap<NotificationId, CountdownState>,
    next_seq: u64,
}

impl CountdownRegistry {
    /// Allocates the stamp for a fresh arming.
    pub fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Records a running countdown, cancelling any prior one for this id.
    pub fn insert_running(
        &mut self,
        id: NotificationId,
        task: JoinHandle<()>,
        deadline: Instant,
        seq: u64,
    ) {
        self.cancel(id);
        self.states.insert(
            id,
            CountdownState::Running {
                task,
                deadline,
                seq,
            },
        );
    }

    /// Banks a paused countdown, cancelling any prior one for this id.
    pub fn insert_paused(&mut self, id: NotificationId, remaining: Duration) {
        self.cancel(id);
        self.states
            .insert(id, CountdownState::Paused { remaining });
    }

    /// Cancels and removes the countdown for `id`; safe when none exists.
    pub fn cancel(&mut self, id: NotificationId) {
        if let Some(CountdownState::Running { task, .. }) = self.states.remove(&id) {
            task.abort();
        }
    }

    /// Whether `id` currently holds a running countdown stamped with `seq`.
    ///
    /// This is the liveness check a fired expiry task performs under the
    /// queue lock before removing its entry.
    pub fn matches_running(&self, id: NotificationId, seq: u64) -> bool {
        matches!(
            self.states.get(&id),
            Some(CountdownState::Running { seq: stamped, .. }) if *stamped == seq
        )
    }

    /// Pauses every running countdown, banking `deadline - now` floored at
    /// zero. Paused records and ids without a record are untouched.
    pub fn pause_all(&mut self, now: Instant) {
        for state in self.states.values_mut() {
            if let CountdownState::Running { deadline, .. } = state {
                let remaining = deadline.saturating_duration_since(now);
                let previous = std::mem::replace(state, CountdownState::Paused { remaining });
                if let CountdownState::Running { task, .. } = previous {
                    task.abort();
                }
            }
        }
    }

    /// Removes and returns every paused countdown as `(id, remaining)`.
    ///
    /// Running records stay in place; the caller re-arms or dismisses each
    /// returned id.
    pub fn drain_paused(&mut self) -> Vec<(NotificationId, Duration)> {
        let ids: Vec<NotificationId> = self
            .states
            .iter()
            .filter(|(_, state)| matches!(state, CountdownState::Paused { .. }))
            .map(|(id, _)| *id)
            .collect();

        ids.into_iter()
            .filter_map(|id| match self.states.remove(&id) {
                Some(CountdownState::Paused { remaining }) => Some((id, remaining)),
                _ => None,
            })
            .collect()
    }

    /// Whether `id` holds a running countdown.
    #[cfg(test)]
    pub fn is_running(&self, id: NotificationId) -> bool {
        matches!(self.states.get(&id), Some(CountdownState::Running { .. }))
    }

    /// Banked remaining time for `id`, when paused.
    #[cfg(test)]
    pub fn remaining(&self, id: NotificationId) -> Option<Duration> {
        match self.states.get(&id) {
            Some(CountdownState::Paused { remaining }) => Some(*remaining),
            _ => None,
        }
    }

    /// Whether any countdown exists for `id`.
    #[cfg(test)]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.states.contains_key(&id)
    }
}

impl Drop for CountdownRegistry {
    fn drop(&mut self) {
        for state in self.states.values() {
            if let CountdownState::Running { task, .. } = state {
                task.abort();
            }
        }
    }
}
