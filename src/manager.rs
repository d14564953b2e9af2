// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` is the single-writer core: the bounded FIFO queue, the
//! expanded/collapsed display flag, the countdown registry, and the active
//! drag sessions all live behind one mutex and are only ever mutated while
//! it is held. Facade calls, handle calls, fired countdowns, and drag
//! effects all funnel through here, so pause/resume and schedule/cancel are
//! atomic relative to each other without any per-entry locking.

use crate::config::Config;
use crate::countdown::CountdownRegistry;
use crate::diagnostics::{DiagnosticsHandle, LifecycleEvent};
use crate::drag::{self, DragFrame, DragOutcome, Session};
use crate::notification::{Notification, NotificationId};
use crate::style::Style;
use iced_core::Vector;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::time::Instant;

/// Delay between a dismissing gesture's resolution and the entry's removal,
/// covering the exit animation.
pub(crate) const EXIT_REMOVAL_DELAY: Duration = Duration::from_millis(200);

/// Locks a manager, absorbing poisoning from a panicked holder.
pub(crate) fn lock(manager: &Mutex<Manager>) -> MutexGuard<'_, Manager> {
    manager.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Queue, registry, and display state guarded as one unit.
#[derive(Debug)]
pub(crate) struct Manager {
    config: Config,
    /// Live entries, oldest first.
    notifications: VecDeque<Notification>,
    countdowns: CountdownRegistry,
    /// Active drag sessions, at most one per entry.
    drags: HashMap<NotificationId, Session>,
    expanded: bool,
    diagnostics: Option<DiagnosticsHandle>,
    runtime: tokio::runtime::Handle,
    /// Back-reference handed to spawned tasks so a fired countdown can
    /// re-enter through the same mutex.
    weak_self: Weak<Mutex<Manager>>,
}

impl Manager {
    pub fn new(
        config: Config,
        runtime: tokio::runtime::Handle,
        weak_self: Weak<Mutex<Manager>>,
    ) -> Self {
        Self {
            config,
            notifications: VecDeque::new(),
            countdowns: CountdownRegistry::default(),
            drags: HashMap::new(),
            expanded: false,
            diagnostics: None,
            runtime,
            weak_self,
        }
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Appends an entry, evicting the oldest first when at capacity.
    ///
    /// Eviction is an unconditional make-room policy; a push is never
    /// rejected. In expanded mode the duration is banked instead of armed so
    /// the countdown starts when the user collapses the view.
    pub fn push(&mut self, notification: Notification, duration: Duration) -> NotificationId {
        while !self.notifications.is_empty() && self.notifications.len() >= self.config.capacity {
            self.evict_oldest();
        }

        let id = notification.id();
        self.notifications.push_back(notification);
        self.log(LifecycleEvent::Shown { id });
        self.arm(id, duration);
        id
    }

    /// Dismisses an entry by id.
    ///
    /// Returns `true` if the entry was found and removed; absent ids are a
    /// no-op.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.remove_entry(id, LifecycleEvent::Dismissed { id })
    }

    /// Swaps an entry's style and message in place and re-arms its countdown.
    ///
    /// The existing countdown is cancelled before anything else so a pending
    /// expiry can never remove the refreshed entry. Returns `false` when the
    /// id is absent.
    pub fn update(
        &mut self,
        id: NotificationId,
        style: Style,
        message: String,
        duration: Duration,
    ) -> bool {
        let Some(entry) = self.notifications.iter_mut().find(|n| n.id() == id) else {
            return false;
        };
        entry.replace(style, message);
        self.countdowns.cancel(id);
        self.log(LifecycleEvent::Updated { id });
        self.arm(id, duration);
        true
    }

    /// Flips between collapsed and expanded display modes.
    ///
    /// Expanding requires more than one entry and pauses every running
    /// countdown. Collapsing resumes every banked countdown; an entry whose
    /// banked remaining reached zero is removed immediately instead of being
    /// given a zero-delay timer.
    pub fn toggle_expanded(&mut self) {
        if self.expanded {
            self.expanded = false;
            self.log(LifecycleEvent::ExpandedChanged { expanded: false });
            self.resume_banked();
        } else {
            if self.notifications.len() <= 1 {
                return;
            }
            self.expanded = true;
            self.log(LifecycleEvent::ExpandedChanged { expanded: true });
            self.countdowns.pause_all(Instant::now());
        }
    }

    /// Natural-expiry entry point, invoked by a fired countdown task.
    ///
    /// The stamp must still match the registry's running record: a task that
    /// slept through a cancel or re-arm presents a stale `seq` and is
    /// ignored.
    pub fn expire(&mut self, id: NotificationId, seq: u64) {
        if !self.countdowns.matches_running(id, seq) {
            return;
        }
        self.remove_entry(id, LifecycleEvent::Expired { id });
    }

    /// Feeds a gesture translation through the evaluator.
    ///
    /// The first non-zero translation starts the gesture and, in collapsed
    /// mode, pauses all countdowns on its behalf. Returns the damped frame
    /// for the render layer, or `None` for an unknown id.
    pub fn drag_update(&mut self, id: NotificationId, translation: Vector) -> Option<DragFrame> {
        let stiff = self
            .notifications
            .iter()
            .find(|n| n.id() == id)?
            .is_persistent();
        let expanded = self.expanded;

        let needs_pause = self
            .drags
            .entry(id)
            .or_insert_with(|| Session::new(stiff))
            .begin(translation, expanded);
        if needs_pause {
            self.countdowns.pause_all(Instant::now());
        }

        let session = self.drags.get_mut(&id)?;
        Some(session.update(translation, &self.config, stiff, expanded))
    }

    /// Resolves a gesture from its final translation.
    ///
    /// Regardless of the outcome, a gesture that paused the countdowns
    /// resumes them if the view is still collapsed. A dismissing outcome
    /// schedules the actual removal after the exit-animation delay.
    pub fn drag_end(&mut self, id: NotificationId, translation: Vector) -> Option<DragOutcome> {
        let mut session = self.drags.remove(&id)?;
        session.resolve();

        let stiff = self
            .notifications
            .iter()
            .find(|n| n.id() == id)?
            .is_persistent();
        let outcome = drag::classify(translation, &self.config, stiff, self.expanded);

        if session.owns_pause() && !self.expanded {
            self.resume_banked();
        }

        if let DragOutcome::Dismiss { .. } = outcome {
            self.schedule_removal(id);
        }
        Some(outcome)
    }

    /// Live entries, oldest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    #[must_use]
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.notifications.iter().any(|n| n.id() == id)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub fn countdowns(&self) -> &CountdownRegistry {
        &self.countdowns
    }

    /// Creates or banks a countdown for `id`; a zero duration arms nothing.
    fn arm(&mut self, id: NotificationId, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        if self.expanded {
            self.countdowns.insert_paused(id, duration);
        } else {
            self.start_countdown(id, duration);
        }
    }

    /// Spawns a running countdown task for `id`.
    fn start_countdown(&mut self, id: NotificationId, duration: Duration) {
        let seq = self.countdowns.next_seq();
        let deadline = Instant::now() + duration;
        let shared = self.weak_self.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(manager) = shared.upgrade() {
                lock(&manager).expire(id, seq);
            }
        });
        self.countdowns.insert_running(id, task, deadline, seq);
    }

    /// Re-arms every banked countdown from its remaining duration.
    ///
    /// A banked remaining of zero means the countdown had already run out
    /// when it was paused; the entry is removed immediately.
    fn resume_banked(&mut self) {
        for (id, remaining) in self.countdowns.drain_paused() {
            if remaining.is_zero() {
                self.remove_entry(id, LifecycleEvent::Expired { id });
            } else {
                self.start_countdown(id, remaining);
            }
        }
    }

    /// Removes the oldest entry to make room during a push.
    ///
    /// The queue grows right back within the same push, so collapse
    /// evaluation is skipped here.
    fn evict_oldest(&mut self) {
        let Some(id) = self.notifications.front().map(Notification::id) else {
            return;
        };
        self.countdowns.cancel(id);
        self.notifications.pop_front();
        self.log(LifecycleEvent::Evicted { id });
        self.release_session(id);
    }

    /// Removes an entry for any reason, cleaning up its countdown and drag
    /// session and re-evaluating the expanded invariant.
    fn remove_entry(&mut self, id: NotificationId, event: LifecycleEvent) -> bool {
        let Some(pos) = self.notifications.iter().position(|n| n.id() == id) else {
            return false;
        };
        self.countdowns.cancel(id);
        self.notifications.remove(pos);
        self.log(event);
        self.release_session(id);
        self.auto_collapse();
        true
    }

    /// Drops an entry's drag session mid-gesture.
    ///
    /// If the dying gesture owned the timer pause, the countdowns would stay
    /// banked forever; resume them on its behalf.
    fn release_session(&mut self, id: NotificationId) {
        if let Some(session) = self.drags.remove(&id) {
            if session.owns_pause() && !self.expanded {
                self.resume_banked();
            }
        }
    }

    /// `expanded` may only hold with more than one entry.
    fn auto_collapse(&mut self) {
        if self.expanded && self.notifications.len() <= 1 {
            self.expanded = false;
            self.log(LifecycleEvent::ExpandedChanged { expanded: false });
            self.resume_banked();
        }
    }

    /// Schedules the post-exit-animation removal of a dismissed entry.
    fn schedule_removal(&mut self, id: NotificationId) {
        let shared = self.weak_self.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(EXIT_REMOVAL_DELAY).await;
            if let Some(manager) = shared.upgrade() {
                lock(&manager).dismiss(id);
            }
        });
    }

    fn log(&self, event: LifecycleEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticsCollector;
    use std::sync::Arc;

    fn manager(config: Config) -> Arc<Mutex<Manager>> {
        Arc::new_cyclic(|weak| {
            Mutex::new(Manager::new(
                config,
                tokio::runtime::Handle::current(),
                weak.clone(),
            ))
        })
    }

    fn messages(manager: &Manager) -> Vec<String> {
        manager
            .notifications()
            .map(|n| n.message().to_string())
            .collect()
    }

    #[tokio::test]
    async fn push_appends_in_arrival_order() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        m.push(Notification::info("a"), Duration::ZERO);
        m.push(Notification::info("b"), Duration::ZERO);

        assert_eq!(messages(&m), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn capacity_evicts_oldest_first() {
        let m = manager(Config {
            capacity: 2,
            ..Config::default()
        });
        let mut m = lock(&m);
        m.push(Notification::info("a"), Duration::ZERO);
        m.push(Notification::info("b"), Duration::ZERO);
        m.push(Notification::info("c"), Duration::ZERO);

        assert_eq!(m.len(), 2);
        assert_eq!(messages(&m), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn eviction_cancels_the_evicted_countdown() {
        let m = manager(Config {
            capacity: 1,
            ..Config::default()
        });
        let mut m = lock(&m);
        let first = m.push(Notification::info("a"), Duration::from_secs(30));
        m.push(Notification::info("b"), Duration::from_secs(30));

        assert!(!m.countdowns().contains(first));
    }

    #[tokio::test]
    async fn dismiss_is_idempotent() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        let id = m.push(Notification::info("a"), Duration::ZERO);

        assert!(m.dismiss(id));
        assert!(!m.dismiss(id));
        assert!(m.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        let id = m.push(Notification::loading("working"), Duration::ZERO);
        m.push(Notification::info("other"), Duration::ZERO);

        assert!(m.update(id, Style::Success, "done".into(), Duration::ZERO));

        let matching: Vec<_> = m.notifications().filter(|n| n.id() == id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].message(), "done");
        assert_eq!(*matching[0].style(), Style::Success);
        assert_eq!(m.len(), 2);
    }

    #[tokio::test]
    async fn update_absent_id_is_a_noop() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        assert!(!m.update(
            NotificationId::new(),
            Style::Success,
            "done".into(),
            Duration::ZERO
        ));
    }

    #[tokio::test]
    async fn zero_duration_never_creates_a_countdown() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        let id = m.push(Notification::error("broken"), Duration::ZERO);
        assert!(!m.countdowns().contains(id));
    }

    #[tokio::test]
    async fn toggle_on_single_entry_is_a_noop() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        m.push(Notification::info("only"), Duration::ZERO);

        m.toggle_expanded();
        assert!(!m.expanded());
    }

    #[tokio::test(start_paused = true)]
    async fn expanding_pauses_and_collapsing_resumes() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        let a = m.push(Notification::info("a"), Duration::from_secs(5));
        let b = m.push(Notification::info("b"), Duration::from_secs(9));

        m.toggle_expanded();
        assert!(m.expanded());
        assert!(!m.countdowns().is_running(a));
        assert_eq!(m.countdowns().remaining(a), Some(Duration::from_secs(5)));
        assert_eq!(m.countdowns().remaining(b), Some(Duration::from_secs(9)));

        m.toggle_expanded();
        assert!(!m.expanded());
        assert!(m.countdowns().is_running(a));
        assert!(m.countdowns().is_running(b));
    }

    #[tokio::test(start_paused = true)]
    async fn push_while_expanded_banks_the_duration() {
        let m = manager(Config::default());
        {
            let mut m = lock(&m);
            m.push(Notification::info("a"), Duration::from_secs(5));
            m.push(Notification::info("b"), Duration::from_secs(5));
            m.toggle_expanded();
        }

        let id = lock(&m).push(Notification::info("c"), Duration::from_secs(3));
        let m = lock(&m);
        assert_eq!(m.countdowns().remaining(id), Some(Duration::from_secs(3)));
        assert!(!m.countdowns().is_running(id));
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_to_one_while_expanded_auto_collapses() {
        let m = manager(Config::default());
        let (a, b) = {
            let mut m = lock(&m);
            let a = m.push(Notification::info("a"), Duration::from_secs(5));
            let b = m.push(Notification::info("b"), Duration::from_secs(5));
            m.toggle_expanded();
            (a, b)
        };

        lock(&m).dismiss(a);

        let m = lock(&m);
        assert!(!m.expanded());
        // The survivor's banked countdown is running again.
        assert!(m.countdowns().is_running(b));
    }

    #[tokio::test(start_paused = true)]
    async fn natural_expiry_removes_the_entry() {
        let m = manager(Config::default());
        let id = lock(&m).push(Notification::info("a"), Duration::from_secs(2));

        tokio::time::sleep(Duration::from_millis(2100)).await;

        let m = lock(&m);
        assert!(!m.contains(id));
        assert!(!m.countdowns().contains(id));
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_before_expiry_prevents_delayed_removal() {
        let m = manager(Config::default());
        let id = lock(&m).push(Notification::info("a"), Duration::from_secs(2));
        assert!(lock(&m).dismiss(id));

        // A fresh entry keeps the queue observable past the old deadline.
        let keeper = lock(&m).push(Notification::info("b"), Duration::ZERO);
        tokio::time::sleep(Duration::from_secs(5)).await;

        let m = lock(&m);
        assert!(m.contains(keeper));
        assert_eq!(m.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn update_supersedes_a_pending_expiry() {
        let m = manager(Config::default());
        let id = lock(&m).push(Notification::loading("working"), Duration::from_secs(1));

        // Refresh just before the original deadline, pushing it out.
        tokio::time::sleep(Duration::from_millis(900)).await;
        lock(&m).update(id, Style::Success, "done".into(), Duration::from_secs(3));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(lock(&m).contains(id));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!lock(&m).contains(id));
    }

    #[tokio::test]
    async fn stale_expire_stamp_is_ignored() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        let id = m.push(Notification::info("a"), Duration::from_secs(30));

        m.expire(id, u64::MAX);
        assert!(m.contains(id));
    }

    #[tokio::test(start_paused = true)]
    async fn paused_then_resumed_countdown_keeps_its_remaining() {
        let m = manager(Config::default());
        {
            let mut m = lock(&m);
            m.push(Notification::info("a"), Duration::from_secs(5));
            m.push(Notification::info("b"), Duration::from_secs(5));
            m.toggle_expanded();
        }

        // Time spent expanded must not consume the countdown.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(lock(&m).len(), 2);

        lock(&m).toggle_expanded();
        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert_eq!(lock(&m).len(), 2);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(lock(&m).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drag_pauses_and_resumes_countdowns() {
        let m = manager(Config::default());
        let id = lock(&m).push(Notification::info("a"), Duration::from_secs(5));

        {
            let mut m = lock(&m);
            m.drag_update(id, Vector::new(10.0, 0.0));
            assert!(!m.countdowns().is_running(id));
        }

        // Held mid-drag well past the original deadline.
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(lock(&m).contains(id));

        let outcome = lock(&m).drag_end(id, Vector::new(10.0, 0.0));
        assert_eq!(outcome, Some(DragOutcome::Reset));
        assert!(lock(&m).countdowns().is_running(id));
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_gesture_removes_after_exit_delay() {
        let m = manager(Config::default());
        let id = lock(&m).push(Notification::info("a"), Duration::ZERO);

        lock(&m).drag_update(id, Vector::new(30.0, 0.0));
        let outcome = lock(&m).drag_end(id, Vector::new(90.0, 2.0));
        assert!(matches!(outcome, Some(DragOutcome::Dismiss { .. })));
        assert!(lock(&m).contains(id));

        tokio::time::sleep(EXIT_REMOVAL_DELAY + Duration::from_millis(50)).await;
        assert!(!lock(&m).contains(id));
    }

    #[tokio::test]
    async fn drag_on_unknown_id_returns_none() {
        let m = manager(Config::default());
        let mut m = lock(&m);
        assert!(m.drag_update(NotificationId::new(), Vector::new(5.0, 0.0)).is_none());
        assert!(m.drag_end(NotificationId::new(), Vector::new(5.0, 0.0)).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_a_dragged_entry_releases_its_pause() {
        let m = manager(Config::default());
        let (a, b) = {
            let mut m = lock(&m);
            let a = m.push(Notification::info("a"), Duration::from_secs(5));
            let b = m.push(Notification::info("b"), Duration::from_secs(5));
            (a, b)
        };

        lock(&m).drag_update(a, Vector::new(10.0, 0.0));
        assert!(!lock(&m).countdowns().is_running(b));

        // The dragged entry disappears mid-gesture; the pause must not leak.
        lock(&m).dismiss(a);
        assert!(lock(&m).countdowns().is_running(b));
    }

    #[tokio::test]
    async fn lifecycle_events_are_logged() {
        let collector = DiagnosticsCollector::new();
        let m = manager(Config {
            capacity: 1,
            ..Config::default()
        });
        let mut m = lock(&m);
        m.set_diagnostics(collector.handle());

        let a = m.push(Notification::info("a"), Duration::ZERO);
        let b = m.push(Notification::info("b"), Duration::ZERO);
        m.dismiss(b);

        assert_eq!(
            collector.drain(),
            vec![
                LifecycleEvent::Shown { id: a },
                LifecycleEvent::Evicted { id: a },
                LifecycleEvent::Shown { id: b },
                LifecycleEvent::Dismissed { id: b },
            ]
        );
    }
}
