// SPDX-License-Identifier: MPL-2.0
//! Drag-dismiss evaluation.
//!
//! Everything here is pure: the live damping transform and the terminal
//! classification are functions of the gesture translation, the entry's
//! stiffness, and the queue's display mode. Side effects (pausing timers,
//! scheduling the removal) are applied by the coordinator from the values
//! these functions return.
//!
//! A gesture runs through three phases: idle until the first non-zero
//! translation, dragging while updates arrive, and resolved once the end
//! translation has been classified. Resolution destroys the session.

use crate::config::Config;
use iced_core::Vector;

/// Residual horizontal drift carried into a vertical exit, as a fraction of
/// the gesture's final horizontal translation.
const VERTICAL_EXIT_DRIFT: f32 = 0.3;

/// One visual frame of an active drag: what the render layer should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    /// Damped offset from the toast's resting position.
    pub offset: Vector,
    /// Current opacity (1.0 during the drag; terminal values come from the
    /// outcome).
    pub opacity: f32,
}

/// Terminal classification of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Snap back: animate offset to zero and opacity to 1.
    Reset,
    /// Animate to `exit_offset` while fading to 0; removal follows shortly.
    Dismiss {
        /// Off-screen target of the exit animation.
        exit_offset: Vector,
    },
}

/// Computes the damped visual offset for a translation in progress.
///
/// Downward movement is always damped. Upward movement is damped only in
/// expanded context or for stiff entries. Horizontal movement is damped only
/// for stiff entries or once damping has been engaged for the gesture.
#[must_use]
pub fn damped_offset(
    translation: Vector,
    config: &Config,
    stiff: bool,
    expanded: bool,
    engaged: bool,
) -> Vector {
    let y = if translation.y > 0.0 {
        (translation.y * config.damping_factor).min(config.max_vertical_damp)
    } else if expanded || stiff {
        (translation.y * config.damping_factor).max(-config.max_vertical_damp)
    } else {
        translation.y
    };

    let x = if stiff || engaged {
        translation.x.signum() * (translation.x.abs() * config.damping_factor).min(config.max_horizontal_damp)
    } else {
        translation.x
    };

    Vector::new(x, y)
}

/// Classifies a finished gesture from its final translation.
///
/// Horizontal dismissal requires the horizontal axis to be allowed, the
/// gesture to be predominantly horizontal (`|dx| >= |dy|`), the distance to
/// exceed the threshold, and a non-stiff entry. Vertical dismissal is
/// upward-only and additionally requires the collapsed display mode.
#[must_use]
pub fn classify(translation: Vector, config: &Config, stiff: bool, expanded: bool) -> DragOutcome {
    let axes = config.allowed_axes;
    if !axes.horizontal() && !axes.vertical() {
        return DragOutcome::Reset;
    }

    let (dx, dy) = (translation.x, translation.y);
    let horizontal_predominant = dx.abs() >= dy.abs();

    if axes.horizontal() && horizontal_predominant && dx.abs() > config.dismiss_distance && !stiff {
        return DragOutcome::Dismiss {
            exit_offset: Vector::new(dx.signum() * config.off_screen_distance, 0.0),
        };
    }

    if axes.vertical()
        && !horizontal_predominant
        && dy < -config.dismiss_distance
        && !expanded
        && !stiff
    {
        return DragOutcome::Dismiss {
            exit_offset: Vector::new(dx * VERTICAL_EXIT_DRIFT, -config.off_screen_distance),
        };
    }

    DragOutcome::Reset
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging,
    Resolved,
}

/// Per-gesture session state for one entry.
///
/// Created lazily on the first gesture event for an entry and destroyed when
/// the gesture resolves.
#[derive(Debug)]
pub(crate) struct Session {
    offset: Vector,
    opacity: f32,
    owns_pause: bool,
    /// Latched at gesture start so a mid-gesture style update cannot change
    /// the damping contract.
    damping_engaged: bool,
    phase: Phase,
}

impl Session {
    pub fn new(stiff: bool) -> Self {
        Self {
            offset: Vector::new(0.0, 0.0),
            opacity: 1.0,
            owns_pause: false,
            damping_engaged: stiff,
            phase: Phase::Idle,
        }
    }

    /// Transitions idle -> dragging on the first non-zero translation.
    ///
    /// Returns `true` when this gesture should take ownership of a timer
    /// pause, which happens at most once and only in collapsed mode.
    pub fn begin(&mut self, translation: Vector, expanded: bool) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        if translation.x == 0.0 && translation.y == 0.0 {
            return false;
        }
        self.phase = Phase::Dragging;
        if expanded {
            false
        } else {
            self.owns_pause = true;
            true
        }
    }

    /// Applies the damping transform for an in-progress translation.
    pub fn update(
        &mut self,
        translation: Vector,
        config: &Config,
        stiff: bool,
        expanded: bool,
    ) -> DragFrame {
        self.offset = damped_offset(translation, config, stiff, expanded, self.damping_engaged);
        DragFrame {
            offset: self.offset,
            opacity: self.opacity,
        }
    }

    /// Marks the gesture terminal.
    pub fn resolve(&mut self) {
        self.phase = Phase::Resolved;
        self.damping_engaged = false;
    }

    /// Whether this gesture paused the timers when it started.
    pub fn owns_pause(&self) -> bool {
        self.owns_pause
    }
}
