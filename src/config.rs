// SPDX-License-Identifier: MPL-2.0
//! Coordinator configuration.
//!
//! All values are supplied once at construction and read-only afterwards.
//! There is no file format: hosts build a [`Config`] in code, usually from
//! `Config::default()` with a couple of field overrides.
//!
//! Values are accepted as-is. A `capacity` of zero makes every push evict
//! down to the new entry, a zero duration disables the countdown, and a
//! negative threshold makes every gesture resolve to a reset. Only the
//! default constants below are validated, at compile time.

use std::time::Duration;

/// Default maximum number of concurrent toast entries.
pub const DEFAULT_CAPACITY: usize = 5;

/// Default auto-dismiss duration for non-persistent toasts.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(4);

/// Default drag distance (logical pixels) past which a gesture dismisses.
pub const DEFAULT_DISMISS_DISTANCE: f32 = 60.0;

/// Default off-screen travel distance for the dismissal exit animation.
pub const DEFAULT_OFF_SCREEN_DISTANCE: f32 = 400.0;

/// Default damping factor applied to resisted drag directions.
pub const DEFAULT_DAMPING_FACTOR: f32 = 0.2;

/// Default cap on the damped vertical offset.
pub const DEFAULT_MAX_VERTICAL_DAMP: f32 = 24.0;

/// Default cap on the damped horizontal offset.
pub const DEFAULT_MAX_HORIZONTAL_DAMP: f32 = 36.0;

/// Default vertical spacing between rows in the expanded list.
pub const DEFAULT_EXPANDED_SPACING: f32 = crate::design_tokens::spacing::XS;

/// Which drag axes are allowed to dismiss a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DismissAxes {
    /// Gestures never dismiss; every drag snaps back.
    None,
    /// Only predominantly horizontal gestures dismiss.
    Horizontal,
    /// Only predominantly vertical (upward) gestures dismiss.
    Vertical,
    /// Either axis may dismiss.
    #[default]
    Both,
}

impl DismissAxes {
    /// Whether horizontal dismissal is allowed.
    #[must_use]
    pub fn horizontal(self) -> bool {
        matches!(self, DismissAxes::Horizontal | DismissAxes::Both)
    }

    /// Whether vertical dismissal is allowed.
    #[must_use]
    pub fn vertical(self) -> bool {
        matches!(self, DismissAxes::Vertical | DismissAxes::Both)
    }
}

/// Read-only coordinator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of concurrent entries; the oldest is evicted beyond this.
    pub capacity: usize,
    /// Auto-dismiss duration used by `show` for non-persistent styles.
    pub default_duration: Duration,
    /// Drag distance past which a gesture dismisses.
    pub dismiss_distance: f32,
    /// How far off-screen a dismissal exit travels.
    pub off_screen_distance: f32,
    /// Damping factor for resisted drag directions.
    pub damping_factor: f32,
    /// Cap on the damped vertical offset.
    pub max_vertical_damp: f32,
    /// Cap on the damped horizontal offset.
    pub max_horizontal_damp: f32,
    /// Row spacing in the expanded list (consumed by the render layer).
    pub expanded_spacing: f32,
    /// Which axes may dismiss.
    pub allowed_axes: DismissAxes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_duration: DEFAULT_DURATION,
            dismiss_distance: DEFAULT_DISMISS_DISTANCE,
            off_screen_distance: DEFAULT_OFF_SCREEN_DISTANCE,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            max_vertical_damp: DEFAULT_MAX_VERTICAL_DAMP,
            max_horizontal_damp: DEFAULT_MAX_HORIZONTAL_DAMP,
            expanded_spacing: DEFAULT_EXPANDED_SPACING,
            allowed_axes: DismissAxes::default(),
        }
    }
}

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_CAPACITY > 0);
    assert!(!DEFAULT_DURATION.is_zero());
    assert!(DEFAULT_DISMISS_DISTANCE > 0.0);
    assert!(DEFAULT_OFF_SCREEN_DISTANCE > DEFAULT_DISMISS_DISTANCE);
    assert!(DEFAULT_DAMPING_FACTOR > 0.0);
    assert!(DEFAULT_DAMPING_FACTOR < 1.0);
    assert!(DEFAULT_MAX_VERTICAL_DAMP > 0.0);
    assert!(DEFAULT_MAX_HORIZONTAL_DAMP > 0.0);
    assert!(DEFAULT_EXPANDED_SPACING > 0.0);
};
