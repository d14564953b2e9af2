// SPDX-License-Identifier: MPL-2.0
//! Design tokens consumed by the built-in toast styles.
//!
//! Hosts rendering custom chrome can reuse these constants to stay visually
//! consistent with the built-in styles.

/// Color palette for built-in styles.
pub mod palette {
    use iced_core::Color;

    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

/// Widget sizing constants.
pub mod sizing {
    /// Fixed width of a rendered toast card.
    pub const TOAST_WIDTH: f32 = 320.0;
}

/// Spacing scale.
pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
}
