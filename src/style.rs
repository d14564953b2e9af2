// SPDX-License-Identifier: MPL-2.0
//! Toast style descriptors.
//!
//! A style is an opaque capability: the coordinator never looks inside it
//! beyond the [`Style::is_persistent`] predicate. The render layer asks a
//! style for its icon identity and colors through the same three accessors
//! whether the style is a built-in or a host-defined [`StyleSheet`].

use crate::design_tokens::palette;
use iced_core::Color;
use std::fmt;
use std::sync::Arc;

/// Icon identity for a toast style.
///
/// Identities only; the render layer maps them to actual glyphs or images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Checkmark,
    Cross,
    Info,
    Spinner,
    /// Host-defined icon referenced by name.
    Named(&'static str),
}

/// Capability interface for host-defined toast styles.
pub trait StyleSheet: Send + Sync {
    /// Icon identity shown in the toast.
    fn icon(&self) -> Icon;

    /// Color of the icon.
    fn icon_color(&self) -> Color;

    /// Background color of the toast card.
    fn background(&self) -> Color;

    /// Whether this style marks an in-flight operation that must not be
    /// dismissible by gesture.
    fn is_persistent(&self) -> bool {
        false
    }
}

/// A toast's visual style.
///
/// The built-in variants cover the common lifecycle (success, error, info,
/// loading); `Custom` opens the set to host-defined sheets.
#[derive(Clone)]
pub enum Style {
    /// Operation completed successfully (green checkmark).
    Success,
    /// Operation failed (red cross).
    Error,
    /// Neutral informational message (blue).
    Info,
    /// In-flight operation (spinner); persistent until updated or dismissed.
    Loading,
    /// Host-defined style.
    Custom(Arc<dyn StyleSheet>),
}

impl Style {
    /// Icon identity for this style.
    #[must_use]
    pub fn icon(&self) -> Icon {
        match self {
            Style::Success => Icon::Checkmark,
            Style::Error => Icon::Cross,
            Style::Info => Icon::Info,
            Style::Loading => Icon::Spinner,
            Style::Custom(sheet) => sheet.icon(),
        }
    }

    /// Icon color for this style.
    #[must_use]
    pub fn icon_color(&self) -> Color {
        match self {
            Style::Success => palette::SUCCESS_500,
            Style::Error => palette::ERROR_500,
            Style::Info => palette::INFO_500,
            Style::Loading => palette::GRAY_100,
            Style::Custom(sheet) => sheet.icon_color(),
        }
    }

    /// Background color for this style.
    #[must_use]
    pub fn background(&self) -> Color {
        match self {
            Style::Custom(sheet) => sheet.background(),
            _ => palette::GRAY_900,
        }
    }

    /// Whether entries with this style resist gesture dismissal and skip the
    /// default auto-dismiss duration.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        match self {
            Style::Loading => true,
            Style::Custom(sheet) => sheet.is_persistent(),
            _ => false,
        }
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Success => write!(f, "Style::Success"),
            Style::Error => write!(f, "Style::Error"),
            Style::Info => write!(f, "Style::Info"),
            Style::Loading => write!(f, "Style::Loading"),
            Style::Custom(_) => write!(f, "Style::Custom(..)"),
        }
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Style::Success, Style::Success)
            | (Style::Error, Style::Error)
            | (Style::Info, Style::Info)
            | (Style::Loading, Style::Loading) => true,
            (Style::Custom(a), Style::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
