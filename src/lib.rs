// SPDX-License-Identifier: MPL-2.0
//! `iced_toaster` is a toast notification coordinator for applications built
//! with the Iced GUI toolkit.
//!
//! The crate owns the lifecycle of a bounded, arrival-ordered stack of
//! transient notifications: per-entry auto-dismiss countdowns that can be
//! paused and resumed as a unit, a collapsed/expanded display mode, and a
//! drag-gesture evaluator that decides between dismissal and snap-back.
//! Rendering is deliberately left to the host application, which consumes
//! state snapshots and feeds gesture translations back in.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` entry with identity and style
//! - [`style`] - Built-in style variants plus the `StyleSheet` extension trait
//! - [`Toaster`] - Coordinator facade, `ToastHandle`, and the loading helper
//! - [`drag`] - Pure drag-dismiss evaluation (damping and classification)
//! - [`diagnostics`] - Optional lifecycle event log for host instrumentation
//!
//! # Usage
//!
//! ```ignore
//! use iced_toaster::{Config, Notification, Toaster};
//!
//! // Requires an ambient tokio runtime (Iced's tokio executor qualifies).
//! let toaster = Toaster::new(Config::default());
//!
//! let handle = toaster.show(Notification::success("Image saved"));
//! // ... later, from anywhere:
//! handle.dismiss();
//! ```

#![doc(html_root_url = "https://docs.rs/iced_toaster/0.1.0")]

pub mod config;
mod countdown;
pub mod design_tokens;
pub mod diagnostics;
pub mod drag;
mod manager;
pub mod notification;
pub mod style;
mod toaster;

pub use config::{Config, DismissAxes};
pub use diagnostics::{DiagnosticsCollector, DiagnosticsHandle, LifecycleEvent};
pub use drag::{DragFrame, DragOutcome};
pub use notification::{Notification, NotificationId};
pub use style::{Icon, Style, StyleSheet};
pub use toaster::{ToastHandle, Toaster};
