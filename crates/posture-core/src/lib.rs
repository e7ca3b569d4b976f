//! Real-time posture evaluation.
//!
//! Landmarks from a pose estimator are scored against fixed geometric
//! [`Thresholds`] by [`evaluate`]; the [`Monitor`] loop drives capture,
//! inference, evaluation and rendering, while [`spawn_reminder`] runs an
//! independent eye-rest timer.

pub mod cancel;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod monitor;
pub mod reminder;
pub mod thresholds;

pub use cancel::CancellationToken;
pub use error::{MonitorError, RenderError};
pub use evaluator::{evaluate, Alert};
pub use geometry::{angle, line_angle, Point2};
pub use monitor::{
    alert_overlays, ExitReason, ExitSignal, Monitor, MonitorState, MonitorSummary, Overlay,
    Renderer,
};
pub use reminder::{announce, spawn_reminder, ReminderEvent, REMINDER_MESSAGE};
pub use thresholds::Thresholds;
