use posture_infer::InferError;
use std::fmt;

#[derive(Debug)]
pub enum RenderError {
    Window(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Window(msg) => write!(f, "window error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Failures that stop the monitor loop abnormally.
///
/// Capture failures are not errors: they end the loop with
/// [`ExitReason::CaptureFailed`](crate::ExitReason::CaptureFailed).
#[derive(Debug)]
pub enum MonitorError {
    Infer(InferError),
    Render(RenderError),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Infer(err) => write!(f, "pose estimation failed: {err}"),
            MonitorError::Render(err) => write!(f, "render failed: {err}"),
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitorError::Infer(err) => Some(err),
            MonitorError::Render(err) => Some(err),
        }
    }
}

impl From<InferError> for MonitorError {
    fn from(err: InferError) -> Self {
        MonitorError::Infer(err)
    }
}

impl From<RenderError> for MonitorError {
    fn from(err: RenderError) -> Self {
        MonitorError::Render(err)
    }
}
