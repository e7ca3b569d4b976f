use crate::cancel::CancellationToken;
use crate::error::{MonitorError, RenderError};
use crate::evaluator::{evaluate, Alert};
use crate::thresholds::Thresholds;
use posture_base::{Tensor, Vec2};
use posture_camera::Camera;
use posture_infer::{Landmarks, PoseEstimator};

/// Top-left position of the first alert line.
pub const OVERLAY_ORIGIN: Vec2<i32> = Vec2::new(10, 30);
/// Vertical distance between alert lines.
pub const OVERLAY_LINE_HEIGHT: i32 = 30;

/// Text drawn on top of a frame, positioned in frame pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub text: String,
    pub position: Vec2<i32>,
}

/// Lay alerts out top to bottom in evaluation order.
pub fn alert_overlays(alerts: &[Alert]) -> Vec<Overlay> {
    alerts
        .iter()
        .enumerate()
        .map(|(i, alert)| Overlay {
            text: alert.message().to_string(),
            position: Vec2::new(
                OVERLAY_ORIGIN.x,
                OVERLAY_ORIGIN.y + i as i32 * OVERLAY_LINE_HEIGHT,
            ),
        })
        .collect()
}

/// Displays a frame with its landmarks and overlays.
pub trait Renderer {
    fn render(
        &mut self,
        frame: &Tensor<u8>,
        landmarks: Option<&Landmarks>,
        overlays: &[Overlay],
    ) -> Result<(), RenderError>;
}

/// Source of a user exit request, polled once per iteration: after rendering,
/// or after a capture failure that is being retried.
pub trait ExitSignal {
    fn exit_requested(&mut self) -> bool;
}

impl ExitSignal for CancellationToken {
    fn exit_requested(&mut self) -> bool {
        self.is_cancelled()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    /// The frame source ran dry; the next step exits.
    NoFrame,
    Exited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    UserRequested,
    EndOfStream,
    CaptureFailed(String),
}

/// Counters collected over one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonitorSummary {
    /// Frames that went through pose estimation.
    pub frames: u64,
    /// Frames in which a person was detected.
    pub frames_with_subject: u64,
    /// Frames dropped for having an unexpected shape.
    pub skipped_frames: u64,
    /// Alerts raised across all frames.
    pub alerts: u64,
    pub exit_reason: Option<ExitReason>,
}

/// The capture -> estimate -> evaluate -> render loop.
///
/// Owns its frame source, estimator and display. [`Monitor::run`] consumes
/// the monitor, so all three are dropped exactly once when the loop ends,
/// whichever way it ends.
pub struct Monitor<C, E, D> {
    camera: C,
    estimator: E,
    display: D,
    thresholds: Thresholds,
    capture_retries: u32,
    failed_captures: u32,
    state: MonitorState,
    summary: MonitorSummary,
}

impl<C, E, D> Monitor<C, E, D>
where
    C: Camera,
    E: PoseEstimator,
    D: Renderer + ExitSignal,
{
    pub fn new(camera: C, estimator: E, display: D, thresholds: Thresholds) -> Self {
        Self {
            camera,
            estimator,
            display,
            thresholds,
            capture_retries: 0,
            failed_captures: 0,
            state: MonitorState::Running,
            summary: MonitorSummary::default(),
        }
    }

    /// Allow up to `retries` consecutive capture failures before exiting.
    ///
    /// The default is 0: the first failed pull ends the loop.
    pub fn with_capture_retries(mut self, retries: u32) -> Self {
        self.capture_retries = retries;
        self
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn summary(&self) -> &MonitorSummary {
        &self.summary
    }

    /// Run one loop iteration and return the state it ends in.
    pub async fn step(&mut self) -> Result<MonitorState, MonitorError> {
        match self.state {
            MonitorState::Exited => return Ok(MonitorState::Exited),
            MonitorState::NoFrame => {
                self.exit(ExitReason::EndOfStream);
                return Ok(self.state);
            }
            MonitorState::Running => {}
        }

        let frame = match self.camera.recv().await {
            Ok(Some(frame)) => {
                self.failed_captures = 0;
                frame
            }
            Ok(None) => {
                log::info!("frame source exhausted");
                self.transition(MonitorState::NoFrame);
                return Ok(self.state);
            }
            Err(e) if self.failed_captures < self.capture_retries => {
                self.failed_captures += 1;
                log::warn!(
                    "capture failed ({e}), retry {}/{}",
                    self.failed_captures,
                    self.capture_retries
                );
                self.poll_exit();
                return Ok(self.state);
            }
            Err(e) => {
                log::error!("capture failed: {e}");
                self.exit(ExitReason::CaptureFailed(e.to_string()));
                return Ok(self.state);
            }
        };

        if let Err(e) = self.process(&frame) {
            self.transition(MonitorState::Exited);
            return Err(e);
        }

        self.poll_exit();
        Ok(self.state)
    }

    /// Step until the loop exits, then release the camera, estimator and display.
    pub async fn run(mut self) -> Result<MonitorSummary, MonitorError> {
        log::info!("monitor started");

        while self.step().await? != MonitorState::Exited {}

        let summary = std::mem::take(&mut self.summary);
        drop(self);

        log::info!(
            "monitor stopped ({:?}): {} frames, {} with a person, {} alerts",
            summary.exit_reason,
            summary.frames,
            summary.frames_with_subject,
            summary.alerts
        );
        Ok(summary)
    }

    fn process(&mut self, frame: &Tensor<u8>) -> Result<(), MonitorError> {
        let Some((height, width)) = frame.rgb_dims() else {
            log::warn!("skipping frame with shape {:?}, expected [H, W, 3]", frame.shape);
            self.summary.skipped_frames += 1;
            return Ok(());
        };

        let landmarks = self.estimator.estimate(frame)?;
        let alerts = evaluate(
            landmarks.as_ref(),
            width as u32,
            height as u32,
            &self.thresholds,
        );

        for alert in &alerts {
            log::warn!("{alert}");
        }

        self.summary.frames += 1;
        if landmarks.is_some() {
            self.summary.frames_with_subject += 1;
        }
        self.summary.alerts += alerts.len() as u64;

        let overlays = alert_overlays(&alerts);
        self.display.render(frame, landmarks.as_ref(), &overlays)?;

        Ok(())
    }

    fn poll_exit(&mut self) {
        if self.display.exit_requested() {
            log::info!("exit requested");
            self.exit(ExitReason::UserRequested);
        }
    }

    fn exit(&mut self, reason: ExitReason) {
        self.summary.exit_reason = Some(reason);
        self.transition(MonitorState::Exited);
    }

    fn transition(&mut self, next: MonitorState) {
        log::debug!("monitor {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
