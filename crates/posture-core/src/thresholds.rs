use std::time::Duration;

/// Head tilt above which the head counts as tilted, in degrees.
pub const HEAD_TILT_THRESHOLD: f32 = 15.0;
/// Vertical shoulder offset above which shoulders count as uneven, in pixels.
pub const SHOULDER_TILT_THRESHOLD: f32 = 20.0;
/// Nose offset ahead of the shoulder midpoint that counts as forward head, in pixels.
pub const FORWARD_HEAD_THRESHOLD: f32 = 50.0;
/// Time between eye-rest reminders (20-20-20 rule).
pub const REMINDER_INTERVAL: Duration = Duration::from_secs(20 * 60);

/// Posture limits and reminder period.
///
/// Built once at startup and shared by reference; there are no setters
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    head_tilt_degrees: f32,
    shoulder_tilt_px: f32,
    forward_head_px: f32,
    reminder_interval: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            head_tilt_degrees: HEAD_TILT_THRESHOLD,
            shoulder_tilt_px: SHOULDER_TILT_THRESHOLD,
            forward_head_px: FORWARD_HEAD_THRESHOLD,
            reminder_interval: REMINDER_INTERVAL,
        }
    }
}

impl Thresholds {
    pub fn with_head_tilt_degrees(mut self, degrees: f32) -> Self {
        self.head_tilt_degrees = degrees;
        self
    }

    pub fn with_shoulder_tilt_px(mut self, px: f32) -> Self {
        self.shoulder_tilt_px = px;
        self
    }

    pub fn with_forward_head_px(mut self, px: f32) -> Self {
        self.forward_head_px = px;
        self
    }

    pub fn with_reminder_interval(mut self, interval: Duration) -> Self {
        self.reminder_interval = interval;
        self
    }

    pub fn head_tilt_degrees(&self) -> f32 {
        self.head_tilt_degrees
    }

    pub fn shoulder_tilt_px(&self) -> f32 {
        self.shoulder_tilt_px
    }

    pub fn forward_head_px(&self) -> f32 {
        self.forward_head_px
    }

    pub fn reminder_interval(&self) -> Duration {
        self.reminder_interval
    }
}
