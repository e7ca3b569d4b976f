use crate::geometry::line_angle;
use crate::thresholds::Thresholds;
use posture_infer::{KeypointIndex, Landmarks};
use std::fmt;

/// One posture violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alert {
    ShouldersNotLevel,
    HeadTooFarForward,
    HeadTilted,
}

impl Alert {
    pub fn message(self) -> &'static str {
        match self {
            Alert::ShouldersNotLevel => "Shoulders not level!",
            Alert::HeadTooFarForward => "Head too far forward!",
            Alert::HeadTilted => "Head tilted!",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Score one frame's landmarks.
///
/// Checks run in a fixed order (shoulder level, forward head, head tilt) and
/// each adds at most one alert. No landmarks means no alerts. All limits are
/// strict: a deviation equal to its threshold passes.
pub fn evaluate(
    landmarks: Option<&Landmarks>,
    width: u32,
    height: u32,
    thresholds: &Thresholds,
) -> Vec<Alert> {
    let Some(landmarks) = landmarks else {
        return Vec::new();
    };

    let nose = landmarks.pixel(KeypointIndex::Nose, width, height);
    let left_shoulder = landmarks.pixel(KeypointIndex::LeftShoulder, width, height);
    let right_shoulder = landmarks.pixel(KeypointIndex::RightShoulder, width, height);

    let mut alerts = Vec::with_capacity(3);

    if (left_shoulder.y - right_shoulder.y).abs() > thresholds.shoulder_tilt_px() {
        alerts.push(Alert::ShouldersNotLevel);
    }

    // One-sided: only a nose ahead in +x counts.
    let shoulder_mid = left_shoulder.midpoint(right_shoulder);
    if nose.x - shoulder_mid.x > thresholds.forward_head_px() {
        alerts.push(Alert::HeadTooFarForward);
    }

    if line_angle(left_shoulder, nose).abs() > thresholds.head_tilt_degrees() {
        alerts.push(Alert::HeadTilted);
    }

    alerts
}
