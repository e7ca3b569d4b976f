use posture_base::{Rect, Vec2};

/// Number of keypoints in COCO pose format
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// A single keypoint in frame pixels with a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Keypoint {
    pub position: Vec2<f32>,
    /// Visibility score in [0.0, 1.0]
    pub confidence: f32,
}

/// COCO keypoint indices for human pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    /// All keypoints in model output order.
    pub const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KeypointIndex::Nose => "NOSE",
            KeypointIndex::LeftEye => "LEFT_EYE",
            KeypointIndex::RightEye => "RIGHT_EYE",
            KeypointIndex::LeftEar => "LEFT_EAR",
            KeypointIndex::RightEar => "RIGHT_EAR",
            KeypointIndex::LeftShoulder => "LEFT_SHOULDER",
            KeypointIndex::RightShoulder => "RIGHT_SHOULDER",
            KeypointIndex::LeftElbow => "LEFT_ELBOW",
            KeypointIndex::RightElbow => "RIGHT_ELBOW",
            KeypointIndex::LeftWrist => "LEFT_WRIST",
            KeypointIndex::RightWrist => "RIGHT_WRIST",
            KeypointIndex::LeftHip => "LEFT_HIP",
            KeypointIndex::RightHip => "RIGHT_HIP",
            KeypointIndex::LeftKnee => "LEFT_KNEE",
            KeypointIndex::RightKnee => "RIGHT_KNEE",
            KeypointIndex::LeftAnkle => "LEFT_ANKLE",
            KeypointIndex::RightAnkle => "RIGHT_ANKLE",
        }
    }
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        KeypointIndex::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid keypoint index: {}. Must be in range 0-{}.",
                value,
                COCO_KEYPOINT_COUNT - 1
            )
        })
    }
}

/// A detected person with bounding box and keypoints, in frame pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PoseDetection {
    pub bbox: Rect<f32>,
    pub confidence: f32,
    pub keypoints: [Keypoint; COCO_KEYPOINT_COUNT],
}

impl PoseDetection {
    pub fn keypoint(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[usize::from(index)]
    }
}

/// Letterbox transformation parameters for coordinate rescaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// Scale factor applied to the image (min(640/H, 640/W))
    pub scale: f32,
    /// Horizontal padding added (in pixels)
    pub pad_x: f32,
    /// Vertical padding added (in pixels)
    pub pad_y: f32,
}

impl LetterboxInfo {
    /// Map a point from model input space back to frame pixels.
    pub fn unmap(&self, point: Vec2<f32>) -> Vec2<f32> {
        Vec2::new(
            (point.x - self.pad_x) / self.scale,
            (point.y - self.pad_y) / self.scale,
        )
    }
}
