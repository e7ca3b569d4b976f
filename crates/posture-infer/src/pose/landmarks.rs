use posture_base::Vec2;

use super::types::{KeypointIndex, PoseDetection, COCO_KEYPOINT_COUNT};

/// A body joint in normalized image coordinates, `[0, 1] x [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub position: Vec2<f32>,
    pub visibility: f32,
}

/// The named joints of one person in one frame.
///
/// Coordinates are normalized to the frame that produced them, so a set is
/// only meaningful together with that frame's width and height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Landmarks {
    points: [Landmark; COCO_KEYPOINT_COUNT],
}

impl Landmarks {
    pub fn new(points: [Landmark; COCO_KEYPOINT_COUNT]) -> Self {
        Self { points }
    }

    /// Normalize a detection in frame pixels by the frame size.
    pub fn from_detection(detection: &PoseDetection, width: usize, height: usize) -> Self {
        let size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let points = detection.keypoints.map(|kp| Landmark {
            position: Vec2::new(kp.position.x / size.x, kp.position.y / size.y),
            visibility: kp.confidence,
        });
        Self { points }
    }

    /// Set one joint, builder style.
    pub fn with(mut self, index: KeypointIndex, x: f32, y: f32, visibility: f32) -> Self {
        self.points[usize::from(index)] = Landmark {
            position: Vec2::new(x, y),
            visibility,
        };
        self
    }

    pub fn get(&self, index: KeypointIndex) -> &Landmark {
        &self.points[usize::from(index)]
    }

    /// Pixel position of a joint in a `width` x `height` frame.
    pub fn pixel(&self, index: KeypointIndex, width: u32, height: u32) -> Vec2<f32> {
        self.get(index)
            .position
            .scale(Vec2::new(width as f32, height as f32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeypointIndex, &Landmark)> {
        KeypointIndex::ALL.into_iter().zip(self.points.iter())
    }
}
