mod estimator;
mod landmarks;
mod postprocess;
mod preprocess;
mod types;

pub use estimator::{PoseEstimator, YoloPoseEstimator};
pub use landmarks::{Landmark, Landmarks};
pub use postprocess::{iou, postprocess};
pub use preprocess::preprocess;
pub use types::{
    Keypoint, KeypointIndex, LetterboxInfo, PoseDetection, COCO_KEYPOINT_COUNT,
};
