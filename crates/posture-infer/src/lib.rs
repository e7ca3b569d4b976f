//! Pose estimation for the posture monitor.
//!
//! The [`PoseEstimator`] trait is the seam the monitor depends on. The
//! YOLO-pose estimator implements it on top of any [`Session`]; the ONNX
//! Runtime backend is behind the `onnx` feature.

pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod pose;
pub mod session;

pub use backend::Backend;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use pose::{
    iou, postprocess, preprocess, Keypoint, KeypointIndex, Landmark, Landmarks, LetterboxInfo,
    PoseDetection, PoseEstimator, YoloPoseEstimator, COCO_KEYPOINT_COUNT,
};
pub use session::Session;

#[cfg(feature = "onnx")]
pub use backends::onnx::{OnnxBackend, OnnxSession};
