use crate::{Backend, InferError, ModelSource, Session};
use posture_base::Tensor;

use super::landmarks::Landmarks;
use super::postprocess::postprocess;
use super::preprocess::preprocess;
use super::types::PoseDetection;

/// Produces the landmarks of the person in a frame.
pub trait PoseEstimator {
    /// Estimate landmarks for a single RGB frame `[H, W, 3]`.
    ///
    /// Returns `Ok(None)` when nobody is detected.
    fn estimate(&mut self, frame: &Tensor<u8>) -> Result<Option<Landmarks>, InferError>;
}

/// YOLO pose estimation pipeline
///
/// Letterbox preprocessing, model inference through a [`Session`], confidence
/// filtering and NMS. Only the most confident person is turned into
/// [`Landmarks`].
pub struct YoloPoseEstimator {
    session: Box<dyn Session>,
    conf_threshold: f32,
    iou_threshold: f32,
}

impl YoloPoseEstimator {
    /// Wrap an already loaded session (conf=0.5, iou=0.45).
    pub fn new(session: Box<dyn Session>) -> Self {
        Self {
            session,
            conf_threshold: 0.5,
            iou_threshold: 0.45,
        }
    }

    /// Load `model` with `backend`.
    pub fn load(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        log::info!("pose model loaded with {} backend", backend.name());
        Ok(Self::new(session))
    }

    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.conf_threshold = threshold;
        self
    }

    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.iou_threshold = threshold;
        self
    }

    pub fn conf_threshold(&self) -> f32 {
        self.conf_threshold
    }

    pub fn iou_threshold(&self) -> f32 {
        self.iou_threshold
    }

    /// All people in the frame, most confident first, in frame pixels.
    pub fn detect(&mut self, frame: &Tensor<u8>) -> Result<Vec<PoseDetection>, InferError> {
        let (input, letterbox) = preprocess(frame)?;

        let input_name = self
            .session
            .input_names()
            .first()
            .ok_or_else(|| InferError::Backend("model has no inputs".to_string()))?
            .clone();

        let outputs = self.session.run(&[(input_name.as_str(), input)])?;

        // Single-output model; take the first declared output if present.
        let output = self
            .session
            .output_names()
            .first()
            .and_then(|name| outputs.get(name))
            .or_else(|| outputs.values().next())
            .ok_or_else(|| InferError::Backend("model produced no outputs".to_string()))?;

        postprocess(output, &letterbox, self.conf_threshold, self.iou_threshold)
    }
}

impl PoseEstimator for YoloPoseEstimator {
    fn estimate(&mut self, frame: &Tensor<u8>) -> Result<Option<Landmarks>, InferError> {
        let Some((height, width)) = frame.rgb_dims() else {
            return Err(InferError::ShapeMismatch {
                expected: "[H, W, 3]".to_string(),
                got: format!("{:?}", frame.shape),
            });
        };

        let detections = self.detect(frame)?;
        if detections.len() > 1 {
            log::debug!("{} people detected, using the most confident", detections.len());
        }

        Ok(detections
            .first()
            .map(|best| Landmarks::from_detection(best, width, height)))
    }
}
