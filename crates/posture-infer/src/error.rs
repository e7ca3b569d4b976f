use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    ShapeMismatch { expected: String, got: String },
    ModelLoad(String),
    Backend(String),
    InvalidInput { name: String, expected_names: Vec<String> },
    UnsupportedDevice(Device),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', model expects one of {expected_names:?}"
            ),
            InferError::UnsupportedDevice(device) => {
                write!(f, "device {device} is not supported by this build")
            }
        }
    }
}

impl std::error::Error for InferError {}

impl From<posture_base::TensorError> for InferError {
    fn from(err: posture_base::TensorError) -> Self {
        InferError::Backend(err.to_string())
    }
}
