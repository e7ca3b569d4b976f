//! Frame acquisition for the posture monitor.
//!
//! Every frame source implements the async [`Camera`] trait and yields RGB
//! frames as `Tensor<u8>` in HWC layout `[height, width, 3]`.

pub mod config;
pub mod decode;
pub mod error;
pub mod replay;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use decode::decode_rgb;
pub use error::CameraError;
pub use replay::ReplayCamera;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
