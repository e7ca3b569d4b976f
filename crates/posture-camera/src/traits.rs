use crate::CameraError;
use posture_base::Tensor;

/// Async frame source.
///
/// Each call to `recv` pulls one frame:
/// - `Ok(Some(frame))`: an RGB frame with shape `[height, width, 3]`
/// - `Ok(None)`: the source is exhausted and will produce no more frames
/// - `Err(_)`: capture failed
///
/// Sources release their device when dropped.
#[allow(async_fn_in_trait)]
pub trait Camera {
    async fn recv(&mut self) -> Result<Option<Tensor<u8>>, CameraError>;
}
