use crate::CameraError;
use posture_base::Tensor;

/// Decode an encoded image (MJPEG frame, PNG, BMP) into an RGB tensor
/// with shape `[height, width, 3]`.
///
/// Grayscale and alpha images are converted to RGB.
pub fn decode_rgb(data: &[u8]) -> Result<Tensor<u8>, CameraError> {
    let rgb = image::load_from_memory(data)?.into_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?)
}
