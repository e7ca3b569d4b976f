use crate::InferError;
use posture_base::Tensor;

use super::types::LetterboxInfo;

/// Side length of the square model input.
pub const TARGET_SIZE: usize = 640;
const PAD_VALUE: f32 = 114.0 / 255.0;

/// Prepare an RGB frame for YOLO pose inference.
///
/// Takes a frame in HWC layout `[H, W, 3]` and returns an NCHW tensor
/// `[1, 3, 640, 640]` with values in [0.0, 1.0]:
/// - nearest-neighbor resize keeping aspect ratio
/// - centered on a gray letterbox
///
/// The returned `LetterboxInfo` maps model coordinates back to the frame.
pub fn preprocess(frame: &Tensor<u8>) -> Result<(Tensor<f32>, LetterboxInfo), InferError> {
    let (h, w) = frame.rgb_dims().ok_or_else(|| InferError::ShapeMismatch {
        expected: "[H, W, 3]".to_string(),
        got: format!("{:?}", frame.shape),
    })?;

    let scale = (TARGET_SIZE as f32 / w as f32).min(TARGET_SIZE as f32 / h as f32);
    let new_w = ((w as f32 * scale) as usize).clamp(1, TARGET_SIZE);
    let new_h = ((h as f32 * scale) as usize).clamp(1, TARGET_SIZE);
    let pad_x = (TARGET_SIZE - new_w) / 2;
    let pad_y = (TARGET_SIZE - new_h) / 2;

    let plane = TARGET_SIZE * TARGET_SIZE;
    let mut nchw = vec![PAD_VALUE; 3 * plane];

    for y in 0..new_h {
        let src_y = ((y as f32 / scale) as usize).min(h - 1);
        for x in 0..new_w {
            let src_x = ((x as f32 / scale) as usize).min(w - 1);
            let src = (src_y * w + src_x) * 3;
            let dst = (y + pad_y) * TARGET_SIZE + (x + pad_x);
            for ch in 0..3 {
                nchw[ch * plane + dst] = frame.data[src + ch] as f32 / 255.0;
            }
        }
    }

    let input = Tensor::new(vec![1, 3, TARGET_SIZE, TARGET_SIZE], nchw)?;

    Ok((
        input,
        LetterboxInfo {
            scale,
            pad_x: pad_x as f32,
            pad_y: pad_y as f32,
        },
    ))
}
