use crate::InferError;
use posture_base::{Rect, Tensor, Vec2};

use super::types::{Keypoint, LetterboxInfo, PoseDetection, COCO_KEYPOINT_COUNT};

/// Rows per candidate: cx, cy, w, h, confidence, then (x, y, visibility) per keypoint.
const ROWS: usize = 5 + COCO_KEYPOINT_COUNT * 3;

/// Intersection over Union of two boxes; 0.0 for disjoint or empty boxes.
pub fn iou(a: &Rect<f32>, b: &Rect<f32>) -> f32 {
    if a.area() <= 0.0 || b.area() <= 0.0 {
        return 0.0;
    }

    let intersection = a.intersection(b).map_or(0.0, |r| r.area());
    let union = a.area() + b.area() - intersection;
    if union <= 0.0 {
        return 0.0;
    }

    intersection / union
}

/// Decode raw YOLO pose output `[1, 56, N]` into detections in frame pixels.
///
/// Candidates below `conf_threshold` are dropped, the rest go through greedy
/// NMS at `iou_threshold`. Result is sorted by confidence, highest first.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<PoseDetection>, InferError> {
    let n = match output.shape.as_slice() {
        &[1, ROWS, n] => n,
        _ => {
            return Err(InferError::ShapeMismatch {
                expected: format!("[1, {ROWS}, N]"),
                got: format!("{:?}", output.shape),
            });
        }
    };

    // element [0, row, i] lives at row * n + i
    let at = |row: usize, i: usize| output.data[row * n + i];

    let mut candidates: Vec<PoseDetection> = (0..n)
        .filter(|&i| at(4, i) >= conf_threshold)
        .map(|i| {
            let keypoints = std::array::from_fn(|k| {
                let row = 5 + k * 3;
                Keypoint {
                    position: letterbox.unmap(Vec2::new(at(row, i), at(row + 1, i))),
                    confidence: at(row + 2, i),
                }
            });
            let center = letterbox.unmap(Vec2::new(at(0, i), at(1, i)));
            let size = Vec2::new(at(2, i), at(3, i)) / letterbox.scale;
            PoseDetection {
                bbox: Rect::from_center(center, size),
                confidence: at(4, i),
                keypoints,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut keep: Vec<PoseDetection> = Vec::new();
    for candidate in candidates {
        if keep
            .iter()
            .all(|kept| iou(&kept.bbox, &candidate.bbox) <= iou_threshold)
        {
            keep.push(candidate);
        }
    }

    Ok(keep)
}
