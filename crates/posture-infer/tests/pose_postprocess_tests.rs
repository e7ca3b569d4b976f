use posture_base::{Rect, Tensor, Vec2};
use posture_infer::{iou, postprocess, InferError, KeypointIndex, LetterboxInfo};

const ROWS: usize = 56;

fn identity() -> LetterboxInfo {
    LetterboxInfo {
        scale: 1.0,
        pad_x: 0.0,
        pad_y: 0.0,
    }
}

/// Write one candidate into column `i` of a `[1, 56, n]` buffer.
/// Every keypoint is placed at the box center with visibility 0.9.
fn fill_candidate(data: &mut [f32], n: usize, i: usize, cx: f32, cy: f32, w: f32, h: f32, conf: f32) {
    let mut set = |row: usize, value: f32| data[row * n + i] = value;
    set(0, cx);
    set(1, cy);
    set(2, w);
    set(3, h);
    set(4, conf);
    for k in 0..17 {
        set(5 + k * 3, cx);
        set(5 + k * 3 + 1, cy);
        set(5 + k * 3 + 2, 0.9);
    }
}

#[test]
fn test_iou_cases() {
    let a = Rect::new(Vec2::new(0.0_f32, 0.0), Vec2::new(10.0, 10.0));
    let same = a;
    let half = Rect::new(Vec2::new(5.0_f32, 0.0), Vec2::new(10.0, 10.0));
    let far = Rect::new(Vec2::new(20.0_f32, 20.0), Vec2::new(10.0, 10.0));
    let empty = Rect::new(Vec2::new(0.0_f32, 0.0), Vec2::new(0.0, 0.0));

    assert_eq!(iou(&a, &same), 1.0);
    assert!((iou(&a, &half) - 1.0 / 3.0).abs() < 1e-6);
    assert_eq!(iou(&a, &far), 0.0);
    assert_eq!(iou(&a, &empty), 0.0);
}

#[test]
fn test_postprocess_rejects_wrong_shape() {
    let bad = Tensor::new(vec![1, 10, 5], vec![0.0; 50]).unwrap();
    assert!(matches!(
        postprocess(&bad, &identity(), 0.5, 0.45),
        Err(InferError::ShapeMismatch { .. })
    ));

    let flat = Tensor::new(vec![56, 5], vec![0.0; 280]).unwrap();
    assert!(matches!(
        postprocess(&flat, &identity(), 0.5, 0.45),
        Err(InferError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_postprocess_empty_output() {
    let out = Tensor::new(vec![1, ROWS, 0], vec![]).unwrap();
    assert!(postprocess(&out, &identity(), 0.5, 0.45).unwrap().is_empty());
}

#[test]
fn test_postprocess_filters_sorts_and_suppresses() {
    let n = 4;
    let mut data = vec![0.0; ROWS * n];
    fill_candidate(&mut data, n, 0, 100.0, 100.0, 50.0, 50.0, 0.6);
    // overlaps candidate 0 almost entirely, more confident
    fill_candidate(&mut data, n, 1, 102.0, 100.0, 50.0, 50.0, 0.9);
    // separate person
    fill_candidate(&mut data, n, 2, 400.0, 300.0, 60.0, 80.0, 0.7);
    // below threshold
    fill_candidate(&mut data, n, 3, 500.0, 100.0, 40.0, 40.0, 0.2);

    let out = Tensor::new(vec![1, ROWS, n], data).unwrap();
    let detections = postprocess(&out, &identity(), 0.5, 0.45).unwrap();

    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].confidence, 0.9);
    assert_eq!(detections[1].confidence, 0.7);
    assert_eq!(detections[1].bbox.origin, Vec2::new(370.0, 260.0));
    assert_eq!(detections[1].bbox.size, Vec2::new(60.0, 80.0));
    assert_eq!(detections[1].keypoint(KeypointIndex::Nose).position, Vec2::new(400.0, 300.0));
    assert_eq!(detections[1].keypoint(KeypointIndex::Nose).confidence, 0.9);
}

#[test]
fn test_postprocess_undoes_letterbox() {
    let n = 1;
    let mut data = vec![0.0; ROWS * n];
    fill_candidate(&mut data, n, 0, 320.0, 400.0, 100.0, 200.0, 0.8);
    let out = Tensor::new(vec![1, ROWS, n], data).unwrap();

    let letterbox = LetterboxInfo {
        scale: 2.0,
        pad_x: 0.0,
        pad_y: 80.0,
    };
    let detections = postprocess(&out, &letterbox, 0.5, 0.45).unwrap();

    assert_eq!(detections.len(), 1);
    let nose = detections[0].keypoint(KeypointIndex::Nose).position;
    assert_eq!(nose, Vec2::new(160.0, 160.0));
    assert_eq!(detections[0].bbox.size, Vec2::new(50.0, 100.0));
}
