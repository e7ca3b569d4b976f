use posture_base::{Tensor, Vec2};
use posture_infer::{
    Backend, InferError, KeypointIndex, ModelSource, PoseEstimator, Session, YoloPoseEstimator,
};
use std::collections::HashMap;

const ROWS: usize = 56;

/// Session returning a canned `[1, 56, n]` output and recording its input shape.
struct FakeSession {
    input_names: Vec<String>,
    output_names: Vec<String>,
    output: Tensor<f32>,
    seen_shapes: Vec<Vec<usize>>,
}

impl FakeSession {
    fn new(output: Tensor<f32>) -> Self {
        Self {
            input_names: vec!["images".to_string()],
            output_names: vec!["output0".to_string()],
            output,
            seen_shapes: Vec::new(),
        }
    }
}

impl Session for FakeSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].0, "images");
        self.seen_shapes.push(inputs[0].1.shape.clone());
        Ok(HashMap::from([("output0".to_string(), self.output.clone())]))
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

/// One candidate per entry: (confidence, nose position in model space).
fn model_output(candidates: &[(f32, Vec2<f32>)]) -> Tensor<f32> {
    let n = candidates.len();
    let mut data = vec![0.0; ROWS * n];
    for (i, (conf, nose)) in candidates.iter().enumerate() {
        data[i] = nose.x;
        data[n + i] = nose.y;
        data[2 * n + i] = 40.0;
        data[3 * n + i] = 40.0;
        data[4 * n + i] = *conf;
        data[5 * n + i] = nose.x;
        data[6 * n + i] = nose.y;
        data[7 * n + i] = 0.95;
    }
    Tensor::new(vec![1, ROWS, n], data).unwrap()
}

fn frame(height: usize, width: usize) -> Tensor<u8> {
    Tensor::new(vec![height, width, 3], vec![0u8; height * width * 3]).unwrap()
}

#[test]
fn test_estimate_returns_normalized_landmarks_of_best_person() {
    // 320x240 frame letterboxed with scale 2, pad_y 80
    let output = model_output(&[
        (0.6, Vec2::new(100.0, 300.0)),
        (0.9, Vec2::new(320.0, 280.0)),
    ]);
    let mut estimator = YoloPoseEstimator::new(Box::new(FakeSession::new(output)));

    let landmarks = estimator.estimate(&frame(240, 320)).unwrap().expect("a person");
    let nose = landmarks.get(KeypointIndex::Nose);
    // model (320, 280) -> frame (160, 100) -> normalized (0.5, 100/240)
    assert_eq!(nose.position.x, 0.5);
    assert!((nose.position.y - 100.0 / 240.0).abs() < 1e-6);
    assert_eq!(nose.visibility, 0.95);
}

#[test]
fn test_estimate_none_when_below_confidence() {
    let output = model_output(&[(0.3, Vec2::new(320.0, 320.0))]);
    let mut estimator = YoloPoseEstimator::new(Box::new(FakeSession::new(output)));

    assert_eq!(estimator.conf_threshold(), 0.5);
    assert!(estimator.estimate(&frame(240, 320)).unwrap().is_none());

    let output = model_output(&[(0.3, Vec2::new(320.0, 320.0))]);
    let mut lenient =
        YoloPoseEstimator::new(Box::new(FakeSession::new(output))).with_conf_threshold(0.25);
    assert!(lenient.estimate(&frame(240, 320)).unwrap().is_some());
}

#[test]
fn test_estimate_rejects_non_rgb_frame() {
    let output = model_output(&[]);
    let mut estimator = YoloPoseEstimator::new(Box::new(FakeSession::new(output)));
    let gray = Tensor::new(vec![4, 4, 1], vec![0u8; 16]).unwrap();
    assert!(matches!(
        estimator.estimate(&gray),
        Err(InferError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_builder_thresholds() {
    let estimator = YoloPoseEstimator::new(Box::new(FakeSession::new(model_output(&[]))))
        .with_conf_threshold(0.4)
        .with_iou_threshold(0.6);
    assert_eq!(estimator.conf_threshold(), 0.4);
    assert_eq!(estimator.iou_threshold(), 0.6);
}

struct FailingBackend;

impl Backend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn load_model(&self, _model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        Err(InferError::ModelLoad("no such model".to_string()))
    }
}

#[test]
fn test_load_propagates_backend_error() {
    let result = YoloPoseEstimator::load(ModelSource::File("missing.onnx".into()), &FailingBackend);
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}

#[test]
fn test_device_parsing() {
    use posture_infer::Device;
    assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
    assert_eq!("CUDA".parse::<Device>().unwrap(), Device::Cuda { device_id: 0 });
    assert_eq!("cuda:2".parse::<Device>().unwrap(), Device::Cuda { device_id: 2 });
    assert!("tpu".parse::<Device>().is_err());
    assert!("cuda:x".parse::<Device>().is_err());
}

#[cfg(feature = "onnx")]
#[test]
fn test_onnx_backend_missing_model_fails() {
    use posture_infer::{Device, OnnxBackend};
    let backend = OnnxBackend::new(Device::Cpu);
    let result = YoloPoseEstimator::load(ModelSource::File("nonexistent.onnx".into()), &backend);
    assert!(result.is_err());
}
