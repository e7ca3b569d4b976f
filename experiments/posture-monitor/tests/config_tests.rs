use std::collections::HashMap;
use std::path::Path;

mod config {
    include!("../src/config.rs");
}

use config::*;
use posture_infer::Device;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.model_path(), Path::new(DEFAULT_MODEL_PATH));
    assert_eq!(config.camera().device(), Path::new("/dev/video0"));
    assert_eq!((config.camera().width(), config.camera().height()), (640, 480));
    assert_eq!(config.camera().fps(), 30);
    assert_eq!(config.replay_dir(), None);
    assert!(!config.replay_loop());
    assert!(!config.headless());
    assert_eq!(config.log_dir(), None);
    assert_eq!(config.device(), &Device::Cpu);
    assert_eq!(config.capture_retries(), 0);
    assert_eq!(config.confidence(), 0.5);
    assert_eq!(config.iou(), DEFAULT_IOU);
}

#[test]
fn test_overrides() {
    let config = AppConfig::from_lookup(lookup(&[
        ("POSTURE_MODEL_PATH", "/opt/models/pose.onnx"),
        ("POSTURE_CAMERA_DEVICE", "/dev/video2"),
        ("POSTURE_WIDTH", "1280"),
        ("POSTURE_HEIGHT", " 720 "),
        ("POSTURE_FPS", "15"),
        ("POSTURE_REPLAY_DIR", "frames"),
        ("POSTURE_REPLAY_LOOP", "1"),
        ("POSTURE_HEADLESS", "yes"),
        ("POSTURE_LOG_DIR", "logs"),
        ("POSTURE_DEVICE", "cuda:1"),
        ("POSTURE_CAPTURE_RETRIES", "3"),
        ("POSTURE_CONFIDENCE", "0.25"),
        ("POSTURE_IOU", "0.6"),
    ]))
    .unwrap();

    assert_eq!(config.model_path(), Path::new("/opt/models/pose.onnx"));
    assert_eq!(config.camera().device(), Path::new("/dev/video2"));
    assert_eq!((config.camera().width(), config.camera().height()), (1280, 720));
    assert_eq!(config.camera().fps(), 15);
    assert_eq!(config.replay_dir(), Some(Path::new("frames")));
    assert!(config.replay_loop());
    assert!(config.headless());
    assert_eq!(config.log_dir(), Some(Path::new("logs")));
    assert_eq!(config.device(), &Device::Cuda { device_id: 1 });
    assert_eq!(config.capture_retries(), 3);
    assert_eq!(config.confidence(), 0.25);
    assert_eq!(config.iou(), 0.6);
}

#[test]
fn test_empty_values_take_defaults() {
    let config = AppConfig::from_lookup(lookup(&[
        ("POSTURE_WIDTH", ""),
        ("POSTURE_REPLAY_DIR", "  "),
    ]))
    .unwrap();
    assert_eq!(config.camera().width(), 640);
    assert_eq!(config.replay_dir(), None);
}

#[test]
fn test_invalid_values() {
    let cases = [
        ("POSTURE_WIDTH", "wide"),
        ("POSTURE_HEIGHT", "0"),
        ("POSTURE_FPS", "-1"),
        ("POSTURE_HEADLESS", "maybe"),
        ("POSTURE_DEVICE", "tpu"),
        ("POSTURE_CAPTURE_RETRIES", "many"),
        ("POSTURE_CONFIDENCE", "1.5"),
        ("POSTURE_IOU", "-0.1"),
        ("POSTURE_REPLAY_LOOP", "sometimes"),
    ];

    for (key, value) in cases {
        let err = AppConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
        let ConfigError::Invalid { key: got_key, .. } = &err;
        assert_eq!(*got_key, key, "{value}");
        assert!(err.to_string().contains(key));
    }
}
