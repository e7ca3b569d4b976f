use posture_camera::CameraConfig;
use posture_infer::Device;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_MODEL_PATH: &str = "models/yolov8n-pose.onnx";
pub const DEFAULT_CONFIDENCE: f32 = 0.5;
pub const DEFAULT_IOU: f32 = 0.45;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => write!(f, "invalid value for {key}: '{value}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application settings, read from `POSTURE_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    model_path: PathBuf,
    camera: CameraConfig,
    replay_dir: Option<PathBuf>,
    replay_loop: bool,
    headless: bool,
    log_dir: Option<PathBuf>,
    device: Device,
    capture_retries: u32,
    confidence: f32,
    iou: f32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset and empty keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = CameraConfig::default();
        let width = parse_positive(get("POSTURE_WIDTH"), "POSTURE_WIDTH", defaults.width())?;
        let height = parse_positive(get("POSTURE_HEIGHT"), "POSTURE_HEIGHT", defaults.height())?;
        let fps = parse_positive(get("POSTURE_FPS"), "POSTURE_FPS", defaults.fps())?;

        let mut camera = defaults.with_resolution(width, height).with_fps(fps);
        if let Some(device) = get("POSTURE_CAMERA_DEVICE") {
            camera = camera.with_device(device);
        }

        let confidence = parse_unit(get("POSTURE_CONFIDENCE"), "POSTURE_CONFIDENCE", DEFAULT_CONFIDENCE)?;
        let iou = parse_unit(get("POSTURE_IOU"), "POSTURE_IOU", DEFAULT_IOU)?;

        let device = match get("POSTURE_DEVICE") {
            Some(value) => value
                .parse::<Device>()
                .map_err(|_| invalid("POSTURE_DEVICE", value))?,
            None => Device::Cpu,
        };

        Ok(Self {
            model_path: get("POSTURE_MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
            camera,
            replay_dir: get("POSTURE_REPLAY_DIR").map(PathBuf::from),
            replay_loop: parse_flag(get("POSTURE_REPLAY_LOOP"), "POSTURE_REPLAY_LOOP")?,
            headless: parse_flag(get("POSTURE_HEADLESS"), "POSTURE_HEADLESS")?,
            log_dir: get("POSTURE_LOG_DIR").map(PathBuf::from),
            device,
            capture_retries: parse(get("POSTURE_CAPTURE_RETRIES"), "POSTURE_CAPTURE_RETRIES", 0)?,
            confidence,
            iou,
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }

    pub fn replay_dir(&self) -> Option<&Path> {
        self.replay_dir.as_deref()
    }

    /// Restart the replay from the first image instead of ending the stream.
    pub fn replay_loop(&self) -> bool {
        self.replay_loop
    }

    pub fn headless(&self) -> bool {
        self.headless
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn capture_retries(&self) -> u32 {
        self.capture_retries
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Overlap above which NMS drops the weaker of two detections.
    pub fn iou(&self) -> f32 {
        self.iou
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { key, value }
}

fn parse<T: FromStr>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        Some(value) => value.trim().parse().map_err(|_| invalid(key, value)),
        None => Ok(default),
    }
}

// Values in [0, 1], such as confidence and IoU thresholds.
fn parse_unit(value: Option<String>, key: &'static str, default: f32) -> Result<f32, ConfigError> {
    let raw = value.clone();
    let parsed = parse(value, key, default)?;
    if (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(invalid(key, raw.unwrap_or_else(|| parsed.to_string())))
    }
}

fn parse_positive(value: Option<String>, key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match parse(value, key, default)? {
        0 => Err(invalid(key, "0".to_string())),
        n => Ok(n),
    }
}

fn parse_flag(value: Option<String>, key: &'static str) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
