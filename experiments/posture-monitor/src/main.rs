mod config;
mod display;
mod draw;

use config::AppConfig;
use display::{HeadlessDisplay, WindowDisplay};
use posture_base::{init_file_logger, init_stdout_logger, log_fatal};
use posture_camera::{Camera, ReplayCamera, V4l2Camera};
use posture_core::{
    announce, spawn_reminder, CancellationToken, Monitor, MonitorError, MonitorSummary, Thresholds,
};
use posture_infer::{ModelSource, OnnxBackend, YoloPoseEstimator};

const WINDOW_TITLE: &str = "Posture Monitor - ESC or Q to exit";

async fn run_monitor<C: Camera>(
    camera: C,
    estimator: YoloPoseEstimator,
    config: &AppConfig,
    thresholds: Thresholds,
    cancel: CancellationToken,
) -> Result<MonitorSummary, MonitorError> {
    if config.headless() {
        Monitor::new(camera, estimator, HeadlessDisplay::new(cancel), thresholds)
            .with_capture_retries(config.capture_retries())
            .run()
            .await
    } else {
        let display = WindowDisplay::new(WINDOW_TITLE, config.camera().fps(), cancel);
        Monitor::new(camera, estimator, display, thresholds)
            .with_capture_retries(config.capture_retries())
            .run()
            .await
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    match config.log_dir() {
        Some(dir) => init_file_logger(dir)?,
        None => init_stdout_logger(),
    }

    println!("Posture Monitor");
    println!("Model: {}", config.model_path().display());
    match config.replay_dir() {
        Some(dir) => println!("Source: {}", dir.display()),
        None => println!(
            "Source: {} at {}x{}",
            config.camera().device().display(),
            config.camera().width(),
            config.camera().height()
        ),
    }
    println!(
        "Controls: {}",
        if config.headless() { "Ctrl-C to exit" } else { "ESC or Q to exit" }
    );
    println!();

    let thresholds = Thresholds::default();
    let cancel = CancellationToken::new();

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("interrupted");
            ctrl_c.cancel();
        }
    });

    let backend = OnnxBackend::new(config.device().clone());
    let estimator =
        match YoloPoseEstimator::load(ModelSource::File(config.model_path().into()), &backend) {
            Ok(estimator) => estimator
                .with_conf_threshold(config.confidence())
                .with_iou_threshold(config.iou()),
            Err(e) => log_fatal!("cannot load {}: {e}", config.model_path().display()),
        };

    let reminder = spawn_reminder(thresholds.reminder_interval(), announce);

    let result = match config.replay_dir() {
        Some(dir) => {
            let camera = ReplayCamera::from_dir(dir)?.with_looping(config.replay_loop());
            run_monitor(camera, estimator, &config, thresholds, cancel).await
        }
        None => {
            let camera = V4l2Camera::new(config.camera().clone())?;
            run_monitor(camera, estimator, &config, thresholds, cancel).await
        }
    };

    reminder.abort();

    let summary = result?;
    println!(
        "Exiting: {} frames, {} with a person, {} alerts",
        summary.frames, summary.frames_with_subject, summary.alerts
    );
    Ok(())
}
