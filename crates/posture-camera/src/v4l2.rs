use crate::{decode_rgb, Camera, CameraConfig, CameraError};
use posture_base::Tensor;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

type FrameResult = Result<Tensor<u8>, CameraError>;

/// V4L2 webcam capturing MJPEG and decoding to RGB on a background thread.
pub struct V4l2Camera {
    config: CameraConfig,
    device: Option<Device>,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("started", &self.receiver.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<Option<Tensor<u8>>, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("receiver not initialized".to_string()))?;

        // A closed channel means the capture thread has stopped.
        match receiver.recv().await {
            Some(frame) => frame.map(Some),
            None => Ok(None),
        }
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        // Closing the receiver makes the capture thread's next send fail.
        drop(self.receiver.take());

        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("V4L2 capture thread panicked");
            }
        }
        log::debug!("released {}", self.config.device().display());
    }
}

impl V4l2Camera {
    /// Open the device at `config.device()` in MJPEG mode.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the device cannot be opened, does not
    /// support MJPEG, or rejects the requested parameters.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())?;

        let requested = Format::new(config.width(), config.height(), FourCC::new(b"MJPG"));
        let format = Capture::set_format(&device, &requested)?;
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(CameraError::Device(format!(
                "{} does not support MJPEG",
                config.device().display()
            )));
        }
        if format.width != config.width() || format.height != config.height() {
            log::warn!(
                "requested {}x{}, device chose {}x{}",
                config.width(),
                config.height(),
                format.width,
                format.height
            );
        }

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        log::info!(
            "opened {} at {}x{} MJPEG",
            config.device().display(),
            format.width,
            format.height
        );

        Ok(Self {
            config,
            device: Some(device),
            receiver: None,
            thread_handle: None,
        })
    }

    /// Start the capture thread on first use.
    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count();
        let (tx, rx) = mpsc::channel(buffer_count as usize);

        let handle = thread::spawn(move || {
            if let Err(e) = Self::capture_loop(&device, &tx, buffer_count) {
                // Forward the failure so the consumer sees why the stream ended.
                let _ = tx.blocking_send(Err(e));
            }
        });

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);

        Ok(())
    }

    fn capture_loop(
        device: &Device,
        tx: &mpsc::Sender<FrameResult>,
        buffer_count: u32,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(device, Type::VideoCapture, buffer_count)
            .map_err(|e| CameraError::Stream(e.to_string()))?;

        loop {
            let (data, _metadata) =
                CaptureStream::next(&mut stream).map_err(|e| CameraError::Stream(e.to_string()))?;

            // Decode failures are forwarded; the consumer decides whether to go on.
            let frame = decode_rgb(data);

            if tx.blocking_send(frame).is_err() {
                break;
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
