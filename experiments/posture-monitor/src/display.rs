use crate::draw::{draw_overlays, draw_skeleton, rgb_to_argb, Canvas};
use minifb::{Key, Window, WindowOptions};
use posture_base::Tensor;
use posture_core::{CancellationToken, ExitSignal, Overlay, RenderError, Renderer};
use posture_infer::Landmarks;

/// Joints below this visibility are not drawn.
pub const KEYPOINT_THRESHOLD: f32 = 0.3;

/// minifb window showing the annotated camera feed.
///
/// The window is opened on the first frame, sized to it, and reopened if the
/// frame size changes. Escape, `q`, closing the window or cancelling the
/// token all request exit.
pub struct WindowDisplay {
    title: String,
    fps: usize,
    window: Option<Window>,
    size: (usize, usize),
    cancel: CancellationToken,
}

impl WindowDisplay {
    pub fn new(title: impl Into<String>, fps: u32, cancel: CancellationToken) -> Self {
        Self {
            title: title.into(),
            fps: fps as usize,
            window: None,
            size: (0, 0),
            cancel,
        }
    }

    fn window_for(&mut self, width: usize, height: usize) -> Result<&mut Window, RenderError> {
        if self.window.is_none() || self.size != (width, height) {
            let mut window = Window::new(&self.title, width, height, WindowOptions::default())
                .map_err(|e| RenderError::Window(e.to_string()))?;
            window.set_target_fps(self.fps);
            log::debug!("opened {width}x{height} window");
            self.size = (width, height);
            self.window = Some(window);
        }
        self.window
            .as_mut()
            .ok_or_else(|| RenderError::Window("window not open".to_string()))
    }
}

impl Renderer for WindowDisplay {
    fn render(
        &mut self,
        frame: &Tensor<u8>,
        landmarks: Option<&Landmarks>,
        overlays: &[Overlay],
    ) -> Result<(), RenderError> {
        let (height, width) = frame
            .rgb_dims()
            .ok_or_else(|| RenderError::Window(format!("cannot show frame {:?}", frame.shape)))?;

        let mut rgb = frame.data.clone();
        let mut canvas = Canvas::new(&mut rgb, width, height)
            .ok_or_else(|| RenderError::Window("frame buffer too small".to_string()))?;
        if let Some(landmarks) = landmarks {
            draw_skeleton(&mut canvas, landmarks, KEYPOINT_THRESHOLD);
        }
        draw_overlays(&mut canvas, overlays);

        let argb = rgb_to_argb(&rgb);
        self.window_for(width, height)?
            .update_with_buffer(&argb, width, height)
            .map_err(|e| RenderError::Window(e.to_string()))
    }
}

impl ExitSignal for WindowDisplay {
    fn exit_requested(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            return true;
        }
        match &self.window {
            Some(window) => {
                !window.is_open() || window.is_key_down(Key::Escape) || window.is_key_down(Key::Q)
            }
            None => false,
        }
    }
}

/// Display for running without a screen; exits only on cancellation.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    cancel: CancellationToken,
}

impl HeadlessDisplay {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }
}

impl Renderer for HeadlessDisplay {
    fn render(
        &mut self,
        _frame: &Tensor<u8>,
        _landmarks: Option<&Landmarks>,
        _overlays: &[Overlay],
    ) -> Result<(), RenderError> {
        Ok(())
    }
}

impl ExitSignal for HeadlessDisplay {
    fn exit_requested(&mut self) -> bool {
        self.cancel.is_cancelled()
    }
}
