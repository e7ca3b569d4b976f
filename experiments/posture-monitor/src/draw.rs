use font8x8::{UnicodeFonts, BASIC_FONTS};
use posture_base::Vec2;
use posture_core::Overlay;
use posture_infer::{KeypointIndex, Landmarks};

pub type Rgb = [u8; 3];

pub const ALERT_COLOR: Rgb = [255, 0, 0];
pub const JOINT_COLOR: Rgb = [255, 255, 255];
/// Integer scale of the 8x8 glyphs.
pub const TEXT_SCALE: i32 = 2;

const FACE: Rgb = [0, 255, 255];
const TORSO: Rgb = [0, 255, 0];
const ARMS: Rgb = [255, 255, 0];
const LEGS: Rgb = [255, 0, 255];
const NECK: Rgb = [255, 255, 255];

/// COCO skeleton edges with their colors.
const BONES: [(KeypointIndex, KeypointIndex, Rgb); 18] = {
    use KeypointIndex::*;
    [
        (Nose, LeftEye, FACE),
        (Nose, RightEye, FACE),
        (LeftEye, LeftEar, FACE),
        (RightEye, RightEar, FACE),
        (LeftShoulder, RightShoulder, TORSO),
        (LeftShoulder, LeftHip, TORSO),
        (RightShoulder, RightHip, TORSO),
        (LeftHip, RightHip, TORSO),
        (LeftShoulder, LeftElbow, ARMS),
        (RightShoulder, RightElbow, ARMS),
        (LeftElbow, LeftWrist, ARMS),
        (RightElbow, RightWrist, ARMS),
        (LeftHip, LeftKnee, LEGS),
        (RightHip, RightKnee, LEGS),
        (LeftKnee, LeftAnkle, LEGS),
        (RightKnee, RightAnkle, LEGS),
        (Nose, LeftShoulder, NECK),
        (Nose, RightShoulder, NECK),
    ]
};

/// Mutable view of an HWC RGB buffer. Everything drawn is clipped to it.
pub struct Canvas<'a> {
    buf: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Returns `None` if `buf` is smaller than `width * height * 3`.
    pub fn new(buf: &'a mut [u8], width: usize, height: usize) -> Option<Self> {
        (buf.len() >= width * height * 3).then_some(Self { buf, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Paint one pixel; points outside the canvas are ignored.
    pub fn plot(&mut self, p: Vec2<i32>, color: Rgb) {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.width || p.y as usize >= self.height {
            return;
        }
        let idx = (p.y as usize * self.width + p.x as usize) * 3;
        self.buf[idx..idx + 3].copy_from_slice(&color);
    }

    /// Bresenham line from `a` to `b`, both ends included.
    pub fn line(&mut self, a: Vec2<i32>, b: Vec2<i32>, color: Rgb) {
        if self.off_same_side(a, b) {
            return;
        }

        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let step = Vec2::new((b.x - a.x).signum(), (b.y - a.y).signum());
        let mut err = dx + dy;
        let mut p = a;

        loop {
            self.plot(p, color);
            if p == b {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                p.x += step.x;
            }
            if e2 <= dx {
                err += dx;
                p.y += step.y;
            }
        }
    }

    pub fn filled_circle(&mut self, center: Vec2<i32>, radius: i32, color: Rgb) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.plot(Vec2::new(center.x + dx, center.y + dy), color);
                }
            }
        }
    }

    /// Draw `text` with its baseline-left corner at `origin`.
    ///
    /// Glyphs come from the 8x8 basic Latin font scaled by [`TEXT_SCALE`];
    /// characters without a glyph advance the cursor and draw nothing.
    pub fn text(&mut self, origin: Vec2<i32>, text: &str, color: Rgb) {
        let glyph_size = 8 * TEXT_SCALE;
        let top = origin.y - glyph_size;

        for (i, ch) in text.chars().enumerate() {
            let left = origin.x + i as i32 * glyph_size;
            let Some(glyph) = BASIC_FONTS.get(ch) else {
                continue;
            };
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let x = left + col * TEXT_SCALE;
                    let y = top + row as i32 * TEXT_SCALE;
                    for sy in 0..TEXT_SCALE {
                        for sx in 0..TEXT_SCALE {
                            self.plot(Vec2::new(x + sx, y + sy), color);
                        }
                    }
                }
            }
        }
    }

    // Both ends past the same edge: nothing of the line is visible.
    fn off_same_side(&self, a: Vec2<i32>, b: Vec2<i32>) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        (a.x < 0 && b.x < 0)
            || (a.y < 0 && b.y < 0)
            || (a.x >= w && b.x >= w)
            || (a.y >= h && b.y >= h)
    }
}

/// Draw the skeleton and joints whose visibility reaches `threshold`.
pub fn draw_skeleton(canvas: &mut Canvas, landmarks: &Landmarks, threshold: f32) {
    let (w, h) = (canvas.width() as u32, canvas.height() as u32);
    let to_pixel = |index| {
        let p = landmarks.pixel(index, w, h);
        Vec2::new(p.x.round() as i32, p.y.round() as i32)
    };

    for (from, to, color) in BONES {
        if landmarks.get(from).visibility >= threshold && landmarks.get(to).visibility >= threshold {
            canvas.line(to_pixel(from), to_pixel(to), color);
        }
    }

    for (index, landmark) in landmarks.iter() {
        if landmark.visibility >= threshold {
            canvas.filled_circle(to_pixel(index), 3, JOINT_COLOR);
        }
    }
}

pub fn draw_overlays(canvas: &mut Canvas, overlays: &[Overlay]) {
    for overlay in overlays {
        canvas.text(overlay.position, &overlay.text, ALERT_COLOR);
    }
}

/// Pack an HWC RGB buffer as `0x00RRGGBB` words for minifb.
pub fn rgb_to_argb(buf: &[u8]) -> Vec<u32> {
    buf.chunks_exact(3)
        .map(|px| (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32)
        .collect()
}
