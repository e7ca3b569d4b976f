use crate::{decode_rgb, Camera, CameraError};
use posture_base::Tensor;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

#[derive(Debug)]
enum ReplayItem {
    Frame(Tensor<u8>),
    File(PathBuf),
}

/// Frame source that replays in-memory frames or a directory of still images.
///
/// Files are decoded lazily, one per `recv`, in file-name order. Once every
/// item has been produced `recv` returns `Ok(None)`, unless looping is enabled.
#[derive(Debug)]
pub struct ReplayCamera {
    items: Vec<ReplayItem>,
    next: usize,
    looping: bool,
}

impl ReplayCamera {
    pub fn new(frames: Vec<Tensor<u8>>) -> Self {
        Self {
            items: frames.into_iter().map(ReplayItem::Frame).collect(),
            next: 0,
            looping: false,
        }
    }

    /// Replay every image file in `dir`.
    ///
    /// Returns `CameraError::Device` if the directory cannot be read or holds
    /// no image files.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CameraError> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_image_file(path))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(CameraError::Device(format!(
                "no image files in {}",
                dir.display()
            )));
        }

        log::debug!("replaying {} images from {}", paths.len(), dir.display());

        Ok(Self {
            items: paths.into_iter().map(ReplayItem::File).collect(),
            next: 0,
            looping: false,
        })
    }

    /// Restart from the first item instead of ending the stream.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

impl Camera for ReplayCamera {
    async fn recv(&mut self) -> Result<Option<Tensor<u8>>, CameraError> {
        if self.next >= self.items.len() {
            if !self.looping || self.items.is_empty() {
                return Ok(None);
            }
            self.next = 0;
        }

        let item = &self.items[self.next];
        self.next += 1;

        match item {
            ReplayItem::Frame(frame) => Ok(Some(frame.clone())),
            ReplayItem::File(path) => {
                let bytes = fs::read(path)?;
                decode_rgb(&bytes).map(Some)
            }
        }
    }
}
