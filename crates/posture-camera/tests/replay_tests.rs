use image::{ImageFormat, Rgb, RgbImage};
use posture_base::Tensor;
use posture_camera::{decode_rgb, Camera, CameraError, ReplayCamera};
use std::fs;
use std::io::Cursor;

fn solid_frame(height: usize, width: usize, value: u8) -> Tensor<u8> {
    Tensor::new(vec![height, width, 3], vec![value; height * width * 3]).unwrap()
}

fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[tokio::test]
async fn test_replay_yields_frames_then_end_of_stream() {
    let mut camera = ReplayCamera::new(vec![solid_frame(2, 3, 10), solid_frame(2, 3, 20)]);

    let first = camera.recv().await.unwrap().expect("first frame");
    assert_eq!(first.shape, vec![2, 3, 3]);
    assert_eq!(first.data[0], 10);

    let second = camera.recv().await.unwrap().expect("second frame");
    assert_eq!(second.data[0], 20);

    assert!(camera.recv().await.unwrap().is_none());
    // Stays exhausted
    assert!(camera.recv().await.unwrap().is_none());
}

#[tokio::test]
async fn test_replay_looping_restarts() {
    let mut camera = ReplayCamera::new(vec![solid_frame(1, 1, 1), solid_frame(1, 1, 2)])
        .with_looping(true);

    let mut seen = Vec::new();
    for _ in 0..5 {
        seen.push(camera.recv().await.unwrap().unwrap().data[0]);
    }
    assert_eq!(seen, vec![1, 2, 1, 2, 1]);
}

#[tokio::test]
async fn test_replay_empty_looping_ends() {
    let mut camera = ReplayCamera::new(Vec::new()).with_looping(true);
    assert!(camera.is_empty());
    assert!(camera.recv().await.unwrap().is_none());
}

#[tokio::test]
async fn test_replay_from_dir_reads_images_in_name_order() {
    let dir = std::env::temp_dir().join(format!("posture-replay-test-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    fs::write(dir.join("b.png"), png_bytes(4, 2, [0, 0, 255])).unwrap();
    fs::write(dir.join("a.PNG"), png_bytes(4, 2, [255, 0, 0])).unwrap();
    fs::write(dir.join("notes.txt"), b"not an image").unwrap();

    let mut camera = ReplayCamera::from_dir(&dir).unwrap();
    assert_eq!(camera.len(), 2);

    let first = camera.recv().await.unwrap().unwrap();
    assert_eq!(first.shape, vec![2, 4, 3]);
    assert_eq!(&first.data[0..3], &[255, 0, 0]);

    let second = camera.recv().await.unwrap().unwrap();
    assert_eq!(&second.data[0..3], &[0, 0, 255]);

    assert!(camera.recv().await.unwrap().is_none());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_replay_from_dir_without_images_fails() {
    let dir = std::env::temp_dir().join(format!("posture-replay-empty-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let result = ReplayCamera::from_dir(&dir);
    assert!(matches!(result, Err(CameraError::Device(_))));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_decode_rgb_png() {
    let frame = decode_rgb(&png_bytes(3, 5, [1, 2, 3])).unwrap();
    assert_eq!(frame.shape, vec![5, 3, 3]);
    assert_eq!(frame.rgb_dims(), Some((5, 3)));
    assert_eq!(&frame.data[0..3], &[1, 2, 3]);
}

#[test]
fn test_decode_rgb_garbage_is_decode_error() {
    let result = decode_rgb(&[0xFF, 0xD8, 0x00, 0x01]);
    assert!(matches!(result, Err(CameraError::Decode(_))));
}
