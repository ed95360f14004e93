//! Resident photo capture.
//!
//! An uploaded file is decoded, shrunk so its longest edge fits
//! [`PhotoPipeline::max_edge`], and re-encoded as JPEG. Images that already fit
//! keep their size; nothing is ever upscaled.

use std::io::Cursor;

use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use store::PhotoConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhotoError {
    #[error("could not read image: {0}")]
    Decode(String),
    #[error("image has no pixels")]
    EmptyImage,
    #[error("could not encode photo: {0}")]
    Encode(String),
}

/// A processed photo ready to preview and store.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

impl CapturedPhoto {
    /// Bare base64 payload, as stored in `resident.photo_blob`.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.jpeg)
    }

    pub fn preview_data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.to_base64())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoPipeline {
    pub max_edge: u32,
    pub quality: u8,
}

impl Default for PhotoPipeline {
    fn default() -> Self {
        Self::from_config(&PhotoConfig::default())
    }
}

/// Output size for a `width` x `height` image bounded by `max_edge`.
///
/// `scale = min(1, max_edge / longest edge)`, each side rounded and kept at
/// least one pixel.
pub fn scaled_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest == 0 || longest <= max_edge {
        return (width, height);
    }
    let scale = f64::from(max_edge) / f64::from(longest);
    let side = |n: u32| ((f64::from(n) * scale).round() as u32).max(1);
    (side(width), side(height))
}

impl PhotoPipeline {
    pub fn new(max_edge: u32, quality: u8) -> Self {
        Self {
            max_edge: max_edge.max(1),
            quality: quality.clamp(1, 100),
        }
    }

    pub fn from_config(config: &PhotoConfig) -> Self {
        Self::new(config.max_edge, config.jpeg_quality)
    }

    /// Decode `bytes`, downscale and re-encode as JPEG.
    pub fn process(&self, bytes: &[u8]) -> Result<CapturedPhoto, PhotoError> {
        let img = decode(bytes)?;
        let img = self.shrink(img);
        self.encode(&img)
    }

    /// [`process`](Self::process) without holding up the calling task.
    ///
    /// Native builds run the work on tokio's blocking pool. The browser has a
    /// single thread, so there each stage yields to the event loop before the
    /// next one starts.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn process_async(self, bytes: Vec<u8>) -> Result<CapturedPhoto, PhotoError> {
        off_thread(move || self.process(&bytes)).await?
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn process_async(self, bytes: Vec<u8>) -> Result<CapturedPhoto, PhotoError> {
        use gloo_timers::future::TimeoutFuture;

        TimeoutFuture::new(0).await;
        let img = decode(&bytes)?;
        TimeoutFuture::new(0).await;
        let img = self.shrink(img);
        TimeoutFuture::new(0).await;
        self.encode(&img)
    }

    fn shrink(&self, img: DynamicImage) -> DynamicImage {
        let (width, height) = scaled_dimensions(img.width(), img.height(), self.max_edge);
        if (width, height) == (img.width(), img.height()) {
            img
        } else {
            img.resize_exact(width, height, FilterType::Triangle)
        }
    }

    fn encode(&self, img: &DynamicImage) -> Result<CapturedPhoto, PhotoError> {
        let (width, height) = (img.width(), img.height());
        let mut jpeg = Vec::new();
        {
            let mut cursor = Cursor::new(&mut jpeg);
            let encoder = JpegEncoder::new_with_quality(&mut cursor, self.quality);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| PhotoError::Encode(e.to_string()))?;
        }
        tracing::debug!(
            width,
            height,
            bytes = jpeg.len(),
            "photo captured"
        );
        Ok(CapturedPhoto {
            width,
            height,
            jpeg,
        })
    }
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, PhotoError> {
    let img = image::load_from_memory(bytes).map_err(|e| PhotoError::Decode(e.to_string()))?;
    if img.width() == 0 || img.height() == 0 {
        return Err(PhotoError::EmptyImage);
    }
    Ok(img)
}

/// Run `work` on a blocking-pool thread, or a fresh thread when no tokio
/// runtime is driving the caller.
#[cfg(not(target_arch = "wasm32"))]
async fn off_thread<T, F>(work: F) -> Result<T, PhotoError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let lost = |e: &dyn std::fmt::Display| PhotoError::Encode(format!("photo worker stopped: {e}"));
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        return handle.spawn_blocking(work).await.map_err(|e| lost(&e));
    }
    let (tx, rx) = tokio::sync::oneshot::channel();
    std::thread::spawn(move || {
        let _ = tx.send(work());
    });
    rx.await.map_err(|e| lost(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(640, 480, 640), (640, 480));
        assert_eq!(scaled_dimensions(100, 300, 640), (100, 300));
        assert_eq!(scaled_dimensions(1280, 720, 640), (640, 360));
        assert_eq!(scaled_dimensions(1000, 333, 640), (640, 213));
        assert_eq!(scaled_dimensions(720, 1600, 640), (288, 640));
        assert_eq!(scaled_dimensions(5000, 2, 640), (640, 1));
    }

    #[test]
    fn test_small_photo_keeps_size() {
        let photo = PhotoPipeline::default().process(&png(200, 120)).unwrap();
        assert_eq!((photo.width, photo.height), (200, 120));

        let decoded = image::load_from_memory(&photo.jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 120));
    }

    #[test]
    fn test_large_photo_is_bounded() {
        let photo = PhotoPipeline::default().process(&png(1280, 720)).unwrap();
        assert_eq!((photo.width, photo.height), (640, 360));

        let decoded = image::load_from_memory(&photo.jpeg).unwrap();
        assert_eq!(decoded.width().max(decoded.height()), 640);
        let ratio = f64::from(decoded.width()) / f64::from(decoded.height());
        assert!((ratio - 1280.0 / 720.0).abs() < 0.01);
    }

    #[test]
    fn test_configured_edge() {
        let pipeline = PhotoPipeline::from_config(&PhotoConfig {
            max_edge: 100,
            jpeg_quality: 60,
        });
        let photo = pipeline.process(&png(300, 400)).unwrap();
        assert_eq!((photo.width, photo.height), (75, 100));
    }

    #[test]
    fn test_encoded_forms() {
        let photo = PhotoPipeline::default().process(&png(8, 8)).unwrap();
        assert!(photo.jpeg.starts_with(&[0xFF, 0xD8]));
        let b64 = photo.to_base64();
        assert!(b64.starts_with("/9j/"));
        assert_eq!(
            photo.preview_data_url(),
            format!("data:image/jpeg;base64,{b64}")
        );
    }

    #[test]
    fn test_corrupt_bytes_fail() {
        let err = PhotoPipeline::default()
            .process(b"definitely not an image")
            .unwrap_err();
        assert!(matches!(err, PhotoError::Decode(_)));

        let mut truncated = png(50, 50);
        truncated.truncate(40);
        assert!(PhotoPipeline::default().process(&truncated).is_err());
    }

    #[tokio::test]
    async fn test_worker_runs_on_another_thread() {
        let caller = std::thread::current().id();
        let worker = off_thread(|| std::thread::current().id()).await.unwrap();
        assert_ne!(worker, caller);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_processing_leaves_the_task_free() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = tokio::spawn({
            let ticks = ticks.clone();
            async move {
                loop {
                    ticks.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                }
            }
        });

        let photo = PhotoPipeline::default()
            .process_async(png(1600, 1200))
            .await
            .unwrap();
        ticker.abort();

        assert_eq!((photo.width, photo.height), (640, 480));
        assert!(ticks.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_async_decode_failure() {
        let err = PhotoPipeline::default()
            .process_async(b"not a photo".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::Decode(_)));
    }
}
