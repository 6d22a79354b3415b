//! # Capture Pipeline
//!
//! Turns a camera frame into an image file the recognition screen can upload.
//!
//! ```text
//! FrameSource ──capture_still()──> CapturePipeline ──write──> {cache_dir}/2025-11-03-12-30-05-123.jpg
//!                                        │
//!                                        └──> ImageToken("file:///…/2025-11-03-12-30-05-123.jpg")
//! ```
//!
//! The preview runs only while a [`PreviewGuard`] is alive. The camera screen
//! holds one for as long as it is visible; dropping it stops the preview.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use shared::MAX_RECOGNITION_IMAGE_BYTES;
use thiserror::Error;

use crate::services::api::ImageUpload;

const TOKEN_SCHEME: &str = "file://";
const FILE_NAME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%3f";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Image file error: {0}")]
    Io(String),

    #[error("Camera preview is not running")]
    PreviewInactive,

    #[error("No frame available from the camera")]
    NoFrame,

    #[error("Captured image is empty")]
    EmptyImage,

    #[error("Image is too large ({0} bytes, limit 10 MiB)")]
    TooLarge(usize),

    #[error("Not an image token: {0}")]
    InvalidToken(String),
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Io(err.to_string())
    }
}

/// Something that can hand out still frames, typically a camera.
pub trait FrameSource: Send + Sync {
    fn start_preview(&self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn stop_preview(&self) {}

    /// Encoded JPEG bytes of the current frame.
    fn capture_still(&self) -> Result<Vec<u8>, CaptureError>;
}

/// Frame source backed by whatever image was staged last.
///
/// Used by the command-line driver: `capture <path>` stages a file, then captures it.
#[derive(Debug, Default)]
pub struct FileFrameSource {
    staged: Mutex<Option<Vec<u8>>>,
}

impl FileFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self, bytes: Vec<u8>) {
        *self.staged.lock() = Some(bytes);
    }

    pub async fn load(&self, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        tracing::debug!(path = %path.as_ref().display(), size = bytes.len(), "Frame staged from file");
        self.stage(bytes);
        Ok(())
    }
}

impl FrameSource for FileFrameSource {
    fn capture_still(&self) -> Result<Vec<u8>, CaptureError> {
        self.staged.lock().clone().ok_or(CaptureError::NoFrame)
    }
}

/// Location of a captured image, passed between screens as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageToken(String);

impl ImageToken {
    pub fn from_path(path: &Path) -> Self {
        Self(format!("{TOKEN_SCHEME}{}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self, CaptureError> {
        if raw.starts_with(TOKEN_SCHEME) && raw.len() > TOKEN_SCHEME.len() {
            Ok(Self(raw.to_string()))
        } else {
            Err(CaptureError::InvalidToken(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(self.0.trim_start_matches(TOKEN_SCHEME))
    }

    /// Read the image back for upload, enforcing the upload size limits.
    pub async fn load(&self) -> Result<ImageUpload, CaptureError> {
        let path = self.to_path();
        // Reject oversized files before pulling them into memory
        let len = tokio::fs::metadata(&path).await?.len();
        check_upload_size(usize::try_from(len).unwrap_or(usize::MAX))?;
        let bytes = tokio::fs::read(&path).await?;
        check_upload_size(bytes.len())?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".to_string());

        Ok(ImageUpload::new(file_name, bytes))
    }
}

impl std::fmt::Display for ImageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn check_upload_size(len: usize) -> Result<(), CaptureError> {
    if len == 0 {
        return Err(CaptureError::EmptyImage);
    }
    if len > MAX_RECOGNITION_IMAGE_BYTES {
        return Err(CaptureError::TooLarge(len));
    }
    Ok(())
}

/// Keeps the preview running until dropped.
pub struct PreviewGuard {
    source: Arc<dyn FrameSource>,
    active: Arc<AtomicBool>,
}

impl Drop for PreviewGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.source.stop_preview();
        tracing::debug!("Camera preview stopped");
    }
}

pub struct CapturePipeline {
    source: Arc<dyn FrameSource>,
    cache_dir: PathBuf,
    preview_active: Arc<AtomicBool>,
}

impl CapturePipeline {
    pub fn new(source: Arc<dyn FrameSource>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cache_dir: cache_dir.into(),
            preview_active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn is_previewing(&self) -> bool {
        self.preview_active.load(Ordering::SeqCst)
    }

    pub fn bind_preview(&self) -> Result<PreviewGuard, CaptureError> {
        self.source.start_preview()?;
        self.preview_active.store(true, Ordering::SeqCst);
        tracing::debug!("Camera preview started");
        Ok(PreviewGuard {
            source: Arc::clone(&self.source),
            active: Arc::clone(&self.preview_active),
        })
    }

    /// Write the current frame to `{cache_dir}/{timestamp}.jpg`.
    pub async fn capture(&self, now: NaiveDateTime) -> Result<ImageToken, CaptureError> {
        if !self.is_previewing() {
            return Err(CaptureError::PreviewInactive);
        }

        let bytes = self.source.capture_still().map_err(|e| {
            tracing::error!(error = %e, "Frame capture failed");
            e
        })?;
        if bytes.is_empty() {
            return Err(CaptureError::EmptyImage);
        }

        tokio::fs::create_dir_all(&self.cache_dir).await?;
        let path = self
            .cache_dir
            .join(format!("{}.jpg", now.format(FILE_NAME_FORMAT)));
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to save captured image");
            CaptureError::from(e)
        })?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Image captured");
        Ok(ImageToken::from_path(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("checkfood-capture-{}", uuid::Uuid::new_v4()))
    }

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 3)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    #[tokio::test]
    async fn test_capture_writes_timestamped_file() {
        let dir = scratch_dir();
        let source = Arc::new(FileFrameSource::new());
        source.stage(vec![0xFF, 0xD8, 0xFF, 0xD9]);
        let pipeline = CapturePipeline::new(source, &dir);

        let _preview = pipeline.bind_preview().unwrap();
        let token = pipeline.capture(at(12, 30, 5, 123)).await.unwrap();

        assert!(token.as_str().starts_with("file://"));
        assert!(token.as_str().ends_with("2025-11-03-12-30-05-123.jpg"));

        let upload = token.load().await.unwrap();
        assert_eq!(upload.file_name, "2025-11-03-12-30-05-123.jpg");
        assert_eq!(upload.bytes, vec![0xFF, 0xD8, 0xFF, 0xD9]);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_capture_requires_live_preview() {
        let source = Arc::new(FileFrameSource::new());
        source.stage(vec![1, 2, 3]);
        let pipeline = CapturePipeline::new(source, scratch_dir());

        assert_eq!(pipeline.capture(at(8, 0, 0, 0)).await, Err(CaptureError::PreviewInactive));

        let preview = pipeline.bind_preview().unwrap();
        assert!(pipeline.is_previewing());
        drop(preview);
        assert!(!pipeline.is_previewing());
        assert_eq!(pipeline.capture(at(8, 0, 0, 0)).await, Err(CaptureError::PreviewInactive));
    }

    #[tokio::test]
    async fn test_capture_without_frame_fails() {
        let pipeline = CapturePipeline::new(Arc::new(FileFrameSource::new()), scratch_dir());
        let _preview = pipeline.bind_preview().unwrap();
        assert_eq!(pipeline.capture(at(8, 0, 0, 0)).await, Err(CaptureError::NoFrame));
    }

    #[test]
    fn test_upload_size_limits() {
        assert_eq!(check_upload_size(0), Err(CaptureError::EmptyImage));
        assert!(check_upload_size(1).is_ok());
        assert!(check_upload_size(MAX_RECOGNITION_IMAGE_BYTES).is_ok());
        assert_eq!(
            check_upload_size(MAX_RECOGNITION_IMAGE_BYTES + 1),
            Err(CaptureError::TooLarge(MAX_RECOGNITION_IMAGE_BYTES + 1))
        );
    }

    #[tokio::test]
    async fn test_load_checks_size_before_reading() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let big = dir.join("big.jpg");
        // Sparse: the length is set without writing the bytes
        std::fs::File::create(&big)
            .unwrap()
            .set_len(MAX_RECOGNITION_IMAGE_BYTES as u64 + 1)
            .unwrap();
        let empty = dir.join("empty.jpg");
        std::fs::File::create(&empty).unwrap();

        assert_eq!(
            ImageToken::from_path(&big).load().await.unwrap_err(),
            CaptureError::TooLarge(MAX_RECOGNITION_IMAGE_BYTES + 1)
        );
        assert_eq!(
            ImageToken::from_path(&empty).load().await.unwrap_err(),
            CaptureError::EmptyImage
        );

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_token_parse() {
        assert!(ImageToken::parse("file:///tmp/a.jpg").is_ok());
        assert!(matches!(ImageToken::parse("/tmp/a.jpg"), Err(CaptureError::InvalidToken(_))));
        assert_eq!(
            ImageToken::parse("file:///tmp/a.jpg").unwrap().to_path(),
            PathBuf::from("/tmp/a.jpg")
        );
    }
}
