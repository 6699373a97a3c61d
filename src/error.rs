use serde::Serialize;
use thiserror::Error;

/// Everything that can go wrong between a finalized selection and the
/// presented result.
///
/// `Clone` so a failure can be published on the presentation channel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    // Selection errors
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    // Rasterizer errors
    #[error("Captured image is empty ({width}x{height})")]
    CaptureEmpty { width: u32, height: u32 },
    #[error("Rasterizer error: {0}")]
    Rasterizer(String),

    // OCR errors
    #[error("Text recognition failed: {0}")]
    RecognitionFailed(String),

    // Translation errors (never surfaced on their own, the orchestrator
    // falls back to the recognized text)
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    // Scheduling errors
    #[error("{stage} timed out after {seconds}s")]
    Timeout { stage: &'static str, seconds: u64 },
    #[error("Capture #{token} was superseded by a newer selection")]
    Superseded { token: u64 },

    // Environment errors
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CaptureError {
    /// Stable machine-readable name used by the presentation layer
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaptureError::InvalidSelection(_) => ErrorKind::InvalidSelection,
            CaptureError::CaptureEmpty { .. } | CaptureError::Rasterizer(_) => {
                ErrorKind::CaptureEmpty
            }
            CaptureError::RecognitionFailed(_) | CaptureError::Timeout { .. } => {
                ErrorKind::RecognitionFailed
            }
            CaptureError::TranslationFailed(_) => ErrorKind::TranslationFailed,
            CaptureError::Superseded { .. } => ErrorKind::Superseded,
            CaptureError::Io(_) | CaptureError::Config(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidSelection,
    CaptureEmpty,
    RecognitionFailed,
    TranslationFailed,
    Superseded,
    Internal,
}

// Conversions
impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Io(err.to_string())
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(err: image::ImageError) -> Self {
        CaptureError::Rasterizer(err.to_string())
    }
}

impl From<reqwest::Error> for CaptureError {
    fn from(err: reqwest::Error) -> Self {
        CaptureError::TranslationFailed(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CaptureError {
    fn from(err: tokio::task::JoinError) -> Self {
        CaptureError::Io(format!("Task execution error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, CaptureError>;
