pub mod orchestrator;
pub mod surface;
pub mod tesseract;
pub mod translate;
pub mod viewer;

use async_trait::async_trait;
use image::{DynamicImage, ImageOutputFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::error::Result;
use crate::geometry::Rectangle;

pub use orchestrator::{CaptureOrchestrator, CaptureSettings};
pub use surface::BitmapSurface;
pub use tesseract::TesseractCli;
pub use translate::HttpTranslator;
pub use viewer::PngFileViewer;

/// A rasterized region of the page
#[derive(Debug, Clone)]
pub struct CapturedImage {
    image: DynamicImage,
}

impl CapturedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Encode as PNG bytes
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, ImageOutputFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

/// Options passed to the rasterizer alongside the viewport rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Horizontal page scroll when the selection was made
    pub scroll_offset_x: f64,
    /// Vertical page scroll when the selection was made
    pub scroll_offset_y: f64,
    /// Render cross-origin image content instead of leaving it blank
    pub allow_cross_origin: bool,
}

/// A single word found by the OCR engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    pub text: String,
    /// Word box in captured-image pixels
    pub bounding_box: Rectangle,
    /// Estimated glyph height in pixels, when the engine reports one
    pub font_size: Option<f64>,
}

/// Raw OCR engine output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrOutput {
    pub text: String,
    pub words: Vec<RecognizedWord>,
}

/// The text recognized for one finalized selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionResult {
    /// Sequence token of the selection this result belongs to
    pub token: u64,
    pub language: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_locale: Option<String>,
    pub words: Vec<RecognizedWord>,
}

impl RecognitionResult {
    /// Text to show: the translation when there is one
    pub fn display_text(&self) -> &str {
        self.translated.as_deref().unwrap_or(&self.text)
    }
}

/// Renders a region of the page surface into a bitmap
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Capture `rect` (viewport coordinates) from the surface this rasterizer
    /// renders, shifting by the scroll offsets in `options`.
    async fn capture(&self, rect: Rectangle, options: &CaptureOptions) -> Result<CapturedImage>;
}

/// Extracts text and word boxes from a bitmap
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &CapturedImage, language: &str) -> Result<OcrOutput>;
}

/// Localizes recognized text
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String>;
}

/// Shows the captured bitmap verbatim
#[async_trait]
pub trait ImageViewer: Send + Sync {
    async fn show(&self, image: &CapturedImage, token: u64) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_captured_image_dimensions() {
        let image = CapturedImage::new(DynamicImage::ImageRgba8(RgbaImage::new(12, 7)));
        assert_eq!(image.width(), 12);
        assert_eq!(image.height(), 7);
        assert!(!image.is_empty());

        let empty = CapturedImage::new(DynamicImage::ImageRgba8(RgbaImage::new(0, 7)));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_png_encoding_has_signature() {
        let image = CapturedImage::new(DynamicImage::ImageRgba8(RgbaImage::new(4, 4)));
        let png = image.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_display_text_prefers_translation() {
        let mut result = RecognitionResult {
            token: 1,
            language: "eng".to_string(),
            text: "hello".to_string(),
            translated: None,
            target_locale: None,
            words: Vec::new(),
        };
        assert_eq!(result.display_text(), "hello");

        result.translated = Some("olá".to_string());
        assert_eq!(result.display_text(), "olá");
    }
}
