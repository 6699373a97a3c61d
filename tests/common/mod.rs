//! Fake collaborators shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use image::{DynamicImage, RgbaImage};
use snip_ocr::capture::{
    CaptureOptions, CapturedImage, ImageViewer, OcrEngine, OcrOutput, Rasterizer,
    RecognizedWord, Translator,
};
use snip_ocr::selection::FinalizedSelection;
use snip_ocr::{CaptureError, Rectangle, ScrollOffset};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn selection(x: f64, y: f64, width: f64, height: f64) -> FinalizedSelection {
    FinalizedSelection {
        rect: Rectangle::new(x, y, width, height),
        scroll: ScrollOffset::default(),
    }
}

/// Returns a blank bitmap the size of the requested rectangle
#[derive(Default)]
pub struct BlankRasterizer {
    pub calls: AtomicUsize,
    pub last_options: Mutex<Option<CaptureOptions>>,
    pub delay: Duration,
    /// Force this size instead of the rectangle's
    pub size: Option<(u32, u32)>,
}

impl BlankRasterizer {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            size: Some((width, height)),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Rasterizer for BlankRasterizer {
    async fn capture(
        &self,
        rect: Rectangle,
        options: &CaptureOptions,
    ) -> snip_ocr::error::Result<CapturedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(*options);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let (width, height) = self
            .size
            .unwrap_or((rect.width.ceil() as u32, rect.height.ceil() as u32));
        Ok(CapturedImage::new(DynamicImage::ImageRgba8(RgbaImage::new(width, height))))
    }
}

/// One scripted OCR reply
pub struct Reply {
    pub delay: Duration,
    pub result: Result<OcrOutput, CaptureError>,
}

impl Reply {
    pub fn text(text: &str) -> Self {
        let words = text
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| RecognizedWord {
                text: word.to_string(),
                bounding_box: Rectangle::new(i as f64 * 40.0, 0.0, 36.0, 24.0),
                font_size: Some(24.0),
            })
            .collect();
        Self {
            delay: Duration::ZERO,
            result: Ok(OcrOutput {
                text: text.to_string(),
                words,
            }),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(CaptureError::RecognitionFailed(message.to_string())),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// OCR engine answering from a queue of replies, in call order
pub struct ScriptedOcr {
    replies: Mutex<VecDeque<Reply>>,
    pub calls: AtomicUsize,
    pub languages: Mutex<Vec<String>>,
}

impl ScriptedOcr {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for ScriptedOcr {
    async fn recognize(
        &self,
        _image: &CapturedImage,
        language: &str,
    ) -> snip_ocr::error::Result<OcrOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(language.to_string());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::text("default text"));
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

pub struct FakeTranslator {
    pub delay: Duration,
    pub result: Result<String, CaptureError>,
    pub calls: AtomicUsize,
}

impl FakeTranslator {
    pub fn ok(text: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(CaptureError::TranslationFailed("service unavailable".to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn stalled() -> Self {
        Self {
            delay: Duration::from_secs(3600),
            ..Self::ok("never")
        }
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, _text: &str, _target_locale: &str) -> snip_ocr::error::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// Records which tokens were shown; optionally fails
#[derive(Default)]
pub struct RecordingViewer {
    pub shown: Mutex<Vec<(u64, u32, u32)>>,
    pub fail: bool,
}

#[async_trait]
impl ImageViewer for RecordingViewer {
    async fn show(&self, image: &CapturedImage, token: u64) -> snip_ocr::error::Result<()> {
        self.shown
            .lock()
            .unwrap()
            .push((token, image.width(), image.height()));
        if self.fail {
            return Err(CaptureError::Io("no display".to_string()));
        }
        Ok(())
    }
}
