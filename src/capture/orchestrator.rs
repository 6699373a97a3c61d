use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

use super::{CaptureOptions, CapturedImage, ImageViewer, OcrEngine, Rasterizer, RecognitionResult, Translator};
use crate::config::constants::{
    DEFAULT_LANGUAGE, DEFAULT_RECOGNITION_TIMEOUT_SECS, DEFAULT_TRANSLATION_TIMEOUT_SECS,
};
use crate::error::{CaptureError, Result};
use crate::presentation::Presentation;
use crate::selection::FinalizedSelection;

/// Knobs for a capture run
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    /// OCR recognition language
    pub language: String,
    /// Translation target; `None` disables translation
    pub target_locale: Option<String>,
    /// Budget for rasterize + recognize together
    pub recognition_timeout: Duration,
    /// Budget for the translation round trip
    pub translation_timeout: Duration,
    pub allow_cross_origin: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            target_locale: None,
            recognition_timeout: Duration::from_secs(DEFAULT_RECOGNITION_TIMEOUT_SECS),
            translation_timeout: Duration::from_secs(DEFAULT_TRANSLATION_TIMEOUT_SECS),
            allow_cross_origin: true,
        }
    }
}

/// Drives a finalized selection through rasterize, recognize and translate.
///
/// Every run is tagged with a sequence token. Only the newest token may
/// publish to the presentation channel; older runs finish quietly with
/// [`CaptureError::Superseded`].
pub struct CaptureOrchestrator {
    rasterizer: Arc<dyn Rasterizer>,
    ocr: Arc<dyn OcrEngine>,
    translator: Option<Arc<dyn Translator>>,
    viewer: Option<Arc<dyn ImageViewer>>,
    settings: CaptureSettings,
    latest: AtomicU64,
    presentation: watch::Sender<Presentation>,
}

impl CaptureOrchestrator {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        ocr: Arc<dyn OcrEngine>,
        settings: CaptureSettings,
    ) -> Self {
        let (presentation, _) = watch::channel(Presentation::Empty);
        Self {
            rasterizer,
            ocr,
            translator: None,
            viewer: None,
            settings,
            latest: AtomicU64::new(0),
            presentation,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_viewer(mut self, viewer: Arc<dyn ImageViewer>) -> Self {
        self.viewer = Some(viewer);
        self
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    pub fn subscribe(&self) -> watch::Receiver<Presentation> {
        self.presentation.subscribe()
    }

    /// Snapshot of what is currently presented
    pub fn current(&self) -> Presentation {
        self.presentation.borrow().clone()
    }

    /// Newest token handed out, 0 before the first selection
    pub fn latest_token(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.latest_token() == token
    }

    /// Claim the next sequence token for `selection` and show it as processing.
    ///
    /// Call this synchronously when the selection finalizes so that any
    /// in-flight run is superseded before its result can land.
    pub fn begin(&self, selection: &FinalizedSelection) -> u64 {
        let mut token = 0;
        // Issue and publish under the channel lock so a concurrent publish
        // for an older token cannot slip in between
        self.presentation.send_modify(|presentation| {
            token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *presentation = Presentation::Processing {
                token,
                selection: selection.rect,
            };
        });
        debug!(token, "Capture queued");
        token
    }

    /// Begin and run in one step.
    ///
    /// A degenerate rectangle is rejected before a token is claimed, so
    /// whatever is presented stays untouched.
    pub async fn process(&self, selection: FinalizedSelection) -> Result<RecognitionResult> {
        if selection.rect.is_degenerate() {
            debug!(rect = ?selection.rect, "Ignoring degenerate selection");
            return Err(CaptureError::InvalidSelection(format!(
                "{}x{} has no area",
                selection.rect.width, selection.rect.height
            )));
        }

        let token = self.begin(&selection);
        self.run(token, selection).await
    }

    /// Run the capture pipeline for a token obtained from [`Self::begin`]
    #[instrument(skip(self, selection))]
    pub async fn run(&self, token: u64, selection: FinalizedSelection) -> Result<RecognitionResult> {
        let outcome = self.capture_and_recognize(token, &selection).await;

        if let Err(CaptureError::Superseded { .. }) = outcome {
            debug!("Dropping superseded capture");
            return outcome;
        }

        let published = self.presentation.send_if_modified(|presentation| {
            if !self.is_current(token) {
                return false;
            }
            *presentation = match &outcome {
                Ok(result) => Presentation::ready(selection.rect, result.clone()),
                Err(error) => Presentation::failed(token, selection.rect, error),
            };
            true
        });

        if !published {
            debug!("Dropping superseded capture");
            return Err(CaptureError::Superseded { token });
        }

        if let Err(error) = &outcome {
            warn!(kind = ?error.kind(), "Capture failed: {}", error);
        }
        outcome
    }

    async fn capture_and_recognize(
        &self,
        token: u64,
        selection: &FinalizedSelection,
    ) -> Result<RecognitionResult> {
        let options = CaptureOptions {
            scroll_offset_x: selection.scroll.x,
            scroll_offset_y: selection.scroll.y,
            allow_cross_origin: self.settings.allow_cross_origin,
        };
        let deadline = Instant::now() + self.settings.recognition_timeout;

        let image = timeout_at(deadline, self.rasterizer.capture(selection.rect, &options))
            .await
            .map_err(|_| self.timed_out("Capture", self.settings.recognition_timeout))??;
        self.ensure_current(token)?;

        if image.is_empty() {
            return Err(CaptureError::CaptureEmpty {
                width: image.width(),
                height: image.height(),
            });
        }

        self.show(&image, token).await;

        let output = timeout_at(deadline, self.ocr.recognize(&image, &self.settings.language))
            .await
            .map_err(|_| self.timed_out("Recognition", self.settings.recognition_timeout))?
            .map_err(|e| match e {
                CaptureError::RecognitionFailed(_) => e,
                other => CaptureError::RecognitionFailed(other.to_string()),
            })?;
        self.ensure_current(token)?;

        let text = output.text.trim().to_string();
        if text.is_empty() {
            return Err(CaptureError::RecognitionFailed("no usable text".to_string()));
        }
        info!(words = output.words.len(), "Recognized text: {}", text);

        let translated = self.translate(&text).await;
        self.ensure_current(token)?;

        Ok(RecognitionResult {
            token,
            language: self.settings.language.clone(),
            text,
            target_locale: translated.as_ref().and(self.settings.target_locale.clone()),
            translated,
            words: output.words,
        })
    }

    /// Best effort: any failure falls back to the untranslated text
    async fn translate(&self, text: &str) -> Option<String> {
        let (Some(translator), Some(locale)) = (&self.translator, &self.settings.target_locale) else {
            return None;
        };

        match timeout(self.settings.translation_timeout, translator.translate(text, locale)).await {
            Ok(Ok(translated)) => Some(translated),
            Ok(Err(e)) => {
                warn!("Translation failed, showing recognized text: {}", e);
                None
            }
            Err(_) => {
                warn!(
                    "Translation timed out after {}s, showing recognized text",
                    self.settings.translation_timeout.as_secs()
                );
                None
            }
        }
    }

    async fn show(&self, image: &CapturedImage, token: u64) {
        if let Some(viewer) = &self.viewer {
            if let Err(e) = viewer.show(image, token).await {
                warn!("Failed to display capture: {}", e);
            }
        }
    }

    fn ensure_current(&self, token: u64) -> Result<()> {
        if self.is_current(token) {
            Ok(())
        } else {
            Err(CaptureError::Superseded { token })
        }
    }

    fn timed_out(&self, stage: &'static str, budget: Duration) -> CaptureError {
        CaptureError::Timeout {
            stage,
            seconds: budget.as_secs(),
        }
    }
}
