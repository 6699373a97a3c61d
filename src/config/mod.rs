pub mod constants;

use std::env;
use std::time::Duration;

use crate::capture::CaptureSettings;
use crate::selection::ModifierKey;
use constants::*;

/// Runtime configuration for the selection tool
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OCR recognition language (default: "eng")
    pub language: String,

    /// Translate recognized text (default: false)
    pub translation_enabled: bool,

    /// Translation target locale (default: "pt")
    pub target_locale: String,

    /// LibreTranslate-compatible base URL
    pub translator_url: String,

    /// Optional translator API key
    pub translator_api_key: Option<String>,

    /// Modifier that must be held to start a selection (default: alt)
    pub modifier: ModifierKey,

    /// Key that cancels a live selection (default: "Escape")
    pub cancel_key: String,

    /// Budget for rasterize + recognize (default: 30s)
    pub recognition_timeout: Duration,

    /// Budget for translation (default: 10s)
    pub translation_timeout: Duration,

    /// Tesseract executable (default: "tesseract")
    pub tesseract_binary: String,

    /// Open each capture in the desktop image viewer (default: false)
    pub open_captures: bool,

    /// Custom log directory (overrides auto-detection)
    pub log_dir: Option<String>,

    /// Console log filter (default: "snip_ocr=info")
    pub console_log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            translation_enabled: false,
            target_locale: DEFAULT_TARGET_LOCALE.to_string(),
            translator_url: DEFAULT_TRANSLATOR_URL.to_string(),
            translator_api_key: None,
            modifier: ModifierKey::Alt,
            cancel_key: DEFAULT_CANCEL_KEY.to_string(),
            recognition_timeout: Duration::from_secs(DEFAULT_RECOGNITION_TIMEOUT_SECS),
            translation_timeout: Duration::from_secs(DEFAULT_TRANSLATION_TIMEOUT_SECS),
            tesseract_binary: DEFAULT_TESSERACT_BINARY.to_string(),
            open_captures: false,
            log_dir: None,
            console_log_level: "snip_ocr=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(language) = env::var("SNIP_OCR_LANGUAGE") {
            if !language.trim().is_empty() {
                config.language = language.trim().to_string();
            }
        }

        if let Ok(val) = env::var("SNIP_OCR_TRANSLATE") {
            config.translation_enabled = parse_bool(&val);
        }

        if let Ok(locale) = env::var("SNIP_OCR_TARGET_LOCALE") {
            if !locale.trim().is_empty() {
                config.target_locale = locale.trim().to_string();
            }
        }

        if let Ok(url) = env::var("SNIP_OCR_TRANSLATOR_URL") {
            config.translator_url = url;
        }

        config.translator_api_key = env::var("SNIP_OCR_TRANSLATOR_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        // Unknown modifier names keep the default
        if let Ok(val) = env::var("SNIP_OCR_MODIFIER") {
            match val.parse() {
                Ok(modifier) => config.modifier = modifier,
                Err(e) => tracing::warn!("{}, keeping {}", e, config.modifier),
            }
        }

        if let Ok(key) = env::var("SNIP_OCR_CANCEL_KEY") {
            if !key.is_empty() {
                config.cancel_key = key;
            }
        }

        if let Some(secs) = parse_secs("SNIP_OCR_RECOGNITION_TIMEOUT_SECONDS") {
            config.recognition_timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_secs("SNIP_OCR_TRANSLATION_TIMEOUT_SECONDS") {
            config.translation_timeout = Duration::from_secs(secs);
        }

        if let Ok(binary) = env::var("SNIP_OCR_TESSERACT") {
            config.tesseract_binary = binary;
        }

        if let Ok(val) = env::var("SNIP_OCR_OPEN_CAPTURE") {
            config.open_captures = parse_bool(&val);
        }

        if let Ok(dir) = env::var("SNIP_OCR_LOG_DIR") {
            config.log_dir = Some(dir);
        }

        if let Ok(level) = env::var("RUST_LOG") {
            config.console_log_level = level;
        }

        config
    }

    /// Settings the capture orchestrator runs with
    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            language: self.language.clone(),
            target_locale: self
                .translation_enabled
                .then(|| self.target_locale.clone()),
            recognition_timeout: self.recognition_timeout,
            translation_timeout: self.translation_timeout,
            allow_cross_origin: true,
        }
    }
}

fn parse_bool(val: &str) -> bool {
    matches!(val.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

/// Positive whole seconds; anything else falls back to the default
fn parse_secs(var: &str) -> Option<u64> {
    env::var(var)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
}
