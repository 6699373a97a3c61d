/// Recognition language handed to the OCR engine when none is configured
///
/// Tesseract language codes are ISO 639-2 (three letters).
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Locale the translator targets when translation is switched on
pub const DEFAULT_TARGET_LOCALE: &str = "pt";

/// Default LibreTranslate-compatible endpoint
pub const DEFAULT_TRANSLATOR_URL: &str = "http://localhost:5000";

/// Key that cancels an in-progress drag
pub const DEFAULT_CANCEL_KEY: &str = "Escape";

/// Upper bound on rasterize + recognize for a single selection
pub const DEFAULT_RECOGNITION_TIMEOUT_SECS: u64 = 30;

/// Upper bound on the translation round trip
pub const DEFAULT_TRANSLATION_TIMEOUT_SECS: u64 = 10;

/// Executable used by the Tesseract OCR engine
pub const DEFAULT_TESSERACT_BINARY: &str = "tesseract";

/// Capacity of the selection transition channel
///
/// Slow subscribers that fall further behind than this skip transitions.
pub const TRANSITION_CHANNEL_CAPACITY: usize = 64;
