//! CLI argument parsing and help text
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Replay(ReplayArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayArgs {
    /// Rendered page the selection is made over
    pub image: PathBuf,
    /// Recorded input script
    pub script: PathBuf,
    /// Overrides SNIP_OCR_TARGET_LOCALE and switches translation on
    pub translate_to: Option<String>,
    /// Open captures in the desktop image viewer
    pub open: bool,
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(Command::Help);
    }
    if args.iter().any(|a| a == "--version" || a == "-v") {
        return Ok(Command::Version);
    }

    let value_of = |flag: &str| -> Result<Option<String>, String> {
        match args.iter().position(|a| a == flag) {
            Some(pos) => args
                .get(pos + 1)
                .filter(|v| !v.starts_with("--"))
                .cloned()
                .map(Some)
                .ok_or_else(|| format!("{} requires a value", flag)),
            None => Ok(None),
        }
    };

    let image = value_of("--image")?.ok_or("Missing --image <PATH>")?;
    let script = value_of("--script")?.ok_or("Missing --script <PATH>")?;

    Ok(Command::Replay(ReplayArgs {
        image: PathBuf::from(image),
        script: PathBuf::from(script),
        translate_to: value_of("--translate")?,
        open: args.iter().any(|a| a == "--open"),
    }))
}

pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!("snip_ocr v{}", version);
    println!("Select a region of a page with a modifier-drag and read its text");
    println!();
    println!("USAGE:");
    println!("    snip_ocr --image <PAGE> --script <EVENTS> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --image <PATH>        Rendered page (PNG, JPEG, WebP, ...)");
    println!("    --script <PATH>       JSON input script to replay over the page");
    println!("    --translate <LOCALE>  Translate recognized text to LOCALE");
    println!("    --open                Open each capture in the desktop image viewer");
    println!("    -h, --help            Print this help message");
    println!("    -v, --version         Print version information");
    println!();
    println!("SCRIPT FORMAT:");
    println!("    {{\"steps\": [");
    println!("      {{\"type\": \"pointer_down\", \"x\": 100, \"y\": 100, \"modifiers\": {{\"alt\": true}}}},");
    println!("      {{\"type\": \"pointer_move\", \"x\": 300, \"y\": 250}},");
    println!("      {{\"type\": \"pointer_up\"}},");
    println!("      {{\"wait_ms\": 500}}");
    println!("    ]}}");
    println!("    Other events: pointer_leave, key_down {{key}}, scroll {{x, y}}");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    SNIP_OCR_LANGUAGE                      - Recognition language (default: eng)");
    println!("    SNIP_OCR_TRANSLATE                     - Enable translation (default: false)");
    println!("    SNIP_OCR_TARGET_LOCALE                 - Translation target (default: pt)");
    println!("    SNIP_OCR_TRANSLATOR_URL                - LibreTranslate endpoint");
    println!("    SNIP_OCR_TRANSLATOR_API_KEY            - LibreTranslate API key");
    println!("    SNIP_OCR_MODIFIER                      - alt/ctrl/shift/meta (default: alt)");
    println!("    SNIP_OCR_CANCEL_KEY                    - Cancel key (default: Escape)");
    println!("    SNIP_OCR_RECOGNITION_TIMEOUT_SECONDS   - Capture + OCR timeout (default: 30)");
    println!("    SNIP_OCR_TRANSLATION_TIMEOUT_SECONDS   - Translation timeout (default: 10)");
    println!("    SNIP_OCR_TESSERACT                     - Tesseract executable (default: tesseract)");
    println!("    SNIP_OCR_OPEN_CAPTURE                  - Open captures (default: false)");
    println!("    SNIP_OCR_LOG_DIR                       - Log directory");
    println!("    RUST_LOG                               - Log level (error/warn/info/debug/trace)");
    println!();
    println!("CONFIGURATION:");
    println!("    Settings can also be placed in a .env file in the working directory");
}

pub fn print_version() {
    println!("snip_ocr v{}", env!("CARGO_PKG_VERSION"));
}
