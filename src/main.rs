use anyhow::{Context, Result};
use snip_ocr::capture::{
    BitmapSurface, CaptureOrchestrator, HttpTranslator, PngFileViewer, TesseractCli,
};
use snip_ocr::cli::{self, Command, ReplayArgs};
use snip_ocr::config::AppConfig;
use snip_ocr::logging;
use snip_ocr::script::{Script, ScriptStep};
use snip_ocr::selection::{SelectionController, Transition};
use snip_ocr::Session;
use std::env;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if it doesn't)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = env::args().skip(1).collect();
    let replay = match cli::parse_args(&args) {
        Ok(Command::Help) => {
            cli::print_help();
            return Ok(());
        }
        Ok(Command::Version) => {
            cli::print_version();
            return Ok(());
        }
        Ok(Command::Replay(replay)) => replay,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage");
            std::process::exit(2);
        }
    };

    let mut config = AppConfig::from_env();
    if let Some(locale) = &replay.translate_to {
        config.translation_enabled = true;
        config.target_locale = locale.clone();
    }
    if replay.open {
        config.open_captures = true;
    }

    let _log_guard = logging::init_logging(&config);
    logging::log_platform_info();

    run(&config, &replay).await
}

async fn run(config: &AppConfig, replay: &ReplayArgs) -> Result<()> {
    let surface = BitmapSurface::open(&replay.image)
        .await
        .with_context(|| format!("Failed to load page image {}", replay.image.display()))?;
    let (width, height) = surface.dimensions();
    tracing::info!("Loaded page {} ({}x{})", replay.image.display(), width, height);

    let script_json = tokio::fs::read_to_string(&replay.script)
        .await
        .with_context(|| format!("Failed to read script {}", replay.script.display()))?;
    let script = Script::from_json(&script_json).context("Failed to parse script")?;

    let capture_dir = env::temp_dir().join("snip_ocr_captures");
    let mut orchestrator = CaptureOrchestrator::new(
        Arc::new(surface),
        Arc::new(TesseractCli::new(&config.tesseract_binary)),
        config.capture_settings(),
    )
    .with_viewer(Arc::new(PngFileViewer::new(capture_dir, config.open_captures)));

    if config.translation_enabled {
        let mut translator = HttpTranslator::new(&config.translator_url, config.translation_timeout)
            .context("Failed to create translator")?;
        if let Some(key) = &config.translator_api_key {
            translator = translator.with_api_key(key);
        }
        tracing::info!(
            "Translation enabled: {} via {}",
            config.target_locale,
            translator.endpoint()
        );
        orchestrator = orchestrator.with_translator(Arc::new(translator));
    }

    let controller = SelectionController::new(config.modifier, &config.cancel_key);
    let mut session = Session::new(controller, Arc::new(orchestrator));

    for step in script.steps {
        match step {
            ScriptStep::Wait { .. } => {
                if let Some(duration) = step.wait() {
                    tokio::time::sleep(duration).await;
                }
            }
            ScriptStep::Input(event) => match session.dispatch(event) {
                Transition::Finalized(selection) => {
                    tracing::info!(
                        "Selected {}x{} at ({}, {})",
                        selection.rect.width,
                        selection.rect.height,
                        selection.rect.x,
                        selection.rect.y
                    );
                }
                Transition::Discarded => tracing::info!("Selection discarded (no area)"),
                Transition::Cancelled => tracing::info!("Selection cancelled"),
                _ => {}
            },
        }
    }

    let presentation = session.settle().await;
    let json = serde_json::to_string_pretty(&presentation).context("Failed to serialize result")?;
    println!("{}", json);

    Ok(())
}
