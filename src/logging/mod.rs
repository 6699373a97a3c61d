pub mod paths;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::AppConfig;

/// Initialize console + file logging
///
/// This sets up:
/// - Console logging (compact) filtered by `RUST_LOG` or the configured level
/// - Application log file (JSON format), rotated daily, in the log directory
///
/// Falls back to console-only logging when the log directory is unusable.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let console_filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.console_log_level))
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(console_filter());

    match paths::get_log_directory(config.log_dir.as_deref()) {
        Ok(log_dir) => {
            let app_appender = tracing_appender::rolling::daily(&log_dir, "snip_ocr.log");
            let (app_writer, guard) = tracing_appender::non_blocking(app_appender);

            let app_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(app_writer)
                .with_filter(EnvFilter::new("snip_ocr=debug"));

            tracing_subscriber::registry()
                .with(console_layer)
                .with(app_layer)
                .init();

            tracing::info!("Logging initialized - log directory: {:?}", log_dir);
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry().with(console_layer).init();

            tracing::warn!("Failed to initialize file logging: {}", e);
            tracing::warn!("Falling back to console-only logging");
            None
        }
    }
}

/// Log platform information on startup
pub fn log_platform_info() {
    tracing::info!(
        platform = std::env::consts::OS,
        architecture = std::env::consts::ARCH,
        version = env!("CARGO_PKG_VERSION"),
        "snip_ocr starting"
    );
}
