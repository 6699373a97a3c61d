use std::env;
use std::fs;
use std::path::PathBuf;

/// Resolve the log directory, creating it if needed
///
/// Resolution order:
/// 1. Custom directory from configuration (if provided)
/// 2. Platform data directory (`dirs::data_local_dir()/snip_ocr/logs`)
/// 3. Home directory fallback
/// 4. Temp directory as last resort
pub fn get_log_directory(custom_dir: Option<&str>) -> Result<PathBuf, std::io::Error> {
    if let Some(dir) = custom_dir {
        return ensure_directory_exists(PathBuf::from(dir));
    }

    let log_dir = if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("snip_ocr").join("logs")
    } else if let Some(home_dir) = dirs::home_dir() {
        home_dir.join(".snip_ocr").join("logs")
    } else {
        env::temp_dir().join("snip_ocr_logs")
    };

    ensure_directory_exists(log_dir)
}

fn ensure_directory_exists(path: PathBuf) -> Result<PathBuf, std::io::Error> {
    if !path.exists() {
        fs::create_dir_all(&path)?;
    }
    Ok(path)
}
