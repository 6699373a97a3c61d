use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Temporary file removed in the background when dropped
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Reserve a unique path in the system temp directory with the given extension
    pub fn with_extension(extension: &str) -> Self {
        let path = std::env::temp_dir().join(format!("snip_ocr_{}.{}", Uuid::new_v4(), extension));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let path = self.path.clone();
        // Outside a runtime there is nothing to spawn on; leave the file to the OS
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if let Err(e) = fs::remove_file(&path).await {
                    tracing::debug!("Failed to cleanup temp file {:?}: {}", path, e);
                }
            });
        }
    }
}
