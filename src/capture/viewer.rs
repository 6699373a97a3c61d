use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{CapturedImage, ImageViewer};
use crate::error::{CaptureError, Result};

/// Writes each capture to `<dir>/capture-<token>.png` and optionally hands
/// the file to the desktop's default image viewer.
#[derive(Debug, Clone)]
pub struct PngFileViewer {
    dir: PathBuf,
    open_externally: bool,
}

impl PngFileViewer {
    pub fn new(dir: impl Into<PathBuf>, open_externally: bool) -> Self {
        Self {
            dir: dir.into(),
            open_externally,
        }
    }

    pub fn path_for(&self, token: u64) -> PathBuf {
        self.dir.join(format!("capture-{}.png", token))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageViewer for PngFileViewer {
    async fn show(&self, image: &CapturedImage, token: u64) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(token);
        tokio::fs::write(&path, image.to_png()?).await?;
        info!(path = %path.display(), "Saved capture");

        if self.open_externally {
            tokio::task::spawn_blocking(move || open::that(&path))
                .await?
                .map_err(|e| CaptureError::Io(format!("Failed to open capture: {}", e)))?;
        }

        Ok(())
    }
}
