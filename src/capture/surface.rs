use async_trait::async_trait;
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::{CaptureOptions, CapturedImage, Rasterizer};
use crate::error::Result;
use crate::geometry::{Rectangle, ScrollOffset};

/// A fully rendered page held as one bitmap in document coordinates.
///
/// The viewport is a window onto this bitmap; the scroll offset says where
/// that window currently sits.
#[derive(Clone)]
pub struct BitmapSurface {
    page: Arc<DynamicImage>,
}

impl BitmapSurface {
    pub fn new(page: DynamicImage) -> Self {
        Self {
            page: Arc::new(page),
        }
    }

    /// Decode a page image from disk
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let page = tokio::task::spawn_blocking(move || image::open(path)).await??;
        Ok(Self::new(page))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.page.dimensions()
    }
}

#[async_trait]
impl Rasterizer for BitmapSurface {
    async fn capture(&self, rect: Rectangle, options: &CaptureOptions) -> Result<CapturedImage> {
        let scroll = ScrollOffset::new(options.scroll_offset_x, options.scroll_offset_y);
        let region = rect.to_document(scroll);
        let (width, height) = self.dimensions();

        let Some((x, y, w, h)) = region.clamp_to_surface(width, height) else {
            debug!(?region, width, height, "Selection lies outside the page");
            return Ok(CapturedImage::new(DynamicImage::ImageRgba8(RgbaImage::new(0, 0))));
        };

        let page = self.page.clone();
        let cropped = tokio::task::spawn_blocking(move || page.crop_imm(x, y, w, h)).await?;

        debug!(x, y, width = w, height = h, "Rasterized page region");
        Ok(CapturedImage::new(cropped))
    }
}
