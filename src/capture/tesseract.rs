use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{CapturedImage, OcrEngine, OcrOutput, RecognizedWord};
use crate::error::{CaptureError, Result};
use crate::geometry::Rectangle;
use crate::utils::temp_file::TempFile;

/// Tesseract TSV row level for individual words
const WORD_LEVEL: u32 = 5;

/// OCR engine backed by the `tesseract` command line tool
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: String,
}

impl TesseractCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &CapturedImage, language: &str) -> Result<OcrOutput> {
        let input = TempFile::with_extension("png");
        tokio::fs::write(input.path(), image.to_png()?).await?;

        debug!(binary = %self.binary, language, "Running tesseract");
        let output = Command::new(&self.binary)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .arg("tsv")
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                CaptureError::RecognitionFailed(format!("Failed to run {}: {}", self.binary, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "tesseract exited with an error");
            return Err(CaptureError::RecognitionFailed(stderr.trim().to_string()));
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse Tesseract's TSV output into text and word boxes.
///
/// Words on the same line are joined by spaces, lines by newlines and
/// paragraphs by a blank line. The glyph-size hint is the word box height.
pub fn parse_tsv(tsv: &str) -> OcrOutput {
    let mut words = Vec::new();
    let mut text = String::new();
    let mut last_line: Option<(u32, u32, u32)> = None;

    // First row is the header
    for row in tsv.lines().skip(1) {
        let columns: Vec<&str> = row.splitn(12, '\t').collect();
        if columns.len() < 12 {
            continue;
        }

        let numbers: Vec<Option<f64>> = columns[..11].iter().map(|c| c.trim().parse().ok()).collect();
        let (Some(level), Some(block), Some(par), Some(line)) =
            (numbers[0], numbers[2], numbers[3], numbers[4])
        else {
            continue;
        };
        if level as u32 != WORD_LEVEL {
            continue;
        }
        // Non-text rows carry a confidence of -1
        if numbers[10].map_or(true, |conf| conf < 0.0) {
            continue;
        }

        let word = columns[11].trim();
        if word.is_empty() {
            continue;
        }

        let position = (block as u32, par as u32, line as u32);
        match last_line {
            Some(previous) if previous == position => text.push(' '),
            Some((block, par, _)) if (block, par) == (position.0, position.1) => text.push('\n'),
            Some(_) => text.push_str("\n\n"),
            None => {}
        }
        text.push_str(word);
        last_line = Some(position);

        let (left, top, width, height) = (
            numbers[6].unwrap_or(0.0),
            numbers[7].unwrap_or(0.0),
            numbers[8].unwrap_or(0.0),
            numbers[9].unwrap_or(0.0),
        );
        words.push(RecognizedWord {
            text: word.to_string(),
            bounding_box: Rectangle::new(left, top, width, height),
            font_size: (height > 0.0).then_some(height),
        });
    }

    OcrOutput { text, words }
}
