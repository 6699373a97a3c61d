use serde::Serialize;

use crate::capture::RecognizedWord;
use crate::geometry::Rectangle;

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const MIN_FONT_SIZE: f64 = 12.0;
pub const MAX_FONT_SIZE: f64 = 32.0;

/// Glyph box height to text size
const FONT_SCALE: f64 = 0.75;

pub const MIN_WIDTH: f64 = 200.0;
pub const MAX_WIDTH: f64 = 480.0;
pub const MIN_HEIGHT: f64 = 80.0;
pub const MAX_HEIGHT: f64 = 360.0;

/// Space between the selection's bottom edge and the popover
pub const GAP: f64 = 8.0;

/// Where and how large to draw the result popover, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopoverLayout {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
}

impl PopoverLayout {
    /// Lay out a popover below `selection`, sized from the word hints.
    ///
    /// font size = clamp(median(word font sizes) * 0.75, 12, 32), or 16 when
    /// no word carries a finite positive hint. Width and height follow the
    /// selection, clamped to [200, 480] and [80, 360].
    pub fn for_selection(selection: &Rectangle, words: &[RecognizedWord]) -> Self {
        Self {
            left: finite_or_zero(selection.x).max(0.0),
            top: (finite_or_zero(selection.bottom()) + GAP).max(0.0),
            width: clamp_extent(selection.width, MIN_WIDTH, MAX_WIDTH),
            height: clamp_extent(selection.height, MIN_HEIGHT, MAX_HEIGHT),
            font_size: font_size(words),
        }
    }
}

fn font_size(words: &[RecognizedWord]) -> f64 {
    let mut hints: Vec<f64> = words
        .iter()
        .filter_map(|word| word.font_size)
        .filter(|size| size.is_finite() && *size > 0.0)
        .collect();

    if hints.is_empty() {
        return DEFAULT_FONT_SIZE;
    }

    hints.sort_by(|a, b| a.total_cmp(b));
    let mid = hints.len() / 2;
    let median = if hints.len() % 2 == 0 {
        (hints[mid - 1] + hints[mid]) / 2.0
    } else {
        hints[mid]
    };

    (median * FONT_SCALE).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

fn clamp_extent(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
