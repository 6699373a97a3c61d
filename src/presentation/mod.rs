pub mod overlay;
pub mod popover;

use serde::Serialize;

use crate::capture::RecognitionResult;
use crate::error::{CaptureError, ErrorKind};
use crate::geometry::Rectangle;

pub use overlay::SelectionOverlay;
pub use popover::PopoverLayout;

/// What the result area currently shows.
///
/// Only the newest selection is ever represented here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Presentation {
    Empty,
    Processing {
        token: u64,
        selection: Rectangle,
    },
    Ready {
        token: u64,
        selection: Rectangle,
        result: RecognitionResult,
        popover: PopoverLayout,
    },
    Failed {
        token: u64,
        selection: Rectangle,
        kind: ErrorKind,
        message: String,
        popover: PopoverLayout,
    },
}

impl Default for Presentation {
    fn default() -> Self {
        Self::Empty
    }
}

impl Presentation {
    pub fn ready(selection: Rectangle, result: RecognitionResult) -> Self {
        Self::Ready {
            token: result.token,
            selection,
            popover: PopoverLayout::for_selection(&selection, &result.words),
            result,
        }
    }

    pub fn failed(token: u64, selection: Rectangle, error: &CaptureError) -> Self {
        Self::Failed {
            token,
            selection,
            kind: error.kind(),
            message: error.to_string(),
            popover: PopoverLayout::for_selection(&selection, &[]),
        }
    }

    pub fn token(&self) -> Option<u64> {
        match self {
            Presentation::Empty => None,
            Presentation::Processing { token, .. }
            | Presentation::Ready { token, .. }
            | Presentation::Failed { token, .. } => Some(*token),
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Presentation::Processing { .. })
    }
}
