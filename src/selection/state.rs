use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rectangle, ScrollOffset};

/// Where the drag gesture currently stands.
///
/// `Finalized` is only ever observed as a published transition: the
/// controller itself returns to `Idle` in the same step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SelectionState {
    Idle,
    Dragging {
        anchor: Point,
        current: Option<Point>,
    },
    Finalized {
        rect: Rectangle,
    },
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SelectionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, SelectionState::Dragging { .. })
    }

    /// Rectangle to outline while dragging, once the pointer has moved
    pub fn preview(&self) -> Option<Rectangle> {
        match self {
            SelectionState::Dragging {
                anchor,
                current: Some(current),
            } => Some(Rectangle::from_corners(*anchor, *current)),
            SelectionState::Finalized { rect } => Some(*rect),
            _ => None,
        }
    }
}

/// A completed selection, ready to be captured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalizedSelection {
    /// Viewport-space rectangle
    pub rect: Rectangle,
    /// Page scroll at the moment the gesture ended
    pub scroll: ScrollOffset,
}
