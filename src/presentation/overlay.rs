use serde::Serialize;

use crate::geometry::Rectangle;
use crate::selection::SelectionState;

/// What to draw over the page for the current selection state.
///
/// While a drag is live the page is dimmed and takes pointer input; the
/// outline appears once the pointer has moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionOverlay {
    pub outline: Option<Rectangle>,
    pub dimmed: bool,
}

impl SelectionOverlay {
    pub fn from_state(state: &SelectionState) -> Self {
        match state {
            SelectionState::Dragging { .. } => Self {
                outline: state.preview(),
                dimmed: true,
            },
            SelectionState::Idle | SelectionState::Finalized { .. } => Self {
                outline: None,
                dimmed: false,
            },
        }
    }
}
