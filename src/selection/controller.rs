use tokio::sync::broadcast;
use tracing::debug;

use super::input::{InputEvent, ModifierKey, Modifiers};
use super::state::{FinalizedSelection, SelectionState};
use crate::config::constants::{DEFAULT_CANCEL_KEY, TRANSITION_CHANNEL_CAPACITY};
use crate::geometry::{Point, Rectangle, ScrollOffset};

/// What a single input event did to the selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Event had no effect
    Ignored,
    /// A drag began; the host should suppress its default drag behaviour
    Started,
    /// The pointer moved during a drag
    Preview(Rectangle),
    /// The drag completed with a usable rectangle
    Finalized(FinalizedSelection),
    /// The drag ended without a usable rectangle
    Discarded,
    /// The drag was cancelled by key or by the pointer leaving the surface
    Cancelled,
}

impl Transition {
    pub fn prevents_default(&self) -> bool {
        matches!(self, Transition::Started)
    }

    pub fn finalized(&self) -> Option<FinalizedSelection> {
        match self {
            Transition::Finalized(selection) => Some(*selection),
            _ => None,
        }
    }
}

/// Turns raw pointer input into axis-aligned selection rectangles.
///
/// All points are viewport coordinates. The controller is meant to be owned
/// by the event-loop thread and driven synchronously; observers follow along
/// through [`SelectionController::subscribe`].
pub struct SelectionController {
    state: SelectionState,
    modifier: ModifierKey,
    cancel_key: String,
    scroll: ScrollOffset,
    transitions: broadcast::Sender<SelectionState>,
}

impl SelectionController {
    pub fn new(modifier: ModifierKey, cancel_key: impl Into<String>) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_CHANNEL_CAPACITY);
        Self {
            state: SelectionState::Idle,
            modifier,
            cancel_key: cancel_key.into(),
            scroll: ScrollOffset::default(),
            transitions,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    pub fn modifier(&self) -> ModifierKey {
        self.modifier
    }

    /// Receive every state transition from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SelectionState> {
        self.transitions.subscribe()
    }

    pub fn handle(&mut self, event: InputEvent) -> Transition {
        match event {
            InputEvent::PointerDown { point, modifiers } => self.pointer_down(point, &modifiers),
            InputEvent::PointerMove { point } => self.pointer_move(point),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerLeave => self.cancel("pointer left surface"),
            InputEvent::KeyDown { key } => {
                if key.eq_ignore_ascii_case(&self.cancel_key) {
                    self.cancel("cancel key")
                } else {
                    Transition::Ignored
                }
            }
            InputEvent::Scroll { offset } => {
                self.scroll = offset;
                Transition::Ignored
            }
        }
    }

    fn pointer_down(&mut self, point: Point, modifiers: &Modifiers) -> Transition {
        if !self.state.is_idle() {
            // Re-entrant start while a drag is live
            return Transition::Ignored;
        }
        if !self.modifier.is_held(modifiers) {
            return Transition::Ignored;
        }

        debug!(x = point.x, y = point.y, "Selection started");
        self.set_state(SelectionState::Dragging {
            anchor: point,
            current: None,
        });
        Transition::Started
    }

    fn pointer_move(&mut self, point: Point) -> Transition {
        let SelectionState::Dragging { anchor, .. } = self.state else {
            return Transition::Ignored;
        };

        self.set_state(SelectionState::Dragging {
            anchor,
            current: Some(point),
        });
        Transition::Preview(Rectangle::from_corners(anchor, point))
    }

    fn pointer_up(&mut self) -> Transition {
        let SelectionState::Dragging { anchor, current } = self.state else {
            return Transition::Ignored;
        };

        let rect = current.map(|current| Rectangle::from_corners(anchor, current));
        match rect {
            Some(rect) if !rect.is_degenerate() => {
                debug!(
                    x = rect.x,
                    y = rect.y,
                    width = rect.width,
                    height = rect.height,
                    "Selection finalized"
                );
                self.set_state(SelectionState::Finalized { rect });
                self.set_state(SelectionState::Idle);
                Transition::Finalized(FinalizedSelection {
                    rect,
                    scroll: self.scroll,
                })
            }
            _ => {
                debug!("Selection discarded: no area");
                self.set_state(SelectionState::Idle);
                Transition::Discarded
            }
        }
    }

    fn cancel(&mut self, reason: &str) -> Transition {
        if !self.state.is_dragging() {
            return Transition::Ignored;
        }

        debug!(reason, "Selection cancelled");
        self.set_state(SelectionState::Idle);
        Transition::Cancelled
    }

    fn set_state(&mut self, state: SelectionState) {
        self.state = state;
        // No subscribers is fine
        let _ = self.transitions.send(state);
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(ModifierKey::default(), DEFAULT_CANCEL_KEY)
    }
}
