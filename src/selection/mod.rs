pub mod controller;
pub mod input;
pub mod state;

pub use controller::{SelectionController, Transition};
pub use input::{InputEvent, ModifierKey, Modifiers};
pub use state::{FinalizedSelection, SelectionState};
