// Library modules for the binary and integration tests
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod presentation;
pub mod script;
pub mod selection;
pub mod session;
mod utils; // Internal module, not exported

pub use capture::{CaptureOrchestrator, CaptureSettings, RecognitionResult};
pub use error::{CaptureError, ErrorKind};
pub use geometry::{Point, Rectangle, ScrollOffset};
pub use presentation::Presentation;
pub use selection::{InputEvent, SelectionController, SelectionState};
pub use session::Session;
