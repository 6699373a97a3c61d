use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::selection::InputEvent;

/// One step of a recorded interaction.
///
/// Any object with a `type` is an input event, even if it also carries
/// `wait_ms`; only untyped objects are waits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Input(InputEvent),
    /// Let spawned captures make progress for a while
    Wait { wait_ms: u64 },
}

impl ScriptStep {
    pub fn wait(&self) -> Option<Duration> {
        match self {
            ScriptStep::Wait { wait_ms } => Some(Duration::from_millis(*wait_ms)),
            ScriptStep::Input(_) => None,
        }
    }
}

/// A recorded interaction, replayed against a page by the binary
///
/// ```json
/// {"steps": [
///   {"type": "scroll", "x": 0, "y": 120},
///   {"type": "pointer_down", "x": 100, "y": 100, "modifiers": {"alt": true}},
///   {"type": "pointer_move", "x": 300, "y": 250},
///   {"type": "pointer_up"},
///   {"wait_ms": 250}
/// ]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
