use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::geometry::{Point, ScrollOffset};

/// Modifier keys held while a pointer button went down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        shift: false,
        meta: false,
    };

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }
}

/// The modifier that must be held for a pointer-down to start a selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Alt,
    Ctrl,
    Shift,
    Meta,
}

impl ModifierKey {
    pub fn is_held(self, modifiers: &Modifiers) -> bool {
        match self {
            ModifierKey::Alt => modifiers.alt,
            ModifierKey::Ctrl => modifiers.ctrl,
            ModifierKey::Shift => modifiers.shift,
            ModifierKey::Meta => modifiers.meta,
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModifierKey::Alt => "alt",
            ModifierKey::Ctrl => "ctrl",
            ModifierKey::Shift => "shift",
            ModifierKey::Meta => "meta",
        };
        f.write_str(name)
    }
}

impl FromStr for ModifierKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alt" | "option" => Ok(ModifierKey::Alt),
            "ctrl" | "control" => Ok(ModifierKey::Ctrl),
            "shift" => Ok(ModifierKey::Shift),
            "meta" | "cmd" | "super" => Ok(ModifierKey::Meta),
            other => Err(format!("Unknown modifier key: {}", other)),
        }
    }
}

/// Raw input the selection controller consumes.
///
/// Pointer positions are viewport coordinates. Gesture end carries no
/// position: the rectangle is formed from the last observed move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        #[serde(flatten)]
        point: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        #[serde(flatten)]
        point: Point,
    },
    PointerUp,
    PointerLeave,
    KeyDown {
        key: String,
    },
    Scroll {
        #[serde(flatten)]
        offset: ScrollOffset,
    },
}
