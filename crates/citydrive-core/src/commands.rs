//! Per-frame player input handed to the simulation.
//!
//! Input devices are polled by the host; the simulation only sees which
//! logical intents are active this frame.

use serde::{Deserialize, Serialize};

/// Driving intents held down during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveIntents {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Everything the player asked for during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub intents: DriveIntents,
    /// Fire a missile (subject to the cooldown).
    pub fire: bool,
}

impl FrameInput {
    /// No intents, no fire.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn forward() -> Self {
        Self {
            intents: DriveIntents {
                forward: true,
                ..Default::default()
            },
            fire: false,
        }
    }

    pub fn fire() -> Self {
        Self {
            intents: DriveIntents::default(),
            fire: true,
        }
    }
}
