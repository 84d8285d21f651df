//! Notifications emitted by the simulation for audio and UI collaborators.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Fire-and-forget notification produced during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The player launched a missile.
    MissileFired { position: Vec3 },
    /// A pedestrian was struck.
    PedestrianHit { position: Vec3 },
    /// An AI vehicle was struck.
    VehicleHit { position: Vec3 },
    /// A missile detonated.
    Explosion { position: Vec3 },
    /// The score changed.
    ScoreChanged { new_score: u32 },
}

impl SimEvent {
    /// Whether this event asks the audio collaborator to play a sound.
    pub fn is_audio(&self) -> bool {
        !matches!(self, SimEvent::ScoreChanged { .. })
    }
}
