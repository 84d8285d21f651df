//! Scene snapshot: the render-sync state produced after each frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{ChaseCamera, EntityHandle, SimTime, Transform};

/// Everything a render collaborator needs after a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub time: SimTime,
    pub score: u32,
    pub player: PlayerView,
    pub camera: ChaseCamera,
    pub pedestrians: Vec<PedestrianView>,
    pub vehicles: Vec<VehicleView>,
    pub missiles: Vec<MissileView>,
    pub explosions: Vec<ExplosionView>,
    /// Notifications raised during this frame, in emission order.
    pub events: Vec<SimEvent>,
}

/// The player's vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub handle: EntityHandle,
    pub transform: Transform,
    pub speed: f32,
    /// Seconds until the launcher is ready again.
    pub fire_cooldown: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PedestrianView {
    pub handle: EntityHandle,
    pub transform: Transform,
    pub state: PedestrianState,
    /// Arm/leg swing angle derived from the walk cycle (radians).
    pub limb_swing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleView {
    pub handle: EntityHandle,
    pub transform: Transform,
    pub state: VehicleState,
    pub is_turning: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissileView {
    pub handle: EntityHandle,
    pub transform: Transform,
    pub lifetime: f32,
}

/// Explosion with its visual parameters derived from remaining lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub scale: f32,
    /// 1.0 at spawn, falling to 0.0 at removal.
    pub opacity: f32,
}
