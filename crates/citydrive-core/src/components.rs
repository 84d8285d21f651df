//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and in the agent state machines.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Box shape used for bounding-box queries. The world-space box is
/// recomputed from the entity's transform on every query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub half_extents: Vec3,
}

/// Marks an entity as registered in the collidable set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collidable {
    pub kind: CollidableKind,
}

/// The player's vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerVehicle {
    /// Signed scalar speed along the heading (units per frame).
    pub speed: f32,
    /// Seconds until the next missile may be fired.
    pub fire_cooldown: f32,
}

/// Pedestrian behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pedestrian {
    pub state: PedestrianState,
    /// Walking speed, fixed at spawn (units per frame).
    pub speed: f32,
    /// Sidewalk waypoint being walked to.
    pub destination: Vec3,
    /// Seconds left standing still.
    pub idle_timer: f32,
    /// Walk cycle phase. Unbounded; consumers wrap it through trig.
    pub animation_phase: f32,
    /// Per-frame velocity while tumbling.
    pub hit_velocity: Vec3,
    /// Resting height of the body center.
    pub base_y: f32,
}

/// AI-controlled traffic vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AiVehicle {
    pub state: VehicleState,
    /// Per-frame displacement while driving.
    pub velocity: Vec3,
    /// Cruise speed, fixed at spawn (units per frame).
    pub speed: f32,
    /// Desired heading (radians). Not wrapped.
    pub target_angle: f32,
    /// Set while the vehicle is inside an intersection's radius.
    pub is_turning: bool,
    /// Per-frame velocity in ballistic flight.
    pub hit_velocity: Vec3,
}

/// Player-fired missile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    /// Per-frame displacement, fixed at launch.
    pub velocity: Vec3,
    /// Seconds until self-detonation.
    pub lifetime: f32,
}

/// Short-lived explosion effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    /// Seconds until removal.
    pub lifetime: f32,
}
