//! Fundamental geometric and simulation types.
//!
//! World axes follow the renderer convention: x = East, y = Up, z = South.
//! A yaw of 0 faces +z.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Position plus orientation of a simulated object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Heading around the up axis (radians).
    pub yaw: f32,
    /// Tumble around the local x axis. Zero unless the object was hit.
    pub pitch: f32,
    /// Tumble around the local z axis. Zero unless the object was hit.
    pub roll: f32,
}

impl Transform {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// Unit vector along the direction this transform faces (horizontal).
    pub fn forward(&self) -> Vec3 {
        heading_vector(self.yaw)
    }

    /// Convert an offset expressed in this transform's yaw frame to world space.
    pub fn local_to_world(&self, offset: Vec3) -> Vec3 {
        self.position + rotate_yaw(offset, self.yaw)
    }
}

/// Horizontal unit vector for a heading angle.
pub fn heading_vector(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Rotate a vector around the up axis by `yaw` radians.
pub fn rotate_yaw(v: Vec3, yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Box enclosing a yawed box with the given local half extents.
    /// Pitch and roll are ignored.
    pub fn from_oriented(center: Vec3, half_extents: Vec3, yaw: f32) -> Self {
        let cos = yaw.cos().abs();
        let sin = yaw.sin().abs();
        let extents = Vec3::new(
            half_extents.x * cos + half_extents.z * sin,
            half_extents.y,
            half_extents.x * sin + half_extents.z * cos,
        );
        Self::from_center(center, extents)
    }

    /// Overlap test. Boxes that only touch count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Stable identity assigned to every dynamic entity at spawn.
/// Render collaborators key their visuals by this handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of accepted frames.
    pub frame: u64,
    /// Sum of all accepted frame deltas (seconds).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `delta_secs`.
    pub fn advance(&mut self, delta_secs: f32) {
        self.frame += 1;
        self.elapsed_secs += f64::from(delta_secs);
    }
}

/// Chase camera state. Follows the player vehicle with smoothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChaseCamera {
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
}
