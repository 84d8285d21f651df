//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Pedestrian behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PedestrianState {
    /// Standing still until the idle timer runs out.
    #[default]
    Idle,
    /// Walking toward a sidewalk waypoint.
    Walking,
    /// Struck by the player or a missile; ballistic tumble until recycled.
    Hit,
}

/// AI vehicle behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleState {
    #[default]
    Driving,
    /// Struck by a missile; ballistic flight until recycled.
    Hit,
}

/// Category tag stored on every collidable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollidableKind {
    Building,
    Tree,
    TrafficLight,
    Terrain,
    AiVehicle,
}

/// Material band of an outer terrain block, bucketed by height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainBand {
    Water,
    Sand,
    Grass,
    Forest,
    Rock,
    Snow,
}

impl TerrainBand {
    /// Bucket a terrain height into its band.
    pub fn from_height(height: f32) -> Self {
        if height < TERRAIN_WATER_MAX {
            TerrainBand::Water
        } else if height < TERRAIN_SAND_MAX {
            TerrainBand::Sand
        } else if height < TERRAIN_GRASS_MAX {
            TerrainBand::Grass
        } else if height < TERRAIN_FOREST_MAX {
            TerrainBand::Forest
        } else if height < TERRAIN_ROCK_MAX {
            TerrainBand::Rock
        } else {
            TerrainBand::Snow
        }
    }
}

/// Surface of a terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainSurface {
    /// Solid block bucketed into a material band.
    Block(TerrainBand),
    /// Flattened, drivable strip along the mountain pass road.
    PassRoad,
}

/// Layout assigned to a city block at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockLayout {
    /// Buildings with trees filling the remaining lots.
    Buildings,
    TreeCluster,
    ParkingLot,
}

/// Direction a road runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadAxis {
    /// Runs along the x axis (constant z).
    AlongX,
    /// Runs along the z axis (constant x).
    AlongZ,
}

/// Road classification for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadKind {
    /// Interior city street.
    Street,
    /// Perimeter ring road.
    Ring,
    /// Exterior road through the mountains.
    MountainPass,
}

/// Decision drawn when an AI vehicle enters an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnChoice {
    Left,
    Right,
    Straight,
}

/// Engine lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Constructed; waiting for `initialize`.
    #[default]
    Uninitialized,
    /// World generated; accepting frames.
    Running,
}
