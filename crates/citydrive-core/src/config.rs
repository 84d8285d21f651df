//! Runtime configuration for a simulation run.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    /// Static world dimensions.
    pub world: WorldParams,
    /// Whether the audio collaborator has finished loading. While false,
    /// sound notifications are dropped.
    pub audio_ready: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world: WorldParams::default(),
            audio_ready: true,
        }
    }
}

/// Dimensions of the generated world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    /// Side length of the square city footprint.
    pub ground_size: f32,
    /// Side length of one city block, sidewalks included.
    pub block_size: f32,
    pub street_width: f32,
    pub sidewalk_width: f32,
    /// Number of blocks along each axis.
    pub grid_size: u32,
    /// Side length of the whole world, terrain included.
    pub world_size: f32,
    /// Side length of one outer terrain block.
    pub terrain_cell_size: f32,
    /// Width of the flattened strip around the mountain pass road.
    pub pass_strip_width: f32,
    /// Spacing between sidewalk waypoints.
    pub waypoint_spacing: f32,
    pub pedestrian_count: RangeInclusive<u32>,
    pub vehicle_count: RangeInclusive<u32>,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            ground_size: 200.0,
            block_size: 24.0,
            street_width: 8.0,
            sidewalk_width: 2.0,
            grid_size: 6,
            world_size: 600.0,
            terrain_cell_size: 20.0,
            pass_strip_width: 24.0,
            waypoint_spacing: 4.0,
            pedestrian_count: 30..=50,
            vehicle_count: 10..=20,
        }
    }
}

impl WorldParams {
    /// Half the side length of the city footprint.
    pub fn city_half_extent(&self) -> f32 {
        self.ground_size / 2.0
    }

    /// Half the side length of the whole world.
    pub fn world_half_extent(&self) -> f32 {
        self.world_size / 2.0
    }

    /// Distance between neighbouring parallel road centers.
    pub fn road_pitch(&self) -> f32 {
        self.block_size + self.street_width
    }

    /// AI vehicles crossing this coordinate on either axis wrap around.
    pub fn wrap_extent(&self) -> f32 {
        self.city_half_extent() + self.street_width
    }

    /// Check that the parameters describe a buildable world.
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("ground_size", self.ground_size),
            ("block_size", self.block_size),
            ("street_width", self.street_width),
            ("sidewalk_width", self.sidewalk_width),
            ("world_size", self.world_size),
            ("terrain_cell_size", self.terrain_cell_size),
            ("pass_strip_width", self.pass_strip_width),
            ("waypoint_spacing", self.waypoint_spacing),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidWorldParams(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.grid_size == 0 {
            return Err(SimError::InvalidWorldParams(
                "grid_size must be at least 1".into(),
            ));
        }

        if self.sidewalk_width * 2.0 >= self.block_size {
            return Err(SimError::InvalidWorldParams(format!(
                "sidewalks ({}) leave no room inside a {} block",
                self.sidewalk_width, self.block_size
            )));
        }

        let grid = self.grid_size as f32;
        let needed = grid * self.block_size + (grid + 1.0) * self.street_width;
        if (needed - self.ground_size).abs() > 1e-3 {
            return Err(SimError::InvalidWorldParams(format!(
                "{} blocks and {} streets span {needed}, not ground_size {}",
                self.grid_size,
                self.grid_size + 1,
                self.ground_size
            )));
        }

        if self.world_size <= self.ground_size + self.street_width * 2.0 {
            return Err(SimError::InvalidWorldParams(format!(
                "world_size {} leaves no room around a {} city",
                self.world_size, self.ground_size
            )));
        }

        for (name, range) in [
            ("pedestrian_count", &self.pedestrian_count),
            ("vehicle_count", &self.vehicle_count),
        ] {
            if range.is_empty() {
                return Err(SimError::InvalidWorldParams(format!(
                    "{name} range {}..={} is empty",
                    range.start(),
                    range.end()
                )));
            }
        }

        Ok(())
    }
}
