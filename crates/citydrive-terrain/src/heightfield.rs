//! Outer terrain: a grid of blocks surrounding the city.
//!
//! Heights come from noise raised to a fixed exponent plus a cubic rise
//! toward the world edge, so the world is rimmed by mountains. Blocks inside
//! the city footprint are skipped and a strip along the mountain pass road
//! is flattened to stay drivable.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use citydrive_core::constants::*;
use citydrive_core::enums::{TerrainBand, TerrainSurface};

use crate::noise::NoiseGenerator;

/// Geometry inputs for building the height-field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightFieldSpec {
    pub world_half_extent: f32,
    pub city_half_extent: f32,
    pub cell_size: f32,
    /// x coordinate of the mountain pass road.
    pub pass_x: f32,
    /// Half width of the flattened strip around the pass road.
    pub pass_half_width: f32,
}

/// One square terrain block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainCell {
    pub center_x: f32,
    pub center_z: f32,
    pub size: f32,
    /// Top of the block. Zero for pass road cells.
    pub height: f32,
    pub surface: TerrainSurface,
}

impl TerrainCell {
    /// Pass road cells are drivable; every other block blocks movement.
    pub fn is_collidable(&self) -> bool {
        matches!(self.surface, TerrainSurface::Block(_))
    }

    /// Center of the block volume (ground to top).
    pub fn block_center(&self) -> Vec3 {
        Vec3::new(self.center_x, self.height / 2.0, self.center_z)
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.size / 2.0, self.height / 2.0, self.size / 2.0)
    }
}

/// Unclamped terrain height at a world position.
pub fn raw_height(noise: &NoiseGenerator, x: f32, z: f32, world_half_extent: f32) -> f32 {
    let n = noise.sample(
        f64::from(x) * TERRAIN_NOISE_SCALE,
        0.0,
        f64::from(z) * TERRAIN_NOISE_SCALE,
    );
    let normalized = ((n + 1.0) / 2.0) as f32;
    let base = normalized.powf(TERRAIN_NOISE_EXPONENT) * TERRAIN_NOISE_AMPLITUDE;

    let edge_distance = (x.abs().max(z.abs()) / world_half_extent).min(1.0);
    let rise = ((edge_distance - TERRAIN_EDGE_RISE_START).max(0.0)
        / (1.0 - TERRAIN_EDGE_RISE_START))
        .powi(3);

    base + rise * TERRAIN_EDGE_RISE_HEIGHT
}

/// Bucket a raw height into a band. Water is clamped to the water level.
pub fn classify(raw: f32) -> (f32, TerrainBand) {
    match TerrainBand::from_height(raw) {
        TerrainBand::Water => (TERRAIN_WATER_LEVEL, TerrainBand::Water),
        band => (raw, band),
    }
}

/// Build every terrain cell outside the city footprint, row by row.
pub fn build(noise: &NoiseGenerator, spec: &HeightFieldSpec) -> Vec<TerrainCell> {
    let cells_per_side = ((spec.world_half_extent * 2.0) / spec.cell_size).floor() as u32;
    let half_cell = spec.cell_size / 2.0;
    let mut cells = Vec::new();

    for row in 0..cells_per_side {
        let center_z = -spec.world_half_extent + spec.cell_size * (row as f32 + 0.5);
        for col in 0..cells_per_side {
            let center_x = -spec.world_half_extent + spec.cell_size * (col as f32 + 0.5);

            if center_x.abs() < spec.city_half_extent && center_z.abs() < spec.city_half_extent {
                continue;
            }

            let on_pass = center_z.abs() > spec.city_half_extent
                && (center_x - spec.pass_x).abs() < spec.pass_half_width + half_cell;

            let cell = if on_pass {
                TerrainCell {
                    center_x,
                    center_z,
                    size: spec.cell_size,
                    height: 0.0,
                    surface: TerrainSurface::PassRoad,
                }
            } else {
                let (height, band) =
                    classify(raw_height(noise, center_x, center_z, spec.world_half_extent));
                TerrainCell {
                    center_x,
                    center_z,
                    size: spec.cell_size,
                    height,
                    surface: TerrainSurface::Block(band),
                }
            };
            cells.push(cell);
        }
    }

    cells
}
