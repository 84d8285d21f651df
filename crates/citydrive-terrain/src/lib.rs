//! Terrain generation for citydrive.
//!
//! Seeded gradient noise and the outer height-field of terrain blocks
//! that surrounds the city.

pub use citydrive_core as core;

pub mod heightfield;
pub mod noise;

// Re-export key types for convenience.
pub use heightfield::{HeightFieldSpec, TerrainCell};
pub use noise::NoiseGenerator;

#[cfg(test)]
mod tests;
