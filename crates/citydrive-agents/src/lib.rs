//! Agent behavior for citydrive.
//!
//! Per-frame state machines for pedestrians and AI traffic. Pure functions
//! over plain component data; the simulation crate applies the results to
//! its ECS world.

pub mod pedestrian;
pub mod traffic;

pub use citydrive_core as core;
