//! Simulation engine for citydrive.
//!
//! Owns the hecs ECS world, advances it once per host frame and produces
//! `SceneSnapshot`s plus audio/UI notifications for the render collaborator.

pub mod engine;
pub mod events;
pub mod systems;
pub mod world_setup;

pub use citydrive_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
