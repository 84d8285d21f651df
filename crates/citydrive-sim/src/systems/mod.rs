//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only). They do not own state; all state lives in components or in
//! the engine.

pub mod agents;
pub mod camera;
pub mod cleanup;
pub mod collision;
pub mod explosion;
pub mod player;
pub mod projectile;
pub mod snapshot;
