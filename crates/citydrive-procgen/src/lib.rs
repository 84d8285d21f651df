//! Procedural world generation for citydrive.
//!
//! Builds, once, the static world: the road grid and its markings, city
//! blocks with their buildings, trees and parking lots, traffic lights,
//! sidewalk waypoints, the mountain pass and the outer terrain. The result
//! is an immutable [`WorldLayout`].

pub use citydrive_core as core;

pub mod city;
pub mod layout;
pub mod sidewalk;

pub use layout::{generate, StaticCollider, WorldLayout};
