//! Core types and definitions for the citydrive simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, frame input, render-sync snapshots, events, configuration,
//! constants and the road/sidewalk network. It has no dependency on the
//! ECS or any rendering backend.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod network;
pub mod state;
pub mod types;

pub use error::SimError;
