//! Errors returned at the engine boundary.
//!
//! The simulation itself has no recoverable failure modes; these only cover
//! caller mistakes and configuration problems.

/// Errors surfaced by the simulation engine's public API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// `advance` was called with a negative frame delta.
    #[error("frame delta must be non-negative, got {0}")]
    NegativeDelta(f32),

    /// `advance` was called with a NaN or infinite frame delta.
    #[error("frame delta must be finite")]
    NonFiniteDelta,

    /// `advance` was called before `initialize`.
    #[error("simulation has not been initialized")]
    NotInitialized,

    /// `initialize` was called a second time.
    #[error("simulation is already initialized")]
    AlreadyInitialized,

    /// World parameters describe an impossible layout.
    #[error("invalid world parameters: {0}")]
    InvalidWorldParams(String),
}
