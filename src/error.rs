//! Error types
//!
//! None of these reach the player: the frame loop contains every failure and
//! keeps running. They exist so the containment points can tell what went wrong.

use thiserror::Error;

/// Failure reported by a drawing surface
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The backend rejected a draw call (e.g. a canvas exception)
    #[error("surface backend error: {0}")]
    Backend(String),
    /// The surface can no longer be drawn to
    #[error("surface unavailable")]
    Unavailable,
}

/// Failure inside a level mechanic or a dynamic object update
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MechanicError {
    #[error("spawn chance {chance} exceeds denominator {denominator}")]
    InvalidChance { chance: u32, denominator: u32 },
    #[error("{0} produced a non-finite position")]
    NonFinite(&'static str),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("level deck needs at least one theme")]
    EmptyDeck,
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
