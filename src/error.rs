//! Error types for world construction, settings and sessions

use thiserror::Error;

use crate::sim::EntityKind;

/// Errors raised while building or populating a world
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("world bounds must be positive, got {width}x{height} (raw fixed-point)")]
    InvalidBounds { width: i64, height: i64 },

    #[error("expected a {expected:?} entity, got {found:?}")]
    KindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },
}

/// Errors raised while loading, saving or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Errors raised while setting up a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("World error: {0}")]
    World(#[from] WorldError),
}
