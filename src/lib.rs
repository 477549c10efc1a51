//! Repel - dodge bullets by attracting or repelling them
//!
//! Core modules:
//! - `sim`: Deterministic fixed-point simulation (entities, collisions, forces)
//! - `spawn`: Seeded bullet spawner driven by the host's frame counter
//! - `session`: Headless frame driver (input, pause, spawn cadence)
//! - `view`: Screen-space projection for renderers
//! - `settings`: JSON configuration

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;
pub mod spawn;
pub mod view;

pub use error::{SessionError, SettingsError, WorldError};
pub use session::{Session, StepOutcome, TickInput};
pub use settings::Settings;
pub use sim::{Entity, EntityKind, Fixed, Polarity, World};

/// Game configuration constants
pub mod consts {
    /// Fixed-point scale exponent: a raw value `r` stands for `r / 2^PRECISION`
    pub const PRECISION: u32 = 24;

    /// Player defaults
    pub const PLAYER_RADIUS: i64 = 16 << PRECISION;
    pub const PLAYER_PULL: i64 = 12 << PRECISION;

    /// Bullet defaults
    pub const BULLET_RADIUS: i64 = 2 << PRECISION;
    pub const BULLET_PULL: i64 = 1 << PRECISION;

    /// Upper bound on any bullet's radius, used to size the collision window
    pub const MAX_BULLET_RADIUS: i64 = 2 << PRECISION;

    /// Baddies are reserved: generic object radius, no pull
    pub const BADDIE_RADIUS: i64 = 16 << PRECISION;
    pub const BADDIE_PULL: i64 = 0;

    /// Frames between bullet spawns
    pub const SPAWN_INTERVAL_FRAMES: u64 = 20;
    /// Target frame rate for hosts that pace the loop
    pub const FRAME_RATE: u32 = 60;
    /// Default square world edge, in pixels
    pub const DEFAULT_WORLD_SIZE_PX: u32 = 640;

    // The collision window is sized from this; it must match the bullet radius.
    const _: () = assert!(MAX_BULLET_RADIUS == BULLET_RADIUS);
}
