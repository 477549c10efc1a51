//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-point integer arithmetic only
//! - No randomness inside a step (the world's RNG belongs to the spawner)
//! - Stable sort for bullets sharing a position
//! - No rendering or platform dependencies

pub mod collision;
pub mod fixed;
pub mod state;
pub mod tick;

pub use fixed::{Fixed, floor_div};
pub use state::{Entity, EntityKind, Polarity, World};
pub use tick::pull_acceleration;
