//! Bullet spawner
//!
//! Drops a bullet at a random pixel every `interval` frames, with a coin
//! flip for its polarity. Randomness comes from the world's seeded RNG, so a
//! seeded world spawns the same bullets every run.

use rand::Rng;

use crate::consts::SPAWN_INTERVAL_FRAMES;
use crate::sim::{Fixed, Polarity, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawner {
    /// Frames between spawns (never zero)
    interval: u64,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            interval: SPAWN_INTERVAL_FRAMES,
        }
    }
}

impl Spawner {
    /// A zero interval is treated as spawning every frame
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Whether a bullet should appear on this frame
    pub fn due(&self, frame: u64) -> bool {
        frame % self.interval == 0
    }

    /// Spawn one bullet somewhere in a `width_px` x `height_px` area.
    ///
    /// Draws x, then y, then polarity. Returns the new bullet's id.
    pub fn spawn(&self, world: &mut World, width_px: u32, height_px: u32) -> u32 {
        let rng = world.rng_mut();
        let x = rng.random_range(0..width_px.max(1));
        let y = rng.random_range(0..height_px.max(1));
        let polarity = if rng.random_range(0..=1) == 1 {
            Polarity::Negative
        } else {
            Polarity::Positive
        };

        let id = world.spawn_bullet(Fixed::from_int(x.into()), Fixed::from_int(y.into()), polarity);
        log::trace!("spawned bullet {id} at ({x}, {y}) px, {polarity:?}");
        id
    }
}
