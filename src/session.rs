//! Frame driver
//!
//! Owns a world with a single player and turns per-frame host input into
//! simulation steps: pause handling, pointer movement, pull toggling, bullet
//! spawning and `World::advance`. Windowing, drawing and frame pacing stay
//! with the host.

use crate::consts::PRECISION;
use crate::error::SessionError;
use crate::settings::Settings;
use crate::sim::{Entity, Fixed, World};
use crate::spawn::Spawner;

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Pointer position in pixels; the player jumps there
    pub pointer: Option<(i64, i64)>,
    /// Flip the player between attracting and repelling
    pub toggle_pull: bool,
    /// Pause toggle
    pub pause: bool,
}

/// What a call to [`Session::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Paused; nothing moved
    Paused,
    /// The world advanced one step
    Advanced,
    /// The world advanced and the player was destroyed this step
    PlayerLost,
}

#[derive(Debug, Clone)]
pub struct Session {
    world: World,
    spawner: Spawner,
    player_id: u32,
    width_px: u32,
    height_px: u32,
    frame: u64,
    paused: bool,
}

impl Session {
    /// Build a world from settings and put the player in the middle
    pub fn new(settings: &Settings) -> Result<Self, SessionError> {
        settings.validate()?;

        let width = Fixed::from_int(settings.width_px.into());
        let height = Fixed::from_int(settings.height_px.into());
        let mut world = match settings.seed {
            Some(seed) => World::with_seed(width, height, seed)?,
            None => World::new(width, height)?,
        };

        let cx = Fixed::from_int((settings.width_px / 2).into());
        let cy = Fixed::from_int((settings.height_px / 2).into());
        let player_id = world.add_player(Entity::player(cx, cy))?;

        log::info!(
            "New session: {}x{} px, seed {:?}, spawn every {} frames",
            settings.width_px,
            settings.height_px,
            settings.seed,
            settings.spawn_interval
        );

        Ok(Self {
            world,
            spawner: Spawner::new(settings.spawn_interval),
            player_id,
            width_px: settings.width_px,
            height_px: settings.height_px,
            frame: 0,
            paused: false,
        })
    }

    /// Run one frame
    pub fn step(&mut self, input: &TickInput) -> StepOutcome {
        if input.pause {
            self.paused = !self.paused;
            log::debug!("{} at frame {}", if self.paused { "Paused" } else { "Resumed" }, self.frame);
        }
        if self.paused {
            return StepOutcome::Paused;
        }

        self.frame += 1;

        if let Some(player) = self.world.player_mut(self.player_id) {
            if let Some((px, py)) = input.pointer {
                player.set_position(
                    Fixed::from_raw(px << PRECISION),
                    Fixed::from_raw(py << PRECISION),
                );
            }
            if input.toggle_pull {
                player.flip_pull();
            }
        }

        if self.spawner.due(self.frame) {
            self.spawner.spawn(&mut self.world, self.width_px, self.height_px);
        }

        let was_alive = self.player().is_some();
        self.world.advance();

        if was_alive && self.player().is_none() {
            log::info!("Player destroyed at frame {}", self.frame);
            StepOutcome::PlayerLost
        } else {
            StepOutcome::Advanced
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player, while it is still alive
    pub fn player(&self) -> Option<&Entity> {
        self.world.player(self.player_id)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The player has been destroyed; there is no respawn
    pub fn is_over(&self) -> bool {
        self.player().is_none()
    }
}
