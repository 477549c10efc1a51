//! Entity and world state
//!
//! Everything the simulation step reads or writes lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fixed::Fixed;
use crate::consts::*;
use crate::error::WorldError;

/// What an entity is; decides its default radius and pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Bullet,
    /// Reserved: stored by the world but never advanced
    Baddie,
}

impl EntityKind {
    pub fn default_radius(self) -> Fixed {
        match self {
            EntityKind::Player => Fixed::from_raw(PLAYER_RADIUS),
            EntityKind::Bullet => Fixed::from_raw(BULLET_RADIUS),
            EntityKind::Baddie => Fixed::from_raw(BADDIE_RADIUS),
        }
    }

    pub fn default_pull(self) -> Fixed {
        match self {
            EntityKind::Player => Fixed::from_raw(PLAYER_PULL),
            EntityKind::Bullet => Fixed::from_raw(BULLET_PULL),
            EntityKind::Baddie => Fixed::from_raw(BADDIE_PULL),
        }
    }
}

/// Sign of an entity's pull.
///
/// The force on a bullet points along `bullet - player` scaled by the product
/// of both pulls, so matching signs push the bullet away and opposite signs
/// draw it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn flipped(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

/// A point-like circle: player, bullet or baddie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// World-assigned id (0 until added to a world)
    pub id: u32,
    pub kind: EntityKind,
    pub x: Fixed,
    pub y: Fixed,
    pub dx: Fixed,
    pub dy: Fixed,
    pub radius: Fixed,
    /// Signed pull magnitude
    pub pull: Fixed,
    /// Pending removal; dead entities never intersect anything
    pub dead: bool,
}

impl Entity {
    /// Fresh entity at rest with the kind's default radius and pull
    pub fn new(kind: EntityKind, x: Fixed, y: Fixed) -> Self {
        Self {
            id: 0,
            kind,
            x,
            y,
            dx: Fixed::ZERO,
            dy: Fixed::ZERO,
            radius: kind.default_radius(),
            pull: kind.default_pull(),
            dead: false,
        }
    }

    pub fn player(x: Fixed, y: Fixed) -> Self {
        Self::new(EntityKind::Player, x, y)
    }

    pub fn bullet(x: Fixed, y: Fixed, polarity: Polarity) -> Self {
        let mut bullet = Self::new(EntityKind::Bullet, x, y);
        if polarity == Polarity::Negative {
            bullet.pull = -bullet.pull;
        }
        bullet
    }

    pub fn baddie(x: Fixed, y: Fixed) -> Self {
        Self::new(EntityKind::Baddie, x, y)
    }

    /// Ordering used by the spatial index: x first, y breaks ties
    #[inline]
    pub fn sort_key(&self) -> (Fixed, Fixed) {
        (self.x, self.y)
    }

    pub fn polarity(&self) -> Polarity {
        if self.pull.is_negative() {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }

    /// Toggle between attracting and repelling
    pub fn flip_pull(&mut self) {
        self.pull = -self.pull;
    }

    pub fn set_position(&mut self, x: Fixed, y: Fixed) {
        self.x = x;
        self.y = y;
    }
}

/// The whole simulation: entity collections, bounds and the spawn RNG
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) players: Vec<Entity>,
    /// Sorted by `sort_key` after every sweep
    pub(crate) bullets: Vec<Entity>,
    /// Cleared whenever bullets are added or moved
    pub(crate) bullets_sorted: bool,
    pub(crate) baddies: Vec<Entity>,
    pub(crate) width: Fixed,
    pub(crate) height: Fixed,
    /// Consumed only by the spawner, never by the step itself
    rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create an empty world seeded from the OS entropy source
    pub fn new(width: Fixed, height: Fixed) -> Result<Self, WorldError> {
        Self::with_seed(width, height, rand::random())
    }

    /// Create an empty world whose spawns are reproducible
    pub fn with_seed(width: Fixed, height: Fixed, seed: u64) -> Result<Self, WorldError> {
        if !width.is_positive() || !height.is_positive() {
            return Err(WorldError::InvalidBounds {
                width: width.raw(),
                height: height.raw(),
            });
        }

        Ok(Self {
            players: Vec::new(),
            bullets: Vec::new(),
            bullets_sorted: true,
            baddies: Vec::new(),
            width,
            height,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn adopt(&mut self, mut entity: Entity, expected: EntityKind) -> Result<Entity, WorldError> {
        if entity.kind != expected {
            return Err(WorldError::KindMismatch {
                expected,
                found: entity.kind,
            });
        }
        entity.id = self.next_entity_id();
        Ok(entity)
    }

    /// Add a player; returns its id
    pub fn add_player(&mut self, player: Entity) -> Result<u32, WorldError> {
        let player = self.adopt(player, EntityKind::Player)?;
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Add a bullet at rest; it joins the sorted order at the next step
    pub fn spawn_bullet(&mut self, x: Fixed, y: Fixed, polarity: Polarity) -> u32 {
        let id = self.next_entity_id();
        let mut bullet = Entity::bullet(x, y, polarity);
        bullet.id = id;
        self.bullets.push(bullet);
        self.bullets_sorted = false;
        id
    }

    /// Store a baddie. Baddies are kept but not simulated yet.
    pub fn add_baddie(&mut self, baddie: Entity) -> Result<u32, WorldError> {
        let baddie = self.adopt(baddie, EntityKind::Baddie)?;
        let id = baddie.id;
        self.baddies.push(baddie);
        Ok(id)
    }

    pub fn width(&self) -> Fixed {
        self.width
    }

    pub fn height(&self) -> Fixed {
        self.height
    }

    pub fn players(&self) -> &[Entity] {
        &self.players
    }

    /// All bullets, including ones marked dead since the last sweep
    pub fn bullets(&self) -> &[Entity] {
        &self.bullets
    }

    pub fn live_bullets(&self) -> impl Iterator<Item = &Entity> {
        self.bullets.iter().filter(|b| !b.dead)
    }

    pub fn baddies(&self) -> &[Entity] {
        &self.baddies
    }

    pub fn player(&self, id: u32) -> Option<&Entity> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable access for input handling between steps (move, flip pull)
    pub fn player_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Whether `(x, y)` lies inside `[0, width] x [0, height]`
    pub fn contains(&self, x: Fixed, y: Fixed) -> bool {
        x >= Fixed::ZERO && y >= Fixed::ZERO && x <= self.width && y <= self.height
    }
}
