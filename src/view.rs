//! Screen-space projection for renderers
//!
//! Maps world entities into a pixel viewport as colored circles. Drawing the
//! circles is up to the host.

use crate::sim::{Entity, EntityKind, Fixed, World, floor_div};

/// Player colors (RGBA)
pub const PLAYER_POSITIVE: [u8; 4] = [255, 0, 0, 255];
pub const PLAYER_NEGATIVE: [u8; 4] = [0, 0, 255, 255];
/// Bullet colors (RGBA)
pub const BULLET_POSITIVE: [u8; 4] = [255, 128, 128, 255];
pub const BULLET_NEGATIVE: [u8; 4] = [128, 128, 255, 255];
/// Clear color
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Target rectangle on screen, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

/// A filled circle to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub x: i64,
    pub y: i64,
    pub radius: i64,
    pub color: [u8; 4],
}

fn scale(value: Fixed, extent: i64, world_extent: Fixed) -> i64 {
    floor_div(value.raw() as i128 * extent as i128, world_extent.raw() as i128) as i64
}

fn color(entity: &Entity) -> [u8; 4] {
    let positive = entity.pull.is_positive();
    match (entity.kind, positive) {
        (EntityKind::Player, true) => PLAYER_POSITIVE,
        (EntityKind::Player, false) => PLAYER_NEGATIVE,
        (_, true) => BULLET_POSITIVE,
        (_, false) => BULLET_NEGATIVE,
    }
}

fn project_one(world: &World, viewport: &Viewport, entity: &Entity) -> Circle {
    Circle {
        x: scale(entity.x, viewport.w, world.width()) + viewport.x,
        y: scale(entity.y, viewport.h, world.height()) + viewport.y,
        radius: scale(entity.radius, viewport.w, world.width()),
        color: color(entity),
    }
}

/// Players first, then live bullets, in world order
pub fn project(world: &World, viewport: &Viewport) -> Vec<Circle> {
    world
        .players()
        .iter()
        .chain(world.live_bullets())
        .map(|e| project_one(world, viewport, e))
        .collect()
}
