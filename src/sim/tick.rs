//! One discrete simulation step
//!
//! `World::advance` runs the stages below in order, each finishing before
//! the next begins:
//! 1. sweep dead and out-of-bounds bullets
//! 2. re-sort bullets by `(x, y)`
//! 3. detect player/bullet collisions
//! 4. remove dead players
//! 5. accumulate pull forces on bullets
//! 6. integrate bullet velocities
//! 7. advance baddies (reserved, does nothing)

use super::fixed::{Fixed, floor_div};
use super::state::{Entity, World};

/// Per-axis acceleration a player's pull imparts on a bullet.
///
/// `pull` is the unrescaled product of both pulls, divided by the
/// unrescaled squared distance. A coincident pair has a zero numerator, so
/// the denominator is clamped to one raw unit and the pair yields no force.
pub fn pull_acceleration(player: &Entity, bullet: &Entity) -> (Fixed, Fixed) {
    let offset_x = bullet.x - player.x;
    let offset_y = bullet.y - player.y;
    let distance_squared = (offset_x.square() + offset_y.square()).max(1);

    let pull = player.pull.wide_mul(bullet.pull);

    let ax = floor_div(offset_x.raw() as i128 * pull, distance_squared);
    let ay = floor_div(offset_y.raw() as i128 * pull, distance_squared);

    (Fixed::from_wide(ax), Fixed::from_wide(ay))
}

impl World {
    /// Advance the world by one step
    pub fn advance(&mut self) {
        self.sweep_bullets();
        self.sort_bullets();
        self.detect_player_collisions();
        self.remove_dead_players();
        self.accumulate_forces();
        self.integrate_bullets();
        self.advance_baddies();
    }

    /// Drop bullets that are dead or outside `[0, width] x [0, height]`
    fn sweep_bullets(&mut self) {
        let before = self.bullets.len();
        let (width, height) = (self.width, self.height);
        self.bullets.retain(|b| {
            !b.dead && b.x >= Fixed::ZERO && b.y >= Fixed::ZERO && b.x <= width && b.y <= height
        });
        log::trace!("sweep removed {} bullets", before - self.bullets.len());
    }

    /// Mark every player that overlaps a live bullet, and that bullet, dead
    fn detect_player_collisions(&mut self) {
        for p in 0..self.players.len() {
            if self.players[p].dead {
                continue;
            }
            if let Some(b) = self.find_bullet_index(&self.players[p]) {
                let player = &mut self.players[p];
                player.dead = true;
                let bullet = &mut self.bullets[b];
                bullet.dead = true;
                log::debug!(
                    "player {} hit by bullet {} at ({}, {})",
                    player.id,
                    bullet.id,
                    bullet.x,
                    bullet.y
                );
            }
        }
    }

    fn remove_dead_players(&mut self) {
        self.players.retain(|p| !p.dead);
    }

    /// Every surviving player pulls on every bullet still in the list
    fn accumulate_forces(&mut self) {
        for player in &self.players {
            for bullet in &mut self.bullets {
                let (ax, ay) = pull_acceleration(player, bullet);
                bullet.dx += ax;
                bullet.dy += ay;
            }
        }
    }

    fn integrate_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.x += bullet.dx;
            bullet.y += bullet.dy;
        }
        if !self.bullets.is_empty() {
            self.bullets_sorted = false;
        }
    }

    /// Baddies have no behavior yet; they stay where they were put.
    fn advance_baddies(&mut self) {}
}
