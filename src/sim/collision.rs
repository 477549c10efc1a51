//! Circle overlap tests and the sorted bullet index
//!
//! Bullets are kept sorted by `(x, y)`. A query first binary searches for
//! any bullet whose x falls inside the query's collision window, then scans
//! outward from it in both directions until x leaves the window. Cost is
//! O(log n + k) where k is the number of bullets inside the window.

use super::fixed::Fixed;
use super::state::{Entity, World};
use crate::consts::MAX_BULLET_RADIUS;

impl Entity {
    /// Strict circle overlap. Dead entities never intersect anything.
    pub fn intersects(&self, other: &Entity) -> bool {
        if self.dead || other.dead {
            return false;
        }

        let max_distance_squared = (self.radius + other.radius).square();
        let distance_squared = (self.x - other.x).square() + (self.y - other.y).square();

        max_distance_squared > distance_squared
    }
}

impl World {
    /// Re-sort bullets by `(x, y)`. The sort is stable, so bullets sharing a
    /// position keep their relative order.
    pub fn sort_bullets(&mut self) {
        self.bullets.sort_by_key(Entity::sort_key);
        self.bullets_sorted = true;
    }

    /// Index of some live bullet overlapping `obj`, if any.
    ///
    /// Not necessarily the closest one. Panics if bullets were added or moved
    /// since the last [`World::sort_bullets`].
    pub fn find_bullet_index(&self, obj: &Entity) -> Option<usize> {
        assert!(
            self.bullets_sorted,
            "bullet index queried while unsorted; call sort_bullets first"
        );
        debug_assert!(self.bullets.is_sorted_by_key(Entity::sort_key));

        let bullets = &self.bullets;
        let max_distance = obj.radius + Fixed::from_raw(MAX_BULLET_RADIUS);
        let min_x = obj.x - max_distance;
        let max_x = obj.x + max_distance;

        // Anything at exactly min_x or max_x is max_distance away on x alone,
        // so it cannot overlap and counts as outside the window.
        let in_window = |x: Fixed| min_x < x && x < max_x;

        // Search [lo, hi) for any bullet with x in the window
        let mut lo = 0;
        let mut hi = bullets.len();
        let index = loop {
            if lo >= hi {
                return None;
            }
            let mid = lo + (hi - lo) / 2;
            let x = bullets[mid].x;
            if x <= min_x {
                lo = mid + 1;
            } else if x >= max_x {
                hi = mid;
            } else {
                break mid;
            }
        };

        if bullets[index].intersects(obj) {
            return Some(index);
        }

        let below = (0..index)
            .rev()
            .take_while(|&i| in_window(bullets[i].x))
            .find(|&i| bullets[i].intersects(obj));
        if below.is_some() {
            return below;
        }

        (index + 1..bullets.len())
            .take_while(|&i| in_window(bullets[i].x))
            .find(|&i| bullets[i].intersects(obj))
    }

    /// Some live bullet overlapping `obj`, if any
    pub fn find_bullet(&self, obj: &Entity) -> Option<&Entity> {
        self.find_bullet_index(obj).map(|i| &self.bullets[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Polarity;
    use proptest::prelude::*;

    fn world() -> World {
        World::with_seed(Fixed::from_int(640), Fixed::from_int(640), 7).unwrap()
    }

    fn at(x: i64, y: i64) -> Entity {
        Entity::player(Fixed::from_int(x), Fixed::from_int(y))
    }

    fn brute_force(world: &World, obj: &Entity) -> bool {
        world.bullets().iter().any(|b| b.intersects(obj))
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = at(0, 0);
        let mut b = Entity::bullet(Fixed::from_int(18), Fixed::ZERO, Polarity::Positive);
        // Touching (distance == r1 + r2) is not an overlap
        assert!(!a.intersects(&b));

        b.x = Fixed::from_int(18) - Fixed::from_raw(1);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        b.dead = true;
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_empty_world_has_no_match() {
        let world = world();
        assert!(world.find_bullet(&at(0, 0)).is_none());
        assert!(world.find_bullet(&at(320, 320)).is_none());
    }

    #[test]
    fn test_single_bullet_found() {
        let mut world = world();
        world.spawn_bullet(Fixed::from_int(105), Fixed::from_int(100), Polarity::Positive);
        world.sort_bullets();

        let hit = world.find_bullet(&at(100, 100)).unwrap();
        assert_eq!(hit.x, Fixed::from_int(105));
        assert!(world.find_bullet(&at(200, 100)).is_none());
    }

    #[test]
    fn test_scan_walks_past_non_overlapping_candidates() {
        let mut world = world();
        // Same x column: all in the window, only the last overlaps the query
        world.spawn_bullet(Fixed::from_int(100), Fixed::from_int(0), Polarity::Positive);
        world.spawn_bullet(Fixed::from_int(101), Fixed::from_int(10), Polarity::Positive);
        world.spawn_bullet(Fixed::from_int(102), Fixed::from_int(20), Polarity::Negative);
        world.spawn_bullet(Fixed::from_int(103), Fixed::from_int(300), Polarity::Negative);
        world.spawn_bullet(Fixed::from_int(104), Fixed::from_int(400), Polarity::Positive);
        world.sort_bullets();

        let hit = world.find_bullet(&at(100, 395)).unwrap();
        assert_eq!(hit.y, Fixed::from_int(400));

        let hit = world.find_bullet(&at(110, 8)).unwrap();
        assert!(hit.intersects(&at(110, 8)));
    }

    #[test]
    fn test_dead_bullets_are_ignored() {
        let mut world = world();
        world.spawn_bullet(Fixed::from_int(50), Fixed::from_int(50), Polarity::Positive);
        world.sort_bullets();
        world.bullets[0].dead = true;
        assert!(world.find_bullet(&at(50, 50)).is_none());
    }

    #[test]
    fn test_window_edge_is_excluded() {
        let mut world = world();
        // Exactly radius + MAX_BULLET_RADIUS away on x
        world.spawn_bullet(Fixed::from_int(118), Fixed::from_int(100), Polarity::Positive);
        world.sort_bullets();
        assert!(world.find_bullet(&at(100, 100)).is_none());
    }

    #[test]
    #[should_panic(expected = "unsorted")]
    fn test_unsorted_query_panics() {
        let mut world = world();
        world.spawn_bullet(Fixed::from_int(5), Fixed::from_int(5), Polarity::Positive);
        let _ = world.find_bullet(&at(5, 5));
    }

    proptest! {
        #[test]
        fn prop_find_bullet_agrees_with_brute_force(
            bullets in prop::collection::vec((0i64..200, 0i64..200, any::<bool>()), 0..60),
            qx in 0i64..200,
            qy in 0i64..200,
            radius in 1i64..24,
        ) {
            let mut world = world();
            for &(x, y, negative) in &bullets {
                let polarity = if negative { Polarity::Negative } else { Polarity::Positive };
                world.spawn_bullet(Fixed::from_int(x), Fixed::from_int(y), polarity);
            }
            world.sort_bullets();

            let mut query = at(qx, qy);
            query.radius = Fixed::from_int(radius);

            let found = world.find_bullet(&query);
            prop_assert_eq!(found.is_some(), brute_force(&world, &query));
            if let Some(bullet) = found {
                prop_assert!(bullet.intersects(&query));
            }
        }

        #[test]
        fn prop_sort_is_non_decreasing(
            xs in prop::collection::vec((-1000i64..1000, -1000i64..1000), 0..80),
        ) {
            let mut world = world();
            for &(x, y) in &xs {
                world.spawn_bullet(Fixed::from_raw(x), Fixed::from_raw(y), Polarity::Positive);
            }
            world.sort_bullets();
            prop_assert!(world.bullets().windows(2).all(|w| w[0].x <= w[1].x));
        }
    }
}
