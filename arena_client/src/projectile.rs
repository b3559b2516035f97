//! Projectile pool.
//!
//! Fixed-capacity reusable slots. Firing past capacity silently drops
//! the request; that bound is the backpressure policy, not an error.

use arena_shared::{config::WorldBounds, math::Vec2};
use tracing::debug;

/// One pooled projectile. Inactive slots are invisible, uncollidable
/// and immediately reusable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projectile {
    pub active: bool,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Fixed-capacity projectile pool, owned by exactly one player entity.
#[derive(Debug)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Projectile::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    pub fn get(&self, slot: usize) -> Option<&Projectile> {
        self.slots.get(slot)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.active)
    }

    /// Activates the first inactive slot, aimed from `origin` toward
    /// `target`. Returns the slot index, or `None` when the request
    /// was dropped (pool exhausted or degenerate aim).
    pub fn fire(&mut self, origin: Vec2, target: Vec2, speed: f32) -> Option<usize> {
        let dir = (target - origin).normalize_or_zero();
        if dir == Vec2::ZERO {
            debug!("dropping fire request with degenerate aim");
            return None;
        }
        self.fire_with_velocity(origin, dir * speed)
    }

    /// Activates the first inactive slot with an explicit velocity;
    /// used when replicating a remote shot that already carries one.
    pub fn fire_with_velocity(&mut self, origin: Vec2, velocity: Vec2) -> Option<usize> {
        match self.slots.iter_mut().position(|p| !p.active) {
            Some(slot) => {
                let p = &mut self.slots[slot];
                p.active = true;
                p.position = origin;
                p.velocity = velocity;
                Some(slot)
            }
            None => {
                debug!("projectile pool exhausted, dropping fire request");
                None
            }
        }
    }

    /// Returns the slot to the pool. Only activity and velocity are
    /// reset so the slot is immediately reusable.
    pub fn retire(&mut self, slot: usize) {
        if let Some(p) = self.slots.get_mut(slot) {
            p.active = false;
            p.velocity = Vec2::ZERO;
        }
    }

    /// Advances active projectiles one step and retires any that left
    /// the playable bounds.
    pub fn step(&mut self, dt: f32, bounds: WorldBounds) {
        for p in &mut self.slots {
            if !p.active {
                continue;
            }
            p.position = p.position + p.velocity * dt;
            if !bounds.contains(p.position) {
                p.active = false;
                p.velocity = Vec2::ZERO;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_of(capacity: usize) -> ProjectilePool {
        ProjectilePool::new(capacity)
    }

    #[test]
    fn firing_past_capacity_caps_active_count() {
        let mut pool = pool_of(3);
        for i in 0..5 {
            pool.fire(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0 + i as f32), 1000.0);
        }
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn fire_sets_velocity_toward_target() {
        let mut pool = pool_of(1);
        let slot = pool
            .fire(Vec2::new(100.0, 100.0), Vec2::new(100.0, 500.0), 1000.0)
            .unwrap();
        let p = pool.get(slot).unwrap();
        assert!((p.velocity.y - 1000.0).abs() < 1e-3);
        assert!(p.velocity.x.abs() < 1e-3);
    }

    #[test]
    fn degenerate_aim_is_dropped() {
        let mut pool = pool_of(1);
        let origin = Vec2::new(50.0, 50.0);
        assert!(pool.fire(origin, origin, 1000.0).is_none());
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn out_of_bounds_projectile_retires_itself() {
        let bounds = WorldBounds::default();
        let mut pool = pool_of(1);
        pool.fire(Vec2::new(1400.0, 750.0), Vec2::new(1600.0, 750.0), 1000.0);
        // 1000 units/s crosses the remaining 100 units well within a second.
        pool.step(0.2, bounds);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn retired_slot_is_immediately_reusable() {
        let mut pool = pool_of(1);
        let slot = pool
            .fire(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0), 1000.0)
            .unwrap();
        pool.retire(slot);
        assert_eq!(pool.active_count(), 0);
        let again = pool.fire(Vec2::new(300.0, 300.0), Vec2::new(300.0, 400.0), 1000.0);
        assert_eq!(again, Some(slot));
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn retire_out_of_range_slot_is_a_noop() {
        let mut pool = pool_of(2);
        pool.retire(99);
        assert_eq!(pool.active_count(), 0);
    }
}
