//! Remote state reconciliation.
//!
//! The server reports discrete position/animation snapshots; the
//! rendered position blends toward the latest one with exponential
//! smoothing instead of snapping, which absorbs jitter at the cost of
//! a small bounded lag. Animation state has no meaningful
//! interpolation and snaps directly.

use arena_shared::math::Vec2;

use crate::entity::PlayerEntity;

/// Latest server-reported state for one remote entity, overwritten on
/// each inbound update.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSnapshot {
    pub position: Vec2,
    pub sprite_frame_key: String,
}

/// Blends one remote entity toward its snapshot. Entities that never
/// received one stay where they spawned.
pub fn reconcile(entity: &mut PlayerEntity, factor: f32) {
    let Some(snap) = entity.snapshot.as_ref() else {
        return;
    };
    entity.position = entity.position.lerp(snap.position, factor);
    if entity.sprite_frame_key != snap.sprite_frame_key {
        entity.sprite_frame_key = snap.sprite_frame_key.clone();
    }
}

#[cfg(test)]
mod tests {
    use arena_shared::net::SessionId;

    use super::*;

    fn remote_at(pos: Vec2) -> PlayerEntity {
        PlayerEntity::new(SessionId(9), pos, "idle-down".to_string(), 100, 10)
    }

    #[test]
    fn convergence_is_strictly_decreasing() {
        let target = Vec2::new(500.0, 400.0);
        let mut e = remote_at(Vec2::new(100.0, 100.0));
        e.snapshot = Some(RemoteSnapshot {
            position: target,
            sprite_frame_key: "walk-right".to_string(),
        });

        let mut prev = (target - e.position).len();
        for _ in 0..60 {
            reconcile(&mut e, 0.15);
            let dist = (target - e.position).len();
            assert!(dist < prev, "distance must shrink every tick");
            prev = dist;
        }
        // Approaches but need not reach the target.
        assert!(prev < 1.0);
        assert!(prev > 0.0);
    }

    #[test]
    fn animation_key_snaps_instead_of_blending() {
        let mut e = remote_at(Vec2::new(100.0, 100.0));
        e.snapshot = Some(RemoteSnapshot {
            position: Vec2::new(100.0, 100.0),
            sprite_frame_key: "walk-left".to_string(),
        });
        reconcile(&mut e, 0.15);
        assert_eq!(e.sprite_frame_key, "walk-left");
    }

    #[test]
    fn entity_without_snapshot_stays_put() {
        let spawn = Vec2::new(250.0, 250.0);
        let mut e = remote_at(spawn);
        reconcile(&mut e, 0.15);
        assert_eq!(e.position, spawn);
    }
}
