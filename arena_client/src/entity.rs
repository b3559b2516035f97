//! Player entity state machine.
//!
//! Two states, `Alive` and `Dead`, with `alive == (health > 0)` held
//! after every health mutation. Death disables the entity's
//! interactive presence but keeps the object and its projectile pool
//! so a later respawn reuses them.

use arena_shared::{math::Vec2, net::SessionId};
use tracing::{debug, warn};

use crate::{interp::RemoteSnapshot, predict::Facing, projectile::ProjectilePool};

/// Per-player simulation state.
#[derive(Debug)]
pub struct PlayerEntity {
    pub id: SessionId,
    pub position: Vec2,
    pub facing: Facing,
    pub sprite_frame_key: String,
    pub health: i32,
    pub alive: bool,
    /// Drawable presence; cleared while dead.
    pub visible: bool,
    /// Collidable presence; cleared while dead.
    pub collidable: bool,
    /// Pool this entity fires from. No other entity may use it.
    pub pool: ProjectilePool,
    /// Latest server-reported state, consumed by reconciliation.
    pub snapshot: Option<RemoteSnapshot>,
    /// Coalesced fire intent awaiting the next outbound payload.
    pub pending_shot: Option<Vec2>,
}

impl PlayerEntity {
    pub fn new(
        id: SessionId,
        position: Vec2,
        sprite_frame_key: String,
        max_health: i32,
        pool_size: usize,
    ) -> Self {
        Self {
            id,
            position,
            facing: Facing::Down,
            sprite_frame_key,
            health: max_health,
            alive: true,
            visible: true,
            collidable: true,
            pool: ProjectilePool::new(pool_size),
            snapshot: None,
            pending_shot: None,
        }
    }

    /// Applies predicted or confirmed damage. A dead entity ignores
    /// further damage so death side effects never run twice.
    pub fn damage(&mut self, amount: i32) {
        if !self.alive {
            debug!(id = ?self.id, "ignoring damage on dead entity");
            return;
        }
        self.health -= amount;
        self.sync_alive();
    }

    /// Authoritative health overwrite; supersedes whatever local
    /// prediction computed, in either direction.
    pub fn set_health(&mut self, value: i32) {
        self.health = value;
        self.sync_alive();
    }

    /// Dead → Alive. Resets position and restores presence; health is
    /// deliberately untouched — the authoritative health update
    /// arrives separately.
    pub fn respawn(&mut self, x: f32, y: f32) {
        if self.alive {
            debug!(id = ?self.id, "ignoring respawn on living entity");
            return;
        }
        self.position = Vec2::new(x, y);
        self.alive = true;
        self.visible = true;
        self.collidable = true;
        if self.health <= 0 {
            warn!(
                id = ?self.id,
                health = self.health,
                "respawned with non-positive health, awaiting authoritative update"
            );
        }
    }

    fn sync_alive(&mut self) {
        let now_alive = self.health > 0;
        if self.alive && !now_alive {
            self.enter_dead();
        } else if !self.alive && now_alive {
            // Authoritative revival (e.g. a heal confirmed after a
            // mispredicted death).
            self.visible = true;
            self.collidable = true;
        }
        self.alive = now_alive;
    }

    fn enter_dead(&mut self) {
        debug!(id = ?self.id, health = self.health, "entity died");
        self.visible = false;
        self.collidable = false;
        self.pending_shot = None;
    }
}
