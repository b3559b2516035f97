//! Session and combat coordination.
//!
//! `GameSession` owns the session-id → entity registry and is its
//! sole mutator. Inbound server messages are routed here between
//! ticks; the fixed tick body runs input sampling, local prediction,
//! the once-per-tick network send, projectile stepping with contact
//! resolution, and remote reconciliation, in that order.
//!
//! Everything is single-threaded and cooperative: sends go out
//! through a non-blocking channel and nothing in the tick awaits.

use std::collections::HashMap;

use arena_shared::{
    config::GameConfig,
    math::Vec2,
    net::{InputPayload, NetMsg, SessionId, ShootIntent},
    physics::{CollisionBackend, ContactEvent},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::{
    entity::PlayerEntity,
    input::InputSource,
    interp::{self, RemoteSnapshot},
    predict,
    scheduler::FixedTimestep,
};

/// Client-side world state for one joined room.
pub struct GameSession {
    cfg: GameConfig,
    local_id: Option<SessionId>,
    players: HashMap<SessionId, PlayerEntity>,
    outbound: UnboundedSender<NetMsg>,
    timestep: FixedTimestep,
    tick: u32,
}

impl GameSession {
    pub fn new(cfg: GameConfig, outbound: UnboundedSender<NetMsg>) -> Self {
        let timestep = FixedTimestep::new(cfg.tick_hz, cfg.max_ticks_per_frame);
        Self {
            cfg,
            local_id: None,
            players: HashMap::new(),
            outbound,
            timestep,
            tick: 0,
        }
    }

    pub fn local_id(&self) -> Option<SessionId> {
        self.local_id
    }

    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: SessionId) -> Option<&PlayerEntity> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: SessionId) -> Option<&mut PlayerEntity> {
        self.players.get_mut(&id)
    }

    pub fn local_player(&self) -> Option<&PlayerEntity> {
        self.local_id.and_then(|id| self.players.get(&id))
    }

    /// Routes one inbound server message. Only ever called between
    /// ticks; message handlers never interleave with the tick body.
    pub fn handle_message(&mut self, msg: NetMsg) {
        match msg {
            NetMsg::Welcome { session_id } => {
                info!(session_id = ?session_id, "session id assigned");
                self.local_id = Some(session_id);
            }
            NetMsg::PlayerJoined {
                session_id,
                position,
                sprite_frame_key,
            } => {
                let entity = PlayerEntity::new(
                    session_id,
                    position,
                    sprite_frame_key,
                    self.cfg.max_health,
                    self.cfg.pool_size,
                );
                if self.players.insert(session_id, entity).is_some() {
                    warn!(id = ?session_id, "duplicate join replaced existing entity");
                } else {
                    info!(id = ?session_id, "player joined");
                }
            }
            NetMsg::PlayerLeft { session_id } => {
                // Entity and its owned pool are dropped together.
                if self.players.remove(&session_id).is_some() {
                    info!(id = ?session_id, "player left");
                } else {
                    debug!(id = ?session_id, "left event for unknown entity");
                }
            }
            NetMsg::PositionChanged {
                session_id,
                position,
                sprite_frame_key,
            } => {
                if Some(session_id) == self.local_id {
                    // The owned entity is predicted, not reconciled.
                    return;
                }
                match self.players.get_mut(&session_id) {
                    Some(p) => {
                        p.snapshot = Some(RemoteSnapshot {
                            position,
                            sprite_frame_key,
                        });
                    }
                    None => debug!(id = ?session_id, "snapshot for unknown entity"),
                }
            }
            NetMsg::HealthChanged { session_id, health } => {
                match self.players.get_mut(&session_id) {
                    Some(p) => p.set_health(health),
                    None => debug!(id = ?session_id, "health update for unknown entity"),
                }
            }
            NetMsg::Shoot {
                session_id,
                position,
                velocity,
            } => {
                if Some(session_id) == self.local_id {
                    // Our own shot was already predicted locally.
                    return;
                }
                // Visual-only replication on the remote entity's own
                // pool; damage stays server-authoritative.
                match self.players.get_mut(&session_id) {
                    Some(p) => {
                        p.pool.fire_with_velocity(position, velocity);
                    }
                    None => debug!(id = ?session_id, "shoot event for unknown entity"),
                }
            }
            NetMsg::Respawn { session_id, x, y } => {
                match self.players.get_mut(&session_id) {
                    Some(p) => p.respawn(x, y),
                    None => debug!(id = ?session_id, "respawn for unknown entity"),
                }
            }
            other => {
                debug!(?other, "unhandled message");
            }
        }
    }

    /// Optimistic local fire: the projectile spawns immediately and
    /// the intent rides out with the next payload. Requests arriving
    /// before that payload coalesce, keeping only the latest target.
    pub fn request_fire(&mut self, target: Vec2) {
        let Some(id) = self.local_id else {
            return;
        };
        let speed = self.cfg.projectile_speed;
        let Some(p) = self.players.get_mut(&id) else {
            return;
        };
        if !p.alive {
            debug!("ignoring fire request from dead entity");
            return;
        }
        if p.pending_shot.is_none() {
            p.pool.fire(p.position, target, speed);
        }
        p.pending_shot = Some(target);
    }

    /// Resolves one externally-reported overlap. Unknown entities are
    /// no-ops; a projectile touching its own shooter is ignored.
    pub fn handle_contact(&mut self, contact: ContactEvent) {
        match contact {
            ContactEvent::ProjectileTerrain { owner, slot } => {
                match self.players.get_mut(&owner) {
                    Some(p) => p.pool.retire(slot),
                    None => debug!(id = ?owner, "terrain contact for unknown owner"),
                }
            }
            ContactEvent::ProjectilePlayer {
                owner,
                slot,
                victim,
            } => {
                if owner == victim {
                    return;
                }
                // A contact whose shooter already left is stale; the
                // pool it references is gone.
                let Some(shooter) = self.players.get_mut(&owner) else {
                    debug!(id = ?owner, "player contact for unknown owner");
                    return;
                };
                shooter.pool.retire(slot);
                if Some(victim) == self.local_id {
                    // Optimistic local damage; the authoritative
                    // health update supersedes it when it arrives.
                    let amount = self.cfg.hit_damage;
                    if let Some(v) = self.players.get_mut(&victim) {
                        v.damage(amount);
                    }
                    self.send(NetMsg::Hit {
                        shooter_id: owner,
                        victim_id: victim,
                    });
                }
                // Remote-on-remote hits carry no local damage
                // computation at all.
            }
        }
    }

    /// Feeds elapsed real time and simulates the granted fixed ticks.
    /// Performs no work until the local entity has joined.
    pub fn update(
        &mut self,
        dt: f32,
        input: &mut impl InputSource,
        collision: &mut impl CollisionBackend,
    ) -> u32 {
        if self.local_player().is_none() {
            return 0;
        }
        let ticks = self.timestep.advance(dt);
        for _ in 0..ticks {
            self.fixed_tick(input, collision);
        }
        ticks
    }

    fn fixed_tick(&mut self, input: &mut impl InputSource, collision: &mut impl CollisionBackend) {
        let step = self.timestep.step_secs();

        // (1) Sample input and the tick's fire request.
        let frame = input.sample();
        if let Some(req) = input.take_fire_request() {
            self.request_fire(req.target);
        }

        // (2) Predict local movement; (3) compose the tick's single
        // payload from the same sampled input.
        let Some(local_id) = self.local_id else {
            return;
        };
        let payload = match self.players.get_mut(&local_id) {
            Some(p) => {
                let velocity = predict::predicted_velocity(frame, p.alive, self.cfg.move_speed);
                p.position = p.position + velocity * step;
                let axis = frame.axis();
                p.facing = predict::facing_for_axis(axis, p.facing);
                p.sprite_frame_key =
                    predict::sprite_key(p.facing, p.alive && axis != Vec2::ZERO);

                let shoot = match p.pending_shot.take() {
                    Some(target) => ShootIntent {
                        x: target.x,
                        y: target.y,
                        active: true,
                    },
                    None => ShootIntent::default(),
                };
                InputPayload {
                    up: frame.up,
                    down: frame.down,
                    left: frame.left,
                    right: frame.right,
                    shoot,
                    sprite_frame_key: p.sprite_frame_key.clone(),
                }
            }
            None => return,
        };
        self.send(NetMsg::Input(payload));

        // (4) Advance every pool and resolve reported overlaps.
        let bounds = self.cfg.bounds;
        for p in self.players.values_mut() {
            p.pool.step(step, bounds);
        }
        for contact in collision.drain_contacts() {
            self.handle_contact(contact);
        }

        // (5) Reconcile remote entities. The pass iterates a snapshot
        // of the key set, so removals cannot invalidate it.
        let remote_ids: Vec<SessionId> = self
            .players
            .keys()
            .copied()
            .filter(|id| Some(*id) != self.local_id)
            .collect();
        for id in remote_ids {
            if let Some(p) = self.players.get_mut(&id) {
                interp::reconcile(p, self.cfg.interp_factor);
            }
        }

        self.tick = self.tick.wrapping_add(1);
    }

    /// Fire-and-forget outbound send; a closed transport degrades to
    /// dropped messages, never a crash.
    fn send(&self, msg: NetMsg) {
        if self.outbound.send(msg).is_err() {
            warn!("transport closed, dropping outbound message");
        }
    }
}
