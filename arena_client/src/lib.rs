//! `arena_client`
//!
//! Client-side systems:
//! - Connection management and the non-blocking transport seam
//! - Input sampling and per-tick payload generation
//! - Local prediction of movement and projectile fire
//! - Interpolation of remote entity state toward server snapshots
//! - Player entity state machine (damage, death, respawn)
//! - Session/combat coordination and the fixed-tick loop

pub mod client;
pub mod entity;
pub mod input;
pub mod interp;
pub mod predict;
pub mod projectile;
pub mod scheduler;
pub mod session;

pub use client::GameClient;
pub use session::GameSession;
