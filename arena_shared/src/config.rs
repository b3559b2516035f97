//! Configuration system.
//!
//! Loads client configuration from JSON strings/files (file IO left
//! to the app). Every deployment-specific constant lives here so
//! nothing gameplay-tunable is hard-coded.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Rectangular playable extent. Projectiles that reach or cross an
/// edge retire themselves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl WorldBounds {
    /// Edge-exclusive containment: a point on the boundary is out.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.y > self.min_y && p.y < self.max_y
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1500.0,
            max_y: 1500.0,
        }
    }
}

/// Root client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Room server address, e.g. `127.0.0.1:2567`.
    pub server_addr: String,
    /// Fixed simulation tick rate.
    pub tick_hz: u32,
    /// Local movement speed in units per second.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Projectile speed in units per second.
    #[serde(default = "default_projectile_speed")]
    pub projectile_speed: f32,
    /// Projectile slots per player.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Health assigned on spawn.
    #[serde(default = "default_max_health")]
    pub max_health: i32,
    /// Damage applied per predicted projectile hit.
    #[serde(default = "default_hit_damage")]
    pub hit_damage: i32,
    /// Per-tick blend factor toward the latest remote snapshot.
    #[serde(default = "default_interp_factor")]
    pub interp_factor: f32,
    /// Cap on catch-up ticks simulated in one frame.
    #[serde(default = "default_max_ticks_per_frame")]
    pub max_ticks_per_frame: u32,
    /// Playable extent used for projectile retirement.
    #[serde(default)]
    pub bounds: WorldBounds,
    /// Player name (display only).
    #[serde(default = "default_player_name")]
    pub player_name: String,
}

fn default_move_speed() -> f32 {
    120.0
}

fn default_projectile_speed() -> f32 {
    1000.0
}

fn default_pool_size() -> usize {
    10
}

fn default_max_health() -> i32 {
    100
}

fn default_hit_damage() -> i32 {
    8
}

fn default_interp_factor() -> f32 {
    0.15
}

fn default_max_ticks_per_frame() -> u32 {
    5
}

fn default_player_name() -> String {
    "Player".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:2567".to_string(),
            tick_hz: 60,
            move_speed: default_move_speed(),
            projectile_speed: default_projectile_speed(),
            pool_size: default_pool_size(),
            max_health: default_max_health(),
            hit_damage: default_hit_damage(),
            interp_factor: default_interp_factor(),
            max_ticks_per_frame: default_max_ticks_per_frame(),
            bounds: WorldBounds::default(),
            player_name: default_player_name(),
        }
    }
}

impl GameConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_json_with_defaults() {
        let cfg =
            GameConfig::from_json_str(r#"{"server_addr":"10.0.0.1:2567","tick_hz":30}"#).unwrap();
        assert_eq!(cfg.server_addr, "10.0.0.1:2567");
        assert_eq!(cfg.tick_hz, 30);
        assert_eq!(cfg.pool_size, 10);
        assert_eq!(cfg.max_health, 100);
        assert!((cfg.interp_factor - 0.15).abs() < f32::EPSILON);
    }

    #[test]
    fn bounds_are_edge_exclusive() {
        let bounds = WorldBounds::default();
        assert!(bounds.contains(Vec2::new(750.0, 750.0)));
        assert!(!bounds.contains(Vec2::new(0.0, 750.0)));
        assert!(!bounds.contains(Vec2::new(750.0, 1500.0)));
        assert!(!bounds.contains(Vec2::new(-10.0, 750.0)));
    }
}
