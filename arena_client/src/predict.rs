//! Local prediction.
//!
//! Movement is applied to the owned entity immediately, before the
//! server confirms it; the same sampled input goes into that tick's
//! outbound payload so the server simulates from identical flags.

use arena_shared::math::Vec2;

use crate::input::InputFrame;

/// Discrete orientation carried in the animation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// Velocity for one tick of local movement.
///
/// The axis vector is normalized before scaling so diagonal movement
/// matches cardinal speed. A dead entity never moves.
pub fn predicted_velocity(frame: InputFrame, alive: bool, speed: f32) -> Vec2 {
    if !alive {
        return Vec2::ZERO;
    }
    frame.axis().normalize_or_zero() * speed
}

/// Derives facing from the movement axis; horizontal wins on
/// diagonals, and idle input keeps the previous facing.
pub fn facing_for_axis(axis: Vec2, prev: Facing) -> Facing {
    if axis.x < 0.0 {
        Facing::Left
    } else if axis.x > 0.0 {
        Facing::Right
    } else if axis.y < 0.0 {
        Facing::Up
    } else if axis.y > 0.0 {
        Facing::Down
    } else {
        prev
    }
}

/// Animation key for the payload, e.g. `walk-left` or `idle-down`.
pub fn sprite_key(facing: Facing, moving: bool) -> String {
    let verb = if moving { "walk" } else { "idle" };
    format!("{verb}-{}", facing.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_speed_matches_cardinal_speed() {
        let frame = InputFrame {
            up: true,
            right: true,
            ..Default::default()
        };
        let vel = predicted_velocity(frame, true, 120.0);
        assert!((vel.len() - 120.0).abs() < 1e-3);
    }

    #[test]
    fn dead_entity_does_not_move() {
        let frame = InputFrame {
            left: true,
            ..Default::default()
        };
        assert_eq!(predicted_velocity(frame, false, 120.0), Vec2::ZERO);
    }

    #[test]
    fn idle_input_keeps_previous_facing() {
        let facing = facing_for_axis(Vec2::ZERO, Facing::Left);
        assert_eq!(facing, Facing::Left);
        assert_eq!(sprite_key(facing, false), "idle-left");
    }

    #[test]
    fn horizontal_wins_on_diagonal() {
        let frame = InputFrame {
            down: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(facing_for_axis(frame.axis(), Facing::Up), Facing::Right);
    }
}
