//! Input handling.
//!
//! Raw device polling lives outside the core; an [`InputSource`]
//! collaborator hands over the directional flags and at most one fire
//! request per tick. Extra clicks inside one tick window are dropped
//! by the source, not queued.

use arena_shared::math::Vec2;

/// Directional flags sampled for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputFrame {
    /// Collapses the flags into an axis vector. Opposing flags cancel
    /// to zero rather than alternating.
    pub fn axis(self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }

    pub fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// A requested shot toward a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRequest {
    pub target: Vec2,
}

/// Input collaborator seam. Sampled exactly once per fixed tick.
pub trait InputSource {
    fn sample(&mut self) -> InputFrame;

    /// Takes the pending fire request, if any. At most one per tick.
    fn take_fire_request(&mut self) -> Option<FireRequest>;
}

/// Source that never produces input; used by the headless binary.
#[derive(Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn sample(&mut self) -> InputFrame {
        InputFrame::default()
    }

    fn take_fire_request(&mut self) -> Option<FireRequest> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_flags_cancel() {
        let frame = InputFrame {
            up: true,
            down: true,
            left: true,
            right: false,
        };
        let axis = frame.axis();
        assert_eq!(axis.y, 0.0);
        assert_eq!(axis.x, -1.0);
    }

    #[test]
    fn idle_frame_has_zero_axis() {
        assert_eq!(InputFrame::default().axis(), Vec2::ZERO);
        assert!(!InputFrame::default().any());
    }
}
