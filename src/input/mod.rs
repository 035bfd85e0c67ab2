//! # Input Module
//!
//! Keyboard polling, reduced to a plain per-frame [`InputSnapshot`] that the
//! simulation consumes. Nothing outside this module reads key state.

use crate::game::Direction;
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything the simulation needs to know about the keyboard for one tick.
///
/// Movement flags are level-triggered (held keys); ability, restart and quit
/// flags are edge-triggered (pressed this frame).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub boost: bool,
    pub freeze: bool,
    pub restart: bool,
    pub quit: bool,
}

impl InputSnapshot {
    /// A snapshot with no keys down.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A snapshot holding a single movement direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use shadowmaze::{Direction, InputSnapshot};
    ///
    /// let input = InputSnapshot::moving(Direction::West);
    /// assert_eq!(input.axis(), (-1.0, 0.0));
    /// ```
    pub fn moving(direction: Direction) -> Self {
        let mut input = Self::default();
        match direction {
            Direction::North => input.move_up = true,
            Direction::East => input.move_right = true,
            Direction::South => input.move_down = true,
            Direction::West => input.move_left = true,
        }
        input
    }

    /// Movement as per-axis components in {-1, 0, 1}; opposite keys cancel.
    pub fn axis(&self) -> (f32, f32) {
        let x = f32::from(u8::from(self.move_right)) - f32::from(u8::from(self.move_left));
        let y = f32::from(u8::from(self.move_down)) - f32::from(u8::from(self.move_up));
        (x, y)
    }

    /// Whether any movement key is held.
    pub fn is_moving(&self) -> bool {
        self.axis() != (0.0, 0.0)
    }
}

/// Polls macroquad's keyboard state into [`InputSnapshot`]s.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    fn any_down(keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| is_key_down(key))
    }

    /// Reads the keyboard for this frame.
    ///
    /// Arrows or WASD move, E boosts, Q freezes, R restarts, Escape quits.
    pub fn snapshot(&self) -> InputSnapshot {
        let vi = self.vi_keys_enabled;
        InputSnapshot {
            move_up: Self::any_down(&[KeyCode::Up, KeyCode::W]) || (vi && is_key_down(KeyCode::K)),
            move_down: Self::any_down(&[KeyCode::Down, KeyCode::S])
                || (vi && is_key_down(KeyCode::J)),
            move_left: Self::any_down(&[KeyCode::Left, KeyCode::A])
                || (vi && is_key_down(KeyCode::H)),
            move_right: Self::any_down(&[KeyCode::Right, KeyCode::D])
                || (vi && is_key_down(KeyCode::L)),
            boost: is_key_pressed(KeyCode::E),
            freeze: is_key_pressed(KeyCode::Q),
            restart: is_key_pressed(KeyCode::R),
            quit: is_key_pressed(KeyCode::Escape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_snapshot() {
        let input = InputSnapshot::idle();
        assert_eq!(input.axis(), (0.0, 0.0));
        assert!(!input.is_moving());
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = InputSnapshot {
            move_left: true,
            move_right: true,
            move_up: true,
            ..InputSnapshot::default()
        };
        assert_eq!(input.axis(), (0.0, -1.0));
    }

    #[test]
    fn test_moving_matches_direction_delta() {
        for direction in Direction::cardinal() {
            let (x, y) = InputSnapshot::moving(direction).axis();
            let delta = direction.to_delta();
            assert_eq!((x as i32, y as i32), (delta.x, delta.y));
        }
    }
}
