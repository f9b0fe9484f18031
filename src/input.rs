//! Keyboard input state
//!
//! Raw key codes are translated into a closed set of logical directions
//! before they reach the simulation. The simulation only ever sees a
//! [`LateralIntent`] sampled once per frame.

use serde::{Deserialize, Serialize};

/// Logical steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a platform key code (`KeyboardEvent.code`) to a direction
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyA" | "ArrowLeft" => Some(Direction::Left),
            "KeyD" | "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Steering intent for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LateralIntent {
    Left,
    #[default]
    None,
    Right,
}

impl LateralIntent {
    /// Signed multiplier applied to lateral speed (-1, 0, +1)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            LateralIntent::Left => -1.0,
            LateralIntent::None => 0.0,
            LateralIntent::Right => 1.0,
        }
    }
}

/// Which directional keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        self.set(direction, true);
    }

    pub fn release(&mut self, direction: Direction) {
        self.set(direction, false);
    }

    fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Handle a raw key-down event. Returns true if the code was a steering key.
    pub fn key_down(&mut self, code: &str) -> bool {
        match Direction::from_code(code) {
            Some(direction) => {
                self.press(direction);
                true
            }
            None => false,
        }
    }

    /// Handle a raw key-up event. Returns true if the code was a steering key.
    pub fn key_up(&mut self, code: &str) -> bool {
        match Direction::from_code(code) {
            Some(direction) => {
                self.release(direction);
                true
            }
            None => false,
        }
    }

    /// Release every key (window blur, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Both keys held cancel out; there is no last-pressed-wins rule.
    pub fn lateral_intent(&self) -> LateralIntent {
        match (self.left, self.right) {
            (true, false) => LateralIntent::Left,
            (false, true) => LateralIntent::Right,
            _ => LateralIntent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keys_is_neutral() {
        let input = InputState::new();
        assert_eq!(input.lateral_intent(), LateralIntent::None);
    }

    #[test]
    fn test_single_key_intent() {
        let mut input = InputState::new();
        input.press(Direction::Left);
        assert_eq!(input.lateral_intent(), LateralIntent::Left);
        input.release(Direction::Left);
        input.press(Direction::Right);
        assert_eq!(input.lateral_intent(), LateralIntent::Right);
    }

    #[test]
    fn test_both_keys_cancel() {
        let mut input = InputState::new();
        input.press(Direction::Right);
        input.press(Direction::Left);
        assert_eq!(input.lateral_intent(), LateralIntent::None);

        // Releasing one restores the other
        input.release(Direction::Right);
        assert_eq!(input.lateral_intent(), LateralIntent::Left);
    }

    #[test]
    fn test_key_codes() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowLeft"));
        assert!(input.is_held(Direction::Left));
        assert!(input.key_up("KeyA"));
        assert!(!input.is_held(Direction::Left));

        assert!(input.key_down("KeyD"));
        assert_eq!(input.lateral_intent(), LateralIntent::Right);

        assert!(!input.key_down("Space"));
        assert!(!input.key_down("KeyW"));
        assert_eq!(input.lateral_intent(), LateralIntent::Right);
    }

    #[test]
    fn test_clear() {
        let mut input = InputState::new();
        input.key_down("KeyA");
        input.key_down("KeyD");
        input.clear();
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_intent_sign() {
        assert_eq!(LateralIntent::Left.sign(), -1.0);
        assert_eq!(LateralIntent::None.sign(), 0.0);
        assert_eq!(LateralIntent::Right.sign(), 1.0);
    }
}
