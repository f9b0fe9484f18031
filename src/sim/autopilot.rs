//! Demo/idle steering: aims for the center of the next unresolved gate

use super::state::GameState;
use crate::input::LateralIntent;

/// How close to the target line counts as "on line"
const DEADBAND: f32 = 0.2;

/// Steering intent that heads for the next gate (or the centerline once all
/// gates are behind)
pub fn steer(state: &GameState) -> LateralIntent {
    let Some(pos) = state.skier_position() else {
        return LateralIntent::None;
    };
    let target = state
        .judge
        .next_gate(&state.world.gates)
        .map(|g| g.center_x)
        .unwrap_or(0.0);

    if pos.x < target - DEADBAND {
        LateralIntent::Right
    } else if pos.x > target + DEADBAND {
        LateralIntent::Left
    } else {
        LateralIntent::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course;
    use crate::settings::Settings;
    use crate::sim::{GameEvent, GamePhase, TickInput, tick};

    #[test]
    fn test_autopilot_clears_default_course() {
        let settings = Settings::default();
        let mut state = course::new_game(&settings, 2024);
        let gate_count = state.world.gates.len() as u32;

        for _ in 0..60 * 60 {
            let input = TickInput {
                lateral: steer(&state),
            };
            if let Some(GameEvent::GameOver { reason, .. }) = tick(&mut state, &input, 1.0 / 60.0) {
                panic!("autopilot crashed: {reason:?}");
            }
        }

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.lifecycle.gates_passed(), gate_count);
    }

    #[test]
    fn test_steers_toward_gate() {
        let mut state = course::new_game(&Settings::default(), 1);
        // Gate 0 is centered on x = 0
        state.world.skier.transform_mut().unwrap().translation.x = 5.0;
        assert_eq!(steer(&state), LateralIntent::Left);
        state.world.skier.transform_mut().unwrap().translation.x = -5.0;
        assert_eq!(steer(&state), LateralIntent::Right);
        state.world.skier.transform_mut().unwrap().translation.x = 0.1;
        assert_eq!(steer(&state), LateralIntent::None);
    }
}
