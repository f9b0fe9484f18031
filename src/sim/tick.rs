//! Per-frame simulation step
//!
//! One call per rendered frame. Steps run in a fixed order and the first
//! terminal outcome ends the frame:
//! motion -> distance -> trees -> gate poles -> gate judging.

use super::collision::first_overlapping_index;
use super::gates::GateOutcome;
use super::motion::integrate;
use super::state::{FailureReason, GameEvent, GamePhase, GameState};
use crate::input::LateralIntent;

/// Input sampled for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub lateral: LateralIntent,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<GameEvent> {
    // Frozen world after a crash
    if state.phase() == GamePhase::GameOver {
        return None;
    }

    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid frame time {dt}");
        0.0
    };

    state.elapsed += dt;

    // Motion
    let skier = match state.world.skier.transform_mut() {
        Some(transform) => {
            transform.translation = integrate(transform.translation, input.lateral, dt, &state.skier);
            transform.translation
        }
        None => {
            log::debug!("Skier has no transform; skipping frame");
            return None;
        }
    };

    state.lifecycle.update_distance(skier.z);

    if let Some(tree) = first_overlapping_index(&state.world.skier, &state.world.trees) {
        log::debug!("Hit tree {tree} at {skier}");
        return Some(end_run(state, FailureReason::Tree, tree));
    }

    // Two poles per gate, so the pole index halves to its gate
    if let Some(pole) = first_overlapping_index(&state.world.skier, state.world.poles()) {
        log::debug!("Hit pole {pole} at {skier}");
        return Some(end_run(state, FailureReason::Gate, pole / 2));
    }

    match state.judge.judge(&mut state.world.gates, skier)? {
        GateOutcome::Passed { index } => {
            state.lifecycle.gate_passed();
            log::debug!("Gate {} passed ({} total)", index, state.lifecycle.gates_passed());
            Some(GameEvent::GatePassed { index })
        }
        GateOutcome::Missed { index } => {
            log::debug!("Gate {index} missed at x={:.2}", skier.x);
            Some(end_run(state, FailureReason::MissGate, index))
        }
    }
}

fn end_run(state: &mut GameState, reason: FailureReason, obstacle: usize) -> GameEvent {
    state.lifecycle.game_over(reason);
    GameEvent::GameOver {
        reason,
        obstacle: Some(obstacle),
    }
}
