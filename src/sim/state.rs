//! Game state and lifecycle
//!
//! `Lifecycle` is the `Playing -> GameOver` state machine with the run
//! counters. `GameState` bundles it with the world, the gate cursor and the
//! skier tuning so a single `tick` can drive everything.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::gates::GateJudge;
use super::motion::SkierParams;
use super::world::World;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Skier is descending
    #[default]
    Playing,
    /// Run ended; world is frozen until reset
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// Hit a tree
    Tree,
    /// Hit a gate pole
    Gate,
    /// Crossed a gate outside its window
    MissGate,
    /// Unspecified crash
    #[default]
    Collision,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Tree => "tree",
            FailureReason::Gate => "gate",
            FailureReason::MissGate => "miss-gate",
            FailureReason::Collision => "collision",
        }
    }

    /// Overlay text
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::Tree => "You crashed into a tree!",
            FailureReason::Gate => "You hit a gate pole!",
            FailureReason::MissGate => "You missed a gate!",
            FailureReason::Collision => "You crashed!",
        }
    }
}

/// Something the frame driver may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GatePassed { index: usize },
    /// `obstacle` names what ended the run: the tree index for
    /// [`FailureReason::Tree`], the gate index for a pole hit or a missed gate
    GameOver {
        reason: FailureReason,
        obstacle: Option<usize>,
    },
}

/// Run lifecycle and counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    phase: GamePhase,
    /// Whole units travelled down the slope
    distance: u32,
    gates_passed: u32,
    failure: Option<FailureReason>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn gates_passed(&self) -> u32 {
        self.gates_passed
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        self.failure
    }

    /// Recompute distance from the skier depth: `max(0, floor(-z))`
    pub fn update_distance(&mut self, skier_z: f32) {
        if !self.is_playing() {
            return;
        }
        // `as` saturates: NaN -> 0, huge -> u32::MAX
        self.distance = (-skier_z).floor().max(0.0) as u32;
    }

    pub fn gate_passed(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.gates_passed += 1;
    }

    /// End the run. Ignored if the run already ended.
    pub fn game_over(&mut self, reason: FailureReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.failure = Some(reason);
        log::info!(
            "Game over: {} (distance {}m, gates {})",
            reason.as_str(),
            self.distance,
            self.gates_passed
        );
    }

    /// Back to `Playing` with zeroed counters. Relocating the skier and
    /// clearing gate flags is the world's job (see [`GameState::reset`]).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub lifecycle: Lifecycle,
    pub world: World,
    pub judge: GateJudge,
    pub skier: SkierParams,
    /// Seconds simulated since the last reset (frozen on game over)
    pub elapsed: f32,
}

impl GameState {
    pub fn new(world: World, skier: SkierParams) -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            world,
            judge: GateJudge::new(),
            skier,
            elapsed: 0.0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.lifecycle.phase()
    }

    pub fn skier_position(&self) -> Option<Vec3> {
        self.world.skier.translation()
    }

    /// Start a fresh run on the same course
    pub fn reset(&mut self) {
        self.lifecycle.reset();
        self.world.reset();
        self.judge.reset();
        self.elapsed = 0.0;
        log::info!("Run reset");
    }
}
