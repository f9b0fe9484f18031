//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One step per frame, driven by the caller's `dt`
//! - Stable iteration order (list order decides which obstacle is reported)
//! - Input arrives as a sampled `TickInput`, never as raw key events

pub mod autopilot;
pub mod collision;
pub mod gates;
pub mod motion;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Aabb, bounding_box, entities_overlap, first_overlapping};
pub use gates::{GateJudge, GateOutcome};
pub use motion::{SkierParams, integrate};
pub use state::{FailureReason, GameEvent, GamePhase, GameState, Lifecycle};
pub use tick::{TickInput, tick};
pub use world::{Entity, EntityKind, GateColor, GatePair, Transform, World};
