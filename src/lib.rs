//! Ski Slalom - an endless-slope gate skiing arcade game
//!
//! Core modules:
//! - `sim`: Gameplay simulation (skier motion, collisions, gate judging, lifecycle)
//! - `input`: Held-key tracking and lateral intent
//! - `course`: Course generation (trees and gate pairs)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser glue (keyboard listeners)
//! - `settings`: Data-driven tuning loaded from JSON

pub mod course;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use input::{Direction, InputState, LateralIntent};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Frame time assumed for the very first frame (no previous timestamp yet)
    pub const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame the driver will feed to the simulation (tab switch, debugger pause)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Scale of the unit-cube geometry when an entity carries no explicit scale
    pub const UNIT_SCALE: [f32; 3] = [1.0, 1.0, 1.0];

    /// Slope slab (display only)
    pub const SLOPE_WIDTH: f32 = 60.0;

    /// How far ahead of the skier (down-slope) the camera centers the view
    pub const CAMERA_LEAD: f32 = 12.0;
    /// Half of the visible slope length
    pub const CAMERA_HALF_HEIGHT: f32 = 30.0;
}
