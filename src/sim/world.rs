//! Entities placed on the slope
//!
//! The world owns the skier, the trees and the gate pairs. Obstacles are
//! immutable once placed; only the skier's translation and each gate's
//! `passed` flag change during a run.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::UNIT_SCALE;

/// Position and extent of an entity (rotation is never considered)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    /// Extent multiplier of the unit cube
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

fn default_scale() -> Vec3 {
    Vec3::from_array(UNIT_SCALE)
}

impl Transform {
    pub fn new(translation: Vec3, scale: Vec3) -> Self {
        Self { translation, scale }
    }

    /// Transform with the default unit scale
    pub fn at(translation: Vec3) -> Self {
        Self::new(translation, default_scale())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Skier,
    Tree,
    Pole,
}

/// A scene entity. The transform is optional: an entity without one is
/// not spatial and is skipped by motion and collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    transform: Option<Transform>,
}

impl Entity {
    pub fn new(kind: EntityKind, transform: Transform) -> Self {
        Self {
            kind,
            transform: Some(transform),
        }
    }

    /// An entity with no spatial component
    pub fn without_transform(kind: EntityKind) -> Self {
        Self {
            kind,
            transform: None,
        }
    }

    #[inline]
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    #[inline]
    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.transform.as_mut()
    }

    #[inline]
    pub fn translation(&self) -> Option<Vec3> {
        self.transform.map(|t| t.translation)
    }
}

/// Gate color (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateColor {
    Red,
    Blue,
}

/// Two poles defining a passable window at a fixed depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatePair {
    /// Depth coordinate on the descent axis
    pub z: f32,
    /// Lateral center of the window
    pub center_x: f32,
    pub half_width: f32,
    pub color: GateColor,
    pub left: Entity,
    pub right: Entity,
    /// Set once when the skier crosses `z`; cleared only by a world reset
    pub passed: bool,
}

impl GatePair {
    /// Build a gate pair with poles at `center_x ± half_width`
    pub fn new(
        z: f32,
        center_x: f32,
        half_width: f32,
        color: GateColor,
        pole_y: f32,
        pole_scale: Vec3,
    ) -> Self {
        let pole = |x: f32| {
            Entity::new(
                EntityKind::Pole,
                Transform::new(Vec3::new(x, pole_y, z), pole_scale),
            )
        };
        Self {
            z,
            center_x,
            half_width,
            color,
            left: pole(center_x - half_width),
            right: pole(center_x + half_width),
            passed: false,
        }
    }

    /// Inclusive lateral window test
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.center_x - self.half_width && x <= self.center_x + self.half_width
    }

    /// Both poles, left first
    pub fn poles(&self) -> [&Entity; 2] {
        [&self.left, &self.right]
    }
}

/// Everything placed on the slope for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub skier: Entity,
    /// Where the skier starts (and returns to on reset)
    pub skier_start: Vec3,
    pub trees: Vec<Entity>,
    /// Ordered by strictly decreasing `z`
    pub gates: Vec<GatePair>,
}

impl World {
    pub fn new(skier: Entity, trees: Vec<Entity>, gates: Vec<GatePair>) -> Self {
        let skier_start = skier.translation().unwrap_or(Vec3::ZERO);
        let world = Self {
            skier,
            skier_start,
            trees,
            gates,
        };
        if !world.gates_ordered() {
            log::warn!("Gate sequence is not ordered by descent; judging will follow list order");
        }
        world
    }

    /// Put the skier back at the start and clear every gate flag
    pub fn reset(&mut self) {
        match self.skier.transform_mut() {
            Some(transform) => transform.translation = self.skier_start,
            None => log::debug!("Skier has no transform; nothing to relocate"),
        }
        for gate in &mut self.gates {
            gate.passed = false;
        }
    }

    /// True when gates are strictly ordered by decreasing depth
    pub fn gates_ordered(&self) -> bool {
        self.gates.windows(2).all(|w| w[1].z < w[0].z)
    }

    /// All gate poles in gate order, left pole before right
    pub fn poles(&self) -> impl Iterator<Item = &Entity> {
        self.gates.iter().flat_map(|g| g.poles())
    }
}
