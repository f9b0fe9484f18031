//! Shape generation for the top-down slope view
//!
//! World `(x, z)` maps to screen `(x, y)` with down-slope pointing to the
//! bottom of the screen. Everything is an axis-aligned quad.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{CAMERA_HALF_HEIGHT, CAMERA_LEAD, SLOPE_WIDTH};
use crate::sim::{Aabb, Entity, GameState, GateColor, GatePair, bounding_box};

/// Orthographic camera that follows the skier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// View center in screen space
    pub center: Vec2,
    /// Half of the visible height in world units
    pub half_height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            half_height: CAMERA_HALF_HEIGHT,
        }
    }
}

impl Camera {
    /// Center the view a little down-slope of the skier, on the track axis
    pub fn follow(&mut self, state: &GameState) {
        if let Some(pos) = state.skier_position() {
            self.center = Vec2::new(0.0, pos.z + CAMERA_LEAD);
        }
    }

    /// Screen-space position of a world `(x, z)` point
    #[inline]
    pub fn to_screen(&self, x: f32, z: f32) -> Vec2 {
        Vec2::new(x, z) - self.center
    }

    /// Whether a world depth range is on screen (with one view of margin)
    pub fn sees_depth(&self, min_z: f32, max_z: f32) -> bool {
        let low = self.center.y - self.half_height * 2.0;
        let high = self.center.y + self.half_height * 2.0;
        max_z >= low && min_z <= high
    }
}

/// Two triangles covering `[min, max]`
pub fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Top-down footprint of a box
fn footprint(camera: &Camera, aabb: &Aabb, color: [f32; 4], out: &mut Vec<Vertex>) {
    if !camera.sees_depth(aabb.min.z, aabb.max.z) {
        return;
    }
    let min = camera.to_screen(aabb.min.x, aabb.min.z);
    let max = camera.to_screen(aabb.max.x, aabb.max.z);
    out.extend_from_slice(&quad(min, max, color));
}

fn entity_footprint(camera: &Camera, entity: &Entity, color: [f32; 4], out: &mut Vec<Vertex>) {
    if let Some(aabb) = bounding_box(entity) {
        footprint(camera, &aabb, color, out);
    }
}

fn gate_color(gate: &GatePair) -> [f32; 4] {
    let mut color = match gate.color {
        GateColor::Red => colors::GATE_RED,
        GateColor::Blue => colors::GATE_BLUE,
    };
    if gate.passed {
        color[3] = colors::PASSED_ALPHA;
    }
    color
}

/// Vertices for the whole scene, back to front: slope, trees, gates, skier
pub fn scene_vertices(state: &GameState, camera: &Camera) -> Vec<Vertex> {
    let world = &state.world;
    let mut vertices = Vec::with_capacity(6 * (2 + world.trees.len() + world.gates.len() * 2));

    // Slope strip covering the visible area
    let half_w = SLOPE_WIDTH / 2.0;
    let h = camera.half_height * 2.0;
    vertices.extend_from_slice(&quad(
        Vec2::new(-half_w - camera.center.x, -h),
        Vec2::new(half_w - camera.center.x, h),
        colors::SNOW,
    ));

    for tree in &world.trees {
        entity_footprint(camera, tree, colors::TREE, &mut vertices);
    }

    for gate in &world.gates {
        let color = gate_color(gate);
        for pole in gate.poles() {
            // Poles are pencil thin from above; widen them so they stay visible
            if let Some(mut aabb) = bounding_box(pole) {
                let pad = glam::Vec3::new(0.15, 0.0, 0.15);
                aabb.min -= pad;
                aabb.max += pad;
                footprint(camera, &aabb, color, &mut vertices);
            }
        }
    }

    entity_footprint(camera, &world.skier, colors::SKIER, &mut vertices);

    vertices
}
