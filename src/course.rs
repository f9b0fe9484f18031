//! Course generation
//!
//! Builds the world for a run: the skier at its start, trees scattered along
//! both track edges and a serpentine of alternating red/blue gate pairs.
//! Layout is deterministic for a given seed.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{Entity, EntityKind, GateColor, GatePair, GameState, Transform, World};

/// Scatter trees down both sides of the track
pub fn generate_trees(settings: &Settings, rng: &mut Pcg32) -> Vec<Entity> {
    let course = &settings.course;
    (0..course.tree_count)
        .map(|i| {
            let z = course.tree_first_z + i as f32 * course.tree_step_z;
            let side = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
            let offset = course.tree_min_offset + rng.random::<f32>() * course.tree_offset_jitter;
            let height = course.tree_min_height + rng.random::<f32>() * course.tree_height_jitter;
            Entity::new(
                EntityKind::Tree,
                Transform::new(
                    Vec3::new(side * offset, course.tree_y, z),
                    Vec3::new(course.tree_thickness, height, course.tree_thickness),
                ),
            )
        })
        .collect()
}

/// Gate pairs in descending depth, red on even indices and blue on odd
pub fn generate_gates(settings: &Settings) -> Vec<GatePair> {
    let course = &settings.course;
    let pole_scale = Vec3::new(course.pole_thickness, course.pole_height, course.pole_thickness);
    (0..course.gate_count)
        .map(|i| {
            let z = course.first_gate_z + i as f32 * course.gate_step_z;
            let center_x = (i as f32 * course.gate_sway_frequency).sin() * course.gate_sway;
            let color = if i % 2 == 0 { GateColor::Red } else { GateColor::Blue };
            GatePair::new(z, center_x, course.gate_half_width, color, course.pole_y, pole_scale)
        })
        .collect()
}

/// Build the full world for a seed
pub fn generate(settings: &Settings, seed: u64) -> World {
    let mut rng = Pcg32::seed_from_u64(seed);
    let skier = Entity::new(
        EntityKind::Skier,
        Transform::new(settings.skier.start, settings.skier.scale),
    );
    let trees = generate_trees(settings, &mut rng);
    let gates = generate_gates(settings);
    log::info!(
        "Generated course (seed {seed}): {} trees, {} gates",
        trees.len(),
        gates.len()
    );
    World::new(skier, trees, gates)
}

/// New game on a freshly generated course
pub fn new_game(settings: &Settings, seed: u64) -> GameState {
    GameState::new(generate(settings, seed), settings.skier.params())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_course_shape() {
        let world = generate(&Settings::default(), 1);
        assert_eq!(world.trees.len(), 40);
        assert_eq!(world.gates.len(), 12);
        assert!(world.gates_ordered());
        assert_eq!(world.skier_start, Vec3::new(0.0, 0.2, 8.0));
    }

    #[test]
    fn test_gate_serpentine() {
        let gates = generate_gates(&Settings::default());
        assert_eq!(gates[0].z, -40.0);
        assert_eq!(gates[1].z, -75.0);
        assert_eq!(gates[0].center_x, 0.0);
        assert!((gates[1].center_x - 0.6f32.sin() * 8.0).abs() < 1e-5);
        assert_eq!(gates[0].color, GateColor::Red);
        assert_eq!(gates[1].color, GateColor::Blue);
        assert_eq!(gates[2].color, GateColor::Red);
        assert!(gates.iter().all(|g| !g.passed && g.half_width == 1.8));
    }

    #[test]
    fn test_trees_stay_off_the_centerline() {
        let settings = Settings::default();
        let world = generate(&settings, 99);
        for (i, tree) in world.trees.iter().enumerate() {
            let t = tree.transform().unwrap();
            let x = t.translation.x.abs();
            assert!(x >= 18.0 && x <= 26.0, "tree {i} at x={x}");
            assert!(t.scale.y >= 3.0 && t.scale.y <= 6.0);
            assert_eq!(t.translation.z, -20.0 - i as f32 * 15.0);
        }
    }

    #[test]
    fn test_same_seed_same_course() {
        let settings = Settings::default();
        let a = generate(&settings, 1234);
        let b = generate(&settings, 1234);
        assert_eq!(a.trees, b.trees);

        let c = generate(&settings, 4321);
        assert_ne!(a.trees, c.trees);
    }

    #[test]
    fn test_new_game_uses_skier_tuning() {
        let mut settings = Settings::default();
        settings.skier.forward_speed = 20.0;
        let state = new_game(&settings, 5);
        assert_eq!(state.skier.forward_speed, 20.0);
        assert_eq!(state.lifecycle.distance(), 0);
    }
}
