//! Skier motion integration
//!
//! Forward motion is automatic; input only steers on the lateral axis.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input::LateralIntent;

/// Speeds and track bounds for the skier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkierParams {
    /// Units per second down the descent axis (-z)
    pub forward_speed: f32,
    /// Units per second on the lateral axis while a steering key is held
    pub lateral_speed: f32,
    /// Track half-width; lateral position is clamped to `[-max_lateral, max_lateral]`
    pub max_lateral: f32,
}

impl Default for SkierParams {
    fn default() -> Self {
        Self {
            forward_speed: 15.0,
            lateral_speed: 8.0,
            max_lateral: 25.0,
        }
    }
}

/// Advance a skier position by one step.
///
/// The lateral clamp is hard: reaching the edge just stops drift in that
/// direction. Elevation is left untouched.
pub fn integrate(position: Vec3, intent: LateralIntent, dt: f32, params: &SkierParams) -> Vec3 {
    let x = (position.x + intent.sign() * params.lateral_speed * dt)
        .clamp(-params.max_lateral, params.max_lateral);
    let z = position.z - params.forward_speed * dt;
    Vec3::new(x, position.y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(lateral_speed: f32) -> SkierParams {
        SkierParams {
            forward_speed: 15.0,
            lateral_speed,
            max_lateral: 25.0,
        }
    }

    #[test]
    fn test_single_step_right() {
        let p = params(10.0);
        let pos = integrate(Vec3::new(0.0, 0.2, 10.0), LateralIntent::Right, 0.1, &p);
        assert!((pos.x - 1.0).abs() < 1e-5);
        assert!((pos.z - 8.5).abs() < 1e-5);
        assert_eq!(pos.y, 0.2);
    }

    #[test]
    fn test_clamps_at_track_edge() {
        let p = params(10.0);
        let mut pos = Vec3::new(0.0, 0.0, 10.0);
        for _ in 0..30 {
            pos = integrate(pos, LateralIntent::Right, 0.1, &p);
        }
        assert_eq!(pos.x, 25.0);

        // Keeps pushing, stays put
        for _ in 0..10 {
            pos = integrate(pos, LateralIntent::Right, 0.1, &p);
            assert_eq!(pos.x, 25.0);
        }

        // Reversing intent leaves the edge immediately
        pos = integrate(pos, LateralIntent::Left, 0.1, &p);
        assert!((pos.x - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_neutral_intent_holds_lateral() {
        let p = params(8.0);
        let pos = integrate(Vec3::new(3.0, 0.0, 0.0), LateralIntent::None, 0.5, &p);
        assert_eq!(pos.x, 3.0);
        assert!((pos.z + 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_dt_is_identity() {
        let start = Vec3::new(-4.0, 1.0, -12.0);
        let pos = integrate(start, LateralIntent::Left, 0.0, &SkierParams::default());
        assert_eq!(pos, start);
    }

    proptest! {
        #[test]
        fn prop_lateral_stays_in_bounds(
            x in -25.0f32..=25.0,
            z in -1000.0f32..100.0,
            steps in proptest::collection::vec((0u8..3, 0.0f32..0.5), 1..60),
        ) {
            let p = SkierParams::default();
            let mut pos = Vec3::new(x, 0.0, z);
            for (intent, dt) in steps {
                let intent = match intent {
                    0 => LateralIntent::Left,
                    1 => LateralIntent::None,
                    _ => LateralIntent::Right,
                };
                pos = integrate(pos, intent, dt, &p);
                prop_assert!(pos.x >= -p.max_lateral && pos.x <= p.max_lateral);
            }
        }

        #[test]
        fn prop_descent_never_increases(
            z in -1000.0f32..100.0,
            dts in proptest::collection::vec(0.0f32..0.5, 1..60),
        ) {
            let p = SkierParams::default();
            let mut pos = Vec3::new(0.0, 0.0, z);
            for dt in dts {
                let next = integrate(pos, LateralIntent::None, dt, &p);
                prop_assert!(next.z <= pos.z);
                pos = next;
            }
        }
    }
}
