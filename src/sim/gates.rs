//! Gate passage judging
//!
//! Gates are resolved strictly in sequence. The judge keeps a cursor to the
//! next unresolved gate, so resolved gates are never scanned again and an
//! unresolved gate blocks every gate after it. Clearing the `passed` flags
//! behind the cursor rewinds it on the next verdict.

use glam::Vec3;

use super::world::GatePair;

/// Result of resolving one gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Skier crossed the gate depth inside the window
    Passed { index: usize },
    /// Skier crossed the gate depth outside the window
    Missed { index: usize },
}

/// Cursor over the ordered gate sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateJudge {
    next: usize,
}

impl GateJudge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next gate awaiting a verdict
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Rewind to the first gate (pair with clearing the `passed` flags)
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// The next unresolved gate, if any remain
    pub fn next_gate<'a>(&self, gates: &'a [GatePair]) -> Option<&'a GatePair> {
        gates.iter().find(|g| !g.passed)
    }

    /// Judge at most one gate against the skier position.
    ///
    /// A gate is crossed once `skier.z <= gate.z`. Crossing marks it passed
    /// (whatever the verdict) and advances the cursor. Returns `None` when the
    /// next gate has not been reached or every gate is resolved.
    pub fn judge(&mut self, gates: &mut [GatePair], skier: Vec3) -> Option<GateOutcome> {
        // Flags cleared behind the cursor (world reset without a judge reset)
        if self.next > 0 && gates.get(self.next - 1).is_none_or(|g| !g.passed) {
            self.next = 0;
        }
        // Skip anything already flagged (e.g. flags set by a previous session)
        while self.next < gates.len() && gates[self.next].passed {
            self.next += 1;
        }

        let index = self.next;
        let gate = gates.get_mut(index)?;
        // Written negated so a NaN depth never counts as a crossing
        if !(skier.z <= gate.z) {
            return None;
        }

        gate.passed = true;
        self.next += 1;

        if gate.contains_x(skier.x) {
            Some(GateOutcome::Passed { index })
        } else {
            Some(GateOutcome::Missed { index })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::GateColor;

    fn gate(z: f32, center_x: f32) -> GatePair {
        GatePair::new(z, center_x, 1.8, GateColor::Red, -0.4, Vec3::new(0.12, 2.2, 0.12))
    }

    fn course() -> Vec<GatePair> {
        vec![gate(-40.0, 0.0), gate(-75.0, 4.0), gate(-110.0, -2.0)]
    }

    #[test]
    fn test_not_reached_yet() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        assert_eq!(judge.judge(&mut gates, Vec3::new(0.0, 0.0, -39.9)), None);
        assert!(!gates[0].passed);
        assert_eq!(judge.next_index(), 0);
    }

    #[test]
    fn test_pass_inside_window() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        let outcome = judge.judge(&mut gates, Vec3::new(1.0, 0.0, -40.2));
        assert_eq!(outcome, Some(GateOutcome::Passed { index: 0 }));
        assert!(gates[0].passed);
        assert_eq!(judge.next_index(), 1);
    }

    #[test]
    fn test_exact_depth_counts_as_crossed() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        let outcome = judge.judge(&mut gates, Vec3::new(1.8, 0.0, -40.0));
        assert_eq!(outcome, Some(GateOutcome::Passed { index: 0 }));
    }

    #[test]
    fn test_miss_outside_window() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        let outcome = judge.judge(&mut gates, Vec3::new(3.0, 0.0, -40.5));
        assert_eq!(outcome, Some(GateOutcome::Missed { index: 0 }));
        // Resolved either way
        assert!(gates[0].passed);
    }

    #[test]
    fn test_one_gate_per_frame() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        // Skier is already past all three gates
        let skier = Vec3::new(0.0, 0.0, -200.0);

        assert_eq!(judge.judge(&mut gates, skier), Some(GateOutcome::Passed { index: 0 }));
        assert!(!gates[1].passed);
        assert!(!gates[2].passed);

        assert_eq!(judge.judge(&mut gates, skier), Some(GateOutcome::Missed { index: 1 }));
        assert_eq!(judge.judge(&mut gates, skier), Some(GateOutcome::Missed { index: 2 }));
        assert_eq!(judge.judge(&mut gates, skier), None);
    }

    #[test]
    fn test_earlier_gate_blocks_later() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        // Past gate 1's depth but gate 0 is still pending: gate 0 is judged first
        let outcome = judge.judge(&mut gates, Vec3::new(4.0, 0.0, -80.0));
        assert_eq!(outcome, Some(GateOutcome::Missed { index: 0 }));
        assert!(!gates[1].passed);
    }

    #[test]
    fn test_skips_already_flagged_gates() {
        let mut gates = course();
        gates[0].passed = true;
        let mut judge = GateJudge::new();
        assert_eq!(judge.judge(&mut gates, Vec3::new(0.0, 0.0, -50.0)), None);
        assert_eq!(judge.next_index(), 1);
        assert_eq!(judge.next_gate(&gates).map(|g| g.z), Some(-75.0));
    }

    #[test]
    fn test_passed_flag_never_reverts() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        judge.judge(&mut gates, Vec3::new(0.0, 0.0, -41.0));
        for z in [-41.0, -30.0, 10.0, -60.0] {
            judge.judge(&mut gates, Vec3::new(0.0, 0.0, z));
            assert!(gates[0].passed);
        }
    }

    #[test]
    fn test_reset_rewinds_cursor() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        judge.judge(&mut gates, Vec3::new(0.0, 0.0, -41.0));
        for g in &mut gates {
            g.passed = false;
        }
        judge.reset();
        assert_eq!(judge.next_index(), 0);
        assert_eq!(
            judge.judge(&mut gates, Vec3::new(0.0, 0.0, -41.0)),
            Some(GateOutcome::Passed { index: 0 })
        );
    }

    #[test]
    fn test_cleared_flags_rearm_judging() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        judge.judge(&mut gates, Vec3::new(0.0, 0.0, -41.0));
        judge.judge(&mut gates, Vec3::new(0.0, 0.0, -76.0));
        assert_eq!(judge.next_index(), 2);

        // Flags cleared by the world, cursor left alone
        for g in &mut gates {
            g.passed = false;
        }
        assert_eq!(judge.next_gate(&gates).map(|g| g.z), Some(-40.0));
        assert_eq!(judge.judge(&mut gates, Vec3::new(0.0, 0.0, 5.0)), None);
        assert_eq!(judge.next_index(), 0);
        assert_eq!(
            judge.judge(&mut gates, Vec3::new(3.0, 0.0, -41.0)),
            Some(GateOutcome::Missed { index: 0 })
        );
    }

    #[test]
    fn test_empty_course() {
        let mut judge = GateJudge::new();
        assert_eq!(judge.judge(&mut [], Vec3::new(0.0, 0.0, -1000.0)), None);
        assert!(judge.next_gate(&[]).is_none());
    }

    #[test]
    fn test_nan_position_is_inert() {
        let mut gates = course();
        let mut judge = GateJudge::new();
        assert_eq!(judge.judge(&mut gates, Vec3::new(0.0, 0.0, f32::NAN)), None);
        assert!(!gates[0].passed);
    }
}
