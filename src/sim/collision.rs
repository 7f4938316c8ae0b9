//! Projectile collision and lifecycle resolution
//!
//! A projectile hits the first live target (in iteration order, not the nearest)
//! whose center is within `HIT_RADIUS` of it. A hit removes that target; a hit
//! or leaving the arena removes the projectile.

use glam::Vec2;

use super::arena::Arena;
use super::state::Target;
use crate::consts::HIT_RADIUS;

/// Result of resolving one projectile for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The projectile must leave the live set
    pub removed: bool,
    /// A target was destroyed and the score must be credited
    pub scored: bool,
}

/// Index of the first target within hit range of `pos`
pub fn first_hit(pos: Vec2, targets: &[Target]) -> Option<usize> {
    targets
        .iter()
        .position(|t| t.pos.distance(pos) < HIT_RADIUS)
}

/// Check a projectile at `pos` against the live targets and the arena.
///
/// Removes at most one target. Targets themselves are never bounds-checked.
pub fn resolve(pos: Vec2, targets: &mut Vec<Target>, arena: &Arena) -> Outcome {
    let scored = match first_hit(pos, targets) {
        Some(idx) => {
            targets.remove(idx);
            true
        }
        None => false,
    };

    Outcome {
        removed: scored || !arena.contains(pos),
        scored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_miss_keeps_everything() {
        let mut targets = vec![Target::new(1, Vec2::new(400.0, 300.0))];
        let out = resolve(Vec2::new(100.0, 100.0), &mut targets, &arena());
        assert_eq!(out, Outcome::default());
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_hit_radius_is_exclusive() {
        let mut targets = vec![Target::new(1, Vec2::new(400.0, 300.0))];
        let out = resolve(Vec2::new(425.0, 300.0), &mut targets, &arena());
        assert!(!out.scored);

        let out = resolve(Vec2::new(424.9, 300.0), &mut targets, &arena());
        assert!(out.scored && out.removed);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_first_match_wins_over_nearest() {
        // The first target is farther away than the second, but both are in range
        let mut targets = vec![
            Target::new(1, Vec2::new(420.0, 300.0)),
            Target::new(2, Vec2::new(401.0, 300.0)),
        ];
        let out = resolve(Vec2::new(400.0, 300.0), &mut targets, &arena());
        assert!(out.scored);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, 2);
    }

    #[test]
    fn test_out_of_bounds_removes_without_score() {
        let mut targets = Vec::new();
        for pos in [
            Vec2::new(-0.5, 300.0),
            Vec2::new(800.0, 300.0),
            Vec2::new(400.0, -1.0),
            Vec2::new(400.0, 600.0),
        ] {
            let out = resolve(pos, &mut targets, &arena());
            assert_eq!(out, Outcome { removed: true, scored: false });
        }
        let out = resolve(Vec2::new(0.0, 0.0), &mut targets, &arena());
        assert!(!out.removed);
    }

    #[test]
    fn test_targets_outside_arena_still_hittable() {
        let mut targets = vec![Target::new(1, Vec2::new(810.0, 300.0))];
        let out = resolve(Vec2::new(799.0, 300.0), &mut targets, &arena());
        assert!(out.scored && out.removed);
    }

    proptest! {
        #[test]
        fn prop_removed_implies_hit_or_outside(
            x in -50.0f32..850.0,
            y in -50.0f32..650.0,
            tx in 0.0f32..800.0,
            ty in 0.0f32..600.0,
        ) {
            let arena = arena();
            let mut targets = vec![Target::new(1, Vec2::new(tx, ty))];
            let pos = Vec2::new(x, y);
            let out = resolve(pos, &mut targets, &arena);
            if out.removed {
                prop_assert!(out.scored || !arena.contains(pos));
            }
            prop_assert_eq!(out.scored, targets.is_empty());
        }
    }
}
