//! Circle-approximation collision checks
//!
//! Pure functions over positions and widths; no simulation state.
//! Sprites are treated as their circumscribed circles (`width / 2`),
//! which is accurate for the round bodies this game draws.

use glam::Vec2;

/// One reported overlap: attacker `i` hit target `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub attacker: usize,
    pub target: usize,
}

/// Two circles collide when their centers are closer than the sum of
/// their radii. Strict: touching exactly is not a collision.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Sweep every attacker against every target, `(pos, width)` pairs.
///
/// All overlapping pairs are reported in attacker-major scan order; an
/// attacker overlapping two targets yields two hits, and the caller's
/// consumption policy decides what that means.
pub fn sweep_collisions(attackers: &[(Vec2, f32)], targets: &[(Vec2, f32)]) -> Vec<Hit> {
    let mut hits = Vec::new();

    for (i, &(attacker_pos, attacker_width)) in attackers.iter().enumerate() {
        for (j, &(target_pos, target_width)) in targets.iter().enumerate() {
            if circles_overlap(
                attacker_pos,
                attacker_width / 2.0,
                target_pos,
                target_width / 2.0,
            ) {
                hits.push(Hit { attacker: i, target: j });
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hit_inside_the_threshold() {
        // width 10 projectile 5px from a width 40 body: 5 < 5 + 20
        let hits = sweep_collisions(
            &[(Vec2::new(105.0, 100.0), 10.0)],
            &[(Vec2::new(100.0, 100.0), 40.0)],
        );
        assert_eq!(hits, vec![Hit { attacker: 0, target: 0 }]);
    }

    #[test]
    fn miss_outside_the_threshold() {
        let hits = sweep_collisions(
            &[(Vec2::new(126.0, 100.0), 10.0)],
            &[(Vec2::new(100.0, 100.0), 40.0)],
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn one_attacker_reports_every_overlapping_target() {
        let hits = sweep_collisions(
            &[(Vec2::new(100.0, 100.0), 10.0)],
            &[
                (Vec2::new(110.0, 100.0), 40.0),
                (Vec2::new(500.0, 500.0), 40.0),
                (Vec2::new(90.0, 100.0), 40.0),
            ],
        );
        assert_eq!(
            hits,
            vec![
                Hit { attacker: 0, target: 0 },
                Hit { attacker: 0, target: 2 },
            ]
        );
    }

    #[test]
    fn scan_order_is_attacker_major() {
        let circle = (Vec2::ZERO, 10.0);
        let hits = sweep_collisions(&[circle, circle], &[circle, circle]);
        let pairs: Vec<(usize, usize)> = hits.iter().map(|h| (h.attacker, h.target)).collect();
        assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    proptest! {
        /// Circles at distance r1+r2-eps collide; at r1+r2+eps they don't.
        #[test]
        fn threshold_is_the_radius_sum(
            r1 in 1.0f32..100.0,
            r2 in 1.0f32..100.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let eps = 0.01 * (r1 + r2);
            let near = Vec2::from_angle(angle) * (r1 + r2 - eps);
            let far = Vec2::from_angle(angle) * (r1 + r2 + eps);
            prop_assert!(circles_overlap(Vec2::ZERO, r1, near, r2));
            prop_assert!(!circles_overlap(Vec2::ZERO, r1, far, r2));
        }
    }
}
