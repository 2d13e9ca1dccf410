//! Initial velocities for bouncing objects

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Movement style of a bouncing object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BouncePath {
    #[default]
    Diagonal,
    Straight,
}

const DIAGONAL_DIRECTIONS: [Vec2; 4] = [
    Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

const STRAIGHT_DIRECTIONS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];

impl BouncePath {
    /// Unit direction vectors this path picks from
    pub fn directions(self) -> &'static [Vec2] {
        match self {
            BouncePath::Diagonal => &DIAGONAL_DIRECTIONS,
            BouncePath::Straight => &STRAIGHT_DIRECTIONS,
        }
    }

    pub fn pick_direction<R: Rng + ?Sized>(self, rng: &mut R) -> Vec2 {
        let directions = self.directions();
        directions[rng.random_range(0..directions.len())]
    }
}

/// Initial velocity for a freshly placed bouncing object
///
/// Tracked objects are steered so they don't head straight for the nearest
/// edge right after spawning.
pub fn assign<R: Rng + ?Sized>(
    path: BouncePath,
    speed_scale: f32,
    base_speed: f32,
    tracked: bool,
    spawn: Vec2,
    center: Vec2,
    rng: &mut R,
) -> Vec2 {
    let vel = path.pick_direction(rng) * speed_scale * base_speed;
    if tracked {
        steer_toward_center(spawn, center, vel)
    } else {
        vel
    }
}

/// Flip each velocity component that points away from `center`
///
/// Applied per axis: an object right of center moving right gets its x
/// negated, left of center moving left likewise; same for y. An object exactly
/// on the center line of an axis keeps that component.
pub fn steer_toward_center(spawn: Vec2, center: Vec2, vel: Vec2) -> Vec2 {
    let offset = spawn - center;
    let mut steered = vel;
    if (offset.x > 0.0 && vel.x > 0.0) || (offset.x < 0.0 && vel.x < 0.0) {
        steered.x = -vel.x;
    }
    if (offset.y > 0.0 && vel.y > 0.0) || (offset.y < 0.0 && vel.y < 0.0) {
        steered.y = -vel.y;
    }
    steered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tracked_upper_right_reverses_both() {
        let vel = steer_toward_center(Vec2::new(2.0, 1.0), Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert_eq!(vel, Vec2::new(-3.0, -4.0));
    }

    #[test]
    fn test_tracked_already_inbound_unchanged() {
        let vel = steer_toward_center(Vec2::new(2.0, -1.0), Vec2::ZERO, Vec2::new(-3.0, 4.0));
        assert_eq!(vel, Vec2::new(-3.0, 4.0));
    }

    #[test]
    fn test_tracked_axes_independent() {
        // Left half moving left, lower half moving up
        let vel = steer_toward_center(Vec2::new(-2.0, -1.0), Vec2::ZERO, Vec2::new(-3.0, 4.0));
        assert_eq!(vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_on_center_line_untouched() {
        let vel = steer_toward_center(Vec2::new(0.0, 1.0), Vec2::ZERO, Vec2::new(1.0, 0.0));
        assert_eq!(vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_untracked_not_steered() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            let vel = assign(BouncePath::Straight, 2.0, 0.5, false, Vec2::new(4.0, 4.0), Vec2::ZERO, &mut rng);
            assert!((vel.length() - 1.0).abs() < 1e-6);
            assert!(STRAIGHT_DIRECTIONS.contains(&vel));
        }
    }

    #[test]
    fn test_tracked_moves_toward_center() {
        let mut rng = Pcg32::seed_from_u64(11);
        let spawn = Vec2::new(3.0, 2.0);
        for _ in 0..50 {
            let vel = assign(BouncePath::Diagonal, 1.0, 0.6, true, spawn, Vec2::ZERO, &mut rng);
            assert!(vel.x < 0.0 && vel.y < 0.0);
            assert!((vel.length() - 0.6).abs() < 1e-5);
        }
    }

    #[test]
    fn test_speed_scaling() {
        let mut rng = Pcg32::seed_from_u64(5);
        let vel = assign(BouncePath::Diagonal, 2.5, 0.6, false, Vec2::ZERO, Vec2::ZERO, &mut rng);
        assert!((vel.length() - 1.5).abs() < 1e-5);
    }
}
