//! Wall collision and response for axis-aligned bounds
//!
//! Each axis is checked on its own: a penetrating object has that velocity
//! component reflected and its position clamped back onto the wall.

use glam::Vec2;

use super::bounds::SimulationBounds;
use super::state::MovingObject;

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn get(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }
}

/// Which wall on an axis was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    Min,
    Max,
}

/// Check a footprint against the walls of one axis
///
/// The max wall wins when both are penetrated (footprint wider than bounds).
pub fn wall_penetration(pos: Vec2, half_extents: Vec2, bounds: &SimulationBounds, axis: Axis) -> Option<WallHit> {
    let p = axis.get(pos);
    let h = axis.get(half_extents);
    if p + h > axis.get(bounds.max) {
        Some(WallHit::Max)
    } else if p - h < axis.get(bounds.min) {
        Some(WallHit::Min)
    } else {
        None
    }
}

/// Reflect and clamp `object` on one axis if it penetrates a wall
///
/// Returns true when a reflection happened.
pub fn reflect_axis(object: &mut MovingObject, bounds: &SimulationBounds, axis: Axis) -> bool {
    let Some(hit) = wall_penetration(object.pos, object.half_extents, bounds, axis) else {
        return false;
    };

    let h = axis.get(object.half_extents);
    let clamped = match hit {
        WallHit::Max => axis.get(bounds.max) - h,
        WallHit::Min => axis.get(bounds.min) + h,
    };
    let reflected = -axis.get(object.vel);
    axis.set(&mut object.vel, reflected);
    axis.set(&mut object.pos, clamped);
    true
}

/// Move an object by one step and resolve wall bounces
///
/// Returns the number of axis reflections this step (0, 1 or 2). A corner hit
/// reflects both axes and counts as two bounces.
pub fn advance(object: &mut MovingObject, bounds: &SimulationBounds, dt: f32) -> u32 {
    object.pos += object.vel * dt;

    let mut bounces = 0;
    if reflect_axis(object, bounds, Axis::Y) {
        bounces += 1;
    }
    if reflect_axis(object, bounds, Axis::X) {
        bounces += 1;
    }
    bounces
}
