//! Trial entities and core simulation types
//!
//! Everything here lives for exactly one trial iteration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::distractor::DistractorPath;
use super::velocity::BouncePath;
use crate::config::{ObjectShape, Rgb};

/// Current phase of a trial session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialPhase {
    /// Objects are moving, ticks are accepted
    Running,
    /// Duration elapsed or stopped; objects torn down
    Finished,
}

/// Movement rule an object follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathKind {
    /// Bounces off every wall
    Bounce(BouncePath),
    /// Crosses the area; diagonal ones reflect off top/bottom only
    Distractor(DistractorPath),
}

/// A moving object inside the trial area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingObject {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half of the object's footprint on each axis
    pub half_extents: Vec2,
    /// Bounces of tracked objects are counted
    pub tracked: bool,
    pub path: PathKind,
    pub shape: ObjectShape,
    pub color: Rgb,
}

impl MovingObject {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, half_extents: Vec2, path: PathKind) -> Self {
        Self {
            id,
            pos,
            vel,
            half_extents,
            tracked: false,
            path,
            shape: ObjectShape::default(),
            color: Rgb::default(),
        }
    }

    /// Mark the object as the participant's tracking target
    pub fn with_tracked(mut self, tracked: bool) -> Self {
        self.tracked = tracked;
        self
    }

    pub fn with_appearance(mut self, shape: ObjectShape, color: Rgb) -> Self {
        self.shape = shape;
        self.color = color;
        self
    }

    /// Axis-aligned box overlap with another footprint centered at `pos`
    ///
    /// Touching edges are not an overlap.
    pub fn overlaps(&self, pos: Vec2, half_extents: Vec2) -> bool {
        let delta = (self.pos - pos).abs();
        let reach = self.half_extents + half_extents;
        delta.x < reach.x && delta.y < reach.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_at(pos: Vec2, half: Vec2) -> MovingObject {
        MovingObject::new(1, pos, Vec2::ZERO, half, PathKind::Bounce(BouncePath::Diagonal))
    }

    #[test]
    fn test_overlap() {
        let a = object_at(Vec2::ZERO, Vec2::splat(1.0));
        assert!(a.overlaps(Vec2::new(1.5, 0.5), Vec2::splat(1.0)));
        assert!(!a.overlaps(Vec2::new(3.0, 0.0), Vec2::splat(1.0)));
        // Exactly touching on x
        assert!(!a.overlaps(Vec2::new(2.0, 0.0), Vec2::splat(1.0)));
    }
}
