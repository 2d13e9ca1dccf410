//! Visible simulation area
//!
//! The trial area is an axis-aligned rectangle derived from a camera-like view:
//! the vertical extent is the full visible height and the width follows from
//! the aspect ratio.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Axis-aligned rectangle objects bounce inside of
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl SimulationBounds {
    /// Build bounds from a view aspect ratio (width / height) and vertical extent
    pub fn resolve(aspect_ratio: f32, vertical_extent: f32, center: Vec2) -> Result<Self> {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(SimError::invalid(format!(
                "aspect ratio must be positive, got {aspect_ratio}"
            )));
        }
        if !(vertical_extent.is_finite() && vertical_extent > 0.0) {
            return Err(SimError::invalid(format!(
                "vertical extent must be positive, got {vertical_extent}"
            )));
        }
        if !center.is_finite() {
            return Err(SimError::invalid("view center must be finite"));
        }

        let half = Vec2::new(vertical_extent * aspect_ratio, vertical_extent) / 2.0;
        Ok(Self {
            min: center - half,
            max: center + half,
        })
    }

    /// Build bounds directly from corners (used by tests and callers with a fixed area)
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size() / 2.0
    }

    /// Strict point containment (points on the edge are outside)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    /// Whether a box with the given half extents fits entirely inside
    pub fn fits(&self, half_extents: Vec2) -> bool {
        let half = self.half_size();
        half_extents.x <= half.x && half_extents.y <= half.y
    }

    /// Sub-rectangle covering the middle `span` fraction of each axis
    pub fn inset(&self, span: f32) -> Self {
        let center = self.center();
        let half = self.half_size() * span;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_centered() {
        let bounds = SimulationBounds::resolve(2.0, 10.0, Vec2::ZERO).unwrap();
        assert_eq!(bounds.min, Vec2::new(-10.0, -5.0));
        assert_eq!(bounds.max, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_resolve_offset_center() {
        let bounds = SimulationBounds::resolve(1.0, 4.0, Vec2::new(3.0, -1.0)).unwrap();
        assert_eq!(bounds.min, Vec2::new(1.0, -3.0));
        assert_eq!(bounds.max, Vec2::new(5.0, 1.0));
        assert_eq!(bounds.center(), Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_resolve_rejects_non_positive() {
        assert!(matches!(
            SimulationBounds::resolve(0.0, 10.0, Vec2::ZERO),
            Err(SimError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            SimulationBounds::resolve(1.5, -2.0, Vec2::ZERO),
            Err(SimError::InvalidConfiguration { .. })
        ));
        assert!(SimulationBounds::resolve(f32::NAN, 2.0, Vec2::ZERO).is_err());
    }

    #[test]
    fn test_contains_is_strict() {
        let bounds = SimulationBounds::from_corners(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(bounds.contains(Vec2::ZERO));
        assert!(!bounds.contains(Vec2::new(1.0, 0.0)));
        assert!(!bounds.contains(Vec2::new(0.0, -1.0)));
        assert!(!bounds.contains(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_inset_half() {
        let bounds = SimulationBounds::from_corners(Vec2::new(-10.0, -5.0), Vec2::new(10.0, 5.0));
        let inner = bounds.inset(0.5);
        assert_eq!(inner.min, Vec2::new(-5.0, -2.5));
        assert_eq!(inner.max, Vec2::new(5.0, 2.5));
    }
}
