//! Spawn placement by bounded rejection sampling
//!
//! Candidates come from the middle of the trial area so objects don't start
//! against a wall, and are rejected while they overlap anything already placed.

use glam::Vec2;
use rand::Rng;

use super::bounds::SimulationBounds;
use super::state::MovingObject;
use crate::error::{Result, SimError};

/// Find a starting position whose footprint overlaps none of `existing`
///
/// `span` is the fraction of each bounds axis candidates are drawn from,
/// centered on the bounds center. Gives up with [`SimError::NoRoomFound`]
/// after `max_attempts` rejected candidates.
pub fn sample<R: Rng + ?Sized>(
    bounds: &SimulationBounds,
    footprint: Vec2,
    existing: &[MovingObject],
    max_attempts: u32,
    span: f32,
    rng: &mut R,
) -> Result<Vec2> {
    let area = bounds.inset(span);
    let half = footprint / 2.0;

    for _ in 0..max_attempts {
        let candidate = Vec2::new(
            rng.random_range(area.min.x..=area.max.x),
            rng.random_range(area.min.y..=area.max.y),
        );
        if !existing.iter().any(|other| other.overlaps(candidate, half)) {
            return Ok(candidate);
        }
    }

    log::warn!(
        "Placement failed: {} attempts, footprint {:?}, {} objects already placed",
        max_attempts,
        footprint,
        existing.len()
    );
    Err(SimError::NoRoomFound {
        attempts: max_attempts,
    })
}
