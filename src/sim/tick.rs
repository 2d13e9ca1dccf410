//! Fixed timestep motion engine
//!
//! Owns every live object of a trial and the tracked-bounce counter. One call
//! to [`MotionEngine::step`] advances all objects by exactly one tick.

use super::bounds::SimulationBounds;
use super::collision::advance;
use super::distractor::Distractor;
use super::state::MovingObject;

/// Moves objects and counts tracked bounces
#[derive(Debug, Clone)]
pub struct MotionEngine {
    bounds: SimulationBounds,
    /// Bouncing objects (sorted by id for determinism)
    objects: Vec<MovingObject>,
    /// Spawned distractors, in spawn order
    distractors: Vec<Distractor>,
    bounces: u32,
    dwell_threshold: f32,
}

impl MotionEngine {
    pub fn new(bounds: SimulationBounds, dwell_threshold: f32) -> Self {
        Self {
            bounds,
            objects: Vec::new(),
            distractors: Vec::new(),
            bounces: 0,
            dwell_threshold,
        }
    }

    #[inline]
    pub fn bounds(&self) -> &SimulationBounds {
        &self.bounds
    }

    pub fn objects(&self) -> &[MovingObject] {
        &self.objects
    }

    pub fn distractors(&self) -> &[Distractor] {
        &self.distractors
    }

    /// Number of wall reflections by tracked objects so far
    #[inline]
    pub fn bounce_count(&self) -> u32 {
        self.bounces
    }

    pub fn reset_bounces(&mut self) {
        self.bounces = 0;
    }

    pub fn add_object(&mut self, object: MovingObject) {
        self.objects.push(object);
        self.objects.sort_by_key(|o| o.id);
    }

    pub fn add_distractor(&mut self, distractor: Distractor) {
        self.distractors.push(distractor);
    }

    /// Advance every object by `dt`
    ///
    /// All bouncing objects are moved and checked before distractors, and the
    /// bounce counter is only final for this tick once the call returns.
    /// Latched distractor durations are kept on each distractor's tracker.
    pub fn step(&mut self, dt: f32) {
        for object in &mut self.objects {
            let reflections = advance(object, &self.bounds, dt);
            if object.tracked && reflections > 0 {
                self.bounces += reflections;
                log::debug!("Tracked object {} bounced, total {}", object.id, self.bounces);
            }
        }

        for distractor in &mut self.distractors {
            if let Some(seconds) = distractor.advance(&self.bounds, dt, self.dwell_threshold) {
                log::info!(
                    "Unusual object {} displayed for {:.3} seconds",
                    distractor.object.id,
                    seconds
                );
            }
        }
    }

    /// Destroy every object; returns the distractors that were live
    pub fn clear(&mut self) -> Vec<Distractor> {
        self.objects.clear();
        std::mem::take(&mut self.distractors)
    }
}
