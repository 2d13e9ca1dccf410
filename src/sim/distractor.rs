//! Unusual (distractor) objects
//!
//! Distractors enter from outside the visible area partway through a trial and
//! cross it. Spawn times come from a list sorted by delay that the session
//! drains once per tick; there is no background timer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::SimulationBounds;
use super::collision::{Axis, reflect_axis};
use super::state::{MovingObject, PathKind};
use crate::config::UnusualObjectSettings;
use crate::settings::SimSettings;

/// Path a distractor takes across the trial area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistractorPath {
    Vertical,
    #[default]
    Horizontal,
    /// Crosses horizontally while bouncing off the top and bottom walls
    Diagonal,
}

/// Spawn points just past the left/right edges, in half-size units from center
const HORIZONTAL_SPAWNS: [Vec2; 6] = [
    Vec2::new(-1.1, 0.5),
    Vec2::new(1.1, 0.5),
    Vec2::new(-1.1, 0.0),
    Vec2::new(1.1, 0.0),
    Vec2::new(-1.1, -0.5),
    Vec2::new(1.1, -0.5),
];

/// Spawn points just past the top/bottom edges, in half-size units from center
const VERTICAL_SPAWNS: [Vec2; 6] = [
    Vec2::new(-0.5, 1.1),
    Vec2::new(0.0, 1.1),
    Vec2::new(0.5, 1.1),
    Vec2::new(-0.5, -1.1),
    Vec2::new(0.0, -1.1),
    Vec2::new(0.5, -1.1),
];

impl DistractorPath {
    /// Edge spawn palette for this path
    pub fn spawn_points(self) -> &'static [Vec2] {
        match self {
            DistractorPath::Horizontal | DistractorPath::Diagonal => &HORIZONTAL_SPAWNS,
            DistractorPath::Vertical => &VERTICAL_SPAWNS,
        }
    }

    /// Unit direction heading to the opposite side from `offset` (spawn - center)
    pub fn direction_from(self, offset: Vec2) -> Vec2 {
        let toward_x = if offset.x < 0.0 { 1.0 } else { -1.0 };
        let toward_y = if offset.y > 0.0 { -1.0 } else { 1.0 };
        let raw = match self {
            DistractorPath::Horizontal => Vec2::new(toward_x, 0.0),
            DistractorPath::Vertical => Vec2::new(0.0, toward_y),
            DistractorPath::Diagonal => Vec2::new(toward_x, toward_y),
        };
        raw.normalize_or_zero()
    }

    /// Whether this path reflects off the top and bottom walls
    #[inline]
    pub fn bounces_vertically(self) -> bool {
        self == DistractorPath::Diagonal
    }
}

/// Time a distractor has spent inside the visible area
///
/// The first departure after more than `threshold` seconds of dwell latches the
/// accumulated time; later entries and exits never change the latched value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DwellTracker {
    pub dwell: f32,
    pub reported: Option<f32>,
}

impl DwellTracker {
    /// Record one tick; returns the latched value on the tick it latches
    pub fn update(&mut self, inside: bool, dt: f32, threshold: f32) -> Option<f32> {
        if inside {
            self.dwell += dt;
            None
        } else if self.reported.is_none() && self.dwell > threshold {
            self.reported = Some(self.dwell);
            self.reported
        } else {
            None
        }
    }
}

/// A spawned distractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distractor {
    pub object: MovingObject,
    pub path: DistractorPath,
    pub visibility: DwellTracker,
    /// Position of this entry in the configuration list
    pub config_index: usize,
}

impl Distractor {
    /// Place and launch a distractor from its configuration
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        config_index: usize,
        settings: &UnusualObjectSettings,
        bounds: &SimulationBounds,
        footprint_unit: f32,
        base_speed: f32,
        rng: &mut R,
    ) -> Self {
        let path = settings.path;
        let palette = path.spawn_points();
        let edge = palette[rng.random_range(0..palette.len())];
        let center = bounds.center();
        let pos = center + bounds.half_size() * edge;
        let vel = path.direction_from(pos - center) * settings.speed * base_speed;
        let half_extents = Vec2::splat(settings.scale * footprint_unit / 2.0);

        let object = MovingObject::new(id, pos, vel, half_extents, PathKind::Distractor(path))
            .with_appearance(settings.shape, settings.color);

        Self {
            object,
            path,
            visibility: DwellTracker::default(),
            config_index,
        }
    }

    /// Advance one tick: move, reflect off top/bottom for diagonal paths, track dwell
    ///
    /// Distractor bounces are never counted. Returns the latched visible
    /// duration on the tick it latches.
    pub fn advance(&mut self, bounds: &SimulationBounds, dt: f32, dwell_threshold: f32) -> Option<f32> {
        self.object.pos += self.object.vel * dt;
        if self.path.bounces_vertically() {
            reflect_axis(&mut self.object, bounds, Axis::Y);
        }
        let inside = bounds.contains(self.object.pos);
        self.visibility.update(inside, dt, dwell_threshold)
    }
}

/// A configured distractor waiting for its spawn tick
#[derive(Debug, Clone)]
pub struct ScheduledSpawn {
    /// First tick index on which the distractor exists
    pub spawn_tick: u64,
    pub config_index: usize,
}

/// Pending distractor spawns, ordered by spawn tick
#[derive(Debug, Clone, Default)]
pub struct DistractorScheduler {
    pending: Vec<ScheduledSpawn>,
    cursor: usize,
}

impl DistractorScheduler {
    /// Schedule every entry on the tick grid of `settings`; equal spawn ticks
    /// keep configuration order
    pub fn new(entries: &[UnusualObjectSettings], settings: &SimSettings) -> Self {
        let mut pending: Vec<ScheduledSpawn> = entries
            .iter()
            .enumerate()
            .map(|(config_index, s)| ScheduledSpawn {
                spawn_tick: settings.secs_to_ticks(s.spawn_time),
                config_index,
            })
            .collect();
        pending.sort_by_key(|s| s.spawn_tick);
        Self { pending, cursor: 0 }
    }

    /// Entries due once `completed_ticks` ticks have run, each returned once
    pub fn drain_due(&mut self, completed_ticks: u64) -> &[ScheduledSpawn] {
        let start = self.cursor;
        while self
            .pending
            .get(self.cursor)
            .is_some_and(|s| s.spawn_tick <= completed_ticks)
        {
            self.cursor += 1;
        }
        &self.pending[start..self.cursor]
    }

    pub fn remaining(&self) -> usize {
        self.pending.len() - self.cursor
    }

    /// Drop all pending spawns
    pub fn clear(&mut self) {
        self.pending.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObjectShape;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bounds() -> SimulationBounds {
        SimulationBounds::from_corners(Vec2::new(-10.0, -5.0), Vec2::new(10.0, 5.0))
    }

    fn settings(path: DistractorPath, spawn_time: f32) -> UnusualObjectSettings {
        UnusualObjectSettings {
            speed: 2.0,
            scale: 1.0,
            spawn_time,
            path,
            shape: ObjectShape::Gorilla,
            ..Default::default()
        }
    }

    #[test]
    fn test_dwell_latches_once() {
        let mut dwell = DwellTracker::default();
        for _ in 0..3 {
            assert_eq!(dwell.update(true, 0.5, 1.0), None);
        }
        assert_eq!(dwell.update(false, 0.5, 1.0), Some(1.5));
        // Re-enter and leave again
        dwell.update(true, 0.5, 1.0);
        dwell.update(true, 0.5, 1.0);
        assert_eq!(dwell.update(false, 0.5, 1.0), None);
        assert_eq!(dwell.reported, Some(1.5));
    }

    #[test]
    fn test_dwell_short_visit_not_reported() {
        let mut dwell = DwellTracker::default();
        dwell.update(true, 0.5, 1.0);
        dwell.update(true, 0.5, 1.0);
        // Exactly 1.0 is not more than the threshold
        assert_eq!(dwell.update(false, 0.5, 1.0), None);
        assert_eq!(dwell.reported, None);
        // Coming back pushes the accumulated dwell over
        dwell.update(true, 0.5, 1.0);
        assert_eq!(dwell.update(false, 0.5, 1.0), Some(1.5));
    }

    #[test]
    fn test_horizontal_heads_to_opposite_side() {
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..30 {
            let d = Distractor::spawn(1, 0, &settings(DistractorPath::Horizontal, 0.0), &bounds(), 0.32, 0.6, &mut rng);
            assert!(d.object.pos.x.abs() > 10.0);
            assert_eq!(d.object.vel.y, 0.0);
            assert!(d.object.vel.x * d.object.pos.x < 0.0);
            assert!((d.object.vel.length() - 1.2).abs() < 1e-5);
            assert!(!d.object.tracked);
        }
    }

    #[test]
    fn test_vertical_heads_to_opposite_side() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..30 {
            let d = Distractor::spawn(1, 0, &settings(DistractorPath::Vertical, 0.0), &bounds(), 0.32, 0.6, &mut rng);
            assert!(d.object.pos.y.abs() > 5.0);
            assert_eq!(d.object.vel.x, 0.0);
            assert!(d.object.vel.y * d.object.pos.y < 0.0);
        }
    }

    #[test]
    fn test_diagonal_direction_normalized() {
        let dir = DistractorPath::Diagonal.direction_from(Vec2::new(11.0, 2.5));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x < 0.0 && dir.y < 0.0);
        // Spawned on the horizontal center line moves up
        let dir = DistractorPath::Diagonal.direction_from(Vec2::new(-11.0, 0.0));
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn test_diagonal_reflects_off_top_without_x_bounce() {
        let mut d = Distractor::spawn(1, 0, &settings(DistractorPath::Diagonal, 0.0), &bounds(), 0.32, 0.6, &mut Pcg32::seed_from_u64(1));
        d.object.pos = Vec2::new(0.0, 4.7);
        d.object.vel = Vec2::new(1.0, 1.0);
        d.advance(&bounds(), 0.5, 1.0);
        assert_eq!(d.object.vel, Vec2::new(1.0, -1.0));
        assert!((d.object.pos.y - (5.0 - 0.16)).abs() < 1e-6);

        // Leaves through the side wall without reflecting
        d.object.pos = Vec2::new(9.95, 0.0);
        d.advance(&bounds(), 0.5, 1.0);
        assert_eq!(d.object.vel.x, 1.0);
        assert!(d.object.pos.x > 10.0);
    }

    #[test]
    fn test_horizontal_never_reflects() {
        let mut d = Distractor::spawn(1, 0, &settings(DistractorPath::Horizontal, 0.0), &bounds(), 0.32, 0.6, &mut Pcg32::seed_from_u64(1));
        d.object.pos = Vec2::new(0.0, 4.95);
        d.object.vel = Vec2::new(0.0, 1.0);
        d.advance(&bounds(), 0.5, 1.0);
        assert_eq!(d.object.vel, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_scheduler_orders_and_drains_once() {
        let entries = [
            settings(DistractorPath::Horizontal, 3.0),
            settings(DistractorPath::Vertical, 1.0),
            settings(DistractorPath::Diagonal, 3.0),
        ];
        let mut scheduler = DistractorScheduler::new(&entries, &SimSettings::default());
        assert!(scheduler.drain_due(25).is_empty());

        let due: Vec<usize> = scheduler.drain_due(50).iter().map(|s| s.config_index).collect();
        assert_eq!(due, vec![1]);
        assert!(scheduler.drain_due(100).is_empty());

        let due: Vec<usize> = scheduler.drain_due(250).iter().map(|s| s.config_index).collect();
        assert_eq!(due, vec![0, 2]);
        assert_eq!(scheduler.remaining(), 0);
        assert!(scheduler.drain_due(500).is_empty());
    }

    #[test]
    fn test_scheduler_short_delays_land_on_tick_grid() {
        let entries = [
            settings(DistractorPath::Horizontal, 0.1),
            settings(DistractorPath::Horizontal, 0.3),
            settings(DistractorPath::Horizontal, 2.2),
        ];
        let mut scheduler = DistractorScheduler::new(&entries, &SimSettings::default());
        assert!(scheduler.drain_due(4).is_empty());
        assert_eq!(scheduler.drain_due(5).len(), 1);
        assert!(scheduler.drain_due(14).is_empty());
        assert_eq!(scheduler.drain_due(15).len(), 1);
        assert!(scheduler.drain_due(109).is_empty());
        assert_eq!(scheduler.drain_due(110).len(), 1);
    }

    #[test]
    fn test_scheduler_clear() {
        let mut scheduler = DistractorScheduler::new(&[settings(DistractorPath::Horizontal, 1.0)], &SimSettings::default());
        scheduler.clear();
        assert_eq!(scheduler.remaining(), 0);
        assert!(scheduler.drain_due(u64::MAX).is_empty());
    }
}
