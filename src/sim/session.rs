//! Trial session controller
//!
//! Runs one trial iteration: spawns the configured populations, ticks the
//! motion engine until the duration elapses, then tears everything down and
//! reports the counters.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::SimulationBounds;
use super::distractor::{Distractor, DistractorScheduler};
use super::placement;
use super::state::{MovingObject, PathKind, TrialPhase};
use super::tick::MotionEngine;
use super::velocity;
use crate::config::{TrialConfig, UnusualObjectSettings};
use crate::error::{Result, SimError};
use crate::settings::SimSettings;

/// Visibility report for one spawned distractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistractorReport {
    pub object_id: u32,
    pub config_index: usize,
    /// Latched visible duration (first departure after meaningful dwell)
    pub visible_duration: Option<f32>,
    /// Total time spent inside the bounds
    pub dwell: f32,
}

/// Counters collected when a trial ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub final_bounce_count: u32,
    /// Latched durations, in spawn order
    pub distractor_visible_durations: Vec<f32>,
    pub distractors: Vec<DistractorReport>,
    pub ticks: u64,
}

/// One running trial iteration
#[derive(Debug)]
pub struct TrialSession {
    settings: SimSettings,
    engine: MotionEngine,
    scheduler: DistractorScheduler,
    unusual: Vec<UnusualObjectSettings>,
    rng: Pcg32,
    time_ticks: u64,
    duration_ticks: u64,
    phase: TrialPhase,
    outcome: Option<TrialOutcome>,
    next_id: u32,
}

impl TrialSession {
    /// Validate the configuration and spawn all bouncing objects
    ///
    /// Distractors are scheduled only when `with_distractors` is set.
    pub fn start(config: &TrialConfig, settings: &SimSettings, with_distractors: bool, seed: u64) -> Result<Self> {
        settings.validate()?;
        config.validate()?;

        let bounds = config.view.bounds()?;
        let unusual = if with_distractors {
            config.unusual_objects.clone()
        } else {
            Vec::new()
        };

        let mut session = Self {
            settings: settings.clone(),
            engine: MotionEngine::new(bounds, settings.dwell_report_threshold),
            scheduler: DistractorScheduler::new(&unusual, settings),
            unusual,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            duration_ticks: settings.secs_to_ticks(config.trial_duration),
            phase: TrialPhase::Running,
            outcome: None,
            next_id: 1,
        };
        session.spawn_bouncing_objects(config)?;

        log::info!(
            "Trial started: seed={}, {} objects, {} distractors scheduled, {} ticks",
            seed,
            session.engine.objects().len(),
            session.scheduler.remaining(),
            session.duration_ticks
        );
        Ok(session)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_bouncing_objects(&mut self, config: &TrialConfig) -> Result<()> {
        let bounds = *self.engine.bounds();
        let center = bounds.center();

        for population in &config.bouncing_objects {
            let footprint = Vec2::splat(population.scale * self.settings.footprint_unit);
            if population.number_to_spawn > 0 && !bounds.fits(footprint / 2.0) {
                return Err(SimError::invalid(format!(
                    "object footprint {footprint:?} does not fit in bounds {:?}",
                    bounds.size()
                )));
            }

            for _ in 0..population.number_to_spawn {
                let pos = placement::sample(
                    &bounds,
                    footprint,
                    self.engine.objects(),
                    self.settings.max_placement_attempts,
                    self.settings.spawn_span,
                    &mut self.rng,
                )?;
                let vel = velocity::assign(
                    population.path,
                    population.speed,
                    self.settings.base_speed,
                    population.tracked,
                    pos,
                    center,
                    &mut self.rng,
                );
                let id = self.next_entity_id();
                let object = MovingObject::new(id, pos, vel, footprint / 2.0, PathKind::Bounce(population.path))
                    .with_tracked(population.tracked)
                    .with_appearance(population.shape, population.color);
                self.engine.add_object(object);
            }
        }
        Ok(())
    }

    fn spawn_due_distractors(&mut self) {
        let due: Vec<usize> = self
            .scheduler
            .drain_due(self.time_ticks)
            .iter()
            .map(|s| s.config_index)
            .collect();

        for config_index in due {
            let id = self.next_entity_id();
            let distractor = Distractor::spawn(
                id,
                config_index,
                &self.unusual[config_index],
                self.engine.bounds(),
                self.settings.footprint_unit,
                self.settings.base_speed,
                &mut self.rng,
            );
            log::debug!(
                "Unusual object {} ({}) spawned at {:?} on tick {}",
                id,
                distractor.object.shape.as_str(),
                distractor.object.pos,
                self.time_ticks
            );
            self.engine.add_distractor(distractor);
        }
    }

    /// Advance the trial by one fixed tick
    ///
    /// Ends the trial automatically once the configured duration has elapsed.
    /// Ticking a finished trial does nothing.
    pub fn tick(&mut self) -> TrialPhase {
        if self.phase == TrialPhase::Finished {
            return self.phase;
        }

        self.spawn_due_distractors();
        self.engine.step(self.settings.dt());
        self.time_ticks += 1;

        if self.time_ticks >= self.duration_ticks {
            self.stop();
        }
        self.phase
    }

    /// Tick until the trial ends and return its outcome
    pub fn run_to_end(&mut self) -> TrialOutcome {
        while self.tick() == TrialPhase::Running {}
        self.stop()
    }

    /// End the trial now: destroy every object, drop pending spawns, report
    ///
    /// Calling `stop` again returns the same outcome.
    pub fn stop(&mut self) -> TrialOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let distractors: Vec<DistractorReport> = self
            .engine
            .clear()
            .into_iter()
            .map(|d| DistractorReport {
                object_id: d.object.id,
                config_index: d.config_index,
                visible_duration: d.visibility.reported,
                dwell: d.visibility.dwell,
            })
            .collect();
        self.scheduler.clear();

        let outcome = TrialOutcome {
            final_bounce_count: self.engine.bounce_count(),
            distractor_visible_durations: distractors.iter().filter_map(|d| d.visible_duration).collect(),
            distractors,
            ticks: self.time_ticks,
        };
        self.phase = TrialPhase::Finished;
        self.outcome = Some(outcome.clone());

        log::info!(
            "Trial finished after {:.2}s: {} bounces, {} distractors",
            self.elapsed_secs(),
            outcome.final_bounce_count,
            outcome.distractors.len()
        );
        outcome
    }

    #[inline]
    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn bounce_count(&self) -> u32 {
        self.engine.bounce_count()
    }

    pub fn bounds(&self) -> &SimulationBounds {
        self.engine.bounds()
    }

    pub fn objects(&self) -> &[MovingObject] {
        self.engine.objects()
    }

    pub fn distractors(&self) -> &[Distractor] {
        self.engine.distractors()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.settings.ticks_to_secs(self.time_ticks)
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}
