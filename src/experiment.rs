//! Trial batteries
//!
//! A battery runs the same configuration several times. A fixed number of the
//! iterations, picked at random up front, also spawn the unusual objects.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ObjectShape, TrialConfig};
use crate::error::{Result, SimError};
use crate::settings::SimSettings;
use crate::sim::TrialSession;

/// Result of one trial iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// 1-based iteration number
    pub trial_number: u32,
    pub condition_number: u32,
    pub bounces: u32,
    /// Shape of the first unusual object, on unusual iterations only
    pub unusual_shape: Option<ObjectShape>,
    pub distractor_visible_durations: Vec<f32>,
}

/// Mark exactly `unusual` of `trials` iterations as unusual
pub fn plan_unusual_trials<R: Rng + ?Sized>(trials: u32, unusual: u32, rng: &mut R) -> Result<Vec<bool>> {
    if unusual > trials {
        return Err(SimError::invalid(format!(
            "{unusual} unusual trials requested but only {trials} trials"
        )));
    }

    let mut plan = vec![false; trials as usize];
    for index in rand::seq::index::sample(rng, trials as usize, unusual as usize) {
        plan[index] = true;
    }
    Ok(plan)
}

/// A configured multi-trial run
#[derive(Debug, Clone)]
pub struct Battery {
    config: TrialConfig,
    settings: SimSettings,
    unusual_plan: Vec<bool>,
    /// Per-iteration session seeds, drawn from the battery RNG after planning
    iteration_seeds: Vec<u64>,
}

impl Battery {
    pub fn new(config: TrialConfig, settings: SimSettings, seed: u64) -> Result<Self> {
        settings.validate()?;
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let unusual_plan = plan_unusual_trials(config.number_of_trials, config.number_of_unusual_trials, &mut rng)?;
        let iteration_seeds = (0..config.number_of_trials).map(|_| rng.random::<u64>()).collect();
        log::debug!("Battery seeded with {seed}: {} iterations", config.number_of_trials);
        Ok(Self {
            config,
            settings,
            unusual_plan,
            iteration_seeds,
        })
    }

    /// Which iterations spawn unusual objects
    pub fn unusual_plan(&self) -> &[bool] {
        &self.unusual_plan
    }

    /// Session seed of every iteration, in order
    pub fn iteration_seeds(&self) -> &[u64] {
        &self.iteration_seeds
    }

    /// Run a single iteration (0-based)
    pub fn run_iteration(&self, iteration: u32) -> Result<TrialRecord> {
        let index = iteration as usize;
        let (unusual, seed) = self
            .unusual_plan
            .get(index)
            .copied()
            .zip(self.iteration_seeds.get(index).copied())
            .ok_or_else(|| {
                SimError::invalid(format!(
                    "iteration {iteration} out of range for {} trials",
                    self.unusual_plan.len()
                ))
            })?;

        let mut session = TrialSession::start(&self.config, &self.settings, unusual, seed)?;
        let outcome = session.run_to_end();

        Ok(TrialRecord {
            trial_number: iteration + 1,
            condition_number: self.config.condition_number,
            bounces: outcome.final_bounce_count,
            unusual_shape: if unusual {
                self.config.unusual_objects.first().map(|o| o.shape)
            } else {
                None
            },
            distractor_visible_durations: outcome.distractor_visible_durations,
        })
    }

    /// Run every iteration in order; stops at the first failing iteration
    pub fn run(&self) -> Result<Vec<TrialRecord>> {
        let mut records = Vec::with_capacity(self.unusual_plan.len());
        for iteration in 0..self.config.number_of_trials {
            let record = self.run_iteration(iteration)?;
            log::info!(
                "Trial {}/{} done: {} bounces{}",
                record.trial_number,
                self.config.number_of_trials,
                record.bounces,
                if record.unusual_shape.is_some() { " (unusual)" } else { "" }
            );
            records.push(record);
        }
        Ok(records)
    }
}
