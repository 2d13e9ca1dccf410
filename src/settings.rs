//! Simulation engine settings
//!
//! Tuning that stays fixed across a whole experiment. Loaded from JSON next to
//! the trial configuration; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Engine tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Fixed ticks per second
    pub tick_rate_hz: u32,
    /// World units per second at speed 1.0
    pub base_speed: f32,
    /// World size of an object at scale 1.0
    pub footprint_unit: f32,
    /// Rejection-sampling budget per placed object
    pub max_placement_attempts: u32,
    /// Fraction of each axis spawn candidates are drawn from
    pub spawn_span: f32,
    /// Seconds a distractor must be visible before its departure is reported
    pub dwell_report_threshold: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            base_speed: OBJECT_BASE_SPEED,
            footprint_unit: FOOTPRINT_UNIT,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            spawn_span: SPAWN_SPAN,
            dwell_report_threshold: DWELL_REPORT_THRESHOLD,
        }
    }
}

impl SimSettings {
    /// Fixed timestep in seconds
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }

    /// Seconds elapsed after `ticks` ticks
    #[inline]
    pub fn ticks_to_secs(&self, ticks: u64) -> f64 {
        ticks as f64 / f64::from(self.tick_rate_hz)
    }

    /// Number of ticks needed to cover `secs` (rounded up)
    ///
    /// Products within f32 precision of a whole tick snap to it, so a decimal
    /// delay such as 0.3 s lands on tick 15 rather than 16.
    pub fn secs_to_ticks(&self, secs: f32) -> u64 {
        let ticks = f64::from(secs) * f64::from(self.tick_rate_hz);
        let nearest = ticks.round();
        let tolerance = nearest.abs() * f64::from(f32::EPSILON) * 4.0;
        if (ticks - nearest).abs() <= tolerance {
            nearest.max(0.0) as u64
        } else {
            ticks.ceil().max(0.0) as u64
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_hz == 0 {
            return Err(SimError::invalid("tick rate must be at least 1 Hz"));
        }
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(SimError::invalid(format!(
                "base speed must be positive, got {}",
                self.base_speed
            )));
        }
        if !(self.footprint_unit.is_finite() && self.footprint_unit > 0.0) {
            return Err(SimError::invalid(format!(
                "footprint unit must be positive, got {}",
                self.footprint_unit
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(SimError::invalid("placement needs at least one attempt"));
        }
        if !(self.spawn_span > 0.0 && self.spawn_span <= 1.0) {
            return Err(SimError::invalid(format!(
                "spawn span must be in (0, 1], got {}",
                self.spawn_span
            )));
        }
        if !(self.dwell_report_threshold.is_finite() && self.dwell_report_threshold >= 0.0) {
            return Err(SimError::invalid("dwell report threshold must be non-negative"));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded simulation settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default simulation settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }
}
