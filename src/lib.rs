//! Bounce Trial - simulation core for bouncing-object tracking trials
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bounds, placement, motion, distractors)
//! - `config`: Trial population and view configuration
//! - `settings`: Engine tuning (tick rate, speeds, placement budget)
//! - `experiment`: Multi-trial batteries with unusual-trial planning

pub mod config;
pub mod error;
pub mod experiment;
pub mod settings;
pub mod sim;

pub use config::{BouncingObjectSettings, ObjectShape, Rgb, TrialConfig, UnusualObjectSettings, ViewSpec};
pub use error::{Result, SimError};
pub use experiment::{Battery, TrialRecord, plan_unusual_trials};
pub use settings::SimSettings;

/// Simulation constants
pub mod consts {
    /// Default fixed tick rate (50 Hz)
    pub const DEFAULT_TICK_RATE_HZ: u32 = 50;

    /// World units per second for a speed multiplier of 1.0
    pub const OBJECT_BASE_SPEED: f32 = 0.6;
    /// World size of an object at scale 1.0 (32 px sprite, 100 px per unit)
    pub const FOOTPRINT_UNIT: f32 = 0.32;

    /// Rejection-sampling budget for spawn placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;
    /// Fraction of each bounds axis that spawn candidates are drawn from
    pub const SPAWN_SPAN: f32 = 0.5;

    /// Distractor dwell (seconds) required before a departure is reported
    pub const DWELL_REPORT_THRESHOLD: f32 = 1.0;
}
