//! Trial configuration
//!
//! Describes the object populations, view and duration of one trial battery.
//! Produced by the experiment design tooling as JSON.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::sim::{BouncePath, DistractorPath, SimulationBounds};

/// Sprite shapes available to trial objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectShape {
    #[default]
    Cross,
    Spider,
    SpiderTwo,
    XShape,
    OShape,
    LShape,
    TShape,
    Basketball,
    Ladybug,
    Gorilla,
}

impl ObjectShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectShape::Cross => "Cross",
            ObjectShape::Spider => "Spider",
            ObjectShape::SpiderTwo => "SpiderTwo",
            ObjectShape::XShape => "XShape",
            ObjectShape::OShape => "OShape",
            ObjectShape::LShape => "LShape",
            ObjectShape::TShape => "TShape",
            ObjectShape::Basketball => "Basketball",
            ObjectShape::Ladybug => "Ladybug",
            ObjectShape::Gorilla => "Gorilla",
        }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Camera-like description of the visible area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Width / height
    pub aspect_ratio: f32,
    /// Full visible height in world units
    pub vertical_extent: f32,
    #[serde(default)]
    pub center: Vec2,
}

impl Default for ViewSpec {
    fn default() -> Self {
        // 16:9 screen, orthographic size 5
        Self {
            aspect_ratio: 16.0 / 9.0,
            vertical_extent: 10.0,
            center: Vec2::ZERO,
        }
    }
}

impl ViewSpec {
    pub fn bounds(&self) -> Result<SimulationBounds> {
        SimulationBounds::resolve(self.aspect_ratio, self.vertical_extent, self.center)
    }
}

/// One population of bouncing objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BouncingObjectSettings {
    pub speed: f32,
    pub scale: f32,
    pub number_to_spawn: u32,
    /// Bounces of these objects are counted
    #[serde(default)]
    pub tracked: bool,
    #[serde(default)]
    pub color: Rgb,
    #[serde(default)]
    pub shape: ObjectShape,
    #[serde(default)]
    pub path: BouncePath,
}

impl Default for BouncingObjectSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            scale: 1.0,
            number_to_spawn: 1,
            tracked: false,
            color: Rgb::new(255, 255, 255),
            shape: ObjectShape::Cross,
            path: BouncePath::Diagonal,
        }
    }
}

/// One unusual object spawned partway through a trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusualObjectSettings {
    pub speed: f32,
    pub scale: f32,
    /// Seconds after trial start
    pub spawn_time: f32,
    #[serde(default)]
    pub color: Rgb,
    #[serde(default)]
    pub shape: ObjectShape,
    #[serde(default)]
    pub path: DistractorPath,
}

impl Default for UnusualObjectSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            scale: 1.0,
            spawn_time: 0.0,
            color: Rgb::new(128, 128, 128),
            shape: ObjectShape::Gorilla,
            path: DistractorPath::Horizontal,
        }
    }
}

fn default_requires_tracked() -> bool {
    true
}

fn default_trials() -> u32 {
    1
}

/// Complete configuration for a trial battery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialConfig {
    #[serde(default)]
    pub condition_number: u32,
    #[serde(default = "default_trials")]
    pub number_of_trials: u32,
    #[serde(default)]
    pub number_of_unusual_trials: u32,
    /// Seconds each trial iteration runs
    pub trial_duration: f32,
    #[serde(default)]
    pub view: ViewSpec,
    pub bouncing_objects: Vec<BouncingObjectSettings>,
    #[serde(default)]
    pub unusual_objects: Vec<UnusualObjectSettings>,
    /// Whether starting a trial needs a tracked bouncing object
    #[serde(default = "default_requires_tracked")]
    pub requires_tracked: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            condition_number: 0,
            number_of_trials: 1,
            number_of_unusual_trials: 0,
            trial_duration: 10.0,
            view: ViewSpec::default(),
            bouncing_objects: Vec::new(),
            unusual_objects: Vec::new(),
            requires_tracked: true,
        }
    }
}

fn check_non_negative(value: f32, what: &str) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{what} must be non-negative, got {value}")))
    }
}

impl TrialConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded trial config from {} ({} bouncing populations, {} unusual objects)",
            path.as_ref().display(),
            config.bouncing_objects.len(),
            config.unusual_objects.len()
        );
        Ok(config)
    }

    /// First tracked population (shown to the participant before the trial)
    pub fn tracked_object(&self) -> Option<&BouncingObjectSettings> {
        self.bouncing_objects
            .iter()
            .find(|o| o.tracked && o.number_to_spawn > 0)
    }

    /// Total number of bouncing objects spawned per trial
    pub fn population_size(&self) -> u32 {
        self.bouncing_objects.iter().map(|o| o.number_to_spawn).sum()
    }

    /// Check everything needed to start a trial
    pub fn validate(&self) -> Result<()> {
        self.view.bounds()?;

        if !(self.trial_duration.is_finite() && self.trial_duration > 0.0) {
            return Err(SimError::invalid(format!(
                "trial duration must be positive, got {}",
                self.trial_duration
            )));
        }
        if self.number_of_unusual_trials > self.number_of_trials {
            return Err(SimError::invalid(format!(
                "{} unusual trials requested but only {} trials",
                self.number_of_unusual_trials, self.number_of_trials
            )));
        }

        for (i, o) in self.bouncing_objects.iter().enumerate() {
            check_non_negative(o.speed, &format!("bouncing object {i} speed"))?;
            check_non_negative(o.scale, &format!("bouncing object {i} scale"))?;
        }
        for (i, o) in self.unusual_objects.iter().enumerate() {
            check_non_negative(o.speed, &format!("unusual object {i} speed"))?;
            check_non_negative(o.scale, &format!("unusual object {i} scale"))?;
            check_non_negative(o.spawn_time, &format!("unusual object {i} spawn time"))?;
        }

        if self.requires_tracked {
            if self.population_size() == 0 {
                return Err(SimError::invalid(
                    "no bouncing objects configured but a tracked object is required",
                ));
            }
            if self.tracked_object().is_none() {
                return Err(SimError::MissingTrackedObject);
            }
        }
        Ok(())
    }
}
