//! Deterministic simulation module
//!
//! All trial motion lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (one `Pcg32` per trial run)
//! - Stable iteration order (by object ID)
//! - No rendering, file or UI dependencies

pub mod bounds;
pub mod collision;
pub mod distractor;
pub mod placement;
pub mod session;
pub mod state;
pub mod tick;
pub mod velocity;

pub use bounds::SimulationBounds;
pub use collision::{Axis, WallHit, advance, reflect_axis, wall_penetration};
pub use distractor::{Distractor, DistractorPath, DistractorScheduler, DwellTracker, ScheduledSpawn};
pub use session::{DistractorReport, TrialOutcome, TrialSession};
pub use state::{MovingObject, PathKind, TrialPhase};
pub use tick::MotionEngine;
pub use velocity::{BouncePath, steer_toward_center};
