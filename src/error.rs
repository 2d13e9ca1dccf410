//! Error types for trial setup and execution.

/// Errors produced while configuring or starting a trial.
///
/// None of these are recoverable inside the tick loop; they surface before a
/// trial iteration starts (or when a bouncing object cannot be placed) and the
/// caller decides whether to relax the configuration or abort.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Rejection sampling ran out of attempts without finding a free spot.
    #[error("no room found to place object after {attempts} attempts")]
    NoRoomFound { attempts: u32 },

    /// The population needs a tracked object but none is flagged.
    #[error("trial requires a tracked object but none of the bouncing objects is tracked")]
    MissingTrackedObject,

    /// Reading a configuration file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document is not valid JSON for the expected type.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
