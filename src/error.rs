//! Error types for simulation setup and configuration loading

use std::fmt;

/// Validation and contract errors raised by the simulator
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Ball radius must be positive and finite
    InvalidRadius(f64),
    /// Arena extents must be positive and finite
    InvalidArena { width: f64, height: f64 },
    /// A vector field contained NaN or infinity
    NonFinite { field: &'static str },
    /// A settings value is out of range
    InvalidSetting {
        field: &'static str,
        reason: String,
    },
    /// `step` was requested after the game already ended
    GameOver,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius(r) => write!(f, "ball radius must be positive and finite, got {r}"),
            Self::InvalidArena { width, height } => write!(
                f,
                "arena extents must be positive and finite, got {width}x{height}"
            ),
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::InvalidSetting { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
            Self::GameOver => write!(f, "simulation already reported game over"),
        }
    }
}

impl std::error::Error for SimError {}

/// Errors raised while loading settings
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(SimError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "failed to parse settings: {e}"),
            Self::Invalid(e) => write!(f, "settings rejected: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<SimError> for ConfigError {
    fn from(e: SimError) -> Self {
        Self::Invalid(e)
    }
}
