//! Head Bounce - bounce a simulated ball off your own head
//!
//! Core modules:
//! - `sim`: Deterministic ball simulation (integration, bounds, head collision)
//! - `tracker`: Face locator seam and head-circle extrapolation
//! - `game`: Per-frame loop gluing the locator, tracker and simulator
//! - `settings`: Data-driven configuration
//! - `error`: Validation and configuration errors

pub mod error;
pub mod game;
pub mod settings;
pub mod sim;
pub mod tracker;

pub use error::{ConfigError, SimError};
pub use game::{FrameOutcome, Game, GameSummary};
pub use settings::Settings;
pub use sim::{Ball, BallSimulator, GamePhase, HeadCircle, StepReport, Wall};
pub use tracker::{DetectorBackend, FaceBox, FaceLocator, HeadTracker};

/// Game configuration constants (reference configuration)
pub mod consts {
    /// Arena dimensions (camera capture size, pixels)
    pub const ARENA_WIDTH: f64 = 1280.0;
    pub const ARENA_HEIGHT: f64 = 720.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 60.0;
    pub const BALL_START_POS: (f64, f64) = (100.0, 100.0);
    pub const BALL_START_VEL: (f64, f64) = (30.0, 30.0);

    /// Extra gap left between ball and head after a collision (pixels)
    pub const CONTACT_SLACK: f64 = 1.0;

    /// Head box extrapolation on a missed detection
    pub const MISS_SHRINK: f64 = 0.005;
    pub const MISS_GROW: f64 = 1.01;

    /// Minimum DNN detection confidence
    pub const DNN_CONFIDENCE_THRESHOLD: f32 = 0.7;

    /// Headless driver defaults
    pub const DEFAULT_SEED: u64 = 0x5EED;
    pub const DEFAULT_MAX_FRAMES: u64 = 3600;
    pub const DEFAULT_DROPOUT: f64 = 0.1;
}

/// True if every component of the vector is finite
#[inline]
pub fn is_finite_vec(v: glam::DVec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
