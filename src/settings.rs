//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to the
//! reference configuration when missing.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SimError};
use crate::sim::{Arena, Ball, BallSimulator};
use crate::tracker::{DetectorBackend, HeadTracker};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f64,
    pub arena_height: f64,

    // === Ball ===
    pub ball_radius: f64,
    pub ball_start_pos: (f64, f64),
    pub ball_start_vel: (f64, f64),
    /// Clearance left between ball and head after a collision
    pub contact_slack: f64,

    // === Head tracking ===
    pub detector: DetectorBackend,
    /// Minimum confidence for the DNN backend
    pub dnn_confidence_threshold: f32,
    /// Corner drift per missed frame, as a fraction of box size
    pub miss_shrink: f64,
    /// Box size multiplier per missed frame
    pub miss_grow: f64,
    /// Flip detections horizontally (mirror view)
    pub mirror: bool,

    // === Headless run ===
    pub seed: u64,
    /// Chance a synthetic frame has no detection
    pub dropout: f64,
    /// Stop after this many frames even if the ball is still up
    pub max_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_start_pos: BALL_START_POS,
            ball_start_vel: BALL_START_VEL,
            contact_slack: CONTACT_SLACK,

            detector: DetectorBackend::Cascade,
            dnn_confidence_threshold: DNN_CONFIDENCE_THRESHOLD,
            miss_shrink: MISS_SHRINK,
            miss_grow: MISS_GROW,
            mirror: true,

            seed: DEFAULT_SEED,
            dropout: DEFAULT_DROPOUT,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every value by building the pieces that consume it
    pub fn validate(&self) -> Result<(), SimError> {
        self.simulator()?;
        self.tracker()?;
        if !(0.0..=1.0).contains(&self.dnn_confidence_threshold) {
            return Err(SimError::InvalidSetting {
                field: "dnn_confidence_threshold",
                reason: format!("must be within [0, 1], got {}", self.dnn_confidence_threshold),
            });
        }
        if !(0.0..=1.0).contains(&self.dropout) {
            return Err(SimError::InvalidSetting {
                field: "dropout",
                reason: format!("must be within [0, 1], got {}", self.dropout),
            });
        }
        Ok(())
    }

    pub fn arena(&self) -> Result<Arena, SimError> {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Fresh simulator with the configured ball and arena
    pub fn simulator(&self) -> Result<BallSimulator, SimError> {
        let (px, py) = self.ball_start_pos;
        let (vx, vy) = self.ball_start_vel;
        let ball = Ball::new(DVec2::new(px, py), DVec2::new(vx, vy), self.ball_radius)?;
        BallSimulator::new(ball, self.arena()?).with_contact_slack(self.contact_slack)
    }

    /// Fresh head tracker with the configured miss policy
    pub fn tracker(&self) -> Result<HeadTracker, SimError> {
        HeadTracker::new(self.miss_shrink, self.miss_grow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        let sim = settings.simulator().unwrap();
        assert_eq!(sim.ball().pos, DVec2::new(100.0, 100.0));
        assert_eq!(sim.ball().vel, DVec2::new(30.0, 30.0));
        assert_eq!(sim.ball().radius(), 60.0);
        assert_eq!(sim.arena().size(), DVec2::new(1280.0, 720.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "ball_radius": 40.0, "detector": "Dnn" }"#).unwrap();
        assert_eq!(settings.ball_radius, 40.0);
        assert_eq!(settings.detector, DetectorBackend::Dnn);
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert_eq!(settings.max_frames, DEFAULT_MAX_FRAMES);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.seed = 99;
        settings.mirror = false;
        let parsed = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad = [
            r#"{ "ball_radius": 0.0 }"#,
            r#"{ "arena_height": -720.0 }"#,
            r#"{ "contact_slack": -1.0 }"#,
            r#"{ "miss_grow": 0.0 }"#,
            r#"{ "dropout": 1.5 }"#,
            r#"{ "dnn_confidence_threshold": 2.0 }"#,
        ];
        for json in bad {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}: {err}");
        }
    }

    #[test]
    fn test_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/head-bounce.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
