//! Simulation state types
//!
//! Everything the ball simulation owns across ticks lives here.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::is_finite_vec;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball is in flight
    Playing,
    /// Ball reached the bottom edge (terminal)
    GameOver,
}

/// Arena boundary the ball was reflected off (or landed on)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Bottom,
    Top,
    Left,
    Right,
}

/// The ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Fixed at construction
    radius: f64,
}

impl Ball {
    /// Create a ball, rejecting a non-positive radius or non-finite vectors
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Result<Self, SimError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        if !is_finite_vec(pos) {
            return Err(SimError::NonFinite { field: "ball position" });
        }
        if !is_finite_vec(vel) {
            return Err(SimError::NonFinite { field: "ball velocity" });
        }
        Ok(Self { pos, vel, radius })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current speed (length of velocity)
    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// Playable rectangle, origin at the top-left corner, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Result<Self, SimError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(ok(width) && ok(height)) {
            return Err(SimError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    /// Extent as a vector (width, height)
    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Obstacle circle for one tick, derived from the tracked head
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadCircle {
    pub center: DVec2,
    /// 0 means no head has been observed yet
    pub radius: f64,
}

impl HeadCircle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The "no head yet" circle: never collides
    pub fn absent() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.radius > 0.0
    }
}

/// What happened during a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepReport {
    pub game_over: bool,
    /// Ball was reflected off the head this tick
    pub head_hit: bool,
    /// Boundary acted on this tick (at most one)
    pub wall: Option<Wall>,
}

/// Single-ball simulator: owns the ball, arena and game phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSimulator {
    pub(crate) ball: Ball,
    pub(crate) arena: Arena,
    pub(crate) phase: GamePhase,
    /// Gap added beyond touching distance when pushing the ball off the head
    pub(crate) contact_slack: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub head_hits: u32,
    pub wall_bounces: u32,
}

impl BallSimulator {
    /// Create a simulator in the `Playing` phase
    pub fn new(ball: Ball, arena: Arena) -> Self {
        Self {
            ball,
            arena,
            phase: GamePhase::Playing,
            contact_slack: CONTACT_SLACK,
            time_ticks: 0,
            head_hits: 0,
            wall_bounces: 0,
        }
    }

    /// Override the post-collision gap (must be finite and non-negative)
    pub fn with_contact_slack(mut self, slack: f64) -> Result<Self, SimError> {
        if !(slack.is_finite() && slack >= 0.0) {
            return Err(SimError::InvalidSetting {
                field: "contact_slack",
                reason: format!("must be finite and >= 0, got {slack}"),
            });
        }
        self.contact_slack = slack;
        Ok(self)
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn contact_slack(&self) -> f64 {
        self.contact_slack
    }
}
