//! Deterministic ball simulation
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One unit timestep per tick, no sub-stepping
//! - `f64` state throughout
//! - No image processing, rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_head_collision, ball_wall_collision, reflect_velocity};
pub use state::{Arena, Ball, BallSimulator, GamePhase, HeadCircle, StepReport, Wall};
