//! Collision detection and response for the ball
//!
//! Two kinds of contact: the moving head circle, and the four edges of
//! the arena. Detection is pure; `tick` applies the response.

use glam::DVec2;

use super::state::{Arena, HeadCircle, Wall};

/// Result of a ball/head collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Ball center relative to head center (never zero on a hit)
    pub offset: DVec2,
    /// Unit surface normal at contact (pointing from head toward ball)
    pub normal: DVec2,
    /// Overlap depth along the normal
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            offset: DVec2::ZERO,
            normal: DVec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between the ball and the head circle
///
/// A head with zero radius is inert. Touching counts as a hit
/// (squared distance `<=` squared sum of radii).
///
/// When the centers coincide exactly the direction is undefined, so the
/// ball is pushed back the way it came (or straight up if it is stalled).
pub fn ball_head_collision(
    ball_pos: DVec2,
    ball_vel: DVec2,
    ball_radius: f64,
    head: &HeadCircle,
) -> CollisionResult {
    if !head.is_present() {
        return CollisionResult::miss();
    }

    let radii_sum = head.radius + ball_radius;
    let offset = ball_pos - head.center;
    let dist_sq = offset.length_squared();

    if dist_sq > radii_sum * radii_sum {
        return CollisionResult::miss();
    }

    if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        CollisionResult {
            hit: true,
            offset,
            normal: offset / dist,
            penetration: radii_sum - dist,
        }
    } else {
        let normal = degenerate_normal(ball_vel);
        CollisionResult {
            hit: true,
            offset: normal,
            normal,
            penetration: radii_sum,
        }
    }
}

/// Fallback contact normal for concentric ball and head
fn degenerate_normal(ball_vel: DVec2) -> DVec2 {
    let back = -ball_vel.normalize_or_zero();
    if back == DVec2::ZERO {
        // Screen space: -y is up
        DVec2::NEG_Y
    } else {
        back
    }
}

/// Reflect velocity about the line through `offset`
///
/// v' = v - 2 (v·d) / |d|² d
///
/// `offset` need not be normalized but must be non-zero.
#[inline]
pub fn reflect_velocity(velocity: DVec2, offset: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(offset) / offset.length_squared() * offset
}

/// Position just outside the head along `offset`, leaving `slack` of clearance
#[inline]
pub fn separate_from_head(head: &HeadCircle, offset: DVec2, ball_radius: f64, slack: f64) -> DVec2 {
    head.center + offset * (head.radius + ball_radius + slack) / offset.length()
}

/// Check the arena edges in fixed order: bottom, top, left, right
///
/// Returns the first edge the ball touches or crosses; only one edge is
/// reported per call.
pub fn ball_wall_collision(ball_pos: DVec2, ball_radius: f64, arena: &Arena) -> Option<Wall> {
    if ball_pos.y + ball_radius >= arena.height {
        Some(Wall::Bottom)
    } else if ball_pos.y - ball_radius <= 0.0 {
        Some(Wall::Top)
    } else if ball_pos.x - ball_radius <= 0.0 {
        Some(Wall::Left)
    } else if ball_pos.x + ball_radius >= arena.width {
        Some(Wall::Right)
    } else {
        None
    }
}
