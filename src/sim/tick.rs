//! Single simulation tick
//!
//! Advances the ball by one unit timestep: integrate, resolve the head
//! collision, then act on at most one arena edge.

use super::collision::{ball_head_collision, ball_wall_collision, reflect_velocity, separate_from_head};
use super::state::{BallSimulator, GamePhase, HeadCircle, StepReport, Wall};
use crate::error::SimError;

/// Advance the simulator by one tick against this tick's head circle
///
/// # Panics
///
/// Panics if the game has already reported game over.
pub(crate) fn tick(sim: &mut BallSimulator, head: &HeadCircle) -> StepReport {
    assert!(
        sim.phase == GamePhase::Playing,
        "BallSimulator::step called after game over (tick {})",
        sim.time_ticks
    );

    let mut report = StepReport::default();
    sim.time_ticks += 1;

    // Explicit Euler, one unit step; fast balls may tunnel through the head
    sim.ball.pos += sim.ball.vel;

    // Head collision, resolved at most once per tick
    let radius = sim.ball.radius();
    let hit = ball_head_collision(sim.ball.pos, sim.ball.vel, radius, head);
    if hit.hit {
        sim.ball.vel = reflect_velocity(sim.ball.vel, hit.offset);
        sim.ball.pos = separate_from_head(head, hit.offset, radius, sim.contact_slack);
        sim.head_hits += 1;
        report.head_hit = true;
        log::debug!(
            "tick {}: head hit (penetration {:.2}), vel -> ({:.2}, {:.2})",
            sim.time_ticks,
            hit.penetration,
            sim.ball.vel.x,
            sim.ball.vel.y
        );
    }

    report.wall = check_bounds(sim);
    report.game_over = report.wall == Some(Wall::Bottom);
    if report.game_over {
        sim.phase = GamePhase::GameOver;
        log::info!("tick {}: ball reached the bottom edge, game over", sim.time_ticks);
    }

    report
}

/// Clamp and reflect off the first edge touched (bottom, top, left, right)
fn check_bounds(sim: &mut BallSimulator) -> Option<Wall> {
    let r = sim.ball.radius();
    let arena = sim.arena;
    let ball = &mut sim.ball;

    let wall = ball_wall_collision(ball.pos, r, &arena)?;
    match wall {
        // Terminal: rest on the bottom edge, velocity untouched
        Wall::Bottom => ball.pos.y = arena.height - r,
        Wall::Top => {
            ball.pos.y = r;
            ball.vel.y = -ball.vel.y;
        }
        Wall::Left => {
            ball.pos.x = r;
            ball.vel.x = -ball.vel.x;
        }
        Wall::Right => {
            ball.pos.x = arena.width - r;
            ball.vel.x = -ball.vel.x;
        }
    }
    if wall != Wall::Bottom {
        sim.wall_bounces += 1;
    }
    Some(wall)
}

impl BallSimulator {
    /// Advance one tick and return whether the game is now over
    ///
    /// # Panics
    ///
    /// Panics if called after the game has already reported game over.
    pub fn step(&mut self, head: &HeadCircle) -> bool {
        self.step_report(head).game_over
    }

    /// Like [`step`](Self::step), but returns the full tick report
    ///
    /// # Panics
    ///
    /// Panics if called after the game has already reported game over.
    pub fn step_report(&mut self, head: &HeadCircle) -> StepReport {
        tick(self, head)
    }

    /// Fallible twin of [`step_report`](Self::step_report)
    pub fn try_step(&mut self, head: &HeadCircle) -> Result<StepReport, SimError> {
        if self.phase == GamePhase::GameOver {
            return Err(SimError::GameOver);
        }
        Ok(tick(self, head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, Ball};
    use glam::DVec2;

    fn sim_with(pos: (f64, f64), vel: (f64, f64), radius: f64, bounds: (f64, f64)) -> BallSimulator {
        let ball = Ball::new(DVec2::new(pos.0, pos.1), DVec2::new(vel.0, vel.1), radius).unwrap();
        BallSimulator::new(ball, Arena::new(bounds.0, bounds.1).unwrap())
    }

    fn reference_sim() -> BallSimulator {
        sim_with((100.0, 100.0), (30.0, 30.0), 60.0, (1280.0, 720.0))
    }

    #[test]
    fn test_reference_trajectory_until_game_over() {
        let mut sim = reference_sim();
        let head = HeadCircle::absent();

        for k in 1..=18 {
            assert!(!sim.step(&head), "game over too early at tick {k}");
            let expected = 100.0 + 30.0 * k as f64;
            assert_eq!(sim.ball().pos, DVec2::new(expected, expected));
            assert_eq!(sim.ball().vel, DVec2::new(30.0, 30.0));
        }

        // 670 + 60 >= 720
        assert!(sim.step(&head));
        assert_eq!(sim.ball().pos, DVec2::new(670.0, 660.0));
        assert_eq!(sim.phase(), GamePhase::GameOver);
        assert_eq!(sim.time_ticks, 19);
    }

    #[test]
    fn test_rest_exactly_on_bottom() {
        let mut sim = sim_with((400.0, 600.0), (0.0, 47.3), 25.0, (800.0, 640.0));
        let mut game_over = false;
        while !game_over {
            game_over = sim.step(&HeadCircle::absent());
        }
        assert_eq!(sim.ball().pos.y, 640.0 - 25.0);
    }

    #[test]
    fn test_one_edge_per_tick_in_order() {
        let mut sim = sim_with((100.0, 100.0), (-30.0, -30.0), 60.0, (1280.0, 720.0));
        let head = HeadCircle::absent();

        // (70, 70): clear of every edge
        assert_eq!(sim.step_report(&head).wall, None);

        // (40, 40): top and left both touched, only top is acted on
        let report = sim.step_report(&head);
        assert_eq!(report.wall, Some(Wall::Top));
        assert_eq!(sim.ball().pos, DVec2::new(40.0, 60.0));
        assert_eq!(sim.ball().vel, DVec2::new(-30.0, 30.0));

        // (10, 90): left handled on the following tick
        let report = sim.step_report(&head);
        assert_eq!(report.wall, Some(Wall::Left));
        assert_eq!(sim.ball().pos, DVec2::new(60.0, 90.0));
        assert_eq!(sim.ball().vel, DVec2::new(30.0, 30.0));
        assert_eq!(sim.wall_bounces, 2);
    }

    #[test]
    fn test_right_edge_reflection() {
        let mut sim = sim_with((1180.0, 300.0), (45.0, 0.0), 60.0, (1280.0, 720.0));
        let report = sim.step_report(&HeadCircle::absent());
        assert_eq!(report.wall, Some(Wall::Right));
        assert_eq!(sim.ball().pos, DVec2::new(1220.0, 300.0));
        assert_eq!(sim.ball().vel, DVec2::new(-45.0, 0.0));
    }

    /// One axis of the no-obstacle motion, computed independently of the
    /// vector code path
    fn reference_axis(p: f64, v: f64, r: f64, hi: f64) -> (f64, f64) {
        let p = p + v;
        if p - r <= 0.0 {
            (r, -v)
        } else if p + r >= hi {
            (hi - r, -v)
        } else {
            (p, v)
        }
    }

    #[test]
    fn test_thirty_ticks_match_reference() {
        // Tall arena so the ball bounces off both sides without landing
        let (w, h, r) = (400.0, 10_000.0, 60.0);
        let mut sim = sim_with((100.0, 100.0), (30.0, 30.0), r, (w, h));
        let (mut x, mut vx) = (100.0, 30.0);
        let (mut y, vy) = (100.0, 30.0);
        let mut side_bounces = 0;

        for tick_no in 1..=30 {
            let report = sim.step_report(&HeadCircle::absent());
            assert!(!report.game_over);
            let (nx, nvx) = reference_axis(x, vx, r, w);
            if nvx != vx {
                side_bounces += 1;
            }
            (x, vx) = (nx, nvx);
            y += vy;
            assert_eq!(sim.ball().pos, DVec2::new(x, y), "tick {tick_no}");
            assert_eq!(sim.ball().vel, DVec2::new(vx, vy), "tick {tick_no}");
        }
        assert_eq!(sim.wall_bounces, side_bounces);
        assert!(side_bounces >= 2);
    }

    #[test]
    fn test_head_on_collision_conserves_speed() {
        // Ball falling onto a stationary head
        let mut sim = sim_with((640.0, 200.0), (0.0, 30.0), 60.0, (1280.0, 720.0));
        let head = HeadCircle::new(DVec2::new(640.0, 400.0), 90.0);
        let speed_before = sim.ball().speed();

        let mut hit = false;
        for _ in 0..10 {
            let report = sim.step_report(&head);
            if report.head_hit {
                hit = true;
                break;
            }
        }
        assert!(hit);
        assert!((sim.ball().speed() - speed_before).abs() < 1e-9);
        assert!(sim.ball().vel.y < 0.0);
        assert_eq!(sim.head_hits, 1);
    }

    #[test]
    fn test_oblique_collision_conserves_speed() {
        let mut sim = sim_with((500.0, 250.0), (17.0, 29.0), 40.0, (1280.0, 720.0));
        let head = HeadCircle::new(DVec2::new(560.0, 360.0), 80.0);
        let speed_before = sim.ball().speed();

        let report = sim.step_report(&head);
        assert!(report.head_hit);
        assert!((sim.ball().speed() - speed_before).abs() < 1e-9);
    }

    #[test]
    fn test_no_overlap_after_resolution() {
        let mut sim = sim_with((600.0, 300.0), (10.0, 20.0), 60.0, (1280.0, 720.0));
        let head = HeadCircle::new(DVec2::new(620.0, 360.0), 100.0);

        let report = sim.step_report(&head);
        assert!(report.head_hit);
        let dist = (sim.ball().pos - head.center).length();
        assert!(dist >= head.radius + sim.ball().radius() - 1e-9);
        // Slack keeps the next tick's check clear
        assert!(dist > head.radius + sim.ball().radius());
    }

    #[test]
    fn test_concentric_collision_is_finite() {
        let mut sim = sim_with((600.0, 330.0), (0.0, 30.0), 40.0, (1280.0, 720.0));
        let head = HeadCircle::new(DVec2::new(600.0, 360.0), 80.0);

        let report = sim.step_report(&head);
        assert!(report.head_hit);
        let ball = sim.ball();
        assert!(ball.pos.is_finite() && ball.vel.is_finite());
        // Pushed back up the way it came, velocity reversed
        assert!((ball.pos - DVec2::new(600.0, 360.0 - 121.0)).length() < 1e-9);
        assert!((ball.vel - DVec2::new(0.0, -30.0)).length() < 1e-9);
    }

    #[test]
    fn test_stalled_ball_is_deterministic() {
        let mut sim = sim_with((300.0, 300.0), (0.0, 0.0), 50.0, (1280.0, 720.0));
        for _ in 0..100 {
            assert!(!sim.step(&HeadCircle::absent()));
        }
        assert_eq!(sim.ball().pos, DVec2::new(300.0, 300.0));
    }

    #[test]
    #[should_panic(expected = "after game over")]
    fn test_step_after_game_over_panics() {
        let mut sim = sim_with((100.0, 650.0), (0.0, 30.0), 60.0, (1280.0, 720.0));
        assert!(sim.step(&HeadCircle::absent()));
        sim.step(&HeadCircle::absent());
    }

    #[test]
    #[should_panic(expected = "after game over")]
    fn test_tick_after_game_over_panics() {
        let mut sim = sim_with((100.0, 650.0), (0.0, 30.0), 60.0, (1280.0, 720.0));
        assert!(tick(&mut sim, &HeadCircle::absent()).game_over);
        tick(&mut sim, &HeadCircle::absent());
    }

    #[test]
    fn test_try_step_after_game_over() {
        let mut sim = sim_with((100.0, 650.0), (0.0, 30.0), 60.0, (1280.0, 720.0));
        assert!(sim.try_step(&HeadCircle::absent()).unwrap().game_over);
        let pos = sim.ball().pos;
        assert_eq!(sim.try_step(&HeadCircle::absent()), Err(SimError::GameOver));
        assert_eq!(sim.ball().pos, pos);
    }

    #[test]
    fn test_collision_can_push_ball_to_bottom() {
        // Ball below the head center is pushed down past the bottom edge
        let mut sim = sim_with((640.0, 600.0), (0.0, -10.0), 60.0, (1280.0, 720.0));
        let head = HeadCircle::new(DVec2::new(640.0, 500.0), 100.0);
        let report = sim.step_report(&head);
        assert!(report.head_hit);
        assert!(report.game_over);
        assert_eq!(sim.ball().pos.y, 660.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn zero_radius_head_never_collides(
                x in 61.0f64..1219.0,
                y in 61.0f64..659.0,
                vx in -40.0f64..40.0,
                vy in -40.0f64..40.0,
                hx in 0.0f64..1280.0,
                hy in 0.0f64..720.0,
            ) {
                let mut sim = sim_with((x, y), (vx, vy), 60.0, (1280.0, 720.0));
                let head = HeadCircle::new(DVec2::new(hx, hy), 0.0);
                for _ in 0..200 {
                    let report = sim.step_report(&head);
                    prop_assert!(!report.head_hit);
                    if report.game_over {
                        break;
                    }
                }
                prop_assert_eq!(sim.head_hits, 0);
            }

            #[test]
            fn collision_preserves_speed_and_separates(
                angle in 0.0f64..std::f64::consts::TAU,
                dist in 0.0f64..139.0,
                vx in -40.0f64..40.0,
                vy in -40.0f64..40.0,
            ) {
                let head = HeadCircle::new(DVec2::new(640.0, 360.0), 80.0);
                let start = head.center + DVec2::from_angle(angle) * dist - DVec2::new(vx, vy);
                let mut sim = sim_with((start.x, start.y), (vx, vy), 60.0, (1_000_000.0, 1_000_000.0));
                let speed = sim.ball().speed();

                let report = sim.step_report(&head);
                prop_assert!(report.head_hit);
                prop_assert!((sim.ball().speed() - speed).abs() < 1e-6);
                let d = (sim.ball().pos - head.center).length();
                prop_assert!(d >= head.radius + sim.ball().radius() - 1e-6);
            }

            #[test]
            fn game_over_rests_on_bottom(
                x in 61.0f64..1219.0,
                y in 61.0f64..659.0,
                vx in -40.0f64..40.0,
                vy in 1.0f64..40.0,
            ) {
                let mut sim = sim_with((x, y), (vx, vy), 60.0, (1280.0, 720.0));
                let head = HeadCircle::absent();
                let mut over = false;
                for _ in 0..10_000 {
                    if sim.step(&head) {
                        over = true;
                        break;
                    }
                    let p = sim.ball().pos;
                    prop_assert!(p.x >= 60.0 - 40.0 && p.x <= 1220.0 + 40.0);
                    prop_assert!(p.y >= 60.0);
                }
                prop_assert!(over);
                prop_assert_eq!(sim.ball().pos.y, 660.0);
            }
        }
    }
}
