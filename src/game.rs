//! Per-frame game loop
//!
//! Glues a face locator, the head tracker and the ball simulator:
//! locate → (mirror) → track → step.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::settings::Settings;
use crate::sim::{Ball, BallSimulator, HeadCircle, StepReport, Wall};
use crate::tracker::{FaceBox, FaceLocator, HeadTracker};

/// Everything a renderer needs after one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub frame: u64,
    pub head: HeadCircle,
    pub ball: Ball,
    pub report: StepReport,
}

/// End-of-run summary
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSummary {
    pub frames: u64,
    pub head_hits: u32,
    pub wall_bounces: u32,
    /// False if the run stopped at the frame limit
    pub game_over: bool,
}

/// One game: a simulator and a tracker, stepped once per camera frame
#[derive(Debug, Clone)]
pub struct Game {
    sim: BallSimulator,
    tracker: HeadTracker,
    /// Frame width for mirroring, `None` to keep detections as-is
    mirror_width: Option<i32>,
    frames: u64,
}

impl Game {
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let mirror_width = settings.mirror.then(|| settings.arena_width.round() as i32);
        Ok(Self {
            sim: settings.simulator()?,
            tracker: settings.tracker()?,
            mirror_width,
            frames: 0,
        })
    }

    pub fn simulator(&self) -> &BallSimulator {
        &self.sim
    }

    pub fn tracker(&self) -> &HeadTracker {
        &self.tracker
    }

    pub fn is_over(&self) -> bool {
        self.sim.is_game_over()
    }

    /// Run one frame with this frame's detection
    pub fn frame(&mut self, detection: Option<FaceBox>) -> Result<FrameOutcome, SimError> {
        if self.is_over() {
            return Err(SimError::GameOver);
        }

        let detection = match self.mirror_width {
            Some(w) => detection.map(|face| face.mirrored(w)),
            None => detection,
        };
        let head = self.tracker.update(detection);
        let report = self.sim.try_step(&head)?;
        self.frames += 1;

        if report.head_hit {
            log::info!("frame {}: header! ({} so far)", self.frames, self.sim.head_hits);
        }
        match report.wall {
            Some(Wall::Bottom) | None => {}
            Some(wall) => log::debug!("frame {}: bounced off {:?} wall", self.frames, wall),
        }

        Ok(FrameOutcome {
            frame: self.frames,
            head,
            ball: *self.sim.ball(),
            report,
        })
    }

    /// Pull frames from `locator` until game over or `max_frames` frames
    pub fn run<L: FaceLocator + ?Sized>(&mut self, locator: &mut L, max_frames: u64) -> GameSummary {
        while !self.is_over() && self.frames < max_frames {
            let detection = locator.locate();
            if detection.is_none() {
                log::trace!("frame {}: no face", self.frames + 1);
            }
            // The loop condition already guards game over
            if self.frame(detection).is_err() {
                break;
            }
        }

        if !self.is_over() {
            log::warn!("stopped after {} frames without a game over", self.frames);
        }
        self.summary()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            frames: self.frames,
            head_hits: self.sim.head_hits,
            wall_bounces: self.sim.wall_bounces,
            game_over: self.is_over(),
        }
    }
}
