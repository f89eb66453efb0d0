//! Head circle tracking
//!
//! Converts per-frame face boxes into the obstacle circle the simulation
//! collides against. When the locator loses the face, the previous box is
//! kept but drifts up-left and grows a little each frame, so the obstacle
//! lingers and widens to cover where the head may have moved.

use glam::DVec2;

use super::locator::FaceBox;
use crate::consts::{MISS_GROW, MISS_SHRINK};
use crate::error::SimError;
use crate::sim::HeadCircle;

/// Tracks the last known head box across frames
#[derive(Debug, Clone)]
pub struct HeadTracker {
    last: Option<FaceBox>,
    misses: u32,
    /// Fraction of the box size the corner moves up-left per miss
    shrink: f64,
    /// Size multiplier per miss
    grow: f64,
}

impl Default for HeadTracker {
    fn default() -> Self {
        Self {
            last: None,
            misses: 0,
            shrink: MISS_SHRINK,
            grow: MISS_GROW,
        }
    }
}

impl HeadTracker {
    pub fn new(shrink: f64, grow: f64) -> Result<Self, SimError> {
        if !(shrink.is_finite() && shrink >= 0.0) {
            return Err(SimError::InvalidSetting {
                field: "miss_shrink",
                reason: format!("must be finite and >= 0, got {shrink}"),
            });
        }
        if !(grow.is_finite() && grow > 0.0) {
            return Err(SimError::InvalidSetting {
                field: "miss_grow",
                reason: format!("must be finite and > 0, got {grow}"),
            });
        }
        Ok(Self {
            shrink,
            grow,
            ..Self::default()
        })
    }

    /// Feed this frame's detection and get the obstacle circle for the tick
    pub fn update(&mut self, detection: Option<FaceBox>) -> HeadCircle {
        match detection {
            Some(face) => {
                if self.misses > 0 {
                    log::debug!("head reacquired after {} missed frames", self.misses);
                }
                self.last = Some(face);
                self.misses = 0;
            }
            None => {
                if let Some(face) = self.last {
                    self.last = Some(self.extrapolate(face));
                    self.misses = self.misses.saturating_add(1);
                }
            }
        }
        self.circle()
    }

    /// Current obstacle circle (radius 0 until the first detection)
    pub fn circle(&self) -> HeadCircle {
        match self.last {
            Some(face) => circle_for(&face),
            None => HeadCircle::absent(),
        }
    }

    /// Last known (possibly extrapolated) box
    pub fn last_box(&self) -> Option<FaceBox> {
        self.last
    }

    /// Consecutive frames without a detection
    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// One miss step; sizes truncate toward zero after every step
    ///
    /// A long enough run of misses pins the box at the `i32` limits
    /// instead of wrapping.
    fn extrapolate(&self, face: FaceBox) -> FaceBox {
        let w = face.width as f64;
        let h = face.height as f64;
        FaceBox {
            x: face.x.saturating_sub((w * self.shrink) as i32),
            y: face.y.saturating_sub((h * self.shrink) as i32),
            width: (w * self.grow) as i32,
            height: (h * self.grow) as i32,
        }
    }
}

/// Circle enclosing a face box: box center, radius half the longer side
pub fn circle_for(face: &FaceBox) -> HeadCircle {
    let cx = face.x as i64 + face.width as i64 / 2;
    let cy = face.y as i64 + face.height as i64 / 2;
    let radius = face.width.max(face.height).max(0) / 2;
    HeadCircle::new(DVec2::new(cx as f64, cy as f64), radius as f64)
}
