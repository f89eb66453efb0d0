//! Synthetic face locator for headless runs
//!
//! A face box drifts around the frame on a seeded random walk. Some frames
//! drop the detection entirely and some add a spurious low-confidence
//! candidate, so both the miss extrapolation and the backend selection
//! policy get exercised without a camera.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::locator::{DetectorBackend, Detection, FaceBox, FaceLocator};

/// Chance that a frame also contains a spurious candidate
const SPURIOUS_CHANCE: f64 = 0.2;
/// Largest per-frame speed change (pixels)
const MAX_JITTER: i32 = 3;
/// Speed cap (pixels per frame)
const MAX_SPEED: i32 = 12;

/// Seeded random-walk head
#[derive(Debug, Clone)]
pub struct WanderingHead {
    rng: Pcg32,
    frame_width: i32,
    frame_height: i32,
    face: FaceBox,
    vel: (i32, i32),
    dropout: f64,
    backend: DetectorBackend,
    threshold: f32,
}

impl WanderingHead {
    /// Start a head centered in the lower half of the frame
    ///
    /// `dropout` is clamped into `[0, 1]`.
    pub fn new(
        seed: u64,
        frame_width: i32,
        frame_height: i32,
        dropout: f64,
        backend: DetectorBackend,
        threshold: f32,
    ) -> Self {
        let size = (frame_height / 3).max(1);
        let face = FaceBox::new(
            (frame_width - size) / 2,
            frame_height - size - frame_height / 8,
            size,
            size,
        );
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frame_width,
            frame_height,
            face,
            vel: (0, 0),
            dropout: dropout.clamp(0.0, 1.0),
            backend,
            threshold,
        }
    }

    /// Current true face position (ignores dropouts)
    pub fn face(&self) -> FaceBox {
        self.face
    }

    fn advance(&mut self) {
        let jitter = |rng: &mut Pcg32| rng.random_range(-MAX_JITTER..=MAX_JITTER);
        self.vel.0 = (self.vel.0 + jitter(&mut self.rng)).clamp(-MAX_SPEED, MAX_SPEED);
        self.vel.1 = (self.vel.1 + jitter(&mut self.rng)).clamp(-MAX_SPEED, MAX_SPEED);

        let max_x = (self.frame_width - self.face.width).max(0);
        let max_y = (self.frame_height - self.face.height).max(0);

        self.face.x += self.vel.0;
        if self.face.x < 0 || self.face.x > max_x {
            self.face.x = self.face.x.clamp(0, max_x);
            self.vel.0 = -self.vel.0;
        }
        self.face.y += self.vel.1;
        if self.face.y < 0 || self.face.y > max_y {
            self.face.y = self.face.y.clamp(0, max_y);
            self.vel.1 = -self.vel.1;
        }
    }

    fn candidates(&mut self) -> Vec<Detection> {
        let mut out = vec![Detection {
            bbox: self.face,
            confidence: self.rng.random_range(0.75..1.0),
        }];
        if self.rng.random_bool(SPURIOUS_CHANCE) {
            let size = (self.face.width / 2).max(1);
            out.push(Detection {
                bbox: FaceBox::new(
                    self.rng.random_range(0..=(self.frame_width - size).max(0)),
                    self.rng.random_range(0..=(self.frame_height - size).max(0)),
                    size,
                    size,
                ),
                confidence: self.rng.random_range(0.2..0.6),
            });
        }
        out
    }
}

impl FaceLocator for WanderingHead {
    fn locate(&mut self) -> Option<FaceBox> {
        self.advance();
        if self.rng.random_bool(self.dropout) {
            return None;
        }
        let candidates = self.candidates();
        self.backend.select(&candidates, self.threshold)
    }
}
