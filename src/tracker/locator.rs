//! Face locator seam
//!
//! Backends (cascade classifier, DNN detector, synthetic) implement
//! [`FaceLocator`]. Image processing itself is out of scope; this module
//! only holds the box type and the policies for picking one face out of
//! several candidates.

use serde::{Deserialize, Serialize};

/// Axis-aligned face box in image pixels (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Box area (as i64 so large boxes can't overflow)
    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Flip horizontally inside a frame of the given width
    ///
    /// Frames are mirrored before display so the game feels like a mirror;
    /// detections made on the raw frame must be flipped to match.
    pub fn mirrored(&self, frame_width: i32) -> Self {
        let x = frame_width as i64 - self.x as i64 - self.width as i64;
        Self {
            x: x.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            ..*self
        }
    }
}

/// A candidate face with detector confidence (DNN backend)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: FaceBox,
    /// 0-1
    pub confidence: f32,
}

/// Which face detection backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DetectorBackend {
    /// Classical Haar cascade: every candidate counts, largest wins
    #[default]
    Cascade,
    /// DNN detector: candidates below the confidence threshold are dropped
    Dnn,
}

impl DetectorBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorBackend::Cascade => "Cascade",
            DetectorBackend::Dnn => "Dnn",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cascade" | "haar" => Some(DetectorBackend::Cascade),
            "dnn" => Some(DetectorBackend::Dnn),
            _ => None,
        }
    }

    /// Pick the face this backend would report from raw candidates
    pub fn select(&self, candidates: &[Detection], threshold: f32) -> Option<FaceBox> {
        match self {
            DetectorBackend::Cascade => {
                let boxes: Vec<FaceBox> = candidates.iter().map(|d| d.bbox).collect();
                largest_face(&boxes)
            }
            DetectorBackend::Dnn => most_confident(candidates, threshold),
        }
    }
}

/// Source of per-frame face detections
///
/// One call per captured frame. Implementors own their frame source; the
/// game loop borrows the locator for its whole run.
pub trait FaceLocator {
    /// Most prominent face in the next frame, or `None` if nothing was found
    fn locate(&mut self) -> Option<FaceBox>;
}

/// Largest-area box; the first one wins ties
pub fn largest_face(faces: &[FaceBox]) -> Option<FaceBox> {
    let mut best: Option<FaceBox> = None;
    for face in faces {
        match best {
            Some(b) if face.area() <= b.area() => {}
            _ => best = Some(*face),
        }
    }
    best
}

/// Highest-confidence box at or above `threshold`; the first one wins ties
pub fn most_confident(detections: &[Detection], threshold: f32) -> Option<FaceBox> {
    let mut best: Option<&Detection> = None;
    for det in detections.iter().filter(|d| d.confidence >= threshold) {
        match best {
            Some(b) if det.confidence <= b.confidence => {}
            _ => best = Some(det),
        }
    }
    best.map(|d| d.bbox)
}

/// Replays a fixed list of detections, then reports misses forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedLocator {
    frames: std::collections::VecDeque<Option<FaceBox>>,
}

impl ScriptedLocator {
    pub fn new(frames: impl IntoIterator<Item = Option<FaceBox>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FaceLocator for ScriptedLocator {
    fn locate(&mut self) -> Option<FaceBox> {
        self.frames.pop_front().flatten()
    }
}
