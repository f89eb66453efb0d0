//! Head tracking
//!
//! Face locator backends plug in behind [`FaceLocator`]; [`HeadTracker`]
//! turns their per-frame boxes into the obstacle circle for the simulation.

pub mod head;
pub mod locator;
pub mod wander;

pub use head::{HeadTracker, circle_for};
pub use locator::{
    DetectorBackend, Detection, FaceBox, FaceLocator, ScriptedLocator, largest_face, most_confident,
};
pub use wander::WanderingHead;
