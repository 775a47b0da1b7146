//! Face and landmark detection boundary.
//!
//! The detector itself is external; this module defines the contract it
//! must satisfy ([`LandmarkSource`]) and a replay implementation
//! ([`ScriptedLandmarkSource`]) for the CLI and tests.

mod error;
mod scripted;
mod source;
mod types;

pub use error::DetectionError;
pub use scripted::{DetectionScript, ScriptedLandmarkSource};
pub use source::{detect, try_detect, LandmarkSource};
pub use types::{FaceObservation, LandmarkGroup};
