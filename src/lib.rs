//! landmark-overlay library crate.
//!
//! Positions feature sprites (eyes, nose, tongue) over faces found by an
//! external landmark detector, one camera frame at a time.

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod overlay;
pub mod render_loop;

pub use error::{Error, Result};
