//! Platform layer
//!
//! Handles the outside world the simulation never touches:
//! - Keyboard input
//! - Frame pacing

pub mod input;
pub mod time;

pub use input::{InputSource, Key, KeyTracker, TerminalInput};
pub use time::FramePacer;
