//! Frame pacing
//!
//! A constant sleep after every frame, independent of how long the frame took.

use std::thread;
use std::time::Duration;

/// Sleeps a fixed delay between frames
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    delay: Duration,
}

impl FramePacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Block for the inter-frame delay
    pub fn wait(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}
