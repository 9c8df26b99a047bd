//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable block scan order
//! - No rendering, audio or terminal dependencies

pub mod collision;
pub mod layout;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BallStep, first_overlapping, hit_fraction, steer_dx};
pub use layout::{build_blocks, grid_extent};
pub use rect::Rect;
pub use state::{Ball, Block, GameEvent, GamePhase, GameState, Paddle, RngState};
pub use tick::{FrameInput, tick};
