//! Brick Breaker - a single-screen brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, session state)
//! - `config`: Immutable game configuration passed to every constructor
//! - `renderer`: Drawing surface abstraction and the terminal backend
//! - `platform`: Keyboard input and frame pacing
//! - `audio`: Sound cues loaded from WAV assets
//! - `game`: The frame loop tying the services to the simulation

pub mod audio;
pub mod config;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig, Palette, Rgb};
pub use game::{Game, Outcome};

/// Reference configuration values
pub mod consts {
    /// Play field dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Horizontal step per frame while a direction key is held
    pub const PADDLE_STEP: f32 = 10.0;

    /// Ball bounding box (drawn as an ellipse inside it)
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_DX: f32 = 10.0;
    pub const BALL_DY: f32 = -10.0;
    /// dx after a paddle hit is `PADDLE_STEERING * (hit_fraction - 0.5)`
    pub const PADDLE_STEERING: f32 = 20.0;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 65.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const ROWS_OF_BRICKS: u32 = 6;
    pub const BRICKS_PER_ROW: u32 = 10;

    /// Session
    pub const STARTING_LIVES: u8 = 3;
    /// Fixed sleep between frames
    pub const FRAME_DELAY_MS: u64 = 30;

    /// Sound assets, relative to the working directory
    pub const BLOCK_HIT_SOUND: &str = "assets/block_hit.wav";
    pub const PADDLE_HIT_SOUND: &str = "assets/paddle_hit.wav";
    pub const GAME_OVER_SOUND: &str = "assets/game_over.wav";
}
