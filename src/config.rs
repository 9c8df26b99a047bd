//! Game configuration
//!
//! One immutable value handed to every constructor at session start. Every
//! field has a default, so a JSON document only needs the fields it changes.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::grid_extent;

/// An sRGB color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
}

/// Colors used by the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub paddle: Rgb,
    /// Ball color until it destroys its first block
    pub ball: Rgb,
    pub text: Rgb,
    /// Each block picks one of these at random
    pub blocks: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            paddle: Rgb::BLACK,
            ball: Rgb::BLACK,
            text: Rgb::BLACK,
            blocks: vec![Rgb::BLUE, Rgb::RED, Rgb::GREEN, Rgb::YELLOW, Rgb::ORANGE],
        }
    }
}

/// Paths of the three sound cues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundPaths {
    pub block_hit: PathBuf,
    pub paddle_hit: PathBuf,
    pub game_over: PathBuf,
}

impl Default for SoundPaths {
    fn default() -> Self {
        Self {
            block_hit: PathBuf::from(BLOCK_HIT_SOUND),
            paddle_hit: PathBuf::from(PADDLE_HIT_SOUND),
            game_over: PathBuf::from(GAME_OVER_SOUND),
        }
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play field ===
    pub window_width: f32,
    pub window_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_step: f32,

    // === Ball ===
    /// Side of the ball's square bounding box
    pub ball_size: f32,
    pub ball_dx: f32,
    pub ball_dy: f32,
    /// Rebound steering factor `K` in `dx = K * (hit_fraction - 0.5)`
    pub paddle_steering: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub rows: u32,
    pub bricks_per_row: u32,

    // === Session ===
    pub lives: u8,
    /// Keep the ball's score when a life is lost (the classic game resets it)
    pub carry_score_on_reset: bool,
    pub frame_delay_ms: u64,

    pub palette: Palette,
    pub sounds: SoundPaths,
    /// Cue volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,

            ball_size: BALL_SIZE,
            ball_dx: BALL_DX,
            ball_dy: BALL_DY,
            paddle_steering: PADDLE_STEERING,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            rows: ROWS_OF_BRICKS,
            bricks_per_row: BRICKS_PER_ROW,

            lives: STARTING_LIVES,
            carry_score_on_reset: false,
            frame_delay_ms: FRAME_DELAY_MS,

            palette: Palette::default(),
            sounds: SoundPaths::default(),
            volume: 1.0,
        }
    }
}

/// Reasons a configuration cannot run a session
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A dimension that must be strictly positive is not
    NonPositive { field: &'static str, value: f32 },
    /// The paddle cannot fit horizontally inside the window
    PaddleTooWide { paddle: f32, window: f32 },
    /// Paddle step must not be negative
    NegativePaddleStep(f32),
    /// `rows * bricks_per_row` does not fit in a `u32`
    GridTooLarge { rows: u32, bricks_per_row: u32 },
    /// The brick grid spills past the window edges
    GridOutsideWindow { right: f32, bottom: f32 },
    /// No block colors to pick from
    EmptyBlockPalette,
    /// Zero lives would end the session before the first frame
    NoLives,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::PaddleTooWide { paddle, window } => {
                write!(f, "paddle width {paddle} does not fit in window width {window}")
            }
            ConfigError::NegativePaddleStep(step) => {
                write!(f, "paddle_step must not be negative, got {step}")
            }
            ConfigError::GridTooLarge {
                rows,
                bricks_per_row,
            } => write!(f, "{rows} rows of {bricks_per_row} bricks is too many"),
            ConfigError::GridOutsideWindow { right, bottom } => {
                write!(f, "brick grid reaches ({right}, {bottom}), outside the window")
            }
            ConfigError::EmptyBlockPalette => write!(f, "block palette is empty"),
            ConfigError::NoLives => write!(f, "lives must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the geometry can uphold the session invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.paddle_width > self.window_width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_width,
                window: self.window_width,
            });
        }
        if self.paddle_step.is_nan() || self.paddle_step < 0.0 {
            return Err(ConfigError::NegativePaddleStep(self.paddle_step));
        }
        if self.rows.checked_mul(self.bricks_per_row).is_none() {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                bricks_per_row: self.bricks_per_row,
            });
        }
        if let Some(corner) = grid_extent(self)
            && (corner.x > self.window_width || corner.y > self.window_height)
        {
            return Err(ConfigError::GridOutsideWindow {
                right: corner.x,
                bottom: corner.y,
            });
        }
        if self.palette.blocks.is_empty() {
            return Err(ConfigError::EmptyBlockPalette);
        }
        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }

    /// Rightmost legal paddle x
    pub fn paddle_max_x(&self) -> f32 {
        self.window_width - self.paddle_width
    }

    /// Effective cue volume
    pub fn effective_volume(&self) -> f32 {
        self.volume.clamp(0.0, 1.0)
    }
}
