//! Game state and core simulation types
//!
//! Everything a session needs to resume from a snapshot lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::build_blocks;
use super::rect::Rect;
use crate::config::{GameConfig, Rgb};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen until the pause key is pressed again
    Paused,
    /// Lives exhausted
    GameOver,
    /// Every block destroyed
    Won,
}

impl GamePhase {
    /// `GameOver` and `Won` end the session
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Something that happened during a frame, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball rebounded off the paddle
    PaddleHit,
    /// Ball destroyed a block of this color
    BlockDestroyed { color: Rgb },
    /// Ball left through the bottom edge
    BallLost { lives_left: u8 },
    GameOver,
    Won,
}

/// A static destructible obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub color: Rgb,
}

impl Block {
    pub fn new(x: f32, y: f32, config: &GameConfig, color: Rgb) -> Self {
        Self {
            rect: Rect::new(x, y, config.brick_width, config.brick_height),
            color,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    /// Centered horizontally, one paddle height above the bottom edge
    pub fn new(config: &GameConfig) -> Self {
        let x = (config.window_width - config.paddle_width) / 2.0;
        let y = config.window_height - config.paddle_height * 2.0;
        Self {
            rect: Rect::new(x, y, config.paddle_width, config.paddle_height),
        }
    }

    /// Shift by one step per held direction, never leaving the window
    pub fn move_by(&mut self, left: bool, right: bool, config: &GameConfig) {
        let mut dx = 0.0;
        if right {
            dx += config.paddle_step;
        }
        if left {
            dx -= config.paddle_step;
        }
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(0.0, config.paddle_max_x());
    }

    pub fn x(&self) -> f32 {
        self.rect.pos.x
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Square bounding box
    pub rect: Rect,
    /// Displacement per frame
    pub vel: Vec2,
    /// Base color, then the color of the last block destroyed
    pub color: Rgb,
    /// Blocks destroyed by this ball
    pub score: u32,
}

impl Ball {
    /// Top-left corner at the center of the play field, moving up and right
    pub fn new(config: &GameConfig) -> Self {
        let x = (config.window_width / 2.0).floor();
        let y = (config.window_height / 2.0).floor();
        Self {
            rect: Rect::new(x, y, config.ball_size, config.ball_size),
            vel: Vec2::new(config.ball_dx, config.ball_dy),
            color: config.palette.ball,
            score: 0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the block colors were drawn from
    pub rng_state: RngState,
    pub lives: u8,
    /// Best ball score seen this session
    pub high_score: u32,
    /// Frames simulated while running
    pub frame: u64,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live blocks in scan order
    pub blocks: Vec<Block>,
}

impl GameState {
    /// Start a session: full lives, fresh ball, full brick grid
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let blocks = build_blocks(config, &mut rng);
        log::debug!("Built {} blocks from seed {}", blocks.len(), seed);

        Self {
            rng_state,
            lives: config.lives,
            high_score: 0,
            frame: 0,
            phase: GamePhase::Running,
            paddle: Paddle::new(config),
            ball: Ball::new(config),
            blocks,
        }
    }

    /// Replace the ball with a fresh one at the center
    pub fn reset_ball(&mut self, config: &GameConfig, preserve_score: bool) {
        let score = self.ball.score;
        self.ball = Ball::new(config);
        if preserve_score {
            self.ball.score = score;
        }
    }

    /// Raise the high score to the current ball's score if it is higher
    pub fn record_high_score(&mut self) {
        self.high_score = self.high_score.max(self.ball.score);
    }

    /// JSON snapshot of the session
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 7);
        assert_eq!(state.lives, 3);
        assert_eq!(state.high_score, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.blocks.len(), 60);
        assert_eq!(state.paddle.rect, Rect::new(350.0, 580.0, 100.0, 10.0));
        assert_eq!(state.ball.pos(), Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(10.0, -10.0));
        assert_eq!(state.ball.color, config.palette.ball);
    }

    #[test]
    fn test_paddle_clamps_at_edges() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        for _ in 0..100 {
            paddle.move_by(true, false, &config);
        }
        assert_eq!(paddle.x(), 0.0);
        for _ in 0..100 {
            paddle.move_by(false, true, &config);
        }
        assert_eq!(paddle.x(), 700.0);
    }

    #[test]
    fn test_paddle_both_keys_cancel() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.move_by(true, true, &config);
        assert_eq!(paddle.x(), 350.0);
    }

    #[test]
    fn test_reset_ball_score_policy() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 1);
        state.ball.score = 4;
        state.ball.rect.pos = Vec2::new(10.0, 10.0);

        state.reset_ball(&config, true);
        assert_eq!(state.ball.score, 4);
        assert_eq!(state.ball.pos(), Vec2::new(400.0, 300.0));

        state.reset_ball(&config, false);
        assert_eq!(state.ball.score, 0);
    }

    #[test]
    fn test_high_score_never_decreases() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 1);
        state.ball.score = 5;
        state.record_high_score();
        state.ball.score = 2;
        state.record_high_score();
        assert_eq!(state.high_score, 5);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 42);
        state.blocks.truncate(3);
        state.lives = 2;

        let json = state.to_json().unwrap();
        let restored = GameState::from_json(&json).unwrap();
        assert_eq!(restored.blocks, state.blocks);
        assert_eq!(restored.lives, 2);
        assert_eq!(restored.ball, state.ball);
        assert_eq!(restored.rng_state.seed, 42);
    }
}
