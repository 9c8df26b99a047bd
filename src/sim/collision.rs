//! Ball movement and collision response
//!
//! One call to [`Ball::step`] moves the ball by its velocity and resolves,
//! in order: walls, the bottom edge, the paddle, then at most one block.
//! Only the bottom edge short-circuits; a wall bounce can share a frame with
//! a paddle or block bounce.

use super::rect::Rect;
use super::state::{Ball, Block, Paddle};
use crate::config::GameConfig;

/// Result of moving the ball one frame
#[derive(Debug, Clone, PartialEq)]
pub enum BallStep {
    /// Bottom edge reached; nothing else was checked
    Lost,
    /// Ball is still in play
    Moved {
        paddle_hit: bool,
        /// Block removed from the live set this frame
        destroyed: Option<Block>,
    },
}

impl BallStep {
    pub fn is_lost(&self) -> bool {
        matches!(self, BallStep::Lost)
    }
}

/// Where along the paddle the point `x` falls: 0.0 at the left edge, 1.0 at the right
#[inline]
pub fn hit_fraction(x: f32, paddle: &Rect) -> f32 {
    (x - paddle.left()) / paddle.width()
}

/// Horizontal velocity after a paddle rebound
///
/// Left half sends the ball left, right half sends it right, dead center
/// sends it straight up.
#[inline]
pub fn steer_dx(ball_center_x: f32, paddle: &Rect, steering: f32) -> f32 {
    steering * (hit_fraction(ball_center_x, paddle) - 0.5)
}

/// Index of the first block in scan order that overlaps `rect`
pub fn first_overlapping(rect: &Rect, blocks: &[Block]) -> Option<usize> {
    blocks.iter().position(|block| rect.intersects(&block.rect))
}

impl Ball {
    /// Advance one frame against the paddle and the live block set
    pub fn step(
        &mut self,
        paddle: &Paddle,
        blocks: &mut Vec<Block>,
        config: &GameConfig,
    ) -> BallStep {
        self.rect = self.rect.translated(self.vel);

        // Walls
        if self.rect.left() <= 0.0 || self.rect.right() >= config.window_width {
            self.vel.x = -self.vel.x;
        }
        if self.rect.top() <= 0.0 {
            self.vel.y = -self.vel.y;
        }
        if self.rect.bottom() >= config.window_height {
            return BallStep::Lost;
        }

        // Paddle
        let paddle_hit = self.rect.intersects(&paddle.rect);
        if paddle_hit {
            self.vel.y = -self.vel.y;
            self.vel.x = steer_dx(self.rect.center().x, &paddle.rect, config.paddle_steering);
        }

        // Blocks: first overlap only
        let destroyed = first_overlapping(&self.rect, blocks).map(|index| {
            let block = blocks.remove(index);
            self.vel.y = -self.vel.y;
            self.color = block.color;
            self.score += 1;
            block
        });

        BallStep::Moved {
            paddle_hit,
            destroyed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgb;
    use glam::Vec2;

    fn setup() -> (GameConfig, Paddle, Ball) {
        let config = GameConfig::default();
        let paddle = Paddle::new(&config);
        let ball = Ball::new(&config);
        (config, paddle, ball)
    }

    fn place(ball: &mut Ball, x: f32, y: f32, dx: f32, dy: f32) {
        ball.rect.pos = Vec2::new(x, y);
        ball.vel = Vec2::new(dx, dy);
    }

    #[test]
    fn test_free_flight() {
        let (config, paddle, mut ball) = setup();
        let mut blocks = Vec::new();

        let step = ball.step(&paddle, &mut blocks, &config);
        assert_eq!(
            step,
            BallStep::Moved {
                paddle_hit: false,
                destroyed: None
            }
        );
        assert_eq!(ball.pos(), Vec2::new(410.0, 290.0));
        assert_eq!(ball.vel, Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_left_wall_flips_dx() {
        let (config, paddle, mut ball) = setup();
        place(&mut ball, 5.0, 300.0, -10.0, -10.0);
        ball.step(&paddle, &mut Vec::new(), &config);
        assert_eq!(ball.vel.x, 10.0);
        assert_eq!(ball.vel.y, -10.0);
    }

    #[test]
    fn test_right_wall_flips_dx() {
        let (config, paddle, mut ball) = setup();
        place(&mut ball, 780.0, 300.0, 10.0, 10.0);
        ball.step(&paddle, &mut Vec::new(), &config);
        assert_eq!(ball.vel.x, -10.0);
    }

    #[test]
    fn test_top_wall_flips_dy() {
        let (config, paddle, mut ball) = setup();
        place(&mut ball, 400.0, 5.0, 10.0, -10.0);
        ball.step(&paddle, &mut Vec::new(), &config);
        assert_eq!(ball.vel.y, 10.0);
    }

    #[test]
    fn test_bottom_is_lost_and_touches_nothing() {
        let (config, paddle, mut ball) = setup();
        // Overlaps a block sitting at the bottom edge after the move
        let mut blocks = vec![Block::new(0.0, 580.0, &config, Rgb::RED)];
        place(&mut ball, 20.0, 580.0, 0.0, 10.0);
        ball.score = 3;

        let step = ball.step(&paddle, &mut blocks, &config);
        assert!(step.is_lost());
        assert_eq!(blocks.len(), 1);
        assert_eq!(ball.score, 3);
        assert_eq!(ball.color, config.palette.ball);
    }

    #[test]
    fn test_block_hit() {
        let (config, paddle, mut ball) = setup();
        let mut blocks = vec![
            Block::new(20.0, 60.0, &config, Rgb::GREEN),
            Block::new(300.0, 60.0, &config, Rgb::RED),
        ];
        place(&mut ball, 310.0, 85.0, 0.0, -10.0);

        let (paddle_hit, block) = match ball.step(&paddle, &mut blocks, &config) {
            BallStep::Moved {
                paddle_hit,
                destroyed: Some(block),
            } => (paddle_hit, block),
            other => panic!("expected a block hit, got {other:?}"),
        };
        assert!(!paddle_hit);
        assert_eq!(block.color, Rgb::RED);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].color, Rgb::GREEN);
        assert_eq!(ball.score, 1);
        assert_eq!(ball.color, Rgb::RED);
        assert_eq!(ball.vel.y, 10.0);
    }

    #[test]
    fn test_one_block_per_frame() {
        let (config, paddle, mut ball) = setup();
        // Ball straddles two adjacent blocks
        let mut blocks = vec![
            Block::new(100.0, 60.0, &config, Rgb::BLUE),
            Block::new(167.0, 60.0, &config, Rgb::YELLOW),
        ];
        place(&mut ball, 160.0, 75.0, 0.0, -5.0);

        let step = ball.step(&paddle, &mut blocks, &config);
        assert!(matches!(
            step,
            BallStep::Moved {
                destroyed: Some(Block { color: Rgb::BLUE, .. }),
                ..
            }
        ));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].color, Rgb::YELLOW);
        assert_eq!(ball.score, 1);
    }

    #[test]
    fn test_paddle_steering_positions() {
        let paddle = Rect::new(350.0, 580.0, 100.0, 10.0);
        assert!(steer_dx(400.0, &paddle, 20.0).abs() < 1e-5);
        assert_eq!(steer_dx(350.0, &paddle, 20.0), -10.0);
        assert_eq!(steer_dx(450.0, &paddle, 20.0), 10.0);
        assert_eq!(hit_fraction(375.0, &paddle), 0.25);
    }

    #[test]
    fn test_paddle_hit_left_edge() {
        let (config, paddle, mut ball) = setup();
        // After the move the ball's center sits on the paddle's left edge
        place(&mut ball, 342.5, 560.0, 0.0, 10.0);

        let step = ball.step(&paddle, &mut Vec::new(), &config);
        assert_eq!(
            step,
            BallStep::Moved {
                paddle_hit: true,
                destroyed: None
            }
        );
        assert_eq!(ball.vel, Vec2::new(-10.0, -10.0));
    }

    #[test]
    fn test_paddle_hit_center_goes_vertical() {
        let (config, paddle, mut ball) = setup();
        place(&mut ball, 392.5, 560.0, 4.0, 10.0);
        // Center after move: 396.5 + 7.5 = 404 -> fraction 0.54
        ball.step(&paddle, &mut Vec::new(), &config);
        assert!((ball.vel.x - 0.8).abs() < 1e-4);
        assert_eq!(ball.vel.y, -10.0);
    }

    #[test]
    fn test_wall_and_block_in_same_frame() {
        let (config, paddle, mut ball) = setup();
        let mut blocks = vec![Block::new(0.0, 60.0, &config, Rgb::ORANGE)];
        place(&mut ball, 5.0, 75.0, -10.0, -10.0);

        ball.step(&paddle, &mut blocks, &config);
        assert_eq!(ball.vel, Vec2::new(10.0, 10.0));
        assert!(blocks.is_empty());
    }
}
