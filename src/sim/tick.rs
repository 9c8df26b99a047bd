//! Per-frame session transition
//!
//! [`tick`] is the whole game rule set: it takes the current state and one
//! frame of input, mutates the state, and reports what happened.

use serde::{Deserialize, Serialize};

use super::collision::BallStep;
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::GameConfig;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Left direction held
    pub left: bool,
    /// Right direction held
    pub right: bool,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Quit requested; the controller stops after this frame
    pub quit: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &FrameInput, config: &GameConfig) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.frame += 1;

    state.paddle.move_by(input.left, input.right, config);

    match state.ball.step(&state.paddle, &mut state.blocks, config) {
        BallStep::Lost => {
            state.lives = state.lives.saturating_sub(1);
            events.push(GameEvent::BallLost {
                lives_left: state.lives,
            });
            if state.lives == 0 {
                log::info!("Ball lost, no lives left");
                state.phase = GamePhase::GameOver;
                events.push(GameEvent::GameOver);
            } else {
                log::info!("Ball lost, {} lives left", state.lives);
                state.reset_ball(config, config.carry_score_on_reset);
            }
        }
        BallStep::Moved {
            paddle_hit,
            destroyed,
        } => {
            if paddle_hit {
                events.push(GameEvent::PaddleHit);
            }
            if let Some(block) = destroyed {
                log::debug!(
                    "Block destroyed at ({}, {}), {} left",
                    block.rect.pos.x,
                    block.rect.pos.y,
                    state.blocks.len()
                );
                events.push(GameEvent::BlockDestroyed { color: block.color });
            }
        }
    }

    state.record_high_score();

    if state.phase == GamePhase::Running && state.blocks.is_empty() {
        log::info!("All blocks cleared");
        state.phase = GamePhase::Won;
        events.push(GameEvent::Won);
    }

    events
}
