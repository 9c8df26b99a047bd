use std::collections::VecDeque;

use brick_breaker::audio::{AudioSink, SoundEffect};
use brick_breaker::platform::InputSource;
use brick_breaker::renderer::TerminalSurface;
use brick_breaker::sim::{FrameInput, GamePhase};
use brick_breaker::{Game, GameConfig, Outcome};

/// Plays back a fixed script, then repeats `rest` forever
struct ScriptedInput {
    script: VecDeque<FrameInput>,
    rest: FrameInput,
}

impl ScriptedInput {
    fn idle() -> Self {
        Self::new(Vec::new(), FrameInput::default())
    }

    fn new(script: Vec<FrameInput>, rest: FrameInput) -> Self {
        Self {
            script: script.into(),
            rest,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> anyhow::Result<FrameInput> {
        Ok(self.script.pop_front().unwrap_or(self.rest))
    }
}

#[derive(Default)]
struct RecordingAudio {
    played: Vec<SoundEffect>,
    finished: usize,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }

    fn finish(&mut self) {
        self.finished += 1;
    }
}

type TestGame = Game<TerminalSurface<Vec<u8>>, ScriptedInput, RecordingAudio>;

fn test_config() -> GameConfig {
    GameConfig {
        frame_delay_ms: 0,
        ..Default::default()
    }
}

fn new_game(config: GameConfig, input: ScriptedInput) -> TestGame {
    let surface = TerminalSurface::new(Vec::new(), 40, 15, &config);
    Game::new(config, 2024, surface, input, RecordingAudio::default()).unwrap()
}

#[test]
fn test_quit_stops_after_the_frame() {
    let quit = FrameInput {
        quit: true,
        ..Default::default()
    };
    let mut game = new_game(test_config(), ScriptedInput::new(vec![quit], FrameInput::default()));

    assert_eq!(game.run().unwrap(), Outcome::Quit);
    assert_eq!(game.state().frame, 1);
    assert_eq!(game.state().phase, GamePhase::Running);
    assert_eq!(game.audio().finished, 0);
}

#[test]
fn test_quit_while_paused() {
    let pause = FrameInput {
        pause: true,
        ..Default::default()
    };
    let quit = FrameInput {
        quit: true,
        ..Default::default()
    };
    let mut game = new_game(
        test_config(),
        ScriptedInput::new(vec![pause, FrameInput::default(), quit], FrameInput::default()),
    );

    assert_eq!(game.run().unwrap(), Outcome::Quit);
    assert_eq!(game.state().phase, GamePhase::Paused);
    assert_eq!(game.state().frame, 0);
}

#[test]
fn test_empty_grid_wins_immediately() {
    let config = GameConfig {
        rows: 0,
        ..test_config()
    };
    let mut game = new_game(config, ScriptedInput::idle());

    assert_eq!(game.run().unwrap(), Outcome::Won);
    assert_eq!(game.state().frame, 1);
    assert!(game.audio().played.is_empty());
}

#[test]
fn test_three_misses_end_in_game_over() {
    // Ball drops straight down the middle while the paddle runs away left
    let config = GameConfig {
        ball_dx: 0.0,
        ball_dy: 10.0,
        ..test_config()
    };
    let left = FrameInput {
        left: true,
        ..Default::default()
    };
    let mut game = new_game(config, ScriptedInput::new(Vec::new(), left));

    assert_eq!(game.run().unwrap(), Outcome::GameOver);
    let state = game.state();
    assert_eq!(state.lives, 0);
    assert_eq!(state.paddle.x(), 0.0);
    assert_eq!(state.blocks.len(), 60);
    assert_eq!(state.high_score, 0);
    assert_eq!(game.audio().played, vec![SoundEffect::GameOver]);
    // The game over cue plays out before the session returns
    assert_eq!(game.audio().finished, 1);
}

#[test]
fn test_paddle_then_block_cues() {
    let config = GameConfig {
        ball_dx: 0.0,
        ball_dy: 10.0,
        rows: 1,
        ..test_config()
    };
    let mut game = new_game(config, ScriptedInput::idle());

    for _ in 0..200 {
        assert_eq!(game.frame().unwrap(), None);
        if game.state().blocks.len() < 10 {
            break;
        }
    }

    let state = game.state();
    assert_eq!(state.blocks.len(), 9);
    assert_eq!(state.ball.score, 1);
    assert_eq!(state.high_score, 1);
    assert_ne!(state.ball.color, game.config().palette.ball);
    assert_eq!(
        game.audio().played,
        vec![SoundEffect::PaddleHit, SoundEffect::BlockHit]
    );
}

#[test]
fn test_frames_render_status_line() {
    let mut game = new_game(test_config(), ScriptedInput::idle());
    game.frame().unwrap();

    let surface = game.surface();
    let out = String::from_utf8_lossy(surface.writer());
    assert!(out.contains("Lives: 3"));
    assert!(out.contains("Score: 0"));
    assert!(out.contains("High Score: 0"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig {
        lives: 0,
        ..test_config()
    };
    let surface = TerminalSurface::new(Vec::new(), 40, 15, &config);
    let result = Game::new(
        config,
        1,
        surface,
        ScriptedInput::idle(),
        RecordingAudio::default(),
    );
    assert!(result.is_err());
}
