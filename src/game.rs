//! Session controller
//!
//! Owns the session state and the outside services, and runs the frame loop:
//! input, simulation step, sound cues, render, fixed delay. The loop ends on
//! a terminal phase or after the frame in which quit was requested.

use anyhow::Result;

use crate::audio::{AudioSink, SoundEffect};
use crate::config::{ConfigError, GameConfig};
use crate::platform::{FramePacer, InputSource};
use crate::renderer::{Surface, draw_scene};
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    GameOver,
    Won,
    Quit,
}

impl Outcome {
    /// Message printed once the terminal is restored
    pub fn message(self) -> Option<&'static str> {
        match self {
            Outcome::GameOver => Some("Game Over"),
            Outcome::Won => Some("You Win!"),
            Outcome::Quit => None,
        }
    }
}

/// Cue for an event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::BlockDestroyed { .. } => Some(SoundEffect::BlockHit),
        GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
        GameEvent::GameOver => Some(SoundEffect::GameOver),
        GameEvent::BallLost { .. } | GameEvent::Won => None,
    }
}

/// One game session wired to its services
pub struct Game<S, I, A> {
    config: GameConfig,
    state: GameState,
    // Dropped before the surface: input may need the alternate screen
    input: I,
    surface: S,
    audio: A,
    pacer: FramePacer,
}

impl<S: Surface, I: InputSource, A: AudioSink> Game<S, I, A> {
    pub fn new(
        config: GameConfig,
        seed: u64,
        surface: S,
        input: I,
        audio: A,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, seed);
        let pacer = FramePacer::from_millis(config.frame_delay_ms);
        log::info!(
            "New session: seed {}, {} blocks, {} lives",
            seed,
            state.blocks.len(),
            state.lives
        );
        Ok(Self {
            config,
            state,
            input,
            surface,
            audio,
            pacer,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Run one frame; `Some` once the session is over
    pub fn frame(&mut self) -> Result<Option<Outcome>> {
        let input = self.input.poll()?;

        let events = tick(&mut self.state, &input, &self.config);
        for event in &events {
            log::debug!("{:?}", event);
            if let Some(effect) = cue_for(event) {
                self.audio.play(effect);
            }
        }

        draw_scene(&mut self.surface, &self.state, &self.config);
        self.surface.present()?;
        self.pacer.wait();

        let outcome = match self.state.phase {
            GamePhase::GameOver => Some(Outcome::GameOver),
            GamePhase::Won => Some(Outcome::Won),
            GamePhase::Running | GamePhase::Paused if input.quit => Some(Outcome::Quit),
            GamePhase::Running | GamePhase::Paused => None,
        };
        Ok(outcome)
    }

    /// Run frames until the session ends
    ///
    /// A game over or win lets the last cue play out before returning.
    pub fn run(&mut self) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.frame()? {
                if outcome != Outcome::Quit {
                    self.audio.finish();
                }
                log::info!(
                    "Session ended: {:?} after {} frames, high score {}",
                    outcome,
                    self.state.frame,
                    self.state.high_score
                );
                return Ok(outcome);
            }
        }
    }
}
