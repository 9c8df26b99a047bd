//! Audio system using rodio
//!
//! Three WAV cues are read into memory and checked at startup; a missing or
//! undecodable file is a startup error. Playback is fire-and-forget: a cue
//! that fails to start is logged and dropped. Only the newest cue can be
//! waited on, through `finish`.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::config::{GameConfig, SoundPaths};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball destroyed a block
    BlockHit,
    /// Ball rebounded off the paddle
    PaddleHit,
    /// Last life lost
    GameOver,
}

/// Anything that can play the game's cues
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Block until the most recent cue has finished playing
    fn finish(&mut self) {}
}

/// Encoded WAV bytes, cheap to clone into a decoder
#[derive(Debug, Clone)]
pub struct Clip(Arc<[u8]>);

impl Clip {
    /// Read a clip and make sure it decodes
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read sound asset {}", path.display()))?;
        let clip = Self(bytes.into());
        clip.decoder()
            .with_context(|| format!("failed to decode sound asset {}", path.display()))?;
        Ok(clip)
    }

    fn decoder(&self) -> Result<Decoder<Cursor<Arc<[u8]>>>, rodio::decoder::DecoderError> {
        Decoder::new(Cursor::new(self.0.clone()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The three loaded cues
#[derive(Debug, Clone)]
pub struct SoundBank {
    block_hit: Clip,
    paddle_hit: Clip,
    game_over: Clip,
}

impl SoundBank {
    pub fn load(paths: &SoundPaths) -> Result<Self> {
        Ok(Self {
            block_hit: Clip::load(&paths.block_hit)?,
            paddle_hit: Clip::load(&paths.paddle_hit)?,
            game_over: Clip::load(&paths.game_over)?,
        })
    }

    pub fn clip(&self, effect: SoundEffect) -> &Clip {
        match effect {
            SoundEffect::BlockHit => &self.block_hit,
            SoundEffect::PaddleHit => &self.paddle_hit,
            SoundEffect::GameOver => &self.game_over,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
    volume: f32,
    /// Newest cue stays attached so `finish` can wait on it
    tail: Option<Sink>,
}

impl AudioManager {
    /// Load the cues and open the default output device
    pub fn new(config: &GameConfig) -> Result<Self> {
        let bank = SoundBank::load(&config.sounds)?;
        let (stream, handle) =
            OutputStream::try_default().context("failed to open audio output device")?;
        log::info!("Audio ready");
        Ok(Self {
            _stream: stream,
            handle,
            bank,
            volume: config.effective_volume(),
            tail: None,
        })
    }

    fn try_play(&mut self, effect: SoundEffect, vol: f32) -> Result<()> {
        let sink = Sink::try_new(&self.handle)?;
        sink.append(self.bank.clip(effect).decoder()?);
        sink.set_volume(vol);
        if let Some(previous) = self.tail.replace(sink) {
            previous.detach();
        }
        Ok(())
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        if let Err(e) = self.try_play(effect, self.volume) {
            log::warn!("Dropped {:?} cue: {:#}", effect, e);
        }
    }

    fn finish(&mut self) {
        if let Some(sink) = self.tail.take() {
            sink.sleep_until_end();
        }
    }
}
