//! Brick Breaker entry point
//!
//! Starts the services (any failure here is fatal), runs one session in the
//! terminal, restores the terminal, then prints how the session ended.
//! Logs go to stderr; set `RUST_LOG` and redirect stderr to read them.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use brick_breaker::audio::AudioManager;
use brick_breaker::platform::TerminalInput;
use brick_breaker::renderer::TerminalSurface;
use brick_breaker::{Game, GameConfig};

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Brick Breaker starting...");

    let config = GameConfig::default();
    config.validate().context("invalid game configuration")?;

    let audio = AudioManager::new(&config).context("failed to start audio")?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    let outcome = {
        let mut surface =
            TerminalSurface::stdout(&config).context("failed to open terminal surface")?;
        surface.enter().context("failed to prepare terminal")?;
        let input = TerminalInput::new().context("failed to set up keyboard input")?;

        let mut game = Game::new(config, seed, surface, input, audio)?;
        let outcome = game.run();
        // game drops here: keyboard flags popped, terminal restored
        outcome
    }?;

    if let Some(message) = outcome.message() {
        println!("{}", message);
    }
    Ok(())
}
