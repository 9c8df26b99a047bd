//! Scene painter: background, blocks, paddle, ball, then the status line

use glam::Vec2;

use super::Surface;
use crate::config::GameConfig;
use crate::sim::{GamePhase, GameState};

/// Status text and where it goes
pub fn status_lines(state: &GameState) -> [(String, Vec2); 3] {
    [
        (format!("Lives: {}", state.lives), Vec2::new(20.0, 20.0)),
        (format!("Score: {}", state.ball.score), Vec2::new(200.0, 20.0)),
        (
            format!("High Score: {}", state.high_score),
            Vec2::new(400.0, 20.0),
        ),
    ]
}

fn banner(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Running => None,
        GamePhase::Paused => Some("PAUSED"),
        GamePhase::GameOver => Some("Game Over"),
        GamePhase::Won => Some("You Win!"),
    }
}

/// Paint one full frame (does not present it)
pub fn draw_scene<S: Surface + ?Sized>(surface: &mut S, state: &GameState, config: &GameConfig) {
    let palette = &config.palette;

    surface.fill(palette.background);
    for block in &state.blocks {
        surface.fill_rect(&block.rect, block.color);
    }
    surface.fill_rect(&state.paddle.rect, palette.paddle);
    surface.fill_ellipse(&state.ball.rect, state.ball.color);

    for (text, pos) in status_lines(state) {
        surface.draw_text(&text, pos, palette.text);
    }

    if let Some(text) = banner(state.phase) {
        // Roughly centered; glyph width is backend-defined
        let pos = Vec2::new(
            config.window_width / 2.0 - text.len() as f32 * 6.0,
            config.window_height / 2.0 + 60.0,
        );
        surface.draw_text(text, pos, palette.text);
    }
}
