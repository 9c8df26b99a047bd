//! Terminal surface: draws the logical window into the terminal's cell grid
//!
//! Each cell holds two vertically stacked pixels rendered with the upper half
//! block glyph (foreground = top pixel, background = bottom pixel), so an
//! 80x24 terminal gives an 80x48 pixel frame. Text overrides whole cells.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    QueueableCommand, cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};
use glam::Vec2;

use super::Surface;
use crate::config::{GameConfig, Rgb};
use crate::sim::Rect;

const HALF_BLOCK: char = '▀';

/// Pixel span `[start, end)` covering the logical range `[lo, hi)`
///
/// Anything visible gets at least one pixel so small objects never vanish.
fn span(lo: f32, hi: f32, limit: usize, extent: f32) -> (usize, usize) {
    let to_pixels = |v: f32| v * limit as f32 / extent;
    let start = to_pixels(lo).floor().clamp(0.0, limit as f32) as usize;
    let end = to_pixels(hi).ceil().clamp(0.0, limit as f32) as usize;
    if end <= start && start < limit && hi > 0.0 {
        (start, start + 1)
    } else {
        (start, end)
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    /// Logical window size
    window: Vec2,
    /// `cols * rows * 2` pixels, row-major
    pixels: Vec<Rgb>,
    /// Text overlay, one slot per cell
    text: Vec<Option<(char, Rgb)>>,
    background: Rgb,
    /// Re-query the terminal size after every frame
    follow_terminal: bool,
    entered: bool,
}

impl TerminalSurface<Stdout> {
    /// Surface on stdout sized to the current terminal
    pub fn stdout(config: &GameConfig) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut surface = Self::new(io::stdout(), cols, rows, config);
        surface.follow_terminal = true;
        Ok(surface)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, config: &GameConfig) -> Self {
        let cols = cols.max(1) as usize;
        let rows = rows.max(1) as usize;
        Self {
            out,
            cols,
            rows,
            window: Vec2::new(config.window_width, config.window_height),
            pixels: vec![config.palette.background; cols * rows * 2],
            text: vec![None; cols * rows],
            background: config.palette.background,
            follow_terminal: false,
            entered: false,
        }
    }

    /// Switch the terminal to raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.flush()?;
        self.entered = true;
        Ok(())
    }

    /// Restore the terminal; safe to call more than once
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Change the cell grid; contents are reset to the background
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1) as usize;
        self.rows = rows.max(1) as usize;
        self.pixels = vec![self.background; self.cols * self.rows * 2];
        self.text = vec![None; self.cols * self.rows];
    }

    /// Pixel color at column `x`, pixel row `y` (two pixel rows per cell)
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.cols || y >= self.rows * 2 {
            return None;
        }
        Some(self.pixels[y * self.cols + x])
    }

    /// Text glyph in a cell, if any
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.text[row * self.cols + col].map(|(ch, _)| ch)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 / self.window.x,
            (self.rows * 2) as f32 / self.window.y,
        )
    }

    fn pixel_bounds(&self, rect: &Rect) -> ((usize, usize), (usize, usize)) {
        (
            span(rect.left(), rect.right(), self.cols, self.window.x),
            span(rect.top(), rect.bottom(), self.rows * 2, self.window.y),
        )
    }

    fn write_frame(&mut self) -> io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let top = self.pixels[(row * 2) * self.cols + col];
                let bottom = self.pixels[(row * 2 + 1) * self.cols + col];
                let (ch, fg, bg) = match self.text[row * self.cols + col] {
                    Some((ch, fg)) => (ch, fg, self.background),
                    None => (HALF_BLOCK, top, bottom),
                };
                if current != Some((fg, bg)) {
                    self.out.queue(SetForegroundColor(rgb_to_color(fg)))?;
                    self.out.queue(SetBackgroundColor(rgb_to_color(bg)))?;
                    current = Some((fg, bg));
                }
                self.out.queue(Print(ch))?;
            }
        }

        self.out.queue(ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn fill(&mut self, color: Rgb) {
        self.background = color;
        self.pixels.fill(color);
        self.text.fill(None);
    }

    fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        let ((x0, x1), (y0, y1)) = self.pixel_bounds(rect);
        for y in y0..y1 {
            self.pixels[y * self.cols + x0..y * self.cols + x1].fill(color);
        }
    }

    fn fill_ellipse(&mut self, rect: &Rect, color: Rgb) {
        let ((x0, x1), (y0, y1)) = self.pixel_bounds(rect);
        let scale = self.scale();
        let center = rect.center();
        let radii = rect.size / 2.0;

        let mut painted = false;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new((x as f32 + 0.5) / scale.x, (y as f32 + 0.5) / scale.y);
                let d = (p - center) / radii;
                if d.length_squared() <= 1.0 {
                    self.pixels[y * self.cols + x] = color;
                    painted = true;
                }
            }
        }

        // Smaller than a pixel: no pixel center falls inside, use the box
        if !painted {
            self.fill_rect(rect, color);
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb) {
        let row = (pos.y * self.rows as f32 / self.window.y).floor();
        let col = (pos.x * self.cols as f32 / self.window.x).floor();
        if row < 0.0 || col < 0.0 || row as usize >= self.rows {
            return;
        }
        let (row, col) = (row as usize, col as usize);
        for (i, ch) in text.chars().enumerate() {
            if col + i >= self.cols {
                break;
            }
            self.text[row * self.cols + col + i] = Some((ch, color));
        }
    }

    fn present(&mut self) -> Result<()> {
        self.write_frame()?;

        if self.follow_terminal {
            let (cols, rows) = terminal::size()?;
            if (cols as usize, rows as usize) != (self.cols, self.rows) {
                log::debug!("Terminal resized to {}x{}", cols, rows);
                self.resize(cols, rows);
                self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            log::warn!("Failed to restore terminal: {}", e);
        }
    }
}
