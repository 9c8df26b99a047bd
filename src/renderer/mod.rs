//! Rendering module
//!
//! The scene is painted through the [`Surface`] trait in logical window
//! coordinates; backends decide how that maps to real output.

pub mod scene;
pub mod terminal;

pub use scene::{draw_scene, status_lines};
pub use terminal::TerminalSurface;

use glam::Vec2;

use crate::config::Rgb;
use crate::sim::Rect;

/// A 2D drawing target
///
/// Drawing calls only touch the backend's frame buffer; [`Surface::present`]
/// is where output happens and where I/O can fail.
pub trait Surface {
    /// Paint the whole frame one color
    fn fill(&mut self, color: Rgb);

    /// Filled axis-aligned rectangle
    fn fill_rect(&mut self, rect: &Rect, color: Rgb);

    /// Filled ellipse inscribed in `rect`
    fn fill_ellipse(&mut self, rect: &Rect, color: Rgb);

    /// Text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb);

    /// Push the finished frame out
    fn present(&mut self) -> anyhow::Result<()>;
}
