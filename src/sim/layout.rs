//! Procedural brick grid
//!
//! Rows start 20 units from the left edge. Bricks come in pairs: 2 units
//! between the two bricks of a pair, 10 between pairs. Every fifth row
//! (starting with the first) opens with a 10 unit gap above it, the others
//! with 2.

use glam::Vec2;
use rand::Rng;

use super::state::Block;
use crate::config::GameConfig;

const LEFT_MARGIN: f32 = 20.0;
const TOP_MARGIN: f32 = 30.0;
const TIGHT_GAP: f32 = 2.0;
const WIDE_GAP: f32 = 10.0;
const ROW_GROUP: u32 = 5;

/// Bottom-right corner of the laid out grid, `None` when the grid is empty
pub fn grid_extent(config: &GameConfig) -> Option<Vec2> {
    if config.rows == 0 || config.bricks_per_row == 0 {
        return None;
    }
    // Column gaps alternate tight, wide; row gaps are wide once per group
    let col_gaps = config.bricks_per_row - 1;
    let tight_cols = col_gaps.div_ceil(2) as f32;
    let wide_cols = (col_gaps / 2) as f32;
    let wide_rows = config.rows.div_ceil(ROW_GROUP) as f32;
    let tight_rows = (config.rows - config.rows.div_ceil(ROW_GROUP)) as f32;

    let right = LEFT_MARGIN
        + config.bricks_per_row as f32 * config.brick_width
        + tight_cols * TIGHT_GAP
        + wide_cols * WIDE_GAP;
    let bottom = TOP_MARGIN
        + (config.rows + 1) as f32 * config.brick_height
        + wide_rows * WIDE_GAP
        + tight_rows * TIGHT_GAP;
    Some(Vec2::new(right, bottom))
}

/// Lay out the full grid, picking each block's color from the palette
pub fn build_blocks<R: Rng>(config: &GameConfig, rng: &mut R) -> Vec<Block> {
    let palette = &config.palette.blocks;
    let mut blocks = Vec::with_capacity(config.rows as usize * config.bricks_per_row as usize);

    let mut y = TOP_MARGIN;
    for row in 0..config.rows {
        y += config.brick_height
            + if row % ROW_GROUP == 0 {
                WIDE_GAP
            } else {
                TIGHT_GAP
            };

        let mut x = LEFT_MARGIN;
        for col in 0..config.bricks_per_row {
            let color = palette[rng.random_range(0..palette.len())];
            blocks.push(Block::new(x, y, config, color));

            x += config.brick_width + if col % 2 == 0 { TIGHT_GAP } else { WIDE_GAP };
        }
    }

    blocks
}
