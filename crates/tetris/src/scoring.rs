//! Scoring module - line clear and drop points
//!
//! Line clears award `LINE_SCORES[count] * level` (level starts at 1); more
//! than four rows at once score as four. Hard drops award 2 points per cell
//! travelled, a successful soft drop step awards 1.

use arcade_types::{HARD_DROP_POINTS_PER_CELL, LINE_SCORES, SOFT_DROP_POINTS};

/// Points for clearing `lines` rows at `level`.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let idx = lines.min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

pub fn hard_drop_score(cells: u32) -> u32 {
    cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
}

pub fn soft_drop_score() -> u32 {
    SOFT_DROP_POINTS
}
