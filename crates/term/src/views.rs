//! Pure render functions: widget state in, pixels out.
//!
//! None of these touch the terminal; they draw into any [`DrawingSurface`] so
//! they can be layered by the compositor and unit-tested on a `PixelBuffer`.

use arcade_automaton::LifeGrid;
use arcade_board::DrawingSurface;
use arcade_physics::PhysicsBody;
use arcade_tetris::{GameState, Tetromino, MAX_SHAPE_SIZE};
use arcade_types::Rgba;

pub const BOARD_BACKGROUND: Rgba = Rgba::rgb(24, 24, 34);
pub const GHOST_ALPHA: u8 = 72;
pub const LIFE_ALIVE: Rgba = Rgba::rgb(90, 220, 120);
pub const LIFE_DEAD: Rgba = Rgba::rgb(16, 20, 18);
pub const BODY_COLOR: Rgba = Rgba::rgb(240, 170, 60);
pub const STATIC_BODY_COLOR: Rgba = Rgba::rgb(120, 120, 140);

fn fill_cell(out: &mut impl DrawingSurface, col: i32, row: i32, cell_size: u32, color: Rgba) {
    let size = cell_size as i32;
    out.fill_rect(col * size, row * size, cell_size, cell_size, color);
}

fn draw_piece(
    out: &mut impl DrawingSurface,
    piece: &Tetromino,
    x: i32,
    y: i32,
    cell_size: u32,
    color: Rgba,
) {
    for (dx, dy) in piece.cells() {
        if y + dy >= 0 {
            fill_cell(out, x + dx, y + dy, cell_size, color);
        }
    }
}

/// Board background, locked cells, ghost and falling piece.
pub fn render_tetris(game: &GameState, out: &mut impl DrawingSurface, cell_size: u32) {
    if cell_size == 0 {
        return;
    }
    let board = game.board();
    let (w, h) = (out.width(), out.height());
    out.clear_rect(0, 0, w, h);
    out.fill_rect(
        0,
        0,
        board.width() as u32 * cell_size,
        board.height() as u32 * cell_size,
        BOARD_BACKGROUND,
    );

    for y in 0..board.height() as i32 {
        for x in 0..board.width() as i32 {
            if let Some(Some(color)) = board.get(x, y) {
                fill_cell(out, x, y, cell_size, color);
            }
        }
    }

    let Some(piece) = game.current() else {
        return;
    };
    let (x, y) = game.current_position();
    if let Some(ghost_y) = game.ghost_y() {
        if ghost_y != y {
            draw_piece(out, piece, x, ghost_y, cell_size, piece.color.with_alpha(GHOST_ALPHA));
        }
    }
    draw_piece(out, piece, x, y, cell_size, piece.color);
}

/// Preview of the next piece, centered in a 4x4 cell box.
pub fn render_next_piece(game: &GameState, out: &mut impl DrawingSurface, cell_size: u32) {
    let (w, h) = (out.width(), out.height());
    out.clear_rect(0, 0, w, h);
    let Some(piece) = game.next_piece() else {
        return;
    };
    let offset = (MAX_SHAPE_SIZE as i32 - piece.shape.size() as i32) / 2;
    draw_piece(out, piece, offset, offset, cell_size, piece.color);
}

/// One square per cell; live cells lighten with age up to a cap.
pub fn render_life(grid: &LifeGrid, out: &mut impl DrawingSurface, cell_size: u32) {
    if cell_size == 0 {
        return;
    }
    let (w, h) = (out.width(), out.height());
    out.clear_rect(0, 0, w, h);
    for cell in grid.cells() {
        let color = if cell.alive() {
            let boost = (cell.age().min(8) * 4) as u8;
            Rgba::rgb(
                LIFE_ALIVE.r.saturating_add(boost),
                LIFE_ALIVE.g.saturating_add(boost),
                LIFE_ALIVE.b.saturating_add(boost),
            )
        } else {
            LIFE_DEAD
        };
        fill_cell(out, cell.x(), cell.y(), cell_size, color);
    }
}

/// Bodies as filled rectangles; static bodies in a muted color.
pub fn render_bodies(bodies: &[PhysicsBody], out: &mut impl DrawingSurface) {
    let (w, h) = (out.width(), out.height());
    out.clear_rect(0, 0, w, h);
    for body in bodies {
        let color = if body.is_static() {
            STATIC_BODY_COLOR
        } else {
            BODY_COLOR
        };
        out.fill_rect(
            body.x().round() as i32,
            body.y().round() as i32,
            body.width().round() as u32,
            body.height().round() as u32,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_automaton::RuleSet;
    use arcade_board::PixelBuffer;
    use arcade_tetris::TetrisConfig;
    use arcade_types::PieceKind;

    #[test]
    fn test_render_tetris_draws_piece_and_ghost() {
        let mut game = GameState::new(TetrisConfig::default());
        game.start();
        assert!(game.set_current(Tetromino::new(PieceKind::O), 0, 0));

        let mut out = PixelBuffer::new(20, 40);
        render_tetris(&game, &mut out, 2);

        let color = PieceKind::O.color();
        assert_eq!(out.get(0, 0), Some(color));
        assert_eq!(out.get(3, 3), Some(color));
        assert_eq!(out.get(10, 10), Some(BOARD_BACKGROUND));
        // Ghost sits on the floor, blended over the background.
        let ghost = out.get(0, 39).unwrap();
        assert_ne!(ghost, BOARD_BACKGROUND);
        assert_ne!(ghost, color);
    }

    #[test]
    fn test_render_next_piece_centers_o() {
        let mut game = GameState::new(TetrisConfig::default());
        game.start();
        let mut out = PixelBuffer::new(4, 4);
        render_next_piece(&game, &mut out, 1);
        let next = *game.next_piece().unwrap();
        let filled = out.pixels().iter().filter(|p| **p == next.color).count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_render_life() {
        let mut grid = LifeGrid::new(3, 2, RuleSet::CONWAY);
        grid.set_alive(1, 1, true);
        let mut out = PixelBuffer::new(6, 4);
        render_life(&grid, &mut out, 2);
        assert_eq!(out.get(0, 0), Some(LIFE_DEAD));
        assert_ne!(out.get(2, 2), Some(LIFE_DEAD));
        assert_eq!(out.get(3, 3), out.get(2, 2));
    }

    #[test]
    fn test_render_bodies() {
        let mut wall = PhysicsBody::new(2, 0.0, 8.0, 10.0, 2.0);
        wall.set_static(true);
        let bodies = vec![PhysicsBody::new(1, 2.0, 2.0, 3.0, 3.0), wall];
        let mut out = PixelBuffer::new(10, 10);
        render_bodies(&bodies, &mut out);
        assert_eq!(out.get(3, 3), Some(BODY_COLOR));
        assert_eq!(out.get(5, 9), Some(STATIC_BODY_COLOR));
        assert_eq!(out.get(0, 0), Some(Rgba::TRANSPARENT));
    }
}
