//! Pieces module - tetromino templates and matrix rotation
//!
//! A [`Shape`] is a square occupancy matrix (at most 4x4) held by value.
//! Rotation returns a new matrix, so a spawned piece never aliases its
//! template or the preview piece.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use arcade_types::{PieceKind, Rgba};

/// Largest supported shape side.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Occupied cell offsets of one shape, `(column, row)`.
pub type ShapeCells = ArrayVec<(i32, i32), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    size: u8,
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build from 0/1 rows. The rows must form a square of side 1..=4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_SHAPE_SIZE || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        let mut out = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                out[r][c] = v != 0;
            }
        }
        Some(Self {
            size: size as u8,
            rows: out,
        })
    }

    /// Spawn template for a kind: I is 4x4, O is 2x2, the rest are 3x3.
    pub fn template(kind: PieceKind) -> Self {
        const X: bool = true;
        const O: bool = false;
        let (size, rows) = match kind {
            PieceKind::I => (
                4,
                [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]],
            ),
            PieceKind::O => (2, [[X, X, O, O], [X, X, O, O], [O; 4], [O; 4]]),
            PieceKind::T => (3, [[O, X, O, O], [X, X, X, O], [O; 4], [O; 4]]),
            PieceKind::S => (3, [[O, X, X, O], [X, X, O, O], [O; 4], [O; 4]]),
            PieceKind::Z => (3, [[X, X, O, O], [O, X, X, O], [O; 4], [O; 4]]),
            PieceKind::J => (3, [[X, O, O, O], [X, X, X, O], [O; 4], [O; 4]]),
            PieceKind::L => (3, [[O, O, X, O], [X, X, X, O], [O; 4], [O; 4]]),
        };
        Self { size, rows }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.size() && row < self.size() && self.rows[row][col]
    }

    /// 90° clockwise: transpose, then reverse each row.
    pub fn rotated(&self) -> Self {
        let n = self.size();
        let mut out = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in out.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.rows[n - 1 - c][r];
            }
        }
        Self {
            size: self.size,
            rows: out,
        }
    }

    pub fn cells(&self) -> ShapeCells {
        let mut cells = ShapeCells::new();
        for r in 0..self.size() {
            for c in 0..self.size() {
                if self.rows[r][c] {
                    cells.push((c as i32, r as i32));
                }
            }
        }
        cells
    }
}

/// A piece instance: kind, its own shape copy and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Rgba,
}

impl Tetromino {
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::template(kind),
            color: kind.color(),
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    pub fn cells(&self) -> ShapeCells {
        self.shape.cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_four_cells() {
        for kind in PieceKind::ALL {
            let shape = Shape::template(kind);
            assert_eq!(shape.cells().len(), 4, "{kind:?}");
        }
        assert_eq!(Shape::template(PieceKind::I).size(), 4);
        assert_eq!(Shape::template(PieceKind::O).size(), 2);
        assert_eq!(Shape::template(PieceKind::T).size(), 3);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = Shape::template(PieceKind::T);
        let expected = Shape::from_rows(&[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]]).unwrap();
        assert_eq!(t.rotated(), expected);
    }

    #[test]
    fn test_rotate_i_is_vertical() {
        let i = Shape::template(PieceKind::I).rotated();
        let cells: Vec<_> = i.cells().into_iter().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_four_rotations_identity() {
        for kind in PieceKind::ALL {
            let s = Shape::template(kind);
            assert_eq!(s.rotated().rotated().rotated().rotated(), s);
        }
        let o = Shape::template(PieceKind::O);
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn test_rotation_leaves_template_alone() {
        let piece = Tetromino::new(PieceKind::L);
        let turned = piece.rotated();
        assert_ne!(turned.shape, piece.shape);
        assert_eq!(piece.shape, Shape::template(PieceKind::L));
        assert_eq!(turned.color, piece.color);
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        assert!(Shape::from_rows(&[]).is_none());
        assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
        let row: &[u8] = &[1, 1, 1, 1, 1];
        assert!(Shape::from_rows(&[row, row, row, row, row]).is_none());
    }
}
