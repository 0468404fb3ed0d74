//! Board module - manages the game grid
//!
//! A `width` x `height` grid where each cell is empty or holds the color of a
//! locked piece. Dimensions are fixed for the life of a board.
//! Uses a flat array (row-major, `y * width + x`) for cache locality.
//! Coordinates: x grows left to right, y grows top to bottom.

use arcade_types::Cell;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row, or None past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| !row.is_empty() && row.iter().all(Option::is_some))
    }

    /// Remove every full row, shifting the rows above down and inserting the
    /// same number of empty rows at the top.
    ///
    /// Returns the original indices of the removed rows, bottom to top.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        let width = self.width;
        let mut write_y = self.height;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_types::Rgba;

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    fn fill_row(board: &mut Board, y: i32, color: Rgba) {
        for x in 0..board.width() as i32 {
            board.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_set_get() {
        let mut board = Board::new(6, 4);
        assert!(board.set(5, 3, Some(RED)));
        assert!(!board.set(6, 0, Some(RED)));
        assert_eq!(board.get(5, 3), Some(Some(RED)));
        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.get(0, -1), None);
        assert!(board.is_occupied(5, 3));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_full_rows_shifts_down() {
        let mut board = Board::new(4, 5);
        board.set(1, 1, Some(BLUE));
        fill_row(&mut board, 2, RED);
        board.set(0, 3, Some(BLUE));
        fill_row(&mut board, 4, RED);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared, vec![4, 2]);
        assert_eq!(board.get(1, 3), Some(Some(BLUE)));
        assert_eq!(board.get(0, 4), Some(Some(BLUE)));
        assert_eq!(board.filled_count(), 2);
        for y in 0..3 {
            assert!(board.row(y).unwrap().iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_no_full_rows_is_noop() {
        let mut board = Board::new(3, 3);
        board.set(0, 2, Some(RED));
        let before = board.clone();
        assert!(board.clear_full_rows().is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_more_than_four_rows() {
        let mut board = Board::new(2, 6);
        for y in 0..6 {
            fill_row(&mut board, y, RED);
        }
        assert_eq!(board.clear_full_rows().len(), 6);
        assert_eq!(board.filled_count(), 0);
    }
}
