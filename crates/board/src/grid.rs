//! Grid/pixel coordinate mapping.
//!
//! A single square cell size maps cell coordinates `(col, row)` to the pixel
//! at the cell's top-left corner and back. A cell size of 0 disables the grid:
//! dimension queries return 0 and pixel lookups return `None`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridSpec {
    cell_size: u32,
}

impl GridSpec {
    pub fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.cell_size = cell_size;
    }

    pub fn is_enabled(&self) -> bool {
        self.cell_size > 0
    }

    /// Top-left pixel of a cell. Always the origin when the grid is disabled.
    pub fn grid_to_pixel(&self, col: i32, row: i32) -> (i32, i32) {
        let size = self.cell_size as i32;
        (col * size, row * size)
    }

    /// Cell containing a pixel (floor division, so negative pixels map to
    /// negative cells).
    pub fn pixel_to_grid(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        if !self.is_enabled() {
            return None;
        }
        let size = self.cell_size as i32;
        Some((x.div_euclid(size), y.div_euclid(size)))
    }

    /// Whole columns that fit in `width` pixels.
    pub fn columns(&self, width: u32) -> u32 {
        if self.is_enabled() {
            width / self.cell_size
        } else {
            0
        }
    }

    /// Whole rows that fit in `height` pixels.
    pub fn rows(&self, height: u32) -> u32 {
        if self.is_enabled() {
            height / self.cell_size
        } else {
            0
        }
    }

    /// Pixel rectangle `(x, y, w, h)` covered by a cell.
    pub fn cell_rect(&self, col: i32, row: i32) -> (i32, i32, u32, u32) {
        let (x, y) = self.grid_to_pixel(col, row);
        (x, y, self.cell_size, self.cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_pixel_scales() {
        let grid = GridSpec::new(30);
        assert_eq!(grid.grid_to_pixel(0, 0), (0, 0));
        assert_eq!(grid.grid_to_pixel(3, 2), (90, 60));
        assert_eq!(grid.grid_to_pixel(-1, 0), (-30, 0));
    }

    #[test]
    fn test_pixel_to_grid_floors() {
        let grid = GridSpec::new(30);
        assert_eq!(grid.pixel_to_grid(0, 0), Some((0, 0)));
        assert_eq!(grid.pixel_to_grid(29, 59), Some((0, 1)));
        assert_eq!(grid.pixel_to_grid(30, 60), Some((1, 2)));
        assert_eq!(grid.pixel_to_grid(-1, -31), Some((-1, -2)));
    }

    #[test]
    fn test_disabled_grid() {
        let grid = GridSpec::new(0);
        assert!(!grid.is_enabled());
        assert_eq!(grid.columns(300), 0);
        assert_eq!(grid.rows(600), 0);
        assert_eq!(grid.pixel_to_grid(10, 10), None);
        assert_eq!(grid.grid_to_pixel(4, 4), (0, 0));
    }

    #[test]
    fn test_dimensions() {
        let grid = GridSpec::new(32);
        assert_eq!(grid.columns(320), 10);
        assert_eq!(grid.rows(100), 3);
        assert_eq!(grid.cell_rect(1, 1), (32, 32, 32, 32));
    }
}
