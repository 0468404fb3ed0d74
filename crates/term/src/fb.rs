//! Framebuffer of styled terminal cells.
//!
//! Pixel surfaces reach the terminal through [`FrameBuffer::blit_pixels`],
//! which packs two vertically stacked pixels into one upper-half-block glyph
//! (foreground = top pixel, background = bottom pixel).

use arcade_board::{DrawingSurface, PixelBuffer};
use arcade_types::Rgba;

/// Upper half block.
pub const HALF_BLOCK: char = '▀';

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgba,
    pub bg: Rgba,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgba, bg: Rgba) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgba::rgb(220, 220, 220), Rgba::BLACK)
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are reset.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            let Ok(dx) = u16::try_from(i) else {
                break;
            };
            let cx = x.saturating_add(dx);
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, style });
        }
    }

    /// Copy `pixels` with its top-left at terminal cell `(x, y)`, two pixel
    /// rows per terminal row. Transparent pixels show `backdrop`.
    pub fn blit_pixels(&mut self, pixels: &PixelBuffer, x: u16, y: u16, backdrop: Rgba) {
        let opaque = |c: Option<Rgba>| match c {
            Some(c) if !c.is_transparent() => arcade_board::blend_over(backdrop, c),
            _ => backdrop,
        };
        let rows = pixels.height().div_ceil(2);
        for row in 0..rows {
            let Ok(ty) = u16::try_from(row) else {
                break;
            };
            for px in 0..pixels.width() {
                let Ok(tx) = u16::try_from(px) else {
                    break;
                };
                let top = opaque(pixels.get(px, row * 2));
                let bottom = opaque(pixels.get(px, row * 2 + 1));
                self.set(
                    x.saturating_add(tx),
                    y.saturating_add(ty),
                    Cell {
                        ch: HALF_BLOCK,
                        style: CellStyle::new(top, bottom),
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "abc", CellStyle::default());
        assert_eq!(fb.get(2, 0).unwrap().ch, 'a');
        assert_eq!(fb.get(3, 0).unwrap().ch, 'b');
        fb.put_str(0, 5, "zzz", CellStyle::default());
    }

    #[test]
    fn test_blit_packs_two_rows() {
        let red = Rgba::rgb(255, 0, 0);
        let blue = Rgba::rgb(0, 0, 255);
        let mut pixels = PixelBuffer::new(2, 3);
        pixels.set(0, 0, red);
        pixels.set(0, 1, blue);
        pixels.set(1, 2, red);

        let mut fb = FrameBuffer::new(4, 4);
        fb.blit_pixels(&pixels, 1, 1, Rgba::BLACK);

        let cell = fb.get(1, 1).unwrap();
        assert_eq!(cell.ch, HALF_BLOCK);
        assert_eq!((cell.style.fg, cell.style.bg), (red, blue));

        // Odd height: last row has only a top pixel.
        let cell = fb.get(2, 2).unwrap();
        assert_eq!((cell.style.fg, cell.style.bg), (red, Rgba::BLACK));
        assert_eq!(fb.get(0, 0).unwrap().ch, ' ');
    }
}
