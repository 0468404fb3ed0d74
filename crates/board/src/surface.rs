//! Drawing surface and the RGBA pixel buffer that implements it.
//!
//! Every widget renders through [`DrawingSurface`]. Primitives clip at the
//! surface edges and composite with source-over alpha; `clear_rect` is the only
//! primitive that writes transparency directly.

use arcade_types::Rgba;

/// Pixel-level drawing primitives supplied by the host.
///
/// Implementors provide storage access; the primitives have default
/// implementations in terms of [`DrawingSurface::put`].
pub trait DrawingSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Raw row-major pixel access.
    fn pixels(&self) -> &[Rgba];
    fn pixels_mut(&mut self) -> &mut [Rgba];

    /// Composite one pixel. Out-of-bounds writes are ignored.
    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        if x < 0 || y < 0 || x >= w || y >= h {
            return;
        }
        let idx = (y as usize) * (w as usize) + (x as usize);
        let px = &mut self.pixels_mut()[idx];
        *px = blend_over(*px, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        let Some((x0, y0, x1, y1)) = clip(x, y, w, h, self.width(), self.height()) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let r = radius as i32;
        let r2 = (r as i64) * (r as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx as i64) * (dx as i64) + (dy as i64) * (dy as i64) <= r2 {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// One-pixel line (Bresenham).
    fn stroke_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw `image` with its top-left at `(x, y)`, optionally scaled
    /// (nearest neighbour) to `size`.
    fn draw_image(&mut self, image: &PixelBuffer, x: i32, y: i32, size: Option<(u32, u32)>) {
        let (dw, dh) = size.unwrap_or((image.width(), image.height()));
        if dw == 0 || dh == 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        for oy in 0..dh {
            let sy = (oy as u64 * image.height() as u64 / dh as u64) as u32;
            for ox in 0..dw {
                let sx = (ox as u64 * image.width() as u64 / dw as u64) as u32;
                if let Some(c) = image.get(sx, sy) {
                    self.put(x + ox as i32, y + oy as i32, c);
                }
            }
        }
    }

    /// Reset a region to transparent.
    fn clear_rect(&mut self, x: i32, y: i32, w: u32, h: u32) {
        let Some((x0, y0, x1, y1)) = clip(x, y, w, h, self.width(), self.height()) else {
            return;
        };
        let stride = self.width() as usize;
        let pixels = self.pixels_mut();
        for py in y0..y1 {
            let row = py as usize * stride;
            pixels[row + x0 as usize..row + x1 as usize].fill(Rgba::TRANSPARENT);
        }
    }
}

/// Clip a rectangle to `[0, width) x [0, height)`, returning the half-open
/// corner coordinates, or `None` when nothing is left.
fn clip(x: i32, y: i32, w: u32, h: u32, width: u32, height: u32) -> Option<(i32, i32, i32, i32)> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(w.min(i32::MAX as u32) as i32).min(width as i32);
    let y1 = y.saturating_add(h.min(i32::MAX as u32) as i32).min(height as i32);
    if x0 >= x1 || y0 >= y1 {
        None
    } else {
        Some((x0, y0, x1, y1))
    }
}

/// Source-over alpha compositing of `src` onto `dst`.
pub fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    match src.a {
        255 => src,
        0 => dst,
        _ => {
            let sa = src.a as u32;
            let da = dst.a as u32;
            // out_a = sa + da * (1 - sa), all in 0..=255 fixed point
            let out_a = sa + da * (255 - sa) / 255;
            if out_a == 0 {
                return Rgba::TRANSPARENT;
            }
            let ch = |s: u8, d: u8| -> u8 {
                let num = s as u32 * sa + d as u32 * da * (255 - sa) / 255;
                (num / out_a).min(255) as u8
            };
            Rgba::new(
                ch(src.r, dst.r),
                ch(src.g, dst.g),
                ch(src.b, dst.b),
                out_a as u8,
            )
        }
    }
}

/// Row-major RGBA pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// New fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; len],
        }
    }

    /// Resize the buffer, clearing it.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.pixels.clear();
        self.pixels.resize(len, Rgba::TRANSPARENT);
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite a pixel without blending.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }
}

impl DrawingSurface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    #[test]
    fn test_fill_rect_clips() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(-2, -2, 4, 4, RED);
        assert_eq!(buf.get(0, 0), Some(RED));
        assert_eq!(buf.get(1, 1), Some(RED));
        assert_eq!(buf.get(2, 2), Some(Rgba::TRANSPARENT));

        buf.fill_rect(10, 10, 5, 5, BLUE);
        assert!(buf.pixels().iter().all(|&p| p != BLUE));
    }

    #[test]
    fn test_clear_rect() {
        let mut buf = PixelBuffer::new(3, 3);
        buf.clear(RED);
        buf.clear_rect(1, 1, 10, 10);
        assert_eq!(buf.get(0, 0), Some(RED));
        assert_eq!(buf.get(1, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.get(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.get(2, 0), Some(RED));
    }

    #[test]
    fn test_fill_circle_is_symmetric() {
        let mut buf = PixelBuffer::new(11, 11);
        buf.fill_circle(5, 5, 3, RED);
        assert_eq!(buf.get(5, 5), Some(RED));
        assert_eq!(buf.get(8, 5), Some(RED));
        assert_eq!(buf.get(2, 5), Some(RED));
        assert_eq!(buf.get(5, 2), Some(RED));
        assert_eq!(buf.get(8, 8), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_stroke_line_endpoints() {
        let mut buf = PixelBuffer::new(5, 5);
        buf.stroke_line(0, 0, 4, 4, BLUE);
        for i in 0..5 {
            assert_eq!(buf.get(i, i), Some(BLUE));
        }
        assert_eq!(buf.get(4, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_draw_image_scaled() {
        let mut img = PixelBuffer::new(2, 1);
        img.set(0, 0, RED);
        img.set(1, 0, BLUE);

        let mut buf = PixelBuffer::new(4, 2);
        buf.draw_image(&img, 0, 0, Some((4, 2)));
        assert_eq!(buf.get(0, 0), Some(RED));
        assert_eq!(buf.get(1, 1), Some(RED));
        assert_eq!(buf.get(2, 0), Some(BLUE));
        assert_eq!(buf.get(3, 1), Some(BLUE));
    }

    #[test]
    fn test_blend_over() {
        assert_eq!(blend_over(RED, BLUE), BLUE);
        assert_eq!(blend_over(RED, Rgba::TRANSPARENT), RED);
        let half = blend_over(Rgba::BLACK, Rgba::new(255, 255, 255, 128));
        assert_eq!(half.a, 255);
        assert!(half.r > 120 && half.r < 135);
    }
}
