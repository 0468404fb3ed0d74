//! Terminal output for the arcade widgets.
//!
//! Widgets render into pixel surfaces through the pure functions in
//! [`views`]; [`FrameBuffer::blit_pixels`] packs those pixels into
//! half-block terminal cells and [`TerminalRenderer`] flushes the cells with
//! frame diffing.

pub mod fb;
pub mod renderer;
pub mod views;

pub use fb::{Cell, CellStyle, FrameBuffer, HALF_BLOCK};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use views::{render_bodies, render_life, render_next_piece, render_tetris};
