//! Board module - drawing surfaces, grid math and the layer compositor
//!
//! This crate is the rendering-side data structure every widget shares:
//!
//! - [`surface`]: the [`DrawingSurface`] trait (fill rect/circle, stroke line,
//!   draw image, clear region, raw pixels) and the [`PixelBuffer`] implementing it
//! - [`grid`]: cell <-> pixel coordinate mapping with one configurable cell size
//! - [`layers`]: named layers composited by z-index with opacity and blend modes
//!
//! # Example
//!
//! ```
//! use arcade_board::{BoardLayers, DrawingSurface, PixelBuffer};
//! use arcade_types::Rgba;
//!
//! let mut board = BoardLayers::new(300, 600, 30);
//! board.add_layer("background", 0);
//! board.add_layer("pieces", 1);
//! board
//!     .surface_mut("background")
//!     .unwrap()
//!     .fill_rect(0, 0, 300, 600, Rgba::BLACK);
//!
//! let mut out = PixelBuffer::new(300, 600);
//! board.render(&mut out);
//! assert_eq!(out.get(0, 0), Some(Rgba::BLACK));
//! assert_eq!(board.pixel_to_grid(45, 75), Some((1, 2)));
//! ```

pub mod grid;
pub mod layers;
pub mod surface;

pub use arcade_types as types;

pub use grid::GridSpec;
pub use layers::{BlendMode, BoardLayers, Layer, LayerEvent, LayerProperty};
pub use surface::{blend_over, DrawingSurface, PixelBuffer};
