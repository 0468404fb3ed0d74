//! Layer compositor - named drawing surfaces composited by z-index
//!
//! Each layer owns a [`PixelBuffer`] the size of the board. Layers are keyed by
//! name; display order is ascending z-index with ties broken by insertion
//! order. Property changes are reported as [`LayerEvent`]s that the host
//! drains after each call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use arcade_types::Rgba;

use crate::grid::GridSpec;
use crate::surface::{blend_over, DrawingSurface, PixelBuffer};

/// How a layer's pixels are mixed with what is already below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Lighten,
    Darken,
    Add,
}

impl BlendMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" | "source-over" => Some(BlendMode::Normal),
            "multiply" => Some(BlendMode::Multiply),
            "screen" => Some(BlendMode::Screen),
            "lighten" => Some(BlendMode::Lighten),
            "darken" => Some(BlendMode::Darken),
            "add" | "lighter" => Some(BlendMode::Add),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Lighten => "lighten",
            BlendMode::Darken => "darken",
            BlendMode::Add => "add",
        }
    }

    fn mix_channel(&self, dst: u8, src: u8) -> u8 {
        let (d, s) = (dst as u32, src as u32);
        match self {
            BlendMode::Normal => src,
            BlendMode::Multiply => (d * s / 255) as u8,
            BlendMode::Screen => (255 - (255 - d) * (255 - s) / 255) as u8,
            BlendMode::Lighten => dst.max(src),
            BlendMode::Darken => dst.min(src),
            BlendMode::Add => (d + s).min(255) as u8,
        }
    }

    /// Blend `src` onto `dst` with an extra opacity factor in [0, 1].
    pub fn blend(&self, dst: Rgba, src: Rgba, opacity: f32) -> Rgba {
        let alpha = (src.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        if alpha == 0 {
            return dst;
        }
        // Separable modes only apply over something already drawn.
        let mixed = if dst.a == 0 {
            src
        } else {
            Rgba::rgb(
                self.mix_channel(dst.r, src.r),
                self.mix_channel(dst.g, src.g),
                self.mix_channel(dst.b, src.b),
            )
        };
        blend_over(dst, mixed.with_alpha(alpha))
    }
}

/// Which layer property a `layer-change` event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerProperty {
    ZIndex,
    Visible,
    Opacity,
    BlendMode,
    Content,
}

/// Compositor notifications.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum LayerEvent {
    LayerAdd {
        name: String,
        z_index: i32,
    },
    LayerRemove {
        name: String,
    },
    LayerChange {
        name: String,
        property: LayerProperty,
    },
    Render {
        /// Number of visible layers composited.
        layers: usize,
    },
}

/// A named drawing surface with display state.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    surface: PixelBuffer,
    z_index: i32,
    visible: bool,
    opacity: f32,
    blend_mode: BlendMode,
    /// Insertion sequence number, breaks z-index ties.
    order: u64,
}

impl Layer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surface(&self) -> &PixelBuffer {
        &self.surface
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }
}

/// Owner of all layers of one board widget.
#[derive(Debug, Clone)]
pub struct BoardLayers {
    width: u32,
    height: u32,
    grid: GridSpec,
    layers: HashMap<String, Layer>,
    next_order: u64,
    events: Vec<LayerEvent>,
}

impl BoardLayers {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width,
            height,
            grid: GridSpec::new(cell_size),
            layers: HashMap::new(),
            next_order: 0,
            events: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.grid.set_cell_size(cell_size);
    }

    /// Grid columns across the board (0 when the grid is disabled).
    pub fn columns(&self) -> u32 {
        self.grid.columns(self.width)
    }

    /// Grid rows down the board (0 when the grid is disabled).
    pub fn rows(&self) -> u32 {
        self.grid.rows(self.height)
    }

    pub fn grid_to_pixel(&self, col: i32, row: i32) -> (i32, i32) {
        self.grid.grid_to_pixel(col, row)
    }

    pub fn pixel_to_grid(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        self.grid.pixel_to_grid(x, y)
    }

    /// Resize the board. Every layer surface is reallocated and cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        for layer in self.layers.values_mut() {
            layer.surface.resize(width, height);
        }
    }

    /// Add a layer, or return the existing one with the same name (no event).
    pub fn add_layer(&mut self, name: &str, z_index: i32) -> &Layer {
        if !self.layers.contains_key(name) {
            let layer = Layer {
                name: name.to_string(),
                surface: PixelBuffer::new(self.width, self.height),
                z_index,
                visible: true,
                opacity: 1.0,
                blend_mode: BlendMode::Normal,
                order: self.next_order,
            };
            self.next_order += 1;
            self.layers.insert(name.to_string(), layer);
            log::debug!("layer added: {} (z={})", name, z_index);
            self.events.push(LayerEvent::LayerAdd {
                name: name.to_string(),
                z_index,
            });
        }
        &self.layers[name]
    }

    /// Remove a layer. Returns whether it existed.
    pub fn remove_layer(&mut self, name: &str) -> bool {
        if self.layers.remove(name).is_none() {
            return false;
        }
        log::debug!("layer removed: {}", name);
        self.events.push(LayerEvent::LayerRemove {
            name: name.to_string(),
        });
        true
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Drawing access to a layer's surface.
    pub fn surface_mut(&mut self, name: &str) -> Option<&mut PixelBuffer> {
        self.layers.get_mut(name).map(|l| &mut l.surface)
    }

    pub fn set_z_index(&mut self, name: &str, z_index: i32) -> bool {
        let Some(layer) = self.layers.get_mut(name) else {
            return false;
        };
        layer.z_index = z_index;
        self.changed(name, LayerProperty::ZIndex);
        true
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) -> bool {
        let Some(layer) = self.layers.get_mut(name) else {
            return false;
        };
        layer.visible = visible;
        self.changed(name, LayerProperty::Visible);
        true
    }

    /// Set opacity, clamped to [0, 1]. NaN is treated as 0.
    pub fn set_opacity(&mut self, name: &str, opacity: f32) -> bool {
        let Some(layer) = self.layers.get_mut(name) else {
            return false;
        };
        layer.opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self.changed(name, LayerProperty::Opacity);
        true
    }

    pub fn set_blend_mode(&mut self, name: &str, mode: BlendMode) -> bool {
        let Some(layer) = self.layers.get_mut(name) else {
            return false;
        };
        layer.blend_mode = mode;
        self.changed(name, LayerProperty::BlendMode);
        true
    }

    /// Draw grid lines into a layer. No-op (false) if the grid is disabled.
    pub fn draw_grid(&mut self, name: &str, color: Rgba) -> bool {
        if !self.grid.is_enabled() {
            return false;
        }
        let (w, h) = (self.width as i32, self.height as i32);
        let step = self.grid.cell_size() as usize;
        let Some(layer) = self.layers.get_mut(name) else {
            return false;
        };
        for x in (0..w).step_by(step) {
            layer.surface.stroke_line(x, 0, x, h - 1, color);
        }
        for y in (0..h).step_by(step) {
            layer.surface.stroke_line(0, y, w - 1, y, color);
        }
        self.changed(name, LayerProperty::Content);
        true
    }

    /// Layers in display order: ascending z-index, insertion order on ties.
    pub fn ordered(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.values().collect();
        layers.sort_by_key(|l| (l.z_index, l.order));
        layers
    }

    /// Composite visible layers into `out` (cleared first).
    pub fn render(&mut self, out: &mut impl DrawingSurface) {
        let (w, h) = (out.width(), out.height());
        out.clear_rect(0, 0, w, h);
        let mut drawn = 0;
        {
            let ordered = self.ordered();
            for layer in ordered.iter().filter(|l| l.visible && l.opacity > 0.0) {
                composite(out, layer);
                drawn += 1;
            }
        }
        self.events.push(LayerEvent::Render { layers: drawn });
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<LayerEvent> {
        std::mem::take(&mut self.events)
    }

    fn changed(&mut self, name: &str, property: LayerProperty) {
        self.events.push(LayerEvent::LayerChange {
            name: name.to_string(),
            property,
        });
    }
}

fn composite(out: &mut impl DrawingSurface, layer: &Layer) {
    let w = out.width().min(layer.surface.width());
    let h = out.height().min(layer.surface.height());
    let stride = out.width() as usize;
    let pixels = out.pixels_mut();
    for y in 0..h {
        for x in 0..w {
            let Some(src) = layer.surface.get(x, y) else {
                continue;
            };
            if src.is_transparent() {
                continue;
            }
            let idx = y as usize * stride + x as usize;
            pixels[idx] = layer.blend_mode.blend(pixels[idx], src, layer.opacity);
        }
    }
}
