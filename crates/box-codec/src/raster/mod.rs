//! The rasterization capability the codecs render through.
//!
//! Compression only ever reads pixels ([`Raster`]); reconstruction only ever
//! issues whole-region fills ([`Canvas`]). Neither touches row strides or
//! premultiplied storage directly, so any pixel store can host the codecs.
//! [`tiny_skia::Pixmap`] implements both traits.

mod pixmap;

use crate::color::Rgb;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square region of edge `size` at pixel origin `(x, y)`.
    #[inline]
    pub fn square(x: u32, y: u32, size: u32) -> Self {
        Self::new(x, y, size, size)
    }
}

/// How a fill combines with what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    /// Overwrite the destination.
    #[default]
    Replace,
    /// Keep the per-channel maximum of source and destination.
    Lighten,
}

/// One end of a linear gradient, in absolute pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
}

impl ColorStop {
    #[inline]
    pub fn new(x: f32, y: f32, color: Rgb) -> Self {
        Self { x, y, color }
    }
}

/// Read access to a pixel grid.
pub trait Raster {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color at `(x, y)` with alpha dropped. Out-of-bounds reads yield black.
    fn read_pixel(&self, x: u32, y: u32) -> Rgb;
}

/// Write access to a pixel grid through region fills.
pub trait Canvas: Raster {
    /// Opaque black canvas of the given size, or `None` if it cannot be
    /// allocated (including zero-sized canvases).
    fn blank(width: u32, height: u32) -> Option<Self>
    where
        Self: Sized;

    /// Fill `region` with a solid color.
    fn fill_region(&mut self, region: Region, color: Rgb, blend: Blend);

    /// Fill `region` with a linear gradient running from `from` to `to`.
    ///
    /// Pixels beyond either stop take that stop's color. Coincident stops
    /// degrade to a solid fill with `from`'s color.
    fn linear_gradient_fill(
        &mut self,
        region: Region,
        from: ColorStop,
        to: ColorStop,
        blend: Blend,
    );
}
