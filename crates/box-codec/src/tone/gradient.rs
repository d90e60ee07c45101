//! Single-channel linear gradient between a light and a dark stop.
//!
//! The same primitive serves the single-gradient codec (with `T = Rgb`) and
//! each channel of the per-channel codec (with `T = u8`).

use super::{average_position, ToneSplit};
use crate::color::Rgb;
use crate::partition::BoxPixel;
use crate::raster::{Blend, Canvas, ColorStop, Region};

/// Quantized position inside a box, each axis in `1..=255`.
///
/// Axis value `v` stands for the fraction `v / 255` of the box edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Pixel offset from the box origin for this position, with the spread
    /// around the box centre scaled by `scale`.
    pub fn to_offset(self, box_size: u32, scale: f32) -> (f32, f32) {
        (
            axis_offset(self.x, box_size, scale),
            axis_offset(self.y, box_size, scale),
        )
    }
}

/// Encode a mean relative pixel coordinate as a [`Position`].
///
/// Each axis maps the pixel centre `mean + 0.5` onto `0..=255` and is
/// lifted to at least 1.
pub fn encode_position(mean_x: f64, mean_y: f64, box_size: u32) -> Position {
    Position::new(encode_axis(mean_x, box_size), encode_axis(mean_y, box_size))
}

fn encode_axis(mean: f64, box_size: u32) -> u8 {
    let v = ((mean + 0.5) / f64::from(box_size) * 255.0).floor();
    v.clamp(1.0, 255.0) as u8
}

fn axis_offset(v: u8, box_size: u32, scale: f32) -> f32 {
    let size = box_size as f32;
    size / 2.0 + ((f32::from(v) / 255.0 - 0.5) * 2.0 * scale) * size
}

/// One end of a box gradient. A stop without a position marks a flat box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop<T> {
    pub position: Option<Position>,
    pub value: T,
}

impl<T> Stop<T> {
    #[inline]
    pub fn new(position: Option<Position>, value: T) -> Self {
        Self { position, value }
    }
}

/// A light and a dark stop for one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient<T> {
    pub light: Stop<T>,
    pub dark: Stop<T>,
}

impl<T: Copy> Gradient<T> {
    /// Build the stops for a split box, averaging each side with `average`.
    ///
    /// An empty dark side copies the light value and drops its position.
    /// Coinciding positions also drop the dark position, so the box renders
    /// flat instead of as a zero-length gradient.
    pub fn from_split(
        split: &ToneSplit<'_>,
        box_size: u32,
        average: impl Fn(&[&BoxPixel]) -> T,
    ) -> Self {
        let light = Stop::new(
            average_position(&split.light, box_size),
            average(&split.light),
        );
        let dark = if split.dark.is_empty() {
            Stop::new(None, light.value)
        } else {
            let position = average_position(&split.dark, box_size);
            Stop::new(
                position.filter(|p| Some(*p) != light.position),
                average(&split.dark),
            )
        };
        Self { light, dark }
    }

    /// Render into the box at `region`, mapping stop values to colors with
    /// `to_color`.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        region: Region,
        scale: f32,
        blend: Blend,
        to_color: impl Fn(T) -> Rgb,
    ) {
        match (self.light.position, self.dark.position) {
            (Some(light_pos), Some(dark_pos)) => {
                let from = self.color_stop(region, light_pos, scale, to_color(self.light.value));
                let to = self.color_stop(region, dark_pos, scale, to_color(self.dark.value));
                canvas.linear_gradient_fill(region, from, to, blend);
            }
            (None, Some(_)) => canvas.fill_region(region, to_color(self.dark.value), blend),
            _ => canvas.fill_region(region, to_color(self.light.value), blend),
        }
    }

    fn color_stop(&self, region: Region, pos: Position, scale: f32, color: Rgb) -> ColorStop {
        let (dx, dy) = pos.to_offset(region.width, scale);
        ColorStop::new(region.x as f32 + dx, region.y as f32 + dy, color)
    }
}
