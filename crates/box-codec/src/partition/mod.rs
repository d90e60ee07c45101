//! Splitting an image into a grid of fixed-size square boxes.
//!
//! The grid covers `box_size * floor(width / box_size)` by
//! `box_size * floor(height / box_size)` pixels. Trailing partial rows and
//! columns are cropped, not padded.

use crate::color::Rgb;
use crate::error::CodecError;
use crate::raster::Raster;

/// A row-major grid of equally sized boxes.
///
/// `T` is the per-box payload: [`UncompressedBox`] during compression, a
/// codec's compressed box afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxGrid<T> {
    box_size: u32,
    boxes_wide: u32,
    boxes_high: u32,
    boxes: Vec<T>,
}

impl<T> BoxGrid<T> {
    /// Wrap boxes already laid out in row-major order.
    ///
    /// Fails if the number of boxes does not fill the grid.
    pub fn new(
        box_size: u32,
        boxes_wide: u32,
        boxes_high: u32,
        boxes: Vec<T>,
    ) -> Result<Self, CodecError> {
        if box_size == 0 {
            return Err(CodecError::invalid("box size must be positive"));
        }
        let expected = boxes_wide as u64 * boxes_high as u64;
        if boxes.len() as u64 != expected {
            return Err(CodecError::invalid(format!(
                "grid of {}x{} boxes needs {} boxes, got {}",
                boxes_wide,
                boxes_high,
                expected,
                boxes.len()
            )));
        }
        Ok(Self {
            box_size,
            boxes_wide,
            boxes_high,
            boxes,
        })
    }

    #[inline]
    pub fn box_size(&self) -> u32 {
        self.box_size
    }

    #[inline]
    pub fn boxes_wide(&self) -> u32 {
        self.boxes_wide
    }

    #[inline]
    pub fn boxes_high(&self) -> u32 {
        self.boxes_high
    }

    /// Width in pixels covered by whole boxes.
    #[inline]
    pub fn width(&self) -> u32 {
        self.boxes_wide * self.box_size
    }

    /// Height in pixels covered by whole boxes.
    #[inline]
    pub fn height(&self) -> u32 {
        self.boxes_high * self.box_size
    }

    #[inline]
    pub fn boxes(&self) -> &[T] {
        &self.boxes
    }

    /// Iterate boxes with their grid coordinates, row-major.
    pub fn iter_coords(&self) -> impl Iterator<Item = (u32, u32, &T)> {
        let wide = self.boxes_wide.max(1);
        self.boxes
            .iter()
            .enumerate()
            .map(move |(i, b)| ((i as u32) % wide, (i as u32) / wide, b))
    }

    /// Transform every box, keeping the grid shape.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> BoxGrid<U> {
        BoxGrid {
            box_size: self.box_size,
            boxes_wide: self.boxes_wide,
            boxes_high: self.boxes_high,
            boxes: self.boxes.into_iter().map(f).collect(),
        }
    }
}

/// A pixel inside a box, positioned relative to the box origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxPixel {
    pub x: u32,
    pub y: u32,
    pub color: Rgb,
}

/// A box's raw pixels, row-major relative to the box origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncompressedBox {
    /// Grid column.
    pub x: u32,
    /// Grid row.
    pub y: u32,
    pub pixels: Vec<BoxPixel>,
}

/// Split `image` into `box_size` squares, cropping any partial boxes.
pub fn partition<R: Raster + ?Sized>(
    image: &R,
    box_size: u32,
) -> Result<BoxGrid<UncompressedBox>, CodecError> {
    if box_size == 0 {
        return Err(CodecError::invalid("box size must be positive"));
    }
    let boxes_wide = image.width() / box_size;
    let boxes_high = image.height() / box_size;

    let mut boxes = Vec::with_capacity((boxes_wide * boxes_high) as usize);
    for by in 0..boxes_high {
        for bx in 0..boxes_wide {
            let origin_x = bx * box_size;
            let origin_y = by * box_size;
            let mut pixels = Vec::with_capacity((box_size * box_size) as usize);
            for py in 0..box_size {
                for px in 0..box_size {
                    pixels.push(BoxPixel {
                        x: px,
                        y: py,
                        color: image.read_pixel(origin_x + px, origin_y + py),
                    });
                }
            }
            boxes.push(UncompressedBox {
                x: bx,
                y: by,
                pixels,
            });
        }
    }

    BoxGrid::new(box_size, boxes_wide, boxes_high, boxes)
}
