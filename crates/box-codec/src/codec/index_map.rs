//! Two tones per box plus a one-bit-per-pixel map choosing between them.

use super::{box_region, check_layout, CompressOptions, CompressedImage};
use crate::color::Rgb;
use crate::error::CodecError;
use crate::format;
use crate::partition::{partition, BoxGrid};
use crate::raster::{Blend, Canvas, Raster, Region};
use crate::tone::{average_color, ToneSplit};

/// One compressed box of an [`IndexMapImage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMapBox {
    pub x: u32,
    pub y: u32,
    pub light: Rgb,
    pub dark: Rgb,
    /// One entry per pixel, row-major from the box origin; `true` selects
    /// `light`.
    pub bits: Vec<bool>,
}

/// Image compressed to two colors and an index map per box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMapImage {
    grid: BoxGrid<IndexMapBox>,
}

impl IndexMapImage {
    /// Wrap an existing grid, checking that boxes are in row-major order
    /// and that every map covers its box.
    pub fn from_grid(grid: BoxGrid<IndexMapBox>) -> Result<Self, CodecError> {
        check_layout(&grid, |b| (b.x, b.y))?;
        let pixels = (grid.box_size() as usize).pow(2);
        if let Some(b) = grid.boxes().iter().find(|b| b.bits.len() != pixels) {
            return Err(CodecError::invalid(format!(
                "box ({}, {}) has {} index bits, expected {}",
                b.x,
                b.y,
                b.bits.len(),
                pixels
            )));
        }
        Ok(Self { grid })
    }
}

impl CompressedImage for IndexMapImage {
    type CompressedBox = IndexMapBox;

    const EXTENSIONS: &'static [&'static str] = &["qimg"];

    fn compress<R: Raster + ?Sized>(
        image: &R,
        options: &CompressOptions,
    ) -> Result<Self, CodecError> {
        let box_size = options.checked_box_size()?;
        let grid = partition(image, box_size)?.map(|b| {
            let split = ToneSplit::by_luminance(&b.pixels);
            let light = average_color(&split.light);
            let dark = if split.dark.is_empty() {
                light
            } else {
                average_color(&split.dark)
            };
            IndexMapBox {
                x: b.x,
                y: b.y,
                light,
                dark,
                bits: split.mask,
            }
        });
        tracing::debug!(
            box_size,
            boxes_wide = grid.boxes_wide(),
            boxes_high = grid.boxes_high(),
            "Compressed index map image"
        );
        Ok(Self { grid })
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let (version, image) = format::index_map::decode(bytes)?;
        tracing::debug!(
            ?version,
            records = image.grid.boxes().len(),
            "Decoded index map image"
        );
        Ok(image)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        format::index_map::encode(self)
    }

    fn grid(&self) -> &BoxGrid<IndexMapBox> {
        &self.grid
    }

    fn render_into<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let size = self.grid.box_size();
        for b in self.grid.boxes() {
            let origin = box_region(b.x, b.y, size);
            for (i, &bit) in b.bits.iter().enumerate() {
                let i = i as u32;
                let pixel = Region::square(origin.x + i % size, origin.y + i / size, 1);
                let color = if bit { b.light } else { b.dark };
                canvas.fill_region(pixel, color, Blend::Replace);
            }
        }
    }
}
