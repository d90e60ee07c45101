//! One luminance-split gradient per box, shared by all three channels.

use super::{
    box_region, check_layout, check_stops, CompressOptions, CompressedImage, GradientScale,
};
use crate::color::Rgb;
use crate::error::CodecError;
use crate::format;
use crate::partition::{partition, BoxGrid};
use crate::raster::{Blend, Canvas, Raster};
use crate::tone::{average_color, Gradient, ToneSplit};

/// One compressed box of a [`GradientImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientBox {
    pub x: u32,
    pub y: u32,
    pub gradient: Gradient<Rgb>,
}

/// Image compressed to one light-to-dark gradient per box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientImage {
    grid: BoxGrid<GradientBox>,
    scale: GradientScale,
}

impl GradientImage {
    /// Wrap an existing grid, checking that boxes are in row-major order
    /// and that no stop sits at the reserved position `(0, 0)`.
    pub fn from_grid(
        grid: BoxGrid<GradientBox>,
        scale: GradientScale,
    ) -> Result<Self, CodecError> {
        check_layout(&grid, |b| (b.x, b.y))?;
        for b in grid.boxes() {
            check_stops(b.x, b.y, &b.gradient)?;
        }
        Ok(Self { grid, scale })
    }

    #[inline]
    pub fn gradient_scale(&self) -> GradientScale {
        self.scale
    }
}

impl CompressedImage for GradientImage {
    type CompressedBox = GradientBox;

    const EXTENSIONS: &'static [&'static str] = &["gimg", "grad"];

    fn compress<R: Raster + ?Sized>(
        image: &R,
        options: &CompressOptions,
    ) -> Result<Self, CodecError> {
        let box_size = options.checked_box_size()?;
        let scale = options.checked_gradient_scale()?;
        let grid = partition(image, box_size)?.map(|b| {
            let split = ToneSplit::by_luminance(&b.pixels);
            GradientBox {
                x: b.x,
                y: b.y,
                gradient: Gradient::from_split(&split, box_size, average_color),
            }
        });
        tracing::debug!(
            box_size,
            scale = scale.value(),
            boxes_wide = grid.boxes_wide(),
            boxes_high = grid.boxes_high(),
            "Compressed gradient image"
        );
        Ok(Self { grid, scale })
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let (version, image) = format::gradient::decode(bytes)?;
        tracing::debug!(
            ?version,
            records = image.grid.boxes().len(),
            "Decoded gradient image"
        );
        Ok(image)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        format::gradient::encode(self)
    }

    fn grid(&self) -> &BoxGrid<GradientBox> {
        &self.grid
    }

    fn render_into<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let size = self.grid.box_size();
        let scale = self.scale.value();
        for b in self.grid.boxes() {
            let region = box_region(b.x, b.y, size);
            b.gradient
                .render(canvas, region, scale, Blend::Replace, |color| color);
        }
    }
}
