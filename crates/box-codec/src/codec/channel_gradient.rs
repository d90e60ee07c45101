//! Three independent single-channel gradients per box.
//!
//! Each channel is split against its own box mean, so a box can brighten
//! left-to-right in red while brightening top-to-bottom in blue.

use super::{
    box_region, check_layout, check_stops, CompressOptions, CompressedImage, GradientScale,
};
use crate::color::{Channel, Rgb};
use crate::error::CodecError;
use crate::format;
use crate::partition::{partition, BoxGrid};
use crate::raster::{Blend, Canvas, Raster};
use crate::tone::{average_channel, Gradient, ToneSplit};

/// One compressed box of a [`ChannelGradientImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelGradientBox {
    pub x: u32,
    pub y: u32,
    /// Red, green and blue gradients, in that order.
    pub channels: [Gradient<u8>; 3],
}

impl ChannelGradientBox {
    #[inline]
    pub fn channel(&self, channel: Channel) -> &Gradient<u8> {
        &self.channels[channel as usize]
    }
}

/// Image compressed to one gradient per channel per box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelGradientImage {
    grid: BoxGrid<ChannelGradientBox>,
    scale: GradientScale,
}

impl ChannelGradientImage {
    /// Wrap an existing grid, checking that boxes are in row-major order
    /// and that no stop sits at the reserved position `(0, 0)`.
    pub fn from_grid(
        grid: BoxGrid<ChannelGradientBox>,
        scale: GradientScale,
    ) -> Result<Self, CodecError> {
        check_layout(&grid, |b| (b.x, b.y))?;
        for b in grid.boxes() {
            for gradient in &b.channels {
                check_stops(b.x, b.y, gradient)?;
            }
        }
        Ok(Self { grid, scale })
    }

    #[inline]
    pub fn gradient_scale(&self) -> GradientScale {
        self.scale
    }
}

impl CompressedImage for ChannelGradientImage {
    type CompressedBox = ChannelGradientBox;

    const EXTENSIONS: &'static [&'static str] = &["grgb"];

    fn compress<R: Raster + ?Sized>(
        image: &R,
        options: &CompressOptions,
    ) -> Result<Self, CodecError> {
        let box_size = options.checked_box_size()?;
        let scale = options.checked_gradient_scale()?;
        let grid = partition(image, box_size)?.map(|b| {
            let channels = Channel::ALL.map(|channel| {
                let split = ToneSplit::by_channel(&b.pixels, channel);
                Gradient::from_split(&split, box_size, |set| average_channel(set, channel))
            });
            ChannelGradientBox {
                x: b.x,
                y: b.y,
                channels,
            }
        });
        tracing::debug!(
            box_size,
            scale = scale.value(),
            boxes_wide = grid.boxes_wide(),
            boxes_high = grid.boxes_high(),
            "Compressed per-channel gradient image"
        );
        Ok(Self { grid, scale })
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let (version, image) = format::channel_gradient::decode(bytes)?;
        tracing::debug!(
            ?version,
            records = image.grid.boxes().len(),
            "Decoded per-channel gradient image"
        );
        Ok(image)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        format::channel_gradient::encode(self)
    }

    fn grid(&self) -> &BoxGrid<ChannelGradientBox> {
        &self.grid
    }

    fn render_into<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let size = self.grid.box_size();
        let scale = self.scale.value();
        for b in self.grid.boxes() {
            let region = box_region(b.x, b.y, size);
            canvas.fill_region(region, Rgb::BLACK, Blend::Replace);
            for (channel, gradient) in Channel::ALL.into_iter().zip(&b.channels) {
                gradient.render(canvas, region, scale, Blend::Lighten, |v| {
                    channel.isolate(v)
                });
            }
        }
    }
}
