//! Light/dark bipartition of a box and the tone averages built on it.
//!
//! A box's pixels are split against the box mean of some key: luminance for
//! the two-tone and single-gradient codecs, one channel's value for the
//! per-channel codec. Ties go to the light side, so the light side is never
//! empty for a non-empty box.

mod gradient;

pub use gradient::{encode_position, Gradient, Position, Stop};

use crate::color::{luminance, Channel, Rgb};
use crate::partition::BoxPixel;

/// A box's pixels split around the mean of a brightness key.
#[derive(Debug, Clone)]
pub struct ToneSplit<'a> {
    /// Mean key value over the whole box.
    pub mean: f64,
    /// Pixels whose key is at or above the mean.
    pub light: Vec<&'a BoxPixel>,
    /// Pixels whose key is below the mean.
    pub dark: Vec<&'a BoxPixel>,
    /// Side of each input pixel, in input order; `true` is light.
    pub mask: Vec<bool>,
}

impl<'a> ToneSplit<'a> {
    /// Split by an arbitrary per-color key.
    pub fn by_key(pixels: &'a [BoxPixel], key: impl Fn(Rgb) -> f64) -> Self {
        if pixels.is_empty() {
            return Self {
                mean: 0.0,
                light: Vec::new(),
                dark: Vec::new(),
                mask: Vec::new(),
            };
        }
        let keys: Vec<f64> = pixels.iter().map(|p| key(p.color)).collect();
        let max = keys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // Summation rounding can push the mean of identical keys past the max.
        let mean = (keys.iter().sum::<f64>() / keys.len() as f64).min(max);

        let mut light = Vec::with_capacity(pixels.len());
        let mut dark = Vec::new();
        let mut mask = Vec::with_capacity(pixels.len());
        for (pixel, k) in pixels.iter().zip(keys) {
            let is_light = k >= mean;
            if is_light {
                light.push(pixel);
            } else {
                dark.push(pixel);
            }
            mask.push(is_light);
        }
        Self {
            mean,
            light,
            dark,
            mask,
        }
    }

    /// Split by perceived luminance.
    pub fn by_luminance(pixels: &'a [BoxPixel]) -> Self {
        Self::by_key(pixels, luminance)
    }

    /// Split by the raw value of a single channel.
    pub fn by_channel(pixels: &'a [BoxPixel], channel: Channel) -> Self {
        Self::by_key(pixels, |c| f64::from(c.channel(channel)))
    }
}

/// Per-channel floored mean color. Empty input yields black.
pub fn average_color(pixels: &[&BoxPixel]) -> Rgb {
    Rgb::new(
        average_channel(pixels, Channel::Red),
        average_channel(pixels, Channel::Green),
        average_channel(pixels, Channel::Blue),
    )
}

/// Floored mean of one channel. Empty input yields zero.
pub fn average_channel(pixels: &[&BoxPixel], channel: Channel) -> u8 {
    if pixels.is_empty() {
        return 0;
    }
    let sum: u64 = pixels
        .iter()
        .map(|p| u64::from(p.color.channel(channel)))
        .sum();
    (sum / pixels.len() as u64) as u8
}

/// Mean relative position of `pixels`, encoded into the gradient axis
/// domain. `None` for an empty set.
pub fn average_position(pixels: &[&BoxPixel], box_size: u32) -> Option<Position> {
    if pixels.is_empty() {
        return None;
    }
    let n = pixels.len() as f64;
    let mean_x = pixels.iter().map(|p| f64::from(p.x)).sum::<f64>() / n;
    let mean_y = pixels.iter().map(|p| f64::from(p.y)).sum::<f64>() / n;
    Some(encode_position(mean_x, mean_y, box_size))
}
