//! 8-bit RGB color and perceived brightness.

/// Perceptual weights for the red, green and blue channels.
const LUMA_WEIGHTS: [f64; 3] = [0.241, 0.691, 0.068];

/// A color with three 8-bit channels and no alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Value of a single channel.
    #[inline]
    pub fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }
}

/// One of the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Channels in wire order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// A color carrying `value` in this channel and zero elsewhere.
    ///
    /// Compositing the three isolated channels with a lighten blend
    /// rebuilds the full color.
    #[inline]
    pub fn isolate(self, value: u8) -> Rgb {
        match self {
            Channel::Red => Rgb::new(value, 0, 0),
            Channel::Green => Rgb::new(0, value, 0),
            Channel::Blue => Rgb::new(0, 0, value),
        }
    }
}

/// Perceived brightness of a color, approximately in `0.0..=1.0`.
///
/// Weighted Euclidean norm over the raw 0..255 channel values, then
/// normalized by 255.
pub fn luminance(color: Rgb) -> f64 {
    let [r, g, b] = color.to_bytes().map(f64::from);
    let sum = LUMA_WEIGHTS[0] * r * r + LUMA_WEIGHTS[1] * g * g + LUMA_WEIGHTS[2] * b * b;
    sum.sqrt() / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_black_is_zero() {
        assert_eq!(luminance(Rgb::BLACK), 0.0);
    }

    #[test]
    fn test_luminance_white_is_near_one() {
        // sqrt(0.241 + 0.691 + 0.068) == 1.0
        assert!((luminance(Rgb::WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_luminance_green_dominates() {
        let red = luminance(Rgb::new(255, 0, 0));
        let green = luminance(Rgb::new(0, 255, 0));
        let blue = luminance(Rgb::new(0, 0, 255));
        assert!(green > red);
        assert!(red > blue);
        assert!((green - 0.691f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_luminance_uses_unnormalized_channels() {
        // Mid grey: sqrt(128^2) / 255, not a gamma-style curve
        let grey = luminance(Rgb::new(128, 128, 128));
        assert!((grey - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_channel_access_and_isolate() {
        let c = Rgb::new(10, 20, 30);
        assert_eq!(c.channel(Channel::Red), 10);
        assert_eq!(c.channel(Channel::Green), 20);
        assert_eq!(c.channel(Channel::Blue), 30);
        assert_eq!(Channel::Green.isolate(7), Rgb::new(0, 7, 0));
    }

    #[test]
    fn test_bytes_round_trip() {
        let c = Rgb::from_bytes([1, 2, 3]);
        assert_eq!(c.to_bytes(), [1, 2, 3]);
    }
}
