//! Compression options.

use crate::error::CodecError;

/// How far gradient stops sit from a box's centre, in `1/255` steps.
///
/// Stored quantized so that an image parsed from bytes carries exactly the
/// value it was serialized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GradientScale(u8);

impl GradientScale {
    /// `128 / 255`, the value assumed by formats that predate the scale field.
    pub const DEFAULT: Self = Self(128);

    /// Quantize a scale in `(0, 1]`.
    ///
    /// Positive values too small to survive quantization round up to the
    /// smallest step.
    pub fn new(scale: f32) -> Result<Self, CodecError> {
        if !scale.is_finite() || scale <= 0.0 || scale > 1.0 {
            return Err(CodecError::invalid(format!(
                "gradient scale must be in (0, 1], got {}",
                scale
            )));
        }
        Ok(Self((scale * 255.0).round().max(1.0) as u8))
    }

    /// Scale from its wire byte. Zero is not a valid scale.
    pub fn from_byte(byte: u8) -> Option<Self> {
        (byte != 0).then_some(Self(byte))
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn value(self) -> f32 {
        f32::from(self.0) / 255.0
    }
}

impl Default for GradientScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options for [`CompressedImage::compress`](super::CompressedImage::compress).
///
/// # Example
///
/// ```
/// use box_codec::CompressOptions;
///
/// let options = CompressOptions::new(8).gradient_scale(0.25);
/// assert_eq!(options.box_size, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompressOptions {
    /// Box edge length in pixels. Must be positive.
    pub box_size: u32,

    /// Gradient scale for the gradient codecs; ignored by the index-map
    /// codec. `None` uses [`GradientScale::DEFAULT`].
    pub gradient_scale: Option<f32>,
}

impl CompressOptions {
    #[inline]
    pub fn new(box_size: u32) -> Self {
        Self {
            box_size,
            gradient_scale: None,
        }
    }

    #[inline]
    pub fn gradient_scale(mut self, scale: f32) -> Self {
        self.gradient_scale = Some(scale);
        self
    }

    /// Validated box size.
    pub fn checked_box_size(&self) -> Result<u32, CodecError> {
        if self.box_size == 0 {
            return Err(CodecError::invalid("box size must be positive"));
        }
        Ok(self.box_size)
    }

    /// Validated, quantized gradient scale.
    pub fn checked_gradient_scale(&self) -> Result<GradientScale, CodecError> {
        self.gradient_scale
            .map(GradientScale::new)
            .unwrap_or(Ok(GradientScale::DEFAULT))
    }
}
