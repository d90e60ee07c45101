//! The three box codecs and the interface they share.
//!
//! | codec | per box | file magic |
//! |---|---|---|
//! | [`IndexMapImage`] | two colors and one light/dark bit per pixel | `QIMGBOX` |
//! | [`GradientImage`] | two colors and two positions, one gradient axis | `GRADIMG` |
//! | [`ChannelGradientImage`] | one gradient per color channel | `GRADRGB` |

mod channel_gradient;
mod gradient;
mod index_map;
mod options;

pub use channel_gradient::{ChannelGradientBox, ChannelGradientImage};
pub use gradient::{GradientBox, GradientImage};
pub use index_map::{IndexMapBox, IndexMapImage};
pub use options::{CompressOptions, GradientScale};

use crate::error::CodecError;
use crate::partition::BoxGrid;
use crate::raster::{Canvas, Raster, Region};
use crate::tone::{Gradient, Position};
use tiny_skia::Pixmap;

/// A compressed image: built once by [`compress`](Self::compress) or
/// [`decode`](Self::decode), then serialized or rendered.
///
/// # Example
///
/// ```
/// use box_codec::{Canvas, CompressOptions, CompressedImage, IndexMapImage};
/// use tiny_skia::Pixmap;
///
/// let source = <Pixmap as Canvas>::blank(8, 8).unwrap();
/// let image = IndexMapImage::compress(&source, &CompressOptions::new(4)).unwrap();
///
/// let bytes = image.to_bytes().unwrap();
/// let decoded = IndexMapImage::decode(&bytes).unwrap();
/// assert_eq!(decoded, image);
///
/// let pixels = decoded.to_pixmap().unwrap();
/// assert_eq!(pixels.width(), 8);
/// ```
pub trait CompressedImage: Sized {
    /// Per-box payload.
    type CompressedBox;

    /// File extensions conventionally used for this format.
    const EXTENSIONS: &'static [&'static str];

    /// Compress a raster with the given options.
    fn compress<R: Raster + ?Sized>(image: &R, options: &CompressOptions)
        -> Result<Self, CodecError>;

    /// Parse any version of this codec's binary format.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;

    /// Serialize in the current format version.
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError>;

    /// Compressed boxes.
    fn grid(&self) -> &BoxGrid<Self::CompressedBox>;

    /// Draw every box onto `canvas`, with the grid origin at `(0, 0)`.
    fn render_into<C: Canvas + ?Sized>(&self, canvas: &mut C);

    fn supported_file_extensions(&self) -> &'static [&'static str] {
        Self::EXTENSIONS
    }

    /// Reconstruct onto a fresh canvas the size of the covered area.
    fn to_canvas<C: Canvas>(&self) -> Result<C, CodecError> {
        let grid = self.grid();
        let mut canvas = C::blank(grid.width(), grid.height()).ok_or(CodecError::EmptyImage {
            width: grid.width(),
            height: grid.height(),
        })?;
        self.render_into(&mut canvas);
        Ok(canvas)
    }

    /// Reconstruct as a tiny-skia pixmap.
    fn to_pixmap(&self) -> Result<Pixmap, CodecError> {
        self.to_canvas()
    }
}

/// Pixel region of the box at grid coordinates `(x, y)`.
pub(crate) fn box_region(x: u32, y: u32, box_size: u32) -> Region {
    Region::square(x * box_size, y * box_size, box_size)
}

/// Check that every box's own coordinates match its row-major slot.
pub(crate) fn check_layout<B>(
    grid: &BoxGrid<B>,
    coords: impl Fn(&B) -> (u32, u32),
) -> Result<(), CodecError> {
    match grid.iter_coords().find(|&(x, y, b)| coords(b) != (x, y)) {
        Some((x, y, b)) => {
            let (bx, by) = coords(b);
            Err(CodecError::invalid(format!(
                "box ({}, {}) is stored in slot ({}, {})",
                bx, by, x, y
            )))
        }
        None => Ok(()),
    }
}

/// Reject stops at `(0, 0)`, which the wire formats reserve for "absent".
pub(crate) fn check_stops<T>(x: u32, y: u32, gradient: &Gradient<T>) -> Result<(), CodecError> {
    let reserved = Some(Position::new(0, 0));
    if gradient.light.position == reserved || gradient.dark.position == reserved {
        return Err(CodecError::invalid(format!(
            "box ({}, {}) has a gradient stop at (0, 0)",
            x, y
        )));
    }
    Ok(())
}
