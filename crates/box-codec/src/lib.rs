//! box-codec: lossy block quantization codecs.
//!
//! An image is cut into fixed-size square boxes. Each box is split into a
//! light and a dark set of pixels around its mean brightness, and each set is
//! reduced to one representative tone. Three codecs differ in what they keep
//! beside the two tones:
//!
//! - [`IndexMapImage`]: one bit per pixel choosing light or dark.
//! - [`GradientImage`]: the centroids of the light and dark sets, rendered as
//!   a linear gradient between the two tones.
//! - [`ChannelGradientImage`]: the same, but split and rendered per color
//!   channel, then composited with a lighten blend.
//!
//! # Quick Start
//!
//! ```
//! use box_codec::{Blend, Canvas, CompressOptions, CompressedImage, GradientImage, Region, Rgb};
//! use tiny_skia::Pixmap;
//!
//! let mut source = <Pixmap as Canvas>::blank(16, 16).unwrap();
//! source.fill_region(Region::new(0, 0, 8, 16), Rgb::WHITE, Blend::Replace);
//!
//! let options = CompressOptions::new(8).gradient_scale(0.5);
//! let image = GradientImage::compress(&source, &options).unwrap();
//!
//! let bytes = image.to_bytes().unwrap();
//! let restored = GradientImage::decode(&bytes).unwrap().to_pixmap().unwrap();
//! assert_eq!(restored.width(), 16);
//! ```
//!
//! # Cropping
//!
//! Only whole boxes are encoded. A 17x10 image with 4-pixel boxes is stored
//! as 16x8; the remaining column and rows are dropped.
//!
//! # Rasterization
//!
//! Codecs read pixels through [`Raster`] and draw through [`Canvas`], which
//! exposes only solid and linear-gradient region fills.
//! [`tiny_skia::Pixmap`] implements both.
//!
//! # Binary Formats
//!
//! Each codec has its own magic and version history; see [`format`]. Files
//! of every historical version decode, and encoding always writes the newest
//! one. [`format::probe`] reads any header without decoding records.

pub mod codec;
pub mod color;
pub mod error;
pub mod format;
pub mod partition;
pub mod raster;
pub mod tone;


pub use codec::{
    ChannelGradientBox, ChannelGradientImage, CompressOptions, CompressedImage, GradientBox,
    GradientImage, GradientScale, IndexMapBox, IndexMapImage,
};
pub use color::{luminance, Channel, Rgb};
pub use error::CodecError;
pub use format::{identify, probe, CodecId, FileInfo};
pub use partition::{partition, BoxGrid, BoxPixel, UncompressedBox};
pub use raster::{Blend, Canvas, ColorStop, Raster, Region};
pub use tone::{Gradient, Position, Stop, ToneSplit};
