//! Color types used by the box codecs.
//!
//! Pixels are plain 8-bit RGB. Alpha never reaches the codecs: rasters drop
//! it on read and reconstructed images are always opaque.
//!
//! # Example
//!
//! ```
//! use box_codec::{luminance, Rgb};
//!
//! let white = Rgb::new(255, 255, 255);
//! let black = Rgb::BLACK;
//! assert!(luminance(white) > luminance(black));
//! ```

mod rgb;

pub use rgb::{luminance, Channel, Rgb};
