//! Per-channel gradient wire format.
//!
//! | version | scale byte | record |
//! |---|---|---|
//! | 1.0 | no | x, y, then for red, green, blue: light {px, py, v}, dark {px, py, v} |
//! | 1.1 | yes | as 1.0 |

use super::{
    coord_byte, read_position, write_position, ByteReader, Header, CHANNEL_GRADIENT_MAGIC,
};
use crate::codec::{ChannelGradientBox, ChannelGradientImage, CompressedImage, GradientScale};
use crate::error::CodecError;
use crate::partition::BoxGrid;
use crate::tone::{Gradient, Stop};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Version {
    V1_0,
    /// Gradient scale in the header.
    V1_1,
}

impl Version {
    pub const CURRENT: Self = Version::V1_1;

    pub fn from_pair(pair: (u8, u8)) -> Result<Self, CodecError> {
        match pair {
            (1, 0) => Ok(Version::V1_0),
            (1, 1) => Ok(Version::V1_1),
            (major, minor) => Err(CodecError::format(format!(
                "unsupported per-channel gradient version {}.{}",
                major, minor
            ))),
        }
    }

    pub fn pair(self) -> (u8, u8) {
        match self {
            Version::V1_0 => (1, 0),
            Version::V1_1 => (1, 1),
        }
    }

    pub fn has_scale(self) -> bool {
        self == Version::V1_1
    }
}

pub(crate) fn encode(image: &ChannelGradientImage) -> Result<Vec<u8>, CodecError> {
    let grid = image.grid();
    let header = Header::for_grid(grid, Some(image.gradient_scale()))?;
    let mut out = Vec::with_capacity(17 + grid.boxes().len() * 20);
    header.write(&mut out, &CHANNEL_GRADIENT_MAGIC, Version::CURRENT.pair());

    for b in grid.boxes() {
        out.push(coord_byte(b.x));
        out.push(coord_byte(b.y));
        for gradient in &b.channels {
            write_stop(&mut out, &gradient.light);
            write_stop(&mut out, &gradient.dark);
        }
    }
    Ok(out)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<(Version, ChannelGradientImage), CodecError> {
    let mut reader = ByteReader::new(bytes);
    reader.expect_magic(&CHANNEL_GRADIENT_MAGIC)?;
    let version = Version::from_pair(reader.version()?)?;
    let header = reader.header(version.has_scale())?;
    let scale = header.gradient_scale.unwrap_or_else(|| {
        tracing::trace!(?version, "No gradient scale stored, assuming default");
        GradientScale::DEFAULT
    });

    let mut boxes = Vec::with_capacity(header.record_count as usize);
    for index in 0..header.record_count as usize {
        let (x, y) = reader.record_coords(header.coords_of(index))?;
        let mut channels = [Gradient {
            light: Stop::new(None, 0u8),
            dark: Stop::new(None, 0u8),
        }; 3];
        for gradient in &mut channels {
            gradient.light = read_stop(&mut reader)?;
            gradient.dark = read_stop(&mut reader)?;
        }
        boxes.push(ChannelGradientBox { x, y, channels });
    }
    reader.finish()?;

    let grid = BoxGrid::new(
        u32::from(header.box_size),
        u32::from(header.boxes_wide),
        u32::from(header.boxes_high),
        boxes,
    )?;
    Ok((version, ChannelGradientImage::from_grid(grid, scale)?))
}

fn write_stop(out: &mut Vec<u8>, stop: &Stop<u8>) {
    write_position(out, stop.position);
    out.push(stop.value);
}

fn read_stop(reader: &mut ByteReader<'_>) -> Result<Stop<u8>, CodecError> {
    let position = read_position(reader)?;
    Ok(Stop::new(position, reader.u8()?))
}
