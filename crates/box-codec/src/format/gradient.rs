//! Single-gradient wire format.
//!
//! | version | scale byte | record |
//! |---|---|---|
//! | 1.0 | no | x, y, size, light (3), dark (3), light pos (2), dark pos (2) |
//! | 1.1 | no | x, y, light (3), dark (3), light pos (2), dark pos (2) |
//! | 1.2 | yes | as 1.1 |
//!
//! Positions in 1.0 are always present and may contain raw zeros; from 1.1
//! on `(0, 0)` marks an absent position.

use super::{coord_byte, read_position, write_position, ByteReader, Header, GRADIENT_MAGIC};
use crate::codec::{CompressedImage, GradientBox, GradientImage, GradientScale};
use crate::color::Rgb;
use crate::error::CodecError;
use crate::partition::BoxGrid;
use crate::tone::{Gradient, Position, Stop};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Version {
    /// Box size in every record, positions never absent.
    V1_0,
    /// Absent positions encoded as `(0, 0)`.
    V1_1,
    /// Gradient scale in the header.
    V1_2,
}

impl Version {
    pub const CURRENT: Self = Version::V1_2;

    pub fn from_pair(pair: (u8, u8)) -> Result<Self, CodecError> {
        match pair {
            (1, 0) => Ok(Version::V1_0),
            (1, 1) => Ok(Version::V1_1),
            (1, 2) => Ok(Version::V1_2),
            (major, minor) => Err(CodecError::format(format!(
                "unsupported gradient version {}.{}",
                major, minor
            ))),
        }
    }

    pub fn pair(self) -> (u8, u8) {
        match self {
            Version::V1_0 => (1, 0),
            Version::V1_1 => (1, 1),
            Version::V1_2 => (1, 2),
        }
    }

    pub fn has_scale(self) -> bool {
        self == Version::V1_2
    }
}

pub(crate) fn encode(image: &GradientImage) -> Result<Vec<u8>, CodecError> {
    let grid = image.grid();
    let header = Header::for_grid(grid, Some(image.gradient_scale()))?;
    let mut out = Vec::with_capacity(17 + grid.boxes().len() * 12);
    header.write(&mut out, &GRADIENT_MAGIC, Version::CURRENT.pair());

    for b in grid.boxes() {
        out.push(coord_byte(b.x));
        out.push(coord_byte(b.y));
        out.extend_from_slice(&b.gradient.light.value.to_bytes());
        out.extend_from_slice(&b.gradient.dark.value.to_bytes());
        write_position(&mut out, b.gradient.light.position);
        write_position(&mut out, b.gradient.dark.position);
    }
    Ok(out)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<(Version, GradientImage), CodecError> {
    let mut reader = ByteReader::new(bytes);
    reader.expect_magic(&GRADIENT_MAGIC)?;
    let version = Version::from_pair(reader.version()?)?;
    let header = reader.header(version.has_scale())?;
    let scale = header.gradient_scale.unwrap_or_else(|| {
        tracing::trace!(?version, "No gradient scale stored, assuming default");
        GradientScale::DEFAULT
    });

    let mut boxes = Vec::with_capacity(header.record_count as usize);
    for index in 0..header.record_count as usize {
        let (x, y) = reader.record_coords(header.coords_of(index))?;
        if version == Version::V1_0 {
            let size = reader.u8()?;
            if size != header.box_size {
                return Err(CodecError::format(format!(
                    "record box size {} differs from header box size {}",
                    size, header.box_size
                )));
            }
        }
        let light = Rgb::from_bytes(reader.array::<3>()?);
        let dark = Rgb::from_bytes(reader.array::<3>()?);
        let (light_pos, dark_pos) = match version {
            Version::V1_0 => (
                Some(legacy_position(&mut reader)?),
                Some(legacy_position(&mut reader)?),
            ),
            Version::V1_1 | Version::V1_2 => {
                (read_position(&mut reader)?, read_position(&mut reader)?)
            }
        };
        let dark_pos = if version == Version::V1_0 && dark_pos == light_pos {
            None
        } else {
            dark_pos
        };
        boxes.push(GradientBox {
            x,
            y,
            gradient: Gradient {
                light: Stop::new(light_pos, light),
                dark: Stop::new(dark_pos, dark),
            },
        });
    }
    reader.finish()?;

    let grid = BoxGrid::new(
        u32::from(header.box_size),
        u32::from(header.boxes_wide),
        u32::from(header.boxes_high),
        boxes,
    )?;
    Ok((version, GradientImage::from_grid(grid, scale)?))
}

/// A 1.0 position: always present, each axis lifted off zero.
fn legacy_position(reader: &mut ByteReader<'_>) -> Result<Position, CodecError> {
    let [x, y] = reader.array::<2>()?;
    Ok(Position::new(x.max(1), y.max(1)))
}
