//! Index-map wire format.
//!
//! | version | record |
//! |---|---|
//! | 1.0 | x, y, size, light (3), dark (3), size² index bytes |
//! | 1.1 | x, y, light (3), dark (3), size² index bytes |

use super::{coord_byte, ByteReader, Header, INDEX_MAP_MAGIC};
use crate::codec::{CompressedImage, IndexMapBox, IndexMapImage};
use crate::color::Rgb;
use crate::error::CodecError;
use crate::partition::BoxGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Version {
    /// Box size repeated in every record.
    V1_0,
    V1_1,
}

impl Version {
    pub const CURRENT: Self = Version::V1_1;

    pub fn from_pair(pair: (u8, u8)) -> Result<Self, CodecError> {
        match pair {
            (1, 0) => Ok(Version::V1_0),
            (1, 1) => Ok(Version::V1_1),
            (major, minor) => Err(CodecError::format(format!(
                "unsupported index map version {}.{}",
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
}

pub(crate) fn encode(image: &IndexMapImage) -> Result<Vec<u8>, CodecError> {
    let grid = image.grid();
    let header = Header::for_grid(grid, None)?;
    let pixels = (grid.box_size() * grid.box_size()) as usize;
    let mut out = Vec::with_capacity(17 + grid.boxes().len() * (8 + pixels));
    header.write(&mut out, &INDEX_MAP_MAGIC, Version::CURRENT.pair());

    for b in grid.boxes() {
        out.push(coord_byte(b.x));
        out.push(coord_byte(b.y));
        out.extend_from_slice(&b.light.to_bytes());
        out.extend_from_slice(&b.dark.to_bytes());
        out.extend(b.bits.iter().map(|&bit| u8::from(bit)));
    }
    Ok(out)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<(Version, IndexMapImage), CodecError> {
    let mut reader = ByteReader::new(bytes);
    reader.expect_magic(&INDEX_MAP_MAGIC)?;
    let version = Version::from_pair(reader.version()?)?;
    let header = reader.header(false)?;
    let pixels = usize::from(header.box_size) * usize::from(header.box_size);

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
        let bits = reader
            .take(pixels)?
            .iter()
            .map(|&byte| match byte {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(CodecError::format(format!("index byte {} is not 0 or 1", other))),
            })
            .collect::<Result<Vec<bool>, CodecError>>()?;
        boxes.push(IndexMapBox {
            x,
            y,
            light,
            dark,
            bits,
        });
    }
    reader.finish()?;

    let grid = BoxGrid::new(
        u32::from(header.box_size),
        u32::from(header.boxes_wide),
        u32::from(header.boxes_high),
        boxes,
    )?;
    Ok((version, IndexMapImage::from_grid(grid)?))
}
