//! Binary container shared by the three codecs.
//!
//! ```text
//! magic (8) | major (1) | minor (1) | [scale (1)] | box size (1)
//!           | boxes wide (1) | boxes high (1) | record count (3, BE)
//!           | records...
//! ```
//!
//! The scale byte is present only in gradient formats that carry it. Every
//! record starts with its grid `x` and `y`; the rest is codec specific (see
//! the per-codec modules). Each codec reads every version it has ever
//! written and always writes its newest one.

pub(crate) mod channel_gradient;
pub(crate) mod gradient;
pub(crate) mod index_map;

use crate::codec::GradientScale;
use crate::error::CodecError;
use crate::partition::BoxGrid;
use crate::tone::Position;

pub const INDEX_MAP_MAGIC: [u8; 8] = *b"QIMGBOX\0";
pub const GRADIENT_MAGIC: [u8; 8] = *b"GRADIMG\0";
pub const CHANNEL_GRADIENT_MAGIC: [u8; 8] = *b"GRADRGB\0";

const MAX_HEADER_BYTE: u64 = u8::MAX as u64;
const MAX_RECORD_COUNT: u64 = (1 << 24) - 1;

/// The codec family a file belongs to, identified by its magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecId {
    IndexMap,
    Gradient,
    ChannelGradient,
}

impl CodecId {
    pub const ALL: [CodecId; 3] = [CodecId::IndexMap, CodecId::Gradient, CodecId::ChannelGradient];

    pub fn magic(self) -> [u8; 8] {
        match self {
            CodecId::IndexMap => INDEX_MAP_MAGIC,
            CodecId::Gradient => GRADIENT_MAGIC,
            CodecId::ChannelGradient => CHANNEL_GRADIENT_MAGIC,
        }
    }

    /// Whether the given version of this codec stores a gradient scale byte.
    fn has_scale(self, version: (u8, u8)) -> Result<bool, CodecError> {
        match self {
            CodecId::IndexMap => index_map::Version::from_pair(version).map(|_| false),
            CodecId::Gradient => gradient::Version::from_pair(version).map(|v| v.has_scale()),
            CodecId::ChannelGradient => {
                channel_gradient::Version::from_pair(version).map(|v| v.has_scale())
            }
        }
    }
}

/// Identify the codec of a buffer from its magic, if any.
pub fn identify(bytes: &[u8]) -> Option<CodecId> {
    let magic = bytes.get(..8)?;
    CodecId::ALL.into_iter().find(|id| id.magic() == magic)
}

/// Header fields of an encoded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    pub codec: CodecId,
    pub version: (u8, u8),
    /// Scale stored in the header, or `None` for versions without one.
    pub gradient_scale: Option<GradientScale>,
    pub box_size: u8,
    pub boxes_wide: u8,
    pub boxes_high: u8,
    pub record_count: u32,
}

/// Read the header of any of the three formats without decoding records.
pub fn probe(bytes: &[u8]) -> Result<FileInfo, CodecError> {
    let codec = identify(bytes).ok_or_else(|| CodecError::format("unrecognized magic"))?;
    let mut reader = ByteReader::new(bytes);
    reader.expect_magic(&codec.magic())?;
    let version = reader.version()?;
    let header = reader.header(codec.has_scale(version)?)?;
    Ok(FileInfo {
        codec,
        version,
        gradient_scale: header.gradient_scale,
        box_size: header.box_size,
        boxes_wide: header.boxes_wide,
        boxes_high: header.boxes_high,
        record_count: header.record_count,
    })
}

/// Header fields following the version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub gradient_scale: Option<GradientScale>,
    pub box_size: u8,
    pub boxes_wide: u8,
    pub boxes_high: u8,
    pub record_count: u32,
}

impl Header {
    /// Check the fixed-width limits for `grid` and build its header.
    pub fn for_grid<T>(
        grid: &BoxGrid<T>,
        gradient_scale: Option<GradientScale>,
    ) -> Result<Self, CodecError> {
        let box_size = limit("box size", u64::from(grid.box_size()), MAX_HEADER_BYTE)?;
        let boxes_wide = limit("boxes wide", u64::from(grid.boxes_wide()), MAX_HEADER_BYTE)?;
        let boxes_high = limit("boxes high", u64::from(grid.boxes_high()), MAX_HEADER_BYTE)?;
        let record_count = limit("record count", grid.boxes().len() as u64, MAX_RECORD_COUNT)?;
        Ok(Self {
            gradient_scale,
            box_size: box_size as u8,
            boxes_wide: boxes_wide as u8,
            boxes_high: boxes_high as u8,
            record_count: record_count as u32,
        })
    }

    /// Write magic, version and this header.
    pub fn write(&self, out: &mut Vec<u8>, magic: &[u8; 8], version: (u8, u8)) {
        out.extend_from_slice(magic);
        out.push(version.0);
        out.push(version.1);
        if let Some(scale) = self.gradient_scale {
            out.push(scale.to_byte());
        }
        out.push(self.box_size);
        out.push(self.boxes_wide);
        out.push(self.boxes_high);
        out.extend_from_slice(&self.record_count.to_be_bytes()[1..]);
    }

    /// Grid coordinates expected for record `index`.
    pub fn coords_of(&self, index: usize) -> (u8, u8) {
        let wide = usize::from(self.boxes_wide.max(1));
        ((index % wide) as u8, (index / wide) as u8)
    }
}

fn limit(field: &'static str, value: u64, max: u64) -> Result<u64, CodecError> {
    if value > max {
        return Err(CodecError::EncodingLimitExceeded { field, value, max });
    }
    Ok(value)
}

/// Bounds-checked cursor over an encoded buffer.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                CodecError::format(format!(
                    "truncated: need {} bytes at offset {}, have {}",
                    n,
                    self.pos,
                    self.bytes.len()
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u24(&mut self) -> Result<u32, CodecError> {
        let [a, b, c] = self.array::<3>()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// Consume the magic, failing without reading further on mismatch.
    pub fn expect_magic(&mut self, magic: &[u8; 8]) -> Result<(), CodecError> {
        let found = self
            .take(8)
            .map_err(|_| CodecError::format("buffer shorter than magic"))?;
        if found != magic {
            return Err(CodecError::format("magic mismatch"));
        }
        Ok(())
    }

    pub fn version(&mut self) -> Result<(u8, u8), CodecError> {
        Ok((self.u8()?, self.u8()?))
    }

    /// Read the header fields that follow the version pair.
    pub fn header(&mut self, has_scale: bool) -> Result<Header, CodecError> {
        let gradient_scale = if has_scale {
            let byte = self.u8()?;
            Some(
                GradientScale::from_byte(byte)
                    .ok_or_else(|| CodecError::format("gradient scale byte is zero"))?,
            )
        } else {
            None
        };
        let box_size = self.u8()?;
        if box_size == 0 {
            return Err(CodecError::format("box size is zero"));
        }
        let boxes_wide = self.u8()?;
        let boxes_high = self.u8()?;
        let record_count = self.u24()?;
        if u32::from(boxes_wide) * u32::from(boxes_high) != record_count {
            return Err(CodecError::format(format!(
                "record count {} does not match {}x{} grid",
                record_count, boxes_wide, boxes_high
            )));
        }
        Ok(Header {
            gradient_scale,
            box_size,
            boxes_wide,
            boxes_high,
            record_count,
        })
    }

    /// Read a record's grid coordinates and check them against `expected`.
    pub fn record_coords(&mut self, expected: (u8, u8)) -> Result<(u32, u32), CodecError> {
        let (x, y) = (self.u8()?, self.u8()?);
        if (x, y) != expected {
            return Err(CodecError::format(format!(
                "record at ({}, {}) where ({}, {}) was expected",
                x, y, expected.0, expected.1
            )));
        }
        Ok((u32::from(x), u32::from(y)))
    }

    /// Fail if any bytes remain.
    pub fn finish(self) -> Result<(), CodecError> {
        let rest = self.bytes.len() - self.pos;
        if rest != 0 {
            return Err(CodecError::format(format!("{} trailing bytes", rest)));
        }
        Ok(())
    }
}

/// Read a position where `(0, 0)` means absent.
pub(crate) fn read_position(reader: &mut ByteReader<'_>) -> Result<Option<Position>, CodecError> {
    let [x, y] = reader.array::<2>()?;
    Ok(((x, y) != (0, 0)).then_some(Position::new(x, y)))
}

/// Write a position, encoding absent as `(0, 0)`.
pub(crate) fn write_position(out: &mut Vec<u8>, position: Option<Position>) {
    match position {
        Some(p) => out.extend_from_slice(&[p.x, p.y]),
        None => out.extend_from_slice(&[0, 0]),
    }
}

/// Convert grid coordinates for writing; the header check bounds them.
pub(crate) fn coord_byte(v: u32) -> u8 {
    v as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify() {
        let mut bytes = GRADIENT_MAGIC.to_vec();
        bytes.push(1);
        assert_eq!(identify(&bytes), Some(CodecId::Gradient));
        assert_eq!(identify(b"NOTMAGIC"), None);
        assert_eq!(identify(b"QIMG"), None);
    }

    #[test]
    fn test_header_limits() {
        let grid = BoxGrid::new(256, 1, 1, vec![()]).unwrap();
        assert!(matches!(
            Header::for_grid(&grid, None),
            Err(CodecError::EncodingLimitExceeded {
                field: "box size",
                ..
            })
        ));

        let grid = BoxGrid::new(1, 1, 256, vec![(); 256]).unwrap();
        assert!(matches!(
            Header::for_grid(&grid, None),
            Err(CodecError::EncodingLimitExceeded {
                field: "boxes high",
                value: 256,
                max: 255
            })
        ));
    }

    #[test]
    fn test_header_round_trip_with_scale() {
        let grid = BoxGrid::new(4, 3, 2, vec![(); 6]).unwrap();
        let header = Header::for_grid(&grid, GradientScale::from_byte(77)).unwrap();
        let mut out = Vec::new();
        header.write(&mut out, &GRADIENT_MAGIC, (1, 2));
        assert_eq!(out.len(), 8 + 2 + 1 + 3 + 3);
        assert_eq!(&out[out.len() - 3..], &[0, 0, 6]);

        let mut reader = ByteReader::new(&out);
        reader.expect_magic(&GRADIENT_MAGIC).unwrap();
        assert_eq!(reader.version().unwrap(), (1, 2));
        assert_eq!(reader.header(true).unwrap(), header);
        reader.finish().unwrap();
    }

    #[test]
    fn test_header_rejects_count_mismatch() {
        let mut out = INDEX_MAP_MAGIC.to_vec();
        out.extend_from_slice(&[1, 1, 2, 2, 2, 0, 0, 5]);
        let mut reader = ByteReader::new(&out);
        reader.expect_magic(&INDEX_MAP_MAGIC).unwrap();
        reader.version().unwrap();
        assert!(matches!(reader.header(false), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_header_rejects_zero_box_size() {
        let mut out = INDEX_MAP_MAGIC.to_vec();
        out.extend_from_slice(&[1, 1, 0, 1, 1, 0, 0, 1]);
        let mut reader = ByteReader::new(&out);
        reader.expect_magic(&INDEX_MAP_MAGIC).unwrap();
        reader.version().unwrap();
        assert!(matches!(reader.header(false), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_magic_mismatch_stops_at_magic() {
        let mut reader = ByteReader::new(b"XXXXXXXX");
        assert!(matches!(
            reader.expect_magic(&INDEX_MAP_MAGIC),
            Err(CodecError::Format(_))
        ));
    }

    #[test]
    fn test_short_buffer_is_format_error() {
        let mut reader = ByteReader::new(b"QIMG");
        assert!(reader.expect_magic(&INDEX_MAP_MAGIC).is_err());
    }

    #[test]
    fn test_u24_is_big_endian() {
        let mut reader = ByteReader::new(&[0x01, 0x02, 0x03]);
        assert_eq!(reader.u24().unwrap(), 0x010203);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut reader = ByteReader::new(&[1, 2]);
        reader.u8().unwrap();
        assert!(reader.finish().is_err());
    }

    #[test]
    fn test_position_sentinel() {
        let mut out = Vec::new();
        write_position(&mut out, None);
        write_position(&mut out, Some(Position::new(3, 250)));
        assert_eq!(out, vec![0, 0, 3, 250]);

        let mut reader = ByteReader::new(&out);
        assert_eq!(read_position(&mut reader).unwrap(), None);
        assert_eq!(
            read_position(&mut reader).unwrap(),
            Some(Position::new(3, 250))
        );
    }

    #[test]
    fn test_record_coords_out_of_order() {
        let mut reader = ByteReader::new(&[1, 0]);
        assert!(reader.record_coords((0, 0)).is_err());
    }
}
