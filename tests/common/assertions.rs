//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Decoded 8-bit RGB image
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl DecodedPng {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * self.width + x) * 3) as usize;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }
}

/// Assert bytes are a PNG and decode them as 8-bit RGB
pub fn assert_png(bytes: &[u8]) -> DecodedPng {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );

    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());

    // Optimized output may be reduced to gray or palette; normalize to RGB
    let channels = info.color_type.samples();
    let rgb: Vec<u8> = buf
        .chunks_exact(channels)
        .flat_map(|p| match channels {
            1 | 2 => [p[0], p[0], p[0]],
            _ => [p[0], p[1], p[2]],
        })
        .collect();

    DecodedPng {
        width: info.width,
        height: info.height,
        rgb,
    }
}

/// Assert a PNG has the expected dimensions
pub fn assert_png_size(bytes: &[u8], width: u32, height: u32) -> DecodedPng {
    let decoded = assert_png(bytes);
    assert_eq!(
        (decoded.width, decoded.height),
        (width, height),
        "Unexpected PNG dimensions"
    );
    decoded
}

/// Assert bytes start with the given codec magic
pub fn assert_magic(bytes: &[u8], magic: &[u8; 8]) {
    assert!(
        bytes.starts_with(magic),
        "Expected magic {:?}, got {:?}",
        String::from_utf8_lossy(magic),
        String::from_utf8_lossy(&bytes[..8.min(bytes.len())])
    );
}
