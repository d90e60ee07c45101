//! PNG conversion at the edges of the codec pipeline.
//!
//! Decoding expands every PNG layout to 8-bit RGB and drops alpha: the
//! codecs only ever see opaque pixels. Encoding always writes 8-bit RGB.

use crate::error::ImageError;
use std::io::Cursor;
use tiny_skia::{IntSize, Pixmap};

/// Decode PNG bytes into an opaque pixmap.
pub fn decode_png(data: &[u8]) -> Result<Pixmap, ImageError> {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::PngDecode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::PngDecode(e.to_string()))?;

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => return Err(ImageError::UnsupportedColorType(format!("{:?}", other))),
    };

    let (width, height) = (info.width, info.height);
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for row in buf.chunks(info.line_size).take(height as usize) {
        for pixel in row.chunks_exact(channels).take(width as usize) {
            let (r, g, b) = match channels {
                1 | 2 => (pixel[0], pixel[0], pixel[0]),
                _ => (pixel[0], pixel[1], pixel[2]),
            };
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
    }

    let size =
        IntSize::from_wh(width, height).ok_or(ImageError::UnsupportedDimensions { width, height })?;
    let pixmap =
        Pixmap::from_vec(rgba, size).ok_or(ImageError::UnsupportedDimensions { width, height })?;
    tracing::debug!(width, height, color_type = ?info.color_type, "Decoded PNG");
    Ok(pixmap)
}

/// Encode a pixmap as 8-bit RGB PNG, optionally re-compressed with oxipng.
pub fn encode_png(pixmap: &Pixmap, optimize: bool) -> Result<Vec<u8>, ImageError> {
    let rgb: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue()]
        })
        .collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgb)
            .map_err(|e| ImageError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }
    // Re-compress with oxipng (zopfli + adaptive filter selection)
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => Ok(optimized),
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}
