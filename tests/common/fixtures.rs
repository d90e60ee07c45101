//! Test fixtures: small PNG images built in memory.

use std::path::{Path, PathBuf};

/// Encode raw RGB rows as an 8-bit RGB PNG
pub fn rgb_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&pixel(x, y));
        }
    }
    encode(width, height, png::ColorType::Rgb, &data)
}

/// Encode an 8-bit grayscale PNG
pub fn gray_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> u8) -> Vec<u8> {
    let data: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| pixel(x, y))
        .collect();
    encode(width, height, png::ColorType::Grayscale, &data)
}

fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

/// Left half white, right half black
pub fn split_png(width: u32, height: u32) -> Vec<u8> {
    rgb_png(width, height, |x, _| {
        if x < width / 2 {
            [255, 255, 255]
        } else {
            [0, 0, 0]
        }
    })
}

/// Smooth horizontal red ramp over a vertical blue ramp
pub fn ramp_png(width: u32, height: u32) -> Vec<u8> {
    rgb_png(width, height, |x, y| {
        [
            (x * 255 / width.max(1)) as u8,
            64,
            (y * 255 / height.max(1)) as u8,
        ]
    })
}

/// Uniform color
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    rgb_png(width, height, |_, _| color)
}

/// Write `bytes` to `name` inside `dir`, returning the path
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
