use std::path::Path;

use box_codec::{
    ChannelGradientImage, CompressOptions, CompressedImage, FileInfo, GradientImage,
    IndexMapImage,
};
use tiny_skia::Pixmap;

use crate::error::AppError;
use crate::models::{AppConfig, CodecKind};
use crate::rendering::{decode_png, encode_png};

/// Per-call overrides of the configured compression settings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompressSettings {
    pub codec: Option<CodecKind>,
    pub box_size: Option<u32>,
    pub gradient_scale: Option<f32>,
}

/// Outcome of a compression, for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct CompressSummary {
    pub codec: CodecKind,
    pub source_width: u32,
    pub source_height: u32,
    pub covered_width: u32,
    pub covered_height: u32,
    pub boxes: usize,
    pub bytes: Vec<u8>,
}

/// File-level compress / decompress / inspect on top of the codecs
pub struct CodecService {
    config: AppConfig,
}

impl CodecService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Codec for a compression: explicit choice, else the output extension,
    /// else the configured default
    pub fn resolve_codec(&self, explicit: Option<CodecKind>, output: Option<&Path>) -> CodecKind {
        explicit
            .or_else(|| output.and_then(CodecKind::from_path))
            .unwrap_or(self.config.codec)
    }

    /// Compression options with overrides applied over the configuration
    pub fn options(&self, settings: &CompressSettings) -> CompressOptions {
        CompressOptions::new(settings.box_size.unwrap_or(self.config.box_size))
            .gradient_scale(settings.gradient_scale.unwrap_or(self.config.gradient_scale))
    }

    /// Compress PNG bytes with the given codec
    pub fn compress_png(
        &self,
        png: &[u8],
        codec: CodecKind,
        options: &CompressOptions,
    ) -> Result<CompressSummary, AppError> {
        let source = decode_png(png)?;
        let (covered_width, covered_height, boxes, bytes) = match codec {
            CodecKind::Qimg => compress_with::<IndexMapImage>(&source, options)?,
            CodecKind::Grad => compress_with::<GradientImage>(&source, options)?,
            CodecKind::Gradrgb => compress_with::<ChannelGradientImage>(&source, options)?,
        };
        tracing::info!(
            %codec,
            box_size = options.box_size,
            boxes,
            bytes = bytes.len(),
            "Compressed image"
        );
        Ok(CompressSummary {
            codec,
            source_width: source.width(),
            source_height: source.height(),
            covered_width,
            covered_height,
            boxes,
            bytes,
        })
    }

    /// Reconstruct an encoded image of any codec as a pixmap
    pub fn decompress(&self, bytes: &[u8]) -> Result<(CodecKind, Pixmap), AppError> {
        let codec = CodecKind::detect(bytes).ok_or(AppError::UnrecognizedFormat)?;
        let pixmap = match codec {
            CodecKind::Qimg => IndexMapImage::decode(bytes)?.to_pixmap()?,
            CodecKind::Grad => GradientImage::decode(bytes)?.to_pixmap()?,
            CodecKind::Gradrgb => ChannelGradientImage::decode(bytes)?.to_pixmap()?,
        };
        tracing::info!(
            %codec,
            width = pixmap.width(),
            height = pixmap.height(),
            "Decompressed image"
        );
        Ok((codec, pixmap))
    }

    /// Reconstruct an encoded image of any codec as PNG bytes
    pub fn decompress_to_png(&self, bytes: &[u8]) -> Result<Vec<u8>, AppError> {
        let (_, pixmap) = self.decompress(bytes)?;
        Ok(encode_png(&pixmap, self.config.optimize_png)?)
    }

    /// Compress and immediately reconstruct, for previewing codec output
    pub fn roundtrip_png(
        &self,
        png: &[u8],
        codec: CodecKind,
        options: &CompressOptions,
    ) -> Result<Vec<u8>, AppError> {
        let summary = self.compress_png(png, codec, options)?;
        self.decompress_to_png(&summary.bytes)
    }

    /// Header of an encoded image
    pub fn inspect(&self, bytes: &[u8]) -> Result<FileInfo, AppError> {
        if CodecKind::detect(bytes).is_none() {
            return Err(AppError::UnrecognizedFormat);
        }
        Ok(box_codec::probe(bytes)?)
    }

    /// Compress a PNG file into `output`
    pub fn compress_file(
        &self,
        input: &Path,
        output: &Path,
        settings: &CompressSettings,
    ) -> Result<CompressSummary, AppError> {
        let codec = self.resolve_codec(settings.codec, Some(output));
        let options = self.options(settings);
        let png = std::fs::read(input)?;
        let summary = self.compress_png(&png, codec, &options)?;
        std::fs::write(output, &summary.bytes)?;
        Ok(summary)
    }

    /// Decompress an encoded file into a PNG at `output`
    pub fn decompress_file(&self, input: &Path, output: &Path) -> Result<usize, AppError> {
        let bytes = std::fs::read(input)?;
        let png = self.decompress_to_png(&bytes)?;
        std::fs::write(output, &png)?;
        Ok(png.len())
    }
}

fn compress_with<I: CompressedImage>(
    source: &Pixmap,
    options: &CompressOptions,
) -> Result<(u32, u32, usize, Vec<u8>), AppError> {
    let image = I::compress(source, options)?;
    let grid = image.grid();
    let bytes = image.to_bytes()?;
    Ok((grid.width(), grid.height(), grid.boxes().len(), bytes))
}
