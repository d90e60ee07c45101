use box_codec::{ChannelGradientImage, CodecId, CompressedImage, GradientImage, IndexMapImage};
use serde::Deserialize;
use std::path::Path;

/// Codec selectable from the command line and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    /// Two colors plus a per-pixel index map
    #[default]
    Qimg,
    /// One light-to-dark gradient per box
    Grad,
    /// One gradient per color channel per box
    Gradrgb,
}

impl CodecKind {
    pub const ALL: [CodecKind; 3] = [CodecKind::Qimg, CodecKind::Grad, CodecKind::Gradrgb];

    pub fn name(self) -> &'static str {
        match self {
            CodecKind::Qimg => "qimg",
            CodecKind::Grad => "grad",
            CodecKind::Gradrgb => "gradrgb",
        }
    }

    pub fn codec_id(self) -> CodecId {
        match self {
            CodecKind::Qimg => CodecId::IndexMap,
            CodecKind::Grad => CodecId::Gradient,
            CodecKind::Gradrgb => CodecId::ChannelGradient,
        }
    }

    /// File extensions the codec's images report as supported.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            CodecKind::Qimg => IndexMapImage::EXTENSIONS,
            CodecKind::Grad => GradientImage::EXTENSIONS,
            CodecKind::Gradrgb => ChannelGradientImage::EXTENSIONS,
        }
    }

    /// Codec whose extensions include the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
    }

    /// Codec of an encoded buffer, from its magic.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        box_codec::identify(bytes).map(Self::from)
    }
}

impl From<CodecId> for CodecKind {
    fn from(id: CodecId) -> Self {
        match id {
            CodecId::IndexMap => CodecKind::Qimg,
            CodecId::Gradient => CodecKind::Grad,
            CodecId::ChannelGradient => CodecKind::Gradrgb,
        }
    }
}

impl std::fmt::Display for CodecKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
