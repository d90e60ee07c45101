pub mod codec_service;

pub use codec_service::{CodecService, CompressSettings, CompressSummary};
