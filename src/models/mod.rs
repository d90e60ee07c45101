pub mod codec_kind;
pub mod config;

pub use codec_kind::CodecKind;
pub use config::AppConfig;
