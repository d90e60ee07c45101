//! Error type shared by every codec in the crate.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Encoding limit exceeded: {field} is {value} (max {max})")]
    EncodingLimitExceeded {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("Image covers no whole boxes: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

impl CodecError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        CodecError::Format(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CodecError::InvalidArgument(msg.into())
    }
}
