//! Boxquant - block-based image quantization
//!
//! PNG conversion, configuration and file-level services around the
//! `box-codec` codecs. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
