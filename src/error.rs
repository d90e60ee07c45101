use box_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Unrecognized file format")]
    UnrecognizedFormat,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG color type: {0}")]
    UnsupportedColorType(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_unrecognized_format() {
        let error = AppError::UnrecognizedFormat;
        assert_eq!(error.to_string(), "Unrecognized file format");
    }

    #[test]
    fn test_app_error_config() {
        let error = AppError::Config("bad yaml".to_string());
        assert_eq!(error.to_string(), "Config error: bad yaml");
    }

    #[test]
    fn test_app_error_from_codec_error() {
        let codec_error = CodecError::Format("magic mismatch".to_string());
        let app_error: AppError = codec_error.into();
        assert_eq!(
            app_error.to_string(),
            "Codec error: Format error: magic mismatch"
        );
        match app_error {
            AppError::Codec(_) => {}
            _ => panic!("Expected Codec variant"),
        }
    }

    #[test]
    fn test_app_error_from_image_error() {
        let app_error: AppError = ImageError::PngDecode("bad crc".to_string()).into();
        match app_error {
            AppError::Image(ImageError::PngDecode(msg)) => assert_eq!(msg, "bad crc"),
            _ => panic!("Expected Image variant"),
        }
    }

    #[test]
    fn test_image_error_unsupported_dimensions() {
        let error = ImageError::UnsupportedDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 0x10");
    }

    #[test]
    fn test_image_error_png_encode() {
        let error = ImageError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }
}
