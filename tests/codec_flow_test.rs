//! End-to-end flows through the codec service: PNG in, encoded file, PNG out.

mod common;

use boxquant::error::AppError;
use boxquant::models::{AppConfig, CodecKind};
use boxquant::services::{CodecService, CompressSettings};
use box_codec::format::{CHANNEL_GRADIENT_MAGIC, GRADIENT_MAGIC, INDEX_MAP_MAGIC};
use box_codec::{CodecId, CompressOptions};
use common::fixtures;
use pretty_assertions::assert_eq;

fn service() -> CodecService {
    CodecService::new(AppConfig::default())
}

#[test]
fn test_box_aligned_edges_survive_every_codec() {
    let service = service();
    let png = fixtures::split_png(16, 16);
    let original = common::assert_png(&png);

    for codec in CodecKind::ALL {
        let restored = service
            .roundtrip_png(&png, codec, &CompressOptions::new(8).gradient_scale(0.5))
            .unwrap();
        let decoded = common::assert_png_size(&restored, 16, 16);
        assert_eq!(decoded.rgb, original.rgb, "codec {codec} altered flat boxes");
    }
}

#[test]
fn test_solid_color_is_exact_for_every_codec() {
    let service = service();
    let png = fixtures::solid_png(12, 12, [200, 40, 90]);

    for codec in CodecKind::ALL {
        let restored = service
            .roundtrip_png(&png, codec, &CompressOptions::new(4))
            .unwrap();
        let decoded = common::assert_png_size(&restored, 12, 12);
        for y in 0..12 {
            for x in 0..12 {
                assert_eq!(decoded.pixel(x, y), [200, 40, 90], "codec {codec} at ({x},{y})");
            }
        }
    }
}

#[test]
fn test_index_map_reproduces_two_tone_box() {
    let service = service();
    let png = fixtures::rgb_png(2, 2, |_, y| if y == 0 { [255; 3] } else { [0; 3] });

    let summary = service
        .compress_png(&png, CodecKind::Qimg, &CompressOptions::new(2))
        .unwrap();
    common::assert_magic(&summary.bytes, &INDEX_MAP_MAGIC);
    // header, x, y, light, dark, 4 index bytes
    assert_eq!(summary.bytes.len(), 16 + 2 + 6 + 4);
    assert_eq!(&summary.bytes[24..], &[1, 1, 0, 0]);

    let restored = service.decompress_to_png(&summary.bytes).unwrap();
    let decoded = common::assert_png_size(&restored, 2, 2);
    assert_eq!(decoded.pixel(0, 0), [255, 255, 255]);
    assert_eq!(decoded.pixel(1, 0), [255, 255, 255]);
    assert_eq!(decoded.pixel(0, 1), [0, 0, 0]);
    assert_eq!(decoded.pixel(1, 1), [0, 0, 0]);
}

#[test]
fn test_gradient_follows_edge_inside_box() {
    let service = service();
    let png = fixtures::split_png(8, 8);

    let summary = service
        .compress_png(
            &png,
            CodecKind::Grad,
            &CompressOptions::new(8).gradient_scale(1.0),
        )
        .unwrap();
    common::assert_magic(&summary.bytes, &GRADIENT_MAGIC);

    let restored = service.decompress_to_png(&summary.bytes).unwrap();
    let decoded = common::assert_png_size(&restored, 8, 8);
    for y in 0..8 {
        assert!(decoded.pixel(0, y)[0] > 200, "left edge should stay light");
        assert!(decoded.pixel(7, y)[0] < 60, "right edge should stay dark");
        for x in 1..8 {
            assert!(
                decoded.pixel(x, y)[0] <= decoded.pixel(x - 1, y)[0],
                "ramp should not brighten left to right at ({x},{y})"
            );
        }
    }
}

#[test]
fn test_partial_boxes_are_cropped() {
    let service = service();
    let png = fixtures::ramp_png(17, 10);

    for codec in CodecKind::ALL {
        let summary = service
            .compress_png(&png, codec, &CompressOptions::new(4))
            .unwrap();
        assert_eq!((summary.source_width, summary.source_height), (17, 10));
        assert_eq!((summary.covered_width, summary.covered_height), (16, 8));
        assert_eq!(summary.boxes, 8);

        let restored = service.decompress_to_png(&summary.bytes).unwrap();
        common::assert_png_size(&restored, 16, 8);
    }
}

#[test]
fn test_grayscale_input_is_accepted() {
    let service = service();
    let png = fixtures::gray_png(8, 8, |x, y| ((x + y) * 16) as u8);

    let summary = service
        .compress_png(&png, CodecKind::Gradrgb, &CompressOptions::new(4))
        .unwrap();
    common::assert_magic(&summary.bytes, &CHANNEL_GRADIENT_MAGIC);
    assert_eq!(summary.boxes, 4);
}

#[test]
fn test_image_smaller_than_box_fails_to_decompress() {
    let service = service();
    let png = fixtures::solid_png(3, 3, [10, 10, 10]);

    let summary = service
        .compress_png(&png, CodecKind::Qimg, &CompressOptions::new(4))
        .unwrap();
    assert_eq!(summary.boxes, 0);

    let result = service.decompress_to_png(&summary.bytes);
    assert!(matches!(
        result,
        Err(AppError::Codec(box_codec::CodecError::EmptyImage { .. }))
    ));
}

#[test]
fn test_invalid_options_are_rejected() {
    let service = service();
    let png = fixtures::solid_png(8, 8, [0, 0, 0]);

    let zero_box = service.compress_png(&png, CodecKind::Grad, &CompressOptions::new(0));
    assert!(matches!(
        zero_box,
        Err(AppError::Codec(box_codec::CodecError::InvalidArgument(_)))
    ));

    let bad_scale = service.compress_png(
        &png,
        CodecKind::Grad,
        &CompressOptions::new(4).gradient_scale(1.5),
    );
    assert!(matches!(
        bad_scale,
        Err(AppError::Codec(box_codec::CodecError::InvalidArgument(_)))
    ));
}

#[test]
fn test_decompress_rejects_png_input() {
    let service = service();
    let png = fixtures::solid_png(4, 4, [1, 2, 3]);
    assert!(matches!(
        service.decompress_to_png(&png),
        Err(AppError::UnrecognizedFormat)
    ));
}

#[test]
fn test_inspect_reports_header() {
    let service = service();
    let png = fixtures::ramp_png(24, 16);
    let summary = service
        .compress_png(
            &png,
            CodecKind::Grad,
            &CompressOptions::new(8).gradient_scale(0.25),
        )
        .unwrap();

    let info = service.inspect(&summary.bytes).unwrap();
    assert_eq!(info.codec, CodecId::Gradient);
    assert_eq!(info.version, (1, 2));
    assert_eq!(info.gradient_scale.map(|s| s.to_byte()), Some(64));
    assert_eq!(info.box_size, 8);
    assert_eq!((info.boxes_wide, info.boxes_high), (3, 2));
    assert_eq!(info.record_count, 6);
}

#[test]
fn test_file_flow_picks_codec_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_file(dir.path(), "in.png", &fixtures::ramp_png(16, 16));
    let encoded = dir.path().join("out.grgb");
    let output = dir.path().join("restored.png");

    let service = service();
    let summary = service
        .compress_file(&input, &encoded, &CompressSettings::default())
        .unwrap();
    assert_eq!(summary.codec, CodecKind::Gradrgb);

    let written = std::fs::read(&encoded).unwrap();
    common::assert_magic(&written, &CHANNEL_GRADIENT_MAGIC);
    assert_eq!(written, summary.bytes);

    let size = service.decompress_file(&encoded, &output).unwrap();
    let png = std::fs::read(&output).unwrap();
    assert_eq!(png.len(), size);
    common::assert_png_size(&png, 16, 16);
}

#[test]
fn test_file_flow_uses_configured_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = fixtures::write_file(
        dir.path(),
        "config.yaml",
        b"codec: grad\nbox_size: 4\ngradient_scale: 1.0\noptimize_png: true\n",
    );
    let config = AppConfig::load(Some(&config_path));
    assert!(config.optimize_png);

    let input = fixtures::write_file(dir.path(), "in.png", &fixtures::ramp_png(8, 8));
    let encoded = dir.path().join("out.bin");
    let output = dir.path().join("restored.png");

    let service = CodecService::new(config);
    let summary = service
        .compress_file(&input, &encoded, &CompressSettings::default())
        .unwrap();
    assert_eq!(summary.codec, CodecKind::Grad);
    assert_eq!(summary.boxes, 4);

    let info = service.inspect(&summary.bytes).unwrap();
    assert_eq!(info.box_size, 4);
    assert_eq!(info.gradient_scale.map(|s| s.to_byte()), Some(255));

    service.decompress_file(&encoded, &output).unwrap();
    common::assert_png_size(&std::fs::read(&output).unwrap(), 8, 8);
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = service();
    let result = service.compress_file(
        &dir.path().join("absent.png"),
        &dir.path().join("out.qimg"),
        &CompressSettings::default(),
    );
    assert!(matches!(result, Err(AppError::Io(_))));
}
