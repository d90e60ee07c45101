use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boxquant::models::config::CONFIG_ENV;
use boxquant::models::{AppConfig, CodecKind};
use boxquant::services::{CodecService, CompressSettings};

#[derive(Parser)]
#[command(name = "boxquant")]
#[command(about = "Boxquant - block-based two-tone and gradient image quantization")]
struct Cli {
    /// YAML config file (defaults to $BOXQUANT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a PNG into one of the box formats
    Compress {
        /// Input PNG file
        input: PathBuf,

        /// Output file; its extension picks the codec when --codec is absent
        output: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Reconstruct a box-format file as a PNG
    Decompress {
        /// Encoded input file (codec detected from its magic)
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,
    },
    /// Print the header of a box-format file
    Inspect {
        /// Encoded input file
        input: PathBuf,
    },
    /// Compress a PNG and write the reconstruction, without keeping the encoded file
    Roundtrip {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(clap::Args)]
struct SettingsArgs {
    /// Codec to use
    #[arg(short, long, value_enum)]
    codec: Option<CodecKind>,

    /// Box edge length in pixels
    #[arg(short, long)]
    box_size: Option<u32>,

    /// Gradient stop distance from the box centre, in (0, 1]
    #[arg(short, long)]
    gradient_scale: Option<f32>,
}

impl From<SettingsArgs> for CompressSettings {
    fn from(args: SettingsArgs) -> Self {
        CompressSettings {
            codec: args.codec,
            box_size: args.box_size,
            gradient_scale: args.gradient_scale,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxquant=warn,box_codec=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = AppConfig::resolve_path(cli.config);
    let config = AppConfig::load(config_path.as_deref());
    let service = CodecService::new(config);

    match cli.command {
        Some(Commands::Compress {
            input,
            output,
            settings,
        }) => run_compress_command(&service, &input, &output, settings.into()),
        Some(Commands::Decompress { input, output }) => {
            run_decompress_command(&service, &input, &output)
        }
        Some(Commands::Inspect { input }) => run_inspect_command(&service, &input),
        Some(Commands::Roundtrip {
            input,
            output,
            settings,
        }) => run_roundtrip_command(&service, &input, &output, settings.into()),
        None => {
            run_status_command(&service);
            Ok(())
        }
    }
}

fn run_compress_command(
    service: &CodecService,
    input: &Path,
    output: &Path,
    settings: CompressSettings,
) -> anyhow::Result<()> {
    let summary = service
        .compress_file(input, output, &settings)
        .with_context(|| format!("Failed to compress {}", input.display()))?;

    if (summary.covered_width, summary.covered_height)
        != (summary.source_width, summary.source_height)
    {
        println!(
            "Cropped {}x{} to {}x{} (whole boxes only)",
            summary.source_width,
            summary.source_height,
            summary.covered_width,
            summary.covered_height
        );
    }
    println!(
        "Compressed {} ({}, {} boxes, {} bytes)",
        output.display(),
        summary.codec,
        summary.boxes,
        summary.bytes.len()
    );
    Ok(())
}

fn run_decompress_command(
    service: &CodecService,
    input: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let size = service
        .decompress_file(input, output)
        .with_context(|| format!("Failed to decompress {}", input.display()))?;
    println!("Decompressed {} ({} bytes)", output.display(), size);
    Ok(())
}

fn run_inspect_command(service: &CodecService, input: &Path) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let info = service
        .inspect(&bytes)
        .with_context(|| format!("Failed to inspect {}", input.display()))?;

    println!("File:        {}", input.display());
    println!("Codec:       {}", CodecKind::from(info.codec));
    println!("Version:     {}.{}", info.version.0, info.version.1);
    match info.gradient_scale {
        Some(scale) => println!("Scale:       {:.3} ({}/255)", scale.value(), scale.to_byte()),
        None => println!("Scale:       (not stored)"),
    }
    println!("Box size:    {}", info.box_size);
    println!(
        "Boxes:       {}x{} ({} records)",
        info.boxes_wide, info.boxes_high, info.record_count
    );
    println!(
        "Dimensions:  {}x{}",
        u32::from(info.box_size) * u32::from(info.boxes_wide),
        u32::from(info.box_size) * u32::from(info.boxes_high)
    );
    Ok(())
}

fn run_roundtrip_command(
    service: &CodecService,
    input: &Path,
    output: &Path,
    settings: CompressSettings,
) -> anyhow::Result<()> {
    let codec = service.resolve_codec(settings.codec, None);
    let options = service.options(&settings);
    let png = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let restored = service
        .roundtrip_png(&png, codec, &options)
        .with_context(|| format!("Failed to round-trip {}", input.display()))?;
    std::fs::write(output, &restored)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Round-tripped {} through {} ({} bytes)",
        output.display(),
        codec,
        restored.len()
    );
    Ok(())
}

fn run_status_command(service: &CodecService) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    let config = service.config();

    println!("Boxquant v{VERSION}");
    println!("Block-based two-tone and gradient image quantization\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| "(not set)".to_string())
    );
    println!();

    println!("Effective Configuration:");
    println!("  codec          = {}", config.codec);
    println!("  box_size       = {}", config.box_size);
    println!("  gradient_scale = {}", config.gradient_scale);
    println!("  optimize_png   = {}", config.optimize_png);
    println!();

    println!("Codecs:");
    for kind in CodecKind::ALL {
        println!("  {:<8} .{}", kind.name(), kind.extensions().join(", ."));
    }
    println!();

    println!("Commands:");
    println!("  boxquant compress <in.png> <out>    Compress a PNG");
    println!("  boxquant decompress <in> <out.png>  Reconstruct a PNG");
    println!("  boxquant inspect <in>               Print a file header");
    println!("  boxquant roundtrip <in.png> <out.png>  Preview codec output");
}
