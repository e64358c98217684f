use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use cube_lut_rs::image_pipeline::{ApplyConfig, LutApplyPipeline, TiffCompression};
use cube_lut_rs::logger;

use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cube-lut", about = "Apply a .cube 3D LUT to a TIFF image")]
struct Cli {
    /// Source image (8-bit RGB, RGBA or grayscale TIFF)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// .cube LUT file
    #[arg(value_name = "LUT")]
    lut: PathBuf,

    /// Destination TIFF
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Blend between the source (0.0) and the fully graded image (1.0)
    #[arg(short, long, default_value_t = 1.0)]
    intensity: f32,

    /// Output compression
    #[arg(short, long, value_enum, default_value_t = Compression::None)]
    compression: Compression,

    /// Use horizontal differencing before compression
    #[arg(short, long)]
    predictor: bool,

    /// Worker threads for colour mapping (defaults to every core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Turn verbose logging on
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Compression {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<Compression> for TiffCompression {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => TiffCompression::None,
            Compression::Lzw => TiffCompression::Lzw,
            Compression::DeflateFast => TiffCompression::DeflateFast,
            Compression::DeflateBalanced => TiffCompression::DeflateBalanced,
            Compression::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    info!("Starting cube-lut...");

    let config = ApplyConfig::builder()
        .intensity(cli.intensity)
        .compression(cli.compression.into())
        .predictor(cli.predictor.then_some(2))
        .threads(cli.threads)
        .build();
    let pipeline = LutApplyPipeline::new(config)?;

    info!("Intensity: {}", pipeline.config().intensity);
    info!("Compression: {:?}", pipeline.config().compression);

    pipeline
        .convert_file(&cli.input, &cli.lut, &cli.output)
        .with_context(|| {
            format!(
                "applying {} to {}",
                cli.lut.display(),
                cli.input.display()
            )
        })?;

    info!(output = %cli.output.display(), "Done");
    Ok(())
}
