use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palette_remap::models::{ConfigOverrides, RecolorConfig};
use palette_remap::services::{
    discover_images, format_palette, load_palette, write_sample_palette, BatchRunner,
    ImageProcessor,
};

#[derive(Parser)]
#[command(name = "palette-remap")]
#[command(about = "Batch sprite recoloring - quantize and map images to a custom palette")]
#[command(after_help = "\
Distance methods:
  euclidean   Standard RGB distance (fast, good default)
  manhattan   Sum of absolute RGB differences (fast)
  weighted    Weighted RGB distance (default weights 0.3 0.59 0.11)
  ciede2000   Perceptually uniform distance (most accurate, slower)

Palette format:
  Paint.NET / Lospec .txt: one AARRGGBB or RRGGBB hex color per line,
  lines starting with ; are comments.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recolor an image, or every image in a folder, onto a palette
    Recolor {
        /// Input image or folder
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,

        /// Output image or folder
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        /// Palette file (.txt)
        #[arg(short, long, value_name = "FILE")]
        palette: PathBuf,

        /// Quantize to N colors before palette mapping, 0 disables [default: 128]
        #[arg(short, long, value_name = "N")]
        colors: Option<usize>,

        /// Skip quantization, only apply palette mapping
        #[arg(long)]
        skip_quantize: bool,

        /// Process subfolders recursively
        #[arg(short, long)]
        recursive: bool,

        /// Color distance method: euclidean, manhattan, weighted, ciede2000
        #[arg(short, long, value_name = "METHOD")]
        distance: Option<String>,

        /// Use CIEDE2000 perceptual distance. Same as -d ciede2000
        #[arg(long)]
        perceptual: bool,

        /// RGB weights for the RGB distance methods. Without it, `-d weighted`
        /// uses luma weights 0.3 0.59 0.11 rather than equal 1 1 1 weights
        #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
        weights: Option<Vec<f64>>,

        /// Number of images processed in parallel [default: CPU count]
        #[arg(short, long, value_name = "JOBS")]
        jobs: Option<usize>,

        /// Re-compress PNG output with oxipng
        #[arg(long)]
        optimize: bool,

        /// YAML config file (defaults to $RECOLOR_CONFIG)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write a JSON batch report
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// List the colors in a palette file
    ListColors {
        /// Palette file
        file: PathBuf,
    },
    /// Write a sample palette file (PICO-8)
    CreateSample {
        /// Output palette file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palette_remap=info,palette_match=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Recolor {
            input,
            output,
            palette,
            colors,
            skip_quantize,
            recursive,
            distance,
            perceptual,
            weights,
            jobs,
            optimize,
            config,
            report,
        } => {
            let overrides = ConfigOverrides {
                colors,
                distance,
                perceptual,
                weights: weights.map(|w| [w[0], w[1], w[2]]),
                skip_quantize,
                recursive,
                jobs,
                optimize,
            };
            run_recolor_command(
                &input,
                &output,
                &palette,
                config.as_deref(),
                &overrides,
                report.as_deref(),
            )
            .await
        }
        Commands::ListColors { file } => run_list_colors_command(&file),
        Commands::CreateSample { file } => run_create_sample_command(&file),
    }
}

/// Recolor a single file or a whole folder
async fn run_recolor_command(
    input: &Path,
    output: &Path,
    palette_path: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    report: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => RecolorConfig::load(path)?,
        None => RecolorConfig::load_default()?,
    };
    config.apply(overrides);

    let palette = load_palette(palette_path)?;
    let recolorer = config
        .build_recolorer(palette)
        .context("Invalid distance configuration")?;
    let processor = ImageProcessor::new(recolorer, config.optimize);

    if input.is_file() {
        processor
            .process_file(input, output)
            .with_context(|| format!("Failed to recolor {}", input.display()))?;
        println!("Saved: {}", output.display());
        Ok(())
    } else if input.is_dir() {
        std::fs::create_dir_all(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        let jobs = discover_images(input, output, config.recursive, &config.extensions)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        if jobs.is_empty() {
            println!("No images found in {}", input.display());
            return Ok(());
        }

        let runner = BatchRunner::new(processor, config.job_count());
        let summary = runner.run(jobs).await;

        if let Some(report) = report {
            summary
                .write_report(report)
                .with_context(|| format!("Failed to write report {}", report.display()))?;
        }

        println!(
            "Complete: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        );
        println!("Output: {}", output.display());
        for failure in &summary.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }

        if !summary.is_success() {
            anyhow::bail!("{} of {} images failed", summary.failed, summary.total());
        }
        Ok(())
    } else {
        anyhow::bail!("{} not found", input.display())
    }
}

/// Print the colors of a palette file
fn run_list_colors_command(file: &Path) -> anyhow::Result<()> {
    let palette = load_palette(file)?;
    println!("Palette: {}", file.display());
    println!("Colors: {}", palette.len());
    println!();
    print!("{}", format_palette(&palette));
    Ok(())
}

/// Write the sample palette
fn run_create_sample_command(file: &Path) -> anyhow::Result<()> {
    write_sample_palette(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    println!("Created sample palette: {}", file.display());
    Ok(())
}
