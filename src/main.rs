use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use tracing::{debug, error};

use imgsum::image_pipeline::{Axes, ChecksumConfig, ChecksumPipeline, ChecksumReport, ProjectionBatch, ProjectionSums};
use imgsum::logger;

#[derive(Parser, Debug)]
#[command(name = "imgsum")]
#[command(author, version, about = "Content checksums for raster images", long_about = None)]
struct Args {
    /// Image files to checksum
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Hash seed, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_seed)]
    seed: Option<u64>,

    /// Largest accepted width or height
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Accept images of any size
    #[arg(long, conflicts_with = "max_dimension")]
    no_limits: bool,

    /// Log per-step timings for every file
    #[arg(long)]
    timings: bool,

    /// Write row and column luma sums of every image, then their grand totals, to this file
    #[arg(long, value_name = "FILE")]
    sums: Option<PathBuf>,

    /// Which sums to write
    #[arg(long, value_enum, default_value_t = SumsAxes::Both, requires = "sums")]
    sums_axes: SumsAxes,

    /// Subtract the mean sums of all given images from each image's sums
    #[arg(long, requires = "sums")]
    subtract_background: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SumsAxes {
    Rows,
    Cols,
    Both,
}

impl From<SumsAxes> for Axes {
    fn from(axes: SumsAxes) -> Self {
        match axes {
            SumsAxes::Rows => Axes::Rows,
            SumsAxes::Cols => Axes::Columns,
            SumsAxes::Both => Axes::Both,
        }
    }
}

fn parse_seed(value: &str) -> Result<u64, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid seed '{}': {}", value, e))
}

fn build_config(args: &Args) -> ChecksumConfig {
    let mut builder = ChecksumConfig::builder().validate_dimensions(!args.no_limits);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(max) = args.max_dimension {
        builder = builder.max_dimension(Some(max));
    }
    builder.build()
}

fn checksum_file(pipeline: &ChecksumPipeline, path: &Path) -> Result<ChecksumReport> {
    checksum_file_with_sums(pipeline, path, false).map(|(report, _)| report)
}

fn checksum_file_with_sums(
    pipeline: &ChecksumPipeline,
    path: &Path,
    with_sums: bool,
) -> Result<(ChecksumReport, Option<ProjectionSums>)> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let context = || format!("Failed to checksum {}", path.display());
    if with_sums {
        let (report, sums) = pipeline.checksum_with_projection(&data).with_context(context)?;
        Ok((report, Some(sums)))
    } else {
        Ok((pipeline.checksum_report(&data).with_context(context)?, None))
    }
}

/// Writes per-image sums in argument order, then the grand totals.
///
/// With `subtract_background`, a first pass over every image sets the
/// background to their mean before the written pass.
fn write_sums<W: Write>(
    writer: &mut W,
    images: &[(&Path, &ProjectionSums)],
    axes: Axes,
    subtract_background: bool,
) -> Result<()> {
    let Some((_, first)) = images.first() else {
        return Ok(());
    };
    let mut batch = ProjectionBatch::new(first.width(), first.height());

    if subtract_background {
        batch.track_grand_totals(true);
        for (path, sums) in images {
            batch
                .add((*sums).clone())
                .with_context(|| format!("Cannot sum {}", path.display()))?;
        }
        batch.set_background()?;
    }

    batch.track_grand_totals(true);
    for (path, sums) in images {
        let sums = batch
            .add((*sums).clone())
            .with_context(|| format!("Cannot sum {}", path.display()))?;
        sums.write_to(axes, writer)?;
    }
    if let Some(totals) = batch.grand_totals() {
        totals.write_to(axes, writer)?;
    }
    debug!("Wrote sums for {} images", batch.image_count());
    Ok(())
}

fn save_sums(path: &Path, images: &[(&Path, &ProjectionSums)], args: &Args) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_sums(&mut writer, images, args.sums_axes.into(), args.subtract_background)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(if args.timings { "info" } else { "warn" });

    let config = build_config(&args);
    debug!("Using {:?}", config);
    let pipeline = ChecksumPipeline::new(config);

    let with_sums = args.sums.is_some();
    let results: Vec<Result<(ChecksumReport, Option<ProjectionSums>)>> = args
        .files
        .par_iter()
        .map(|path| checksum_file_with_sums(&pipeline, path, with_sums))
        .collect();

    let mut failures = 0usize;
    let mut sums = Vec::new();
    for (path, result) in args.files.iter().zip(&results) {
        match result {
            Ok((report, image_sums)) => {
                println!("{}  {}", report.digest, path.display());
                if args.timings {
                    report.timings.log_summary(&path.display().to_string());
                }
                if let Some(image_sums) = image_sums {
                    sums.push((path.as_path(), image_sums));
                }
            }
            Err(e) => {
                failures += 1;
                error!("{:#}", e);
            }
        }
    }

    if let Some(sums_path) = &args.sums {
        if let Err(e) = save_sums(sums_path, &sums, &args) {
            failures += 1;
            error!("{:#}", e);
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
