//! Texture Detection - Main Entry Point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use texture_batch::{compare_reports, BatchProcessor};
use texture_cli::output::{
    render_comparison, render_failures, render_matrix, render_record, render_records,
};
use texture_cli::{init_logging, resolve_config, Overrides};
use tracing::info;

#[derive(Parser)]
#[command(name = "texture-detect")]
#[command(author, version, about = "GLCM texture and intensity moment features for grayscale images", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Co-occurrence neighbor distance in pixels
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    distance: Option<i64>,

    /// Co-occurrence neighbor angle in degrees
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Number of gray levels
    #[arg(short, long, global = true)]
    gray_levels: Option<usize>,

    /// Analyze images one at a time
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract features of a single image
    Analyze {
        /// Input image
        image: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also print the non-zero co-occurrence matrix cells
        #[arg(long)]
        show_matrix: bool,
    },
    /// Extract features of every image in a directory
    Batch {
        /// Directory of images
        dir: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Compare feature distributions of two image directories
    Compare {
        /// First population
        left: PathBuf,
        /// Second population
        right: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose).context("Failed to set tracing subscriber")?;

    info!("=== Texture Detect v{} ===", env!("CARGO_PKG_VERSION"));

    let overrides = Overrides {
        distance: cli.distance,
        angle_degrees: cli.angle,
        gray_levels: cli.gray_levels,
        sequential: cli.sequential,
    };
    let config = resolve_config(cli.config.as_deref(), overrides).context("Failed to load configuration")?;
    let processor = BatchProcessor::from_config(&config).context("Invalid analysis parameters")?;

    match cli.command {
        Commands::Analyze {
            image,
            json,
            show_matrix,
        } => {
            let (record, glcm) = processor
                .process_file_with_matrix(&image)
                .with_context(|| format!("Failed to analyze {}", image.display()))?;
            match (json, show_matrix) {
                (true, true) => {
                    let value = serde_json::json!({
                        "record": record,
                        "pair_count": glcm.pair_count(),
                        "co_occurrence": glcm.nonzero_cells(),
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                (true, false) => println!("{}", serde_json::to_string_pretty(&record)?),
                (false, _) => {
                    print!("{}", render_record(&record));
                    if show_matrix {
                        print!("{}", render_matrix(&glcm));
                    }
                }
            }
        }
        Commands::Batch { dir, json } => {
            let report = processor.process_directory(&dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_records(&report.records));
                eprint!("{}", render_failures(&report.failures));
            }
        }
        Commands::Compare { left, right, json } => {
            let left_report = processor.process_directory(&left)?;
            let right_report = processor.process_directory(&right)?;
            let report = compare_reports(&left_report, &right_report);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let left_label = left.display().to_string();
                let right_label = right.display().to_string();
                print!("{}", render_comparison(&report.comparisons, &left_label, &right_label));
                eprint!("{}", render_failures(&report.left.failures));
                eprint!("{}", render_failures(&report.right.failures));
            }
        }
    }

    Ok(())
}
