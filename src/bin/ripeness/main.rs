//! Banana ripeness CLI
//!
//! Classifies banana photos with an ONNX model and prints the nutritional
//! content of each ripeness stage.
//!
//! # Usage
//!
//! ```bash
//! ripeness classify --model models/banana_ripeness.onnx pisang1.jpg pisang2.png
//! ripeness classify --model models/banana_ripeness.onnx --output json pisang.jpg
//! ripeness benefits --stage "kuning bintik cokelat"
//! ```

mod cli;
mod config;
mod output;

use clap::{Parser, Subcommand};
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "ripeness")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Banana ripeness classification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one or more banana photos
    Classify {
        /// Path to the ONNX ripeness model
        #[arg(long, env = "RIPENESS_MODEL")]
        model: PathBuf,

        /// Device to use (cpu, cuda, cuda:0, etc.)
        #[arg(long, default_value = "cpu", env = "RIPENESS_DEVICE")]
        device: String,

        /// Intra-op threads for ONNX Runtime
        #[arg(long, env = "RIPENESS_INTRA_THREADS")]
        intra_threads: Option<usize>,

        /// JSON file with ONNX Runtime session settings
        #[arg(long = "ort-config")]
        ort_config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        output: OutputFormat,

        /// Images to classify
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Show the health benefits of each ripeness stage
    Benefits {
        /// Only show this stage (hijau, kuning, "kuning bintik cokelat", cokelat)
        #[arg(long)]
        stage: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        output: OutputFormat,
    },
}

fn main() -> ExitCode {
    pisang_ripeness::utils::init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            model,
            device,
            intra_threads,
            ort_config,
            output,
            images,
        } => {
            let config = config::ModelConfig {
                model,
                device,
                intra_threads,
                ort_config,
            };
            cli::classify(&config, &images, output).map(|failed| {
                if failed > 0 {
                    error!("{} of {} images could not be classified", failed, images.len());
                    ExitCode::FAILURE
                } else {
                    ExitCode::SUCCESS
                }
            })
        }
        Commands::Benefits { stage, output } => {
            cli::benefits(stage.as_deref(), output).map(|()| ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|e| {
        error!("{}", e);
        ExitCode::FAILURE
    })
}
