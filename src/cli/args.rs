use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::SettingsOverrides;

#[derive(Parser)]
#[command(name = "station-aggregator")]
#[command(about = "Parallel min/mean/max aggregation of `station;value` measurement files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        help = "Configuration file (toml, json, yaml, ...); BRC_* environment variables also apply"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a measurements file and write the report
    Process {
        #[command(flatten)]
        input: InputArgs,

        #[arg(
            short,
            long,
            help = "Report output path [default: result.txt]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, help = "Report format: text, json or csv [default: text]")]
        format: Option<String>,

        #[arg(long, help = "Write a CPU profile flamegraph (SVG) to this path")]
        profile: Option<PathBuf>,
    },

    /// Scan and aggregate without writing a report
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
pub struct InputArgs {
    #[arg(
        short,
        long,
        help = "Measurements file [default: data/measurements.txt]"
    )]
    pub input_file: Option<PathBuf>,

    #[arg(short, long, help = "Worker threads [default: logical CPU count]")]
    pub workers: Option<usize>,

    #[arg(long, help = "Memory-map the input instead of reading it")]
    pub mmap: bool,
}

impl InputArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            input_path: self.input_file.clone(),
            worker_count: self.workers,
            use_mmap: self.mmap,
            ..Default::default()
        }
    }
}
