use crate::cli::args::{Cli, Commands};
use crate::settings::{Settings, SettingsOverrides};
use crate::error::{ProcessingError, Result};
use crate::processors::{ParallelProcessor, RunStatistics};
use crate::readers::InputReader;
use crate::utils::profiler::CpuProfiler;
use crate::utils::progress::ProgressReporter;
use crate::writers::{ReportFileInfo, ReportWriter};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, Level};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let quiet = cli.quiet;

    match cli.command {
        Commands::Process {
            input,
            output_file,
            format,
            profile,
        } => {
            let overrides = SettingsOverrides {
                output_path: output_file,
                format,
                ..input.overrides()
            };
            let settings = Settings::load(cli.config.as_deref(), overrides)?;

            println!("Aggregating measurements...");
            println!("Input file: {}", settings.input_path.display());
            println!("Output file: {}", settings.output_path.display());
            println!("Workers: {}, Format: {}", settings.worker_count, settings.format);

            let (statistics, file_info) =
                tokio::task::spawn_blocking(move || -> Result<(RunStatistics, ReportFileInfo)> {
                    let profiler = profile.as_deref().map(CpuProfiler::start).transpose()?;
                    let progress = ProgressReporter::new_spinner("Reading input...", quiet);
                    let result = process_file(&settings, Some(&progress));
                    if result.is_ok() {
                        progress.finish_with_message("Aggregation complete");
                    }
                    if let Some(profiler) = profiler {
                        let path = profiler.finish()?;
                        println!("CPU profile: {}", path.display());
                    }
                    result
                })
                .await??;

            println!("\n{}", statistics.summary());
            println!("{}", file_info.summary());
            println!("Processing complete!");
        }

        Commands::Validate { input } => {
            let settings = Settings::load(cli.config.as_deref(), input.overrides())?;

            println!("Validating measurements...");
            println!("Input file: {}", settings.input_path.display());

            let statistics = tokio::task::spawn_blocking(move || {
                let progress = ProgressReporter::new_spinner("Reading input...", quiet);
                let result = validate_file(&settings, Some(&progress));
                if result.is_ok() {
                    progress.finish_with_message("Validation complete");
                }
                result
            })
            .await??;

            println!("\n{}", statistics.summary());
            println!("✅ All lines are well formed - no output file written");
        }
    }

    Ok(())
}

/// Load, aggregate and write the report described by `settings`.
pub fn process_file(
    settings: &Settings,
    progress: Option<&ProgressReporter>,
) -> Result<(RunStatistics, ReportFileInfo)> {
    // Reject a bad format before spending time on the scan.
    let writer = ReportWriter::new().with_format(&settings.format)?;

    let buffer = InputReader::with_mmap(settings.use_mmap).read_all(&settings.input_path)?;
    let outcome = ParallelProcessor::new(settings.worker_count).process(&buffer, progress)?;

    if let Some(p) = progress {
        p.set_message("Writing report...");
    }

    let file_info = writer.write_report(&outcome.table, &settings.output_path)?;
    Ok((outcome.statistics, file_info))
}

/// Load and aggregate the input without writing anything.
pub fn validate_file(
    settings: &Settings,
    progress: Option<&ProgressReporter>,
) -> Result<RunStatistics> {
    let buffer = InputReader::with_mmap(settings.use_mmap).read_all(&settings.input_path)?;
    let outcome = ParallelProcessor::new(settings.worker_count).process(&buffer, progress)?;

    if outcome.table.is_empty() {
        return Err(ProcessingError::EmptyResult);
    }

    info!(stations = outcome.table.len(), "input validated");
    Ok(outcome.statistics)
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = match (verbose, log_file) {
        (true, _) => Level::DEBUG,
        (false, Some(_)) => Level::INFO,
        (false, None) => Level::WARN,
    };

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))
}
