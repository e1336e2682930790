use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use runtrace::config::AppConfig;
use runtrace::display::{batch_table, metrics_table, series_table};
use runtrace::export::{export_report, ExportFormat, SeriesKind};
use runtrace::import::parallel::BatchDeriver;
use runtrace::logging::init_logging;
use runtrace::pipeline::{ActivityPipeline, ActivityReport};
use runtrace::series::ZoomWindow;
use runtrace::FitDecoder;

/// runtrace - Activity time-series CLI
///
/// Derives distance-indexed pace, altitude and heart-rate series plus
/// aggregate figures from recorded FIT activities.
#[derive(Parser)]
#[command(name = "runtrace")]
#[command(version)]
#[command(about = "Activity time-series derivation CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive one activity and show its aggregates
    Inspect {
        /// File path or activity key resolved under the storage roots
        source: String,
    },

    /// Show the rows of a series visible at a zoom level and position
    Window {
        /// File path or activity key resolved under the storage roots
        source: String,

        /// Percentage of the series shown (20-100)
        #[arg(short, long, default_value = "100")]
        zoom: f64,

        /// Offset of the window within the hidden part (0-100)
        #[arg(short, long, default_value = "0")]
        position: f64,

        /// Series to show (chart, pace, altitude, heart-rate)
        #[arg(short, long, default_value = "chart")]
        metric: String,
    },

    /// Write derived series to CSV or the full report to JSON
    Export {
        /// File path or activity key resolved under the storage roots
        source: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (csv, json); guessed from the output extension if omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Series written to CSV (chart, pace, altitude, heart-rate)
        #[arg(short, long, default_value = "chart")]
        metric: String,
    },

    /// Derive every FIT file in a directory in parallel
    Batch {
        /// Directory containing FIT files
        dir: PathBuf,

        /// Worker threads (defaults to the configured value)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Manage configuration
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    let log_config = config.logging.with_verbosity(cli.verbose);
    init_logging(&log_config)?;

    if cli.verbose > 0 {
        eprintln!(
            "{}",
            format!("Log level: {}", log_config.level.to_filter()).dimmed()
        );
    }

    match cli.command {
        Commands::Inspect { source } => {
            println!("{}", "Deriving activity...".green().bold());
            let report = load_report(&config, &source)?;
            println!("  Source: {}", report.source_path.display());
            println!("  Samples: {}", report.sample_count);
            println!("{}", metrics_table(&report.derived.metrics));

            let series = &report.derived.series;
            println!(
                "  Series: {} pace, {} altitude, {} heart rate, {} chart rows",
                series.pace.len(),
                series.altitude.len(),
                series.heart_rate.len(),
                series.chart.len()
            );
            if series.is_empty() {
                println!("{}", "! No plottable samples in this activity".yellow());
            }
        }

        Commands::Window {
            source,
            zoom,
            position,
            metric,
        } => {
            let kind = SeriesKind::from_str(&metric)?;
            let report = load_report(&config, &source)?;
            let window = ZoomWindow::new(zoom, position);

            println!(
                "{}",
                format!(
                    "{} at {:.0}% zoom, position {:.0}%",
                    kind,
                    window.level(),
                    window.position()
                )
                .cyan()
                .bold()
            );
            println!("{}", series_table(&report.derived.series, kind, &window));
        }

        Commands::Export {
            source,
            output,
            format,
            metric,
        } => {
            println!("{}", "Exporting activity...".yellow().bold());
            let format = match format {
                Some(f) => ExportFormat::from_str(&f)?,
                None => ExportFormat::from_path(&output).unwrap_or(ExportFormat::Csv),
            };
            let kind = SeriesKind::from_str(&metric)?;
            let report = load_report(&config, &source)?;

            export_report(&report, format, kind, &output)
                .with_context(|| format!("Failed to export to {}", output.display()))?;

            println!("  Output: {}", output.display());
            println!("  Format: {}", format.extension());
            println!("{}", "✓ Export completed successfully".yellow());
        }

        Commands::Batch {
            dir,
            threads,
            no_progress,
        } => {
            println!("{}", "Deriving activities...".blue().bold());
            let mut batch_config = config.batch.clone();
            if threads.is_some() {
                batch_config.num_threads = threads;
            }
            if no_progress {
                batch_config.show_progress = false;
            }

            let deriver =
                BatchDeriver::new(FitDecoder::new(), config.derivation.clone(), batch_config);
            let summary = deriver.derive_directory(&dir)?;

            println!("{}", batch_table(&summary));
            println!("{}", summary.to_string_pretty());
            if summary.is_fully_successful() {
                println!("{}", "✓ Batch completed".blue());
            } else {
                println!(
                    "{}",
                    format!("! {} file(s) failed", summary.failed_files).red()
                );
            }
        }

        Commands::Config { show, init } => {
            println!("{}", "Managing configuration...".white().bold());
            let path = cli.config.unwrap_or_else(AppConfig::default_config_path);

            if init {
                if path.exists() {
                    println!("  Config already exists: {}", path.display());
                } else {
                    config.save_to_file(&path)?;
                    println!("{}", format!("✓ Wrote {}", path.display()).white());
                }
            }
            if show || !init {
                let rendered = toml::to_string_pretty(&config)
                    .context("Failed to render configuration")?;
                println!("# {}", path.display());
                println!("{}", rendered);
            }
        }
    }

    Ok(())
}

fn load_report(config: &AppConfig, source: &str) -> Result<ActivityReport> {
    let pipeline = ActivityPipeline::new(
        config.resolver(),
        FitDecoder::new(),
        config.derivation.clone(),
    );

    pipeline.load(source).map_err(|err| {
        eprintln!("{} {}", "✗".red(), err.user_message());
        anyhow::Error::new(err).context(format!("Failed to load activity '{}'", source))
    })
}
