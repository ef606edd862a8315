//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use serde::Serialize;
use tracing::{debug, info};

use tidyfold_core::config::SETTINGS_FILES;
use tidyfold_core::{compute_folding_ranges, FoldRange, FoldReport, Settings};

/// Output format for scan results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "tidyfold")]
#[command(author, version, about = "Folding regions for Svelte components", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the regions a Svelte file or directory would fold
    Scan {
        /// Svelte file, or directory searched for `**/*.svelte`
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fold div and script blocks too
        #[arg(long)]
        fold_parent_blocks: bool,

        /// Element name that never folds (repeatable)
        #[arg(short, long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,
    },

    /// Print the effective settings as TOML
    Config {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Ranges found in one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRanges {
    pub file: String,
    pub ranges: Vec<FoldRange>,
    #[serde(skip)]
    pub report: FoldReport,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match cli.command {
        Commands::Scan {
            input,
            format,
            config,
            fold_parent_blocks,
            exclude,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            if fold_parent_blocks {
                settings.fold_parent_blocks = true;
            }
            settings.excluded_folding_elements.extend(exclude);
            scan_command(&input, format, &settings)?
        }
        Commands::Config { config } => config_command(config.as_deref())?,
    };

    print!("{}", output);
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Scan a file or directory and render the result
pub fn scan_command(input: &Path, format: OutputFormat, settings: &Settings) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input not found: {}", input.display());
    }

    let files = collect_files(input)?;
    info!("Scanning {} file(s) under {}", files.len(), input.display());

    let options = settings.folding_options();
    let mut results = Vec::with_capacity(files.len());

    for path in &files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        let ranges = compute_folding_ranges(&text, &options);
        debug!("{}: {} folding ranges", path.display(), ranges.len());

        results.push(FileRanges {
            file: path.display().to_string(),
            report: FoldReport::new(&text, &ranges),
            ranges,
        });
    }

    render(&results, format)
}

/// Render the effective settings
pub fn config_command(config_path: Option<&Path>) -> Result<String> {
    let settings = load_settings(config_path)?;
    settings
        .to_toml_string()
        .context("Failed to serialize settings to TOML")
}

fn render(results: &[FileRanges], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(results)
                .context("Failed to serialize folding ranges to JSON")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for result in results {
                out.push_str(&format!("{}\n{}\n", result.file, result.report));
            }
            if results.is_empty() {
                out.push_str("No Svelte files found\n");
            }
            Ok(out)
        }
    }
}

/// The input itself, or every `.svelte` file below it
fn collect_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let pattern = input.join("**/*.svelte").display().to_string();
    let mut files = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
        let path = entry.with_context(|| format!("Failed to read entry under {}", input.display()))?;
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Load settings from a config file or use defaults
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Settings::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => {
            // Try to find tidyfold.toml in common locations
            for candidate in SETTINGS_FILES {
                let path = Path::new(candidate);
                if path.exists() {
                    debug!("Using settings from {}", path.display());
                    return Settings::load(path)
                        .with_context(|| format!("Failed to load config: {}", path.display()));
                }
            }
            Ok(Settings::default())
        }
    }
}
