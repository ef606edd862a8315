//! TidyFold CLI - Command-line interface library
//!
//! This library provides the CLI functionality for TidyFold, including:
//! - Scan: List the regions a Svelte file or directory would fold
//! - Config: Print the effective settings
//!
//! # Library Usage
//!
//! ```ignore
//! use tidyfold_cli::{run_cli, scan_command, OutputFormat};
//!
//! // Run the full CLI
//! run_cli();
//!
//! // Or use individual commands programmatically
//! let output = scan_command(&input, OutputFormat::Json, &settings)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Show what a component would fold
//! tidyfold scan src/App.svelte
//!
//! # Scan every component in a directory as JSON
//! tidyfold scan src/ --format json
//!
//! # Print the effective settings
//! tidyfold config
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{config_command, load_settings, run_cli, scan_command, FileRanges, OutputFormat};
