//! TidyFold core library
//!
//! Computes foldable line ranges for Svelte components: script blocks,
//! Svelte 5 rune calls, HTML structural tags and template blocks.
//!
//! The scan is a single pass over the document lines. It never fails:
//! unterminated or malformed constructs simply produce no range.
//!
//! # Example
//!
//! ```
//! use tidyfold_core::{compute_folding_ranges, FoldingOptions};
//!
//! let text = "function test() {\n  return 1;\n}";
//! let ranges = compute_folding_ranges(text, &FoldingOptions::default());
//!
//! assert_eq!(ranges.len(), 1);
//! assert_eq!((ranges[0].start_line, ranges[0].end_line), (0, 2));
//! ```

pub mod balance;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod folding;
pub mod markers;
pub mod report;
pub mod scanner;

pub use config::{FoldingOptions, Settings};
pub use error::SettingsError;
pub use folding::{compute_folding_ranges, FoldKind, FoldRange, RangeScanner};
pub use report::{Decoration, FoldReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests;
