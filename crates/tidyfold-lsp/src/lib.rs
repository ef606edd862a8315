//! TidyFold Language Server Protocol implementation
//!
//! This library serves folding ranges for Svelte components, including:
//! - Folding ranges for script blocks, rune calls, tags and template blocks
//! - A debug command listing what would be folded
//! - Highlight decorations for foldable regions
//!
//! # Library Usage
//!
//! ```ignore
//! use tidyfold_lsp::run_server;
//!
//! // Run the LSP server over stdio
//! run_server().await;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the language server (typically called by an editor)
//! tidyfold-lsp
//!
//! # With debug logging
//! RUST_LOG=debug tidyfold-lsp
//! ```

pub mod handlers;
pub mod server;

// Re-export main entry point
pub use server::{run_server, Backend};

// Re-export commonly used types
pub use handlers::{Document, ServerCommand};
