//! Request handlers independent of the transport
//!
//! The backend resolves documents and settings, then delegates here so the
//! conversions can be tested without a client connection.

use serde_json::{json, Value};
use tidyfold_core::{compute_folding_ranges, Decoration, FoldRange, FoldReport, Settings};
use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};

/// Languages that receive folding ranges
pub const FOLDING_LANGUAGES: &[&str] = &["svelte", "javascript", "typescript"];

/// Languages that receive highlight decorations
pub const DECORATION_LANGUAGES: &[&str] = &["svelte", "html", "javascript", "typescript", "vue"];

/// An open document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub language_id: String,
    pub text: String,
}

impl Document {
    pub fn new(language_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language_id: language_id.into(),
            text: text.into(),
        }
    }

    pub fn supports_folding(&self) -> bool {
        FOLDING_LANGUAGES.contains(&self.language_id.as_str())
    }

    pub fn supports_decorations(&self) -> bool {
        DECORATION_LANGUAGES.contains(&self.language_id.as_str())
    }

    /// Scan the document with the current settings
    pub fn fold_ranges(&self, settings: &Settings) -> Vec<FoldRange> {
        compute_folding_ranges(&self.text, &settings.folding_options())
    }
}

/// Commands served through `workspace/executeCommand`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerCommand {
    /// List the regions that would be folded
    DebugFolding,
    /// Decorations for foldable regions
    FoldableBlocks,
    /// Flip foldable block highlighting
    ToggleHighlighting,
}

impl ServerCommand {
    pub const ALL: [ServerCommand; 3] = [
        ServerCommand::DebugFolding,
        ServerCommand::FoldableBlocks,
        ServerCommand::ToggleHighlighting,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ServerCommand::DebugFolding => "tidyfold.debugFolding",
            ServerCommand::FoldableBlocks => "tidyfold.foldableBlocks",
            ServerCommand::ToggleHighlighting => "tidyfold.toggleHighlighting",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}

/// Convert scan output to LSP folding ranges
pub fn to_lsp_ranges(ranges: &[FoldRange]) -> Vec<FoldingRange> {
    ranges
        .iter()
        .map(|range| FoldingRange {
            start_line: range.start_line as u32,
            end_line: range.end_line as u32,
            kind: Some(FoldingRangeKind::Region),
            start_character: None,
            end_character: None,
            collapsed_text: None,
        })
        .collect()
}

/// Folding ranges for a document, `None` for unsupported languages
pub fn folding_ranges(document: &Document, settings: &Settings) -> Option<Vec<FoldingRange>> {
    if !document.supports_folding() {
        return None;
    }
    Some(to_lsp_ranges(&document.fold_ranges(settings)))
}

/// `tidyfold.debugFolding` payload
pub fn debug_report(document: &Document, settings: &Settings) -> Value {
    let ranges = document.fold_ranges(settings);
    let report = FoldReport::new(&document.text, &ranges);
    json!({
        "count": report.len(),
        "regions": report.lines(),
    })
}

/// `tidyfold.foldableBlocks` payload; empty unless highlighting is on
pub fn foldable_blocks(document: &Document, settings: &Settings) -> Value {
    if !settings.highlight_foldable_blocks || !document.supports_decorations() {
        return json!([]);
    }
    let ranges = document.fold_ranges(settings);
    json!(Decoration::for_ranges(&document.text, &ranges))
}

/// Message shown after toggling highlighting
pub fn highlighting_message(enabled: bool) -> String {
    format!(
        "TidyFold: Foldable block highlighting {}",
        if enabled { "enabled" } else { "disabled" }
    )
}
