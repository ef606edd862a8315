//! Human-facing views of folding ranges
//!
//! [`FoldReport`] lists what would be folded; [`Decoration`] describes the
//! whole-line highlight an editor paints over a foldable region.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::folding::FoldRange;

/// One folded region with the text of its first and last line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub range: FoldRange,
    pub start_text: String,
    pub end_text: String,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lines {}-{}: \"{}\" to \"{}\"",
            self.range.start_line, self.range.end_line, self.start_text, self.end_text
        )
    }
}

/// Listing of every region a scan would fold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldReport {
    pub entries: Vec<ReportEntry>,
}

impl FoldReport {
    /// Build a report for ranges computed over `text`
    pub fn new(text: &str, ranges: &[FoldRange]) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let line_text = |index: usize| {
            lines
                .get(index)
                .map(|line| line.trim().to_string())
                .unwrap_or_default()
        };

        let entries = ranges
            .iter()
            .map(|range| ReportEntry {
                range: *range,
                start_text: line_text(range.start_line),
                end_text: line_text(range.end_line),
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One rendered line per region
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for FoldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TidyFold would fold {} regions in this file:", self.len())?;
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Whole-line highlight over a foldable region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    pub start_line: usize,
    pub start_character: usize,
    pub end_line: usize,
    /// Length of the last line, in UTF-16 code units
    pub end_character: usize,
    pub hover_message: String,
}

impl Decoration {
    /// Decoration for `range`, spanning to the end of its last line
    pub fn for_range(text: &str, range: &FoldRange) -> Self {
        let end_character = text
            .lines()
            .nth(range.end_line)
            .map(|line| line.encode_utf16().count())
            .unwrap_or(0);

        Self {
            start_line: range.start_line,
            start_character: 0,
            end_line: range.end_line,
            end_character,
            hover_message: format!(
                "Foldable region lines {}-{}",
                range.start_line + 1,
                range.end_line + 1
            ),
        }
    }

    /// Decorations for every range
    pub fn for_ranges(text: &str, ranges: &[FoldRange]) -> Vec<Self> {
        ranges
            .iter()
            .map(|range| Self::for_range(text, range))
            .collect()
    }
}
