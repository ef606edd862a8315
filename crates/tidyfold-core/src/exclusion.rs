//! Exclusion of element lines that must never open a fold
//!
//! Matching is intentionally broad: an excluded element also matches when
//! it appears in the middle of a line, e.g. inside an attribute value.

use crate::config::FoldingOptions;
use crate::markers::DEFAULT_EXCLUDED;

/// Filter built once per scan from the folding options
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    /// Normalized `<name` markers
    markers: Vec<String>,
    /// Treat any unclosed `<script` line as excluded
    guard_script: bool,
}

impl ExclusionFilter {
    /// Build the filter: user names plus the default containers unless
    /// parent blocks are folded.
    pub fn new(options: &FoldingOptions) -> Self {
        let mut markers: Vec<String> = Vec::new();

        let defaults: &[&str] = if options.fold_parent_blocks {
            &[]
        } else {
            DEFAULT_EXCLUDED
        };
        let names = options
            .excluded_element_names
            .iter()
            .map(String::as_str)
            .chain(defaults.iter().copied());

        for name in names {
            if let Some(marker) = normalize(name) {
                if !markers.contains(&marker) {
                    markers.push(marker);
                }
            }
        }

        Self {
            markers,
            guard_script: !options.fold_parent_blocks,
        }
    }

    /// Normalized markers in match order
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Check a trimmed line against the exclusion rules
    pub fn is_excluded(&self, line: &str) -> bool {
        if self.guard_script && line.contains("<script") && !line.contains("</script") {
            return true;
        }

        self.markers.iter().any(|marker| matches_marker(line, marker))
    }
}

/// `div`, `<div` and ` div ` all normalize to `<div`; blank names are dropped.
fn normalize(name: &str) -> Option<String> {
    let bare = name.trim().trim_start_matches('<').trim();
    if bare.is_empty() {
        None
    } else {
        Some(format!("<{bare}"))
    }
}

fn matches_marker(line: &str, marker: &str) -> bool {
    if line == marker {
        return true;
    }

    if let Some(rest) = line.strip_prefix(marker) {
        if rest.starts_with([' ', '>', '/', 's']) {
            return true;
        }
    }

    line.contains(&format!("{marker} ")) || line.contains(&format!("{marker}>"))
}
