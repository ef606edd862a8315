//! Folding range generation for Svelte components
//!
//! Generates folding ranges for:
//! - Keyword blocks (`function`, `class`, `if`, ...) balanced on braces
//! - Rune calls (`$state(`, `$effect(`, ...) balanced on parentheses
//! - Structural tags and template blocks closed by their end marker
//!
//! Ranges come out in discovery order: brace and rune blocks on their
//! opening line, markup blocks on their closing line. Callers that display
//! them must sort explicitly.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::balance::{find_block_end, BRACES, PARENS};
use super::config::FoldingOptions;
use super::exclusion::ExclusionFilter;
use super::markers::{
    contains_rune_call, end_markers, starts_with_marker, MarkupBlock, HTML_FOLDABLE,
    JS_FOLDABLE, PARENT_BLOCKS,
};
use super::scanner::{Line, LineClass, LineScanner};

/// Which detector produced a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldKind {
    /// Keyword block balanced on braces
    Code,
    /// Rune call balanced on parentheses
    Rune,
    /// Tag or template block closed by its end marker
    Markup,
}

/// A collapsible line range, inclusive and 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoldRange {
    pub start_line: usize,
    pub end_line: usize,
    pub kind: FoldKind,
}

impl FoldRange {
    pub fn new(start_line: usize, end_line: usize, kind: FoldKind) -> Self {
        Self {
            start_line,
            end_line,
            kind,
        }
    }
}

/// An open markup block waiting for its end marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenBlock {
    start_line: usize,
    opener: &'static str,
}

/// Analyzer for generating folding ranges
pub struct RangeScanner;

impl RangeScanner {
    /// Generate folding ranges for the entire document
    pub fn compute_folding_ranges(text: &str, options: &FoldingOptions) -> Vec<FoldRange> {
        if !options.custom_folding_enabled {
            return Vec::new();
        }

        let lines = LineScanner::lines(text);
        if lines.is_empty() {
            return Vec::new();
        }

        let raw: Vec<&str> = lines.iter().map(|line| line.raw).collect();
        let mut pass = ScanPass::new(options);

        for line in &lines {
            match LineScanner::classify(line.trimmed, &pass.exclusions) {
                LineClass::Comment | LineClass::Excluded => continue,
                LineClass::Candidate => {}
            }

            // ----- RUNE CALLS -----
            if contains_rune_call(line.trimmed) {
                if let Some(end) = find_block_end(&raw, line.index, PARENS) {
                    pass.emit(line.index, end, FoldKind::Rune);
                }
            }

            // ----- KEYWORD BLOCKS -----
            if let Some(keyword) = JS_FOLDABLE.iter().find(|k| line.trimmed.starts_with(**k)) {
                let assignment = *keyword == "const" && line.trimmed.contains('=');
                if !assignment {
                    if let Some(end) = find_block_end(&raw, line.index, BRACES) {
                        pass.emit(line.index, end, FoldKind::Code);
                    }
                }
            }

            // ----- MARKUP OPENERS -----
            pass.open_markup(line);

            // ----- MARKUP CLOSERS -----
            pass.close_markup(line);
        }

        // Blocks still on the stack never closed; they are dropped.
        pass.ranges
    }
}

/// Generate folding ranges with the given options
pub fn compute_folding_ranges(text: &str, options: &FoldingOptions) -> Vec<FoldRange> {
    RangeScanner::compute_folding_ranges(text, options)
}

/// State owned by a single scan
struct ScanPass {
    exclusions: ExclusionFilter,
    foldable: Vec<MarkupBlock>,
    stack: Vec<OpenBlock>,
    ranges: Vec<FoldRange>,
    seen: HashSet<(usize, usize)>,
}

impl ScanPass {
    fn new(options: &FoldingOptions) -> Self {
        let mut foldable = HTML_FOLDABLE.to_vec();
        if options.fold_parent_blocks {
            foldable.extend_from_slice(PARENT_BLOCKS);
        }

        Self {
            exclusions: ExclusionFilter::new(options),
            foldable,
            stack: Vec::new(),
            ranges: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Record a range unless it is empty or already reported
    fn emit(&mut self, start_line: usize, end_line: usize, kind: FoldKind) {
        if start_line < end_line && self.seen.insert((start_line, end_line)) {
            self.ranges.push(FoldRange::new(start_line, end_line, kind));
        }
    }

    fn open_markup(&mut self, line: &Line<'_>) {
        let opened = self
            .foldable
            .iter()
            .find(|block| starts_with_marker(line.trimmed, block.opener));

        if let Some(block) = opened {
            if block.closer.is_some() {
                self.stack.push(OpenBlock {
                    start_line: line.index,
                    opener: block.opener,
                });
            }
        }
    }

    fn close_markup(&mut self, line: &Line<'_>) {
        for marker in end_markers() {
            if self.stack.is_empty() {
                return;
            }
            if !marker.pattern.is_match(line.trimmed) {
                continue;
            }

            // Nearest open block of the same kind, not necessarily the top
            let position = self
                .stack
                .iter()
                .rposition(|open| open.opener == marker.opener);

            if let Some(position) = position {
                let open = self.stack.remove(position);
                self.emit(open.start_line, line.index, FoldKind::Markup);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<(usize, usize)> {
        compute_folding_ranges(text, &FoldingOptions::default())
            .iter()
            .map(|r| (r.start_line, r.end_line))
            .collect()
    }

    #[test]
    fn test_interleaved_kinds_close_by_kind() {
        let text = "\
<section>
{#if a}
</section>
{/if}";
        assert_eq!(scan(text), vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_same_kind_closes_innermost() {
        let text = "\
{#if a}
{#if b}
x
{/if}
{/if}";
        assert_eq!(scan(text), vec![(1, 3), (0, 4)]);
    }

    #[test]
    fn test_single_line_markup_not_folded() {
        let text = "<section>inline</section>\n<p>x</p>";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_single_line_block_keeps_outer_open() {
        let text = "\
<section>
<section>inline</section>
</section>";
        assert_eq!(scan(text), vec![(0, 2)]);
    }

    #[test]
    fn test_open_only_markers_never_fold() {
        let text = "{@html content}\n{@const x = 1}\n{/if}";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_unmatched_close_is_ignored() {
        let text = "</footer>\n{/each}\n<footer>\nx\n</footer>";
        assert_eq!(scan(text), vec![(2, 4)]);
    }

    #[test]
    fn test_const_assignment_not_folded() {
        let text = "const handler = () => {\n  go();\n};";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_const_without_assignment_folds() {
        let text = "const {\n  a,\n  b\n}";
        assert_eq!(scan(text), vec![(0, 3)]);
    }

    #[test]
    fn test_rune_and_keyword_report_once() {
        let text = "$effect(() => {\n  run();\n});";
        let ranges = compute_folding_ranges(text, &FoldingOptions::default());
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0], FoldRange::new(0, 2, FoldKind::Rune));
    }

    #[test]
    fn test_rune_inside_assignment_folds_on_parens() {
        let text = "\
let doubled = $derived(
  count * 2
);";
        assert_eq!(scan(text), vec![(0, 2)]);
    }

    #[test]
    fn test_export_block_folds() {
        let text = "  export function load() {\n  return {};\n}";
        assert_eq!(scan(text), vec![(0, 2)]);
    }

    #[test]
    fn test_parent_blocks_fold_when_enabled() {
        let text = "<div>\n<p>x</p>\n</div>";
        assert!(scan(text).is_empty());

        let options = FoldingOptions {
            fold_parent_blocks: true,
            ..FoldingOptions::default()
        };
        let ranges = compute_folding_ranges(text, &options);
        assert_eq!(ranges, vec![FoldRange::new(0, 2, FoldKind::Markup)]);
    }

    #[test]
    fn test_closers_inside_excluded_line_are_skipped() {
        let text = "<section>\nx\n</section><div>";
        assert!(scan(text).is_empty());
    }
}
