//! Line-by-line scanner for Svelte components
//!
//! Splits a document into lines and classifies each line's role before the
//! folding pass looks for openers and closers.

use crate::exclusion::ExclusionFilter;
use crate::markers::COMMENT_OPENERS;

/// A document line with its trimmed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub raw: &'a str,
    pub trimmed: &'a str,
}

/// Classification of a line for the folding pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// `//` or `<!--` comment line
    Comment,
    /// Matches an excluded element
    Excluded,
    /// Inspected for openers and closers
    Candidate,
}

/// Structural scanner for Svelte lines
pub struct LineScanner;

impl LineScanner {
    /// Split text into lines. A trailing `\r` is dropped with the newline.
    pub fn lines(text: &str) -> Vec<Line<'_>> {
        text.lines()
            .enumerate()
            .map(|(index, raw)| Line {
                index,
                raw,
                trimmed: raw.trim(),
            })
            .collect()
    }

    /// Classify a trimmed line
    pub fn classify(trimmed: &str, exclusions: &ExclusionFilter) -> LineClass {
        if COMMENT_OPENERS.iter().any(|c| trimmed.starts_with(*c)) {
            return LineClass::Comment;
        }

        if exclusions.is_excluded(trimmed) {
            return LineClass::Excluded;
        }

        LineClass::Candidate
    }
}
