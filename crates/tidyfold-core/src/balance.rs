//! Bracket-balance matching
//!
//! Locates the end of a code or rune block by counting one delimiter pair
//! until the net count returns to zero.

/// A pair of delimiter characters to balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
}

/// `{` / `}` for keyword blocks
pub const BRACES: Delimiters = Delimiters {
    open: '{',
    close: '}',
};

/// `(` / `)` for rune calls
pub const PARENS: Delimiters = Delimiters {
    open: '(',
    close: ')',
};

impl Delimiters {
    /// Net delimiter count of a line (opens minus closes)
    pub fn net(self, line: &str) -> i64 {
        line.chars().fold(0, |acc, c| {
            if c == self.open {
                acc + 1
            } else if c == self.close {
                acc - 1
            } else {
                acc
            }
        })
    }
}

/// Find the line where the block opened at `start` closes.
///
/// Returns `None` when the opening line has no surplus of opening
/// delimiters, when the balance drops below zero before reaching zero, or
/// when the input ends first.
pub fn find_block_end<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    delimiters: Delimiters,
) -> Option<usize> {
    let mut balance = delimiters.net(lines.get(start)?.as_ref());
    if balance <= 0 {
        return None;
    }

    for (j, line) in lines.iter().enumerate().skip(start + 1) {
        balance += delimiters.net(line.as_ref());
        if balance <= 0 {
            return (balance == 0).then_some(j);
        }
    }

    None
}
