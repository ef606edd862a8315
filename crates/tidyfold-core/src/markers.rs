//! Marker tables driving the folding scan
//!
//! Recognition is table-driven: adding a construct means adding a row here,
//! the scan loop in [`crate::folding`] stays untouched.

use regex::Regex;
use std::sync::OnceLock;

/// Keywords that open a brace-balanced block when they prefix a line.
///
/// Checked in order; the first prefix match wins.
pub const JS_FOLDABLE: &[&str] = &[
    "function", "class", "const", "import", "onMount", "type", "export", "for", "if",
    // Svelte 5 runes
    "$state", "$effect", "$derived", "$props", "$bindable", "$inspect", "$host",
];

/// Rune names recognized as call expressions (`$name(`) anywhere in a line.
pub const RUNES: &[&str] = &[
    "state", "effect", "derived", "props", "bindable", "inspect", "host",
];

/// A markup construct that folds from its opening line to its close marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupBlock {
    /// Opening marker as it appears at the start of a trimmed line
    pub opener: &'static str,
    /// Regex source recognizing the close marker, if the block can close
    pub closer: Option<&'static str>,
}

impl MarkupBlock {
    const fn closable(opener: &'static str, closer: &'static str) -> Self {
        Self {
            opener,
            closer: Some(closer),
        }
    }

    const fn open_only(opener: &'static str) -> Self {
        Self {
            opener,
            closer: None,
        }
    }
}

/// Markup openers folded by default, in match order.
pub const HTML_FOLDABLE: &[MarkupBlock] = &[
    MarkupBlock::closable("<form", r"</form>"),
    MarkupBlock::closable("<navbar", r"</navbar>"),
    MarkupBlock::closable("<footer", r"</footer>"),
    MarkupBlock::closable("<section", r"</section>"),
    MarkupBlock::closable("<header", r"</header>"),
    MarkupBlock::closable("<article", r"</article>"),
    MarkupBlock::closable("<aside", r"</aside>"),
    MarkupBlock::closable("<main", r"</main>"),
    MarkupBlock::closable("<style", r"</style>"),
    // Svelte template syntax
    MarkupBlock::closable("{#snippet", r"\{/snippet\}"),
    MarkupBlock::closable("{#if", r"\{/if\}"),
    MarkupBlock::closable("{#each", r"\{/each\}"),
    MarkupBlock::closable("{#key", r"\{/key\}"),
    MarkupBlock::closable("{#await", r"\{/await\}"),
    MarkupBlock::open_only("{@render"),
    MarkupBlock::open_only("{@html"),
    MarkupBlock::open_only("{@const"),
    MarkupBlock::open_only("{@debug"),
];

/// Generic containers, foldable only when parent blocks are enabled.
pub const PARENT_BLOCKS: &[MarkupBlock] = &[
    MarkupBlock::closable("<div", r"</div>"),
    MarkupBlock::closable("<script", r"</script>"),
];

/// Element names excluded unless parent blocks are folded.
pub const DEFAULT_EXCLUDED: &[&str] = &["div", "script"];

/// Line comment openers; such lines never start a construct.
pub const COMMENT_OPENERS: &[&str] = &["//", "<!--"];

/// Compiled close-marker patterns, one per closable opener.
pub struct EndMarker {
    pub opener: &'static str,
    pub pattern: Regex,
}

/// Every registered close marker, compiled once.
pub fn end_markers() -> &'static [EndMarker] {
    static END_MARKERS: OnceLock<Vec<EndMarker>> = OnceLock::new();

    END_MARKERS.get_or_init(|| {
        HTML_FOLDABLE
            .iter()
            .chain(PARENT_BLOCKS)
            .filter_map(|block| {
                block.closer.map(|closer| EndMarker {
                    opener: block.opener,
                    pattern: Regex::new(&format!("(?i){closer}")).unwrap(),
                })
            })
            .collect()
    })
}

/// Whether the line contains a rune call such as `$effect(`.
pub fn contains_rune_call(line: &str) -> bool {
    static RUNE_RE: OnceLock<Regex> = OnceLock::new();

    let rune_re = RUNE_RE.get_or_init(|| {
        let names = RUNES.join("|");
        Regex::new(&format!(r"\$(?:{names})\(")).unwrap()
    });

    rune_re.is_match(line)
}

/// Whether `line` starts with `marker` followed by a boundary character.
///
/// The boundary is end of line, whitespace, `>`, `/` or `}`, so `<header`
/// matches `<header class="x">` but not `<headers>`.
pub fn starts_with_marker(line: &str, marker: &str) -> bool {
    match line.strip_prefix(marker) {
        Some(rest) => match rest.chars().next() {
            None => true,
            Some(c) => c.is_whitespace() || matches!(c, '>' | '/' | '}'),
        },
        None => false,
    }
}
