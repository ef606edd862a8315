//! Behavior tests for the folding scan
//!
//! Covers the documented scenarios end to end through
//! [`RangeScanner::compute_folding_ranges`].

use crate::config::FoldingOptions;
use crate::folding::{FoldKind, FoldRange, RangeScanner};

fn scan(text: &str) -> Vec<FoldRange> {
    RangeScanner::compute_folding_ranges(text, &FoldingOptions::default())
}

fn spans(ranges: &[FoldRange]) -> Vec<(usize, usize)> {
    ranges.iter().map(|r| (r.start_line, r.end_line)).collect()
}

// ============================================================================
// SCENARIOS
// ============================================================================

/// TEST 1: Code block
/// A function body folds from its signature to its closing brace
#[test]
fn test_function_block() {
    let text = "\
function test() {
  const x = 1;
  const y = 2;
  return x + y;
}";

    let ranges = scan(text);

    assert_eq!(ranges.len(), 1, "Should have exactly one range");
    assert_eq!(ranges[0], FoldRange::new(0, 4, FoldKind::Code));
}

/// TEST 2: Rune blocks
/// `$effect` and `$state` calls each fold on their own
#[test]
fn test_rune_blocks() {
    let text = "
const Component = () => {
  $effect(() => {
    console.log('Side effect runs');
    console.log('Another log');
  });

  $state(() => {
    let count = 0;
  });
}
";

    let ranges = scan(text);

    assert_eq!(spans(&ranges), vec![(2, 5), (7, 9)]);
    assert!(ranges.iter().all(|r| r.kind == FoldKind::Rune));
}

/// TEST 3: Template blocks
/// `{#if}` and `{#each}` fold to their close; the wrapping div does not
#[test]
fn test_template_blocks() {
    let text = "
<div>
  {#if condition}
    <p>Conditional content</p>
  {/if}

  {#each items as item}
    <li>{item}</li>
  {/each}
</div>
";

    let ranges = scan(text);

    assert_eq!(spans(&ranges), vec![(2, 4), (6, 8)]);
}

/// TEST 4: Structural tags
/// Section and footer fold as separate pairs
#[test]
fn test_structural_tags() {
    let text = "
<section>
  <h1>Title</h1>
  <p>Content</p>
</section>

<footer>
  <p>Footer content</p>
</footer>
";

    let ranges = scan(text);

    assert_eq!(spans(&ranges), vec![(1, 4), (6, 8)]);
    assert!(ranges.iter().all(|r| r.kind == FoldKind::Markup));
}

/// TEST 5: Default exclusion
/// Only the section folds; div and script are generic containers
#[test]
fn test_default_exclusion() {
    let text = "
<div>
  <p>Some content</p>
</div>

<script>
  let greeting = 'Hello';
</script>

<section>
  Content
</section>
";

    let ranges = scan(text);

    assert_eq!(spans(&ranges), vec![(9, 11)]);
}

/// TEST 5b: Excluded container body
/// Only the `<script>` line is skipped; the function inside still folds
#[test]
fn test_excluded_container_body_still_scanned() {
    let text = "\
<div>
  <p>Some content</p>
</div>

<script>
  function test() {
    console.log(\"Hello\");
  }
</script>

<section>
  Content
</section>
";

    let ranges = scan(text);

    assert_eq!(spans(&ranges), vec![(5, 7), (10, 12)]);
    assert_eq!(ranges[0].kind, FoldKind::Code);
    assert_eq!(ranges[1].kind, FoldKind::Markup);
}

/// TEST 6: Unterminated block
/// A function that never closes produces nothing
#[test]
fn test_unterminated_block() {
    let text = "function foo() {\n  const a = 1;\n  return a;";
    assert!(scan(text).is_empty());
}

// ============================================================================
// COMMENTS & EXCLUSIONS
// ============================================================================

/// Comment lines are skipped, code and markup around them still fold
#[test]
fn test_comments_skipped() {
    let text = "
// This is a comment
function test() {
  // Another comment
  const x = 1;
}
<!-- HTML comment -->
<section>
  Content
</section>
";

    let ranges = scan(text);

    assert_eq!(spans(&ranges), vec![(2, 5), (7, 9)]);
}

/// A commented-out opener never starts a range
#[test]
fn test_commented_opener_never_starts() {
    let text = "\
// function hidden() {
//   x();
// }
<!-- <section>
</section> -->";

    assert!(scan(text).is_empty());
}

/// Configured names are excluded in addition to the defaults
#[test]
fn test_configured_exclusion() {
    let text = "\
<section class=\"hero\">
  x
</section>
<main>
  y
</main>";

    let options = FoldingOptions {
        excluded_element_names: vec!["section".to_string()],
        ..FoldingOptions::default()
    };
    let ranges = RangeScanner::compute_folding_ranges(text, &options);

    assert_eq!(spans(&ranges), vec![(3, 5)]);
}

/// With parent blocks enabled, div and script fold like any other tag
#[test]
fn test_fold_parent_blocks() {
    let text = "\
<script>
  let a = 1;
</script>
<div class=\"wrapper\">
  <p>x</p>
</div>";

    let options = FoldingOptions {
        fold_parent_blocks: true,
        ..FoldingOptions::default()
    };
    let ranges = RangeScanner::compute_folding_ranges(text, &options);

    assert_eq!(spans(&ranges), vec![(0, 2), (3, 5)]);
}

// ============================================================================
// CONTRACT
// ============================================================================

/// Disabled folding yields nothing, whatever the document
#[test]
fn test_disabled_folding() {
    let options = FoldingOptions {
        custom_folding_enabled: false,
        ..FoldingOptions::default()
    };
    let text = "function a() {\n}\n<section>\n</section>";
    assert!(RangeScanner::compute_folding_ranges(text, &options).is_empty());
}

/// Empty and comment-only documents have no folds
#[test]
fn test_empty_document() {
    assert!(scan("").is_empty());
    assert!(scan("// a\n<!-- b -->\n").is_empty());
}

/// Ranges follow discovery order, not start order
#[test]
fn test_discovery_order() {
    let text = "\
<section>
function inner() {
  run();
}
</section>";

    let ranges = scan(text);

    assert_eq!(spans(&ranges), vec![(1, 3), (0, 4)]);
}

/// Same input, same output, order included
#[test]
fn test_idempotent() {
    let text = "\
<script lang=\"ts\">
  import { onMount } from 'svelte';
  let { items } = $props();
  let count = $state(0);
  $effect(() => {
    console.log(count);
  });
  onMount(() => {
    start();
  });
</script>

<main>
  {#each items as item}
    {#if item.visible}
      <article>
        {item.name}
      </article>
    {/if}
  {/each}
</main>";

    let first = scan(text);
    let second = scan(text);

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

/// Every range is non-empty and inside the document
#[test]
fn test_ranges_within_document() {
    let text = "\
<main>
  <section>
    {#await promise}
      <p>loading</p>
    {:then value}
      <p>{value}</p>
    {/await}
  </section>
  {#key id}
    <Child />
  {/key}
</main>
<style>
  main { color: red; }
</style>";

    let line_count = text.lines().count();
    let ranges = scan(text);

    assert_eq!(ranges.len(), 5);
    for range in &ranges {
        assert!(range.start_line < range.end_line);
        assert!(range.end_line < line_count);
    }
}

/// Real-world component mixing script, runes and template
#[test]
fn test_real_world_component() {
    let text = "\
<script lang=\"ts\">
  import Card from './Card.svelte';

  let { items = [] } = $props();

  let filtered = $derived(
    items.filter((item) => item.active)
  );

  function select(id: string) {
    selected = id;
  }
</script>

<section class=\"list\">
  {#each filtered as item (item.id)}
    <Card {item} onclick={() => select(item.id)} />
  {/each}
</section>";

    let ranges = scan(text);

    assert_eq!(spans(&ranges), vec![(5, 7), (9, 11), (15, 17), (14, 18)]);
}
