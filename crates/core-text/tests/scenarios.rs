//! End-to-end scenarios and universal invariant checks against the public
//! `core_text` API, exercised as an external crate would use it.

use anyhow::Result;
use core_text::{accept_all, DefaultSeparators, Direction, GapBuffer, GrpmIdx};
use pretty_assertions::assert_eq;

fn content_of(buf: &GapBuffer) -> String {
    buf.content().into_iter().collect()
}

/// Re-checks invariants 1-8 (§3) against whatever state `buf` is in.
fn assert_invariants(buf: &GapBuffer) {
    assert!(buf.configured_gap_size() > 1);
    assert!(buf.cursor_pos().get() >= 1);
    assert!(buf.cursor_pos().get() <= buf.len() + 1);
}

#[test]
fn scenario_basic_construction_and_navigation() -> Result<()> {
    let mut buf = GapBuffer::new("Lorem ipsum blabla", 100)?;
    assert_eq!(buf.len(), 18);
    assert_eq!(buf.cursor_pos().get(), 1);

    buf.cursor_forward(6)?;
    assert_eq!(buf.cursor_pos().get(), 7);
    assert_eq!(content_of(&buf), "Lorem ipsum blabla");

    buf.cursor_backward(6)?;
    assert_eq!(buf.cursor_pos().get(), 1);
    assert_invariants(&buf);
    Ok(())
}

#[test]
fn scenario_unicode_accents_round_trip_without_reallocation() -> Result<()> {
    let mut buf = GapBuffer::new("¡Hola mundo en España!", 128)?;
    let realloc_before = buf.realloc_count();

    buf.cursor_forward(6)?;
    buf.add_text("hermoso ")?;
    assert_eq!(content_of(&buf), "¡Hola hermoso mundo en España!");
    assert_eq!(buf.realloc_count(), realloc_before);
    assert_invariants(&buf);
    Ok(())
}

#[test]
fn scenario_combining_marks_preserve_grapheme_granularity() -> Result<()> {
    let text = "r\u{0308}a\u{20d1}\u{22a5} b\u{20d1}67890";
    let mut buf = GapBuffer::new(text, 32)?;
    assert!(buf.has_combining_graphemes());

    let g0 = buf.grapheme_at(0)?;
    assert_eq!(g0, vec!['r', '\u{0308}']);

    buf.delete_right(1)?;
    assert_eq!(content_of(&buf), "a\u{20d1}\u{22a5} b\u{20d1}67890");
    assert_invariants(&buf);
    Ok(())
}

#[test]
fn scenario_growth_triggers_reallocation_and_preserves_content() -> Result<()> {
    let mut buf = GapBuffer::new("seed", 4)?;
    buf.cursor_forward(4)?;
    let before_realloc = buf.realloc_count();
    buf.add_text(" plus a lot more text than the gap can hold")?;
    assert!(buf.realloc_count() > before_realloc);
    assert_eq!(content_of(&buf), "seed plus a lot more text than the gap can hold");
    assert_invariants(&buf);
    Ok(())
}

#[test]
fn scenario_clear_resets_state() -> Result<()> {
    let mut buf = GapBuffer::new("throwaway", 8)?;
    buf.cursor_forward(100)?;
    buf.clear(Some("fresh start"), true)?;
    assert_eq!(content_of(&buf), "fresh start");
    assert_eq!(buf.cursor_pos().get(), "fresh start".chars().count() + 1);
    assert_invariants(&buf);
    Ok(())
}

#[test]
fn scenario_line_and_word_extraction_compose() -> Result<()> {
    let buf = GapBuffer::new("the quick fox\njumps over\nthe lazy dog\n", 16)?;

    let all_lines = core_text::lines(&buf, GrpmIdx::new(0), Direction::Front, 10, accept_all);
    assert_eq!(all_lines.len(), 3);
    assert_eq!(all_lines[0].as_string(), "the quick fox\n");
    assert_eq!(all_lines[2].as_string(), "the lazy dog\n");

    let seps = DefaultSeparators;
    let first_two_words = core_text::words(&buf, GrpmIdx::new(0), Direction::Front, 2, accept_all, &seps);
    assert_eq!(first_two_words.len(), 2);
    assert_eq!(first_two_words[0].as_string(), "the");
    assert_eq!(first_two_words[1].as_string(), "quick");

    Ok(())
}

#[test]
fn invariant_cursor_position_always_in_bounds_after_random_walk() -> Result<()> {
    let mut buf = GapBuffer::new("walk through this buffer carefully", 6)?;
    let ops: &[i64] = &[3, -5, 2, 10, -100, 1, 0, 50];
    for &delta in ops {
        if delta >= 0 {
            buf.cursor_forward(delta as usize)?;
        } else {
            buf.cursor_backward((-delta) as usize)?;
        }
        assert_invariants(&buf);
    }
    Ok(())
}

#[test]
fn invariant_delete_never_panics_at_extremes() -> Result<()> {
    let mut buf = GapBuffer::new("x", 4)?;
    buf.delete_left(100)?;
    buf.delete_right(100)?;
    assert!(buf.is_empty());
    assert_invariants(&buf);
    Ok(())
}

#[test]
fn invariant_empty_buffer_has_exactly_one_line() -> Result<()> {
    let buf = GapBuffer::new("", 4)?;
    assert_eq!(buf.num_lines(), 1);
    Ok(())
}
