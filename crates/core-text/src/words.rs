//! The word extractor (§4.3): walks words from a starting position,
//! bounded by `count` and filtered by a predicate.
//!
//! The boundary-only design decision recorded in `DESIGN.md` applies here:
//! runs of separator graphemes are pure delimiters between words, never
//! emitted as subjects of their own.

use std::collections::VecDeque;

use crate::buffer::GapBuffer;
use crate::extract::{Direction, Subject};
use crate::grapheme;
use crate::index::GrpmIdx;

/// Classifies which code points are word separators. Deliberately narrow:
/// this is the only piece of "configuration" the engine consults, and it is
/// a trait rather than a loaded settings file (§10.3).
pub trait WordSeparators {
    fn is_separator(&self, c: char) -> bool;
}

/// ASCII whitespace plus common punctuation, the conventional default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSeparators;

impl WordSeparators for DefaultSeparators {
    fn is_separator(&self, c: char) -> bool {
        c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '"' | '\'')
    }
}

/// Collects up to `count` words starting at grapheme index `start`, walking
/// in `direction`, keeping only words for which `predicate` returns `true`.
pub fn words<P, S>(
    buffer: &GapBuffer,
    start: GrpmIdx,
    direction: Direction,
    count: usize,
    predicate: P,
    separators: &S,
) -> Vec<Subject>
where
    P: Fn(&Subject) -> bool,
    S: WordSeparators,
{
    if count == 0 {
        return Vec::new();
    }

    let total = buffer.len();
    if start.get() >= total {
        return Vec::new();
    }

    let is_sep = |c: char| separators.is_separator(c);
    let mut accepted: Vec<Subject> = Vec::new();

    match direction {
        Direction::Front => {
            let mut i = start.get();
            while i < total && accepted.len() < count {
                let g = buffer.grapheme_at(i).expect("i < total");
                if grapheme::is_word_grapheme(&g, is_sep) {
                    let word_start = i;
                    let mut chars: Vec<char> = Vec::new();
                    while i < total {
                        let g = buffer.grapheme_at(i).expect("i < total");
                        if !grapheme::is_word_grapheme(&g, is_sep) {
                            break;
                        }
                        chars.extend_from_slice(&g);
                        i += 1;
                    }
                    let subject = Subject::new(GrpmIdx::new(word_start), i - word_start, chars);
                    if predicate(&subject) {
                        accepted.push(subject);
                    }
                } else {
                    i += 1;
                }
            }
        }
        Direction::Back => {
            let mut collected: Vec<Subject> = Vec::new();
            let mut i = start.get() as isize;
            while i >= 0 && collected.len() < count {
                let idx = i as usize;
                let g = buffer.grapheme_at(idx).expect("idx < total");
                if grapheme::is_word_grapheme(&g, is_sep) {
                    let word_end = idx;
                    let mut chars: VecDeque<char> = VecDeque::new();
                    let mut j = i;
                    while j >= 0 {
                        let jdx = j as usize;
                        let g = buffer.grapheme_at(jdx).expect("jdx < total");
                        if !grapheme::is_word_grapheme(&g, is_sep) {
                            break;
                        }
                        for c in g.into_iter().rev() {
                            chars.push_front(c);
                        }
                        j -= 1;
                    }
                    let word_start = (j + 1) as usize;
                    let text: Vec<char> = chars.into_iter().collect();
                    let subject = Subject::new(GrpmIdx::new(word_start), word_end - word_start + 1, text);
                    if predicate(&subject) {
                        collected.push(subject);
                    }
                    i = j;
                } else {
                    i -= 1;
                }
            }
            collected.reverse();
            accepted = collected;
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::accept_all;

    fn buf(text: &str) -> GapBuffer {
        GapBuffer::new(text, 16).unwrap()
    }

    #[test]
    fn forward_collects_words_skipping_separators() {
        let b = buf("the quick fox");
        let result = words(&b, GrpmIdx::new(0), Direction::Front, 2, accept_all, &DefaultSeparators);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].as_string(), "the");
        assert_eq!(result[1].as_string(), "quick");
    }

    #[test]
    fn backward_returns_words_in_text_order() {
        let b = buf("the quick fox");
        let last = GrpmIdx::new(b.len() - 1);
        let result = words(&b, last, Direction::Back, 2, accept_all, &DefaultSeparators);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].as_string(), "quick");
        assert_eq!(result[1].as_string(), "fox");
    }

    #[test]
    fn separators_are_never_emitted_as_words() {
        let b = buf("a, b");
        let result = words(&b, GrpmIdx::new(0), Direction::Front, 10, accept_all, &DefaultSeparators);
        let texts: Vec<String> = result.iter().map(Subject::as_string).collect();
        assert_eq!(texts, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn starting_mid_separator_run_finds_next_word() {
        let b = buf("   hello");
        let result = words(&b, GrpmIdx::new(0), Direction::Front, 1, accept_all, &DefaultSeparators);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].as_string(), "hello");
    }

    #[test]
    fn predicate_skips_unwanted_words_without_truncating_budget() {
        let b = buf("no yes no yes");
        let result = words(&b, GrpmIdx::new(0), Direction::Front, 2, |s| s.as_string() == "yes", &DefaultSeparators);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|s| s.as_string() == "yes"));
    }

    #[test]
    fn start_past_end_returns_empty() {
        let b = buf("short");
        let result = words(&b, GrpmIdx::new(100), Direction::Front, 1, accept_all, &DefaultSeparators);
        assert!(result.is_empty());
    }

    #[test]
    fn combining_graphemes_kept_whole_within_words() {
        let b = buf("caf\u{0065}\u{0301} bar");
        let result = words(&b, GrpmIdx::new(0), Direction::Front, 1, accept_all, &DefaultSeparators);
        assert_eq!(result[0].as_string(), "cafe\u{0301}");
    }
}
