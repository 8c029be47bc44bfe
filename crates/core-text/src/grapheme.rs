//! Grapheme-cluster helpers used by the slow (combining-aware) path.
//!
//! The buffer stores one `char` per code unit (a `char` in Rust already is a
//! 32-bit Unicode scalar value, so this is a direct match for the source
//! design's "32-bit internal element"). Everything here operates on `&[char]`
//! slices rather than `&str`, and reconstitutes a `String` only when grapheme
//! clustering is actually required, which the fast path avoids entirely.

use unicode_segmentation::UnicodeSegmentation;

/// Number of grapheme clusters in `s`. O(n); callers on the fast path should
/// not call this per-keystroke — it exists for the slow path and for the
/// caches rebuilt at construction, `reallocate`, `clear`, and recheck.
pub fn grapheme_count(s: &[char]) -> usize {
    if s.is_empty() {
        return 0;
    }
    let text: String = s.iter().collect();
    text.graphemes(true).count()
}

/// True if `s` contains at least one grapheme cluster spanning more than one
/// code point (invariant 7: this is what `hasCombiningGraphemes` tracks).
pub fn has_combining_graphemes(s: &[char]) -> bool {
    grapheme_count(s) < s.len()
}

/// Code-unit offsets of every grapheme boundary in `s`, including 0 and
/// `s.len()`. `boundaries.len() == grapheme_count(s) + 1`.
///
/// Used by the slow path of indexing, slicing, and cursor movement: the
/// code-unit range for grapheme `i` is `boundaries[i]..boundaries[i + 1]`.
pub fn grapheme_boundaries(s: &[char]) -> Vec<usize> {
    let text: String = s.iter().collect();
    let mut boundaries = Vec::with_capacity(text.len() + 1);
    boundaries.push(0);
    let mut idx = 0;
    for cluster in text.graphemes(true) {
        idx += cluster.chars().count();
        boundaries.push(idx);
    }
    boundaries
}

/// Classifies whether `g` (a single grapheme cluster, expressed as its
/// component code points) is a word character: it is a word character
/// unless any of its component code points is a separator.
pub fn is_word_grapheme(g: &[char], is_separator: impl Fn(char) -> bool) -> bool {
    !g.iter().copied().any(is_separator)
}
