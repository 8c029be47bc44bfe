//! The gap buffer storage engine (§4.1).
//!
//! Text is stored as a single `Vec<char>` with a movable hole (the gap)
//! always located at the cursor. A `char` is already a 32-bit Unicode
//! scalar value, which is exactly the "32-bit internal element" the source
//! design calls for: no UTF-8/UTF-16 decoding is needed on any hot path,
//! and the only Unicode cost is grapheme clustering, paid only on the slow
//! (combining-aware) path.

use crate::error::{GapBufferError, Result};
use crate::extract::Subject;
use crate::grapheme;
use crate::index::{BufIdx, CpPos, CursorPos, GrpmIdx};

const GAP_FILLER: char = '\0';

/// A Unicode-aware gap buffer: the editing substrate described in §1-§4.1.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    buffer: Vec<char>,
    gap_start: usize,
    gap_end: usize,
    configured_gap_size: usize,
    content_before_gap_grpm_len: usize,
    content_after_gap_grpm_len: usize,
    has_combining_graphemes: bool,
    force_fast_mode: bool,
    realloc_count: u64,
    gap_extension_count: u64,
}

impl GapBuffer {
    /// Constructs a buffer laid out as `[gap | text]`, cursor at position 1.
    ///
    /// # Errors
    /// Returns [`GapBufferError::InvalidConfiguration`] if `gap_size <= 1`.
    pub fn new(text: &str, gap_size: usize) -> Result<Self> {
        if gap_size <= 1 {
            return Err(GapBufferError::InvalidConfiguration { gap_size });
        }

        let text_chars: Vec<char> = text.chars().collect();
        let mut buffer = Vec::with_capacity(gap_size + text_chars.len());
        buffer.resize(gap_size, GAP_FILLER);
        buffer.extend_from_slice(&text_chars);

        let has_combining = grapheme::has_combining_graphemes(&text_chars);

        Ok(Self {
            buffer,
            gap_start: 0,
            gap_end: gap_size,
            configured_gap_size: gap_size,
            content_before_gap_grpm_len: 0,
            content_after_gap_grpm_len: grapheme::grapheme_count(&text_chars),
            has_combining_graphemes: has_combining,
            force_fast_mode: false,
            realloc_count: 0,
            gap_extension_count: 0,
        })
    }

    // ---------------------------------------------------------------- reads

    /// Borrowed view of the logical content before the gap. Invalidated by
    /// any mutating call (the borrow checker enforces this: the returned
    /// slice borrows `&self`, so no `&mut self` call can be made while it's
    /// alive).
    pub fn content_before_gap(&self) -> &[char] {
        &self.buffer[..self.gap_start]
    }

    /// Borrowed view of the logical content after the gap.
    pub fn content_after_gap(&self) -> &[char] {
        &self.buffer[self.gap_end..]
    }

    /// An owned concatenation of `content_before_gap` and `content_after_gap`.
    pub fn content(&self) -> Vec<char> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(self.content_before_gap());
        out.extend_from_slice(self.content_after_gap());
        out
    }

    /// Grapheme count of the logical content. O(1).
    pub fn len(&self) -> usize {
        self.content_before_gap_grpm_len + self.content_after_gap_grpm_len
    }

    /// Equivalent to [`GapBuffer::len`]; kept as an explicit alias because
    /// the source design names this accessor `contentGrpmLen`.
    pub fn content_grpm_len(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cursor position: `content_before_gap_grpm_len + 1`, always >= 1.
    pub fn cursor_pos(&self) -> CursorPos {
        CursorPos::from_grpm_idx(GrpmIdx::new(self.content_before_gap_grpm_len))
    }

    pub fn current_gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    pub fn configured_gap_size(&self) -> usize {
        self.configured_gap_size
    }

    pub fn force_fast_mode(&self) -> bool {
        self.force_fast_mode
    }

    pub fn has_combining_graphemes(&self) -> bool {
        self.has_combining_graphemes
    }

    pub fn realloc_count(&self) -> u64 {
        self.realloc_count
    }

    pub fn gap_extension_count(&self) -> u64 {
        self.gap_extension_count
    }

    /// Whether grapheme-aware (slow) paths are actually in effect right now.
    fn effective_combining(&self) -> bool {
        self.has_combining_graphemes && !self.force_fast_mode
    }

    /// Converts a logical content index (as if the gap were absent) to a
    /// raw physical array index.
    pub fn content_idx_to_buffer_idx(&self, i: usize) -> BufIdx {
        if i >= self.gap_start {
            BufIdx::new(i + self.current_gap_size())
        } else {
            BufIdx::new(i)
        }
    }

    // ------------------------------------------------------------- cursor

    /// Moves the cursor forward by up to `n` graphemes, clamped at the end.
    pub fn cursor_forward(&mut self, n: usize) -> Result<CursorPos> {
        if n == 0 || self.gap_end == self.buffer.len() {
            return Ok(self.cursor_pos());
        }

        let after_len = self.buffer.len() - self.gap_end;
        let (delta_codeunits, delta_graphemes) = if self.effective_combining() {
            let after = self.content_after_gap().to_vec();
            let boundaries = grapheme::grapheme_boundaries(&after);
            let total_g = boundaries.len() - 1;
            let clamped = n.min(total_g);
            (boundaries[clamped], clamped)
        } else {
            let clamped = n.min(self.content_after_gap_grpm_len);
            (clamped.min(after_len), clamped)
        };

        if delta_codeunits == 0 {
            return Ok(self.cursor_pos());
        }

        self.buffer
            .copy_within(self.gap_end..self.gap_end + delta_codeunits, self.gap_start);
        self.gap_start += delta_codeunits;
        self.gap_end += delta_codeunits;
        self.content_before_gap_grpm_len += delta_graphemes;
        self.content_after_gap_grpm_len -= delta_graphemes;

        Ok(self.cursor_pos())
    }

    /// Moves the cursor backward by up to `n` graphemes, clamped at the start.
    pub fn cursor_backward(&mut self, n: usize) -> Result<CursorPos> {
        if n == 0 || self.gap_start == 0 {
            return Ok(self.cursor_pos());
        }

        let (delta_codeunits, delta_graphemes) = if self.effective_combining() {
            let before = self.content_before_gap().to_vec();
            let boundaries = grapheme::grapheme_boundaries(&before);
            let total_g = boundaries.len() - 1;
            let clamped = n.min(total_g);
            (before.len() - boundaries[total_g - clamped], clamped)
        } else {
            let clamped = n.min(self.content_before_gap_grpm_len);
            (clamped.min(self.gap_start), clamped)
        };

        if delta_codeunits == 0 {
            return Ok(self.cursor_pos());
        }

        self.buffer.copy_within(
            self.gap_start - delta_codeunits..self.gap_start,
            self.gap_end - delta_codeunits,
        );
        self.gap_start -= delta_codeunits;
        self.gap_end -= delta_codeunits;
        self.content_before_gap_grpm_len -= delta_graphemes;
        self.content_after_gap_grpm_len += delta_graphemes;

        Ok(self.cursor_pos())
    }

    /// Sets the cursor to an absolute 1-based grapheme position, clamped to
    /// `[1, content_grpm_len + 1]`.
    pub fn set_cursor_pos(&mut self, pos: usize) -> Result<CursorPos> {
        let max = self.len() + 1;
        let clamped = pos.clamp(1, max);
        let target_before = clamped - 1;

        if target_before > self.content_before_gap_grpm_len {
            self.cursor_forward(target_before - self.content_before_gap_grpm_len)
        } else if target_before < self.content_before_gap_grpm_len {
            self.cursor_backward(self.content_before_gap_grpm_len - target_before)
        } else {
            Ok(self.cursor_pos())
        }
    }

    // ----------------------------------------------------------- deletion

    /// Deletes up to `n` graphemes to the left of the cursor. No data
    /// movement: only `gap_start` changes.
    pub fn delete_left(&mut self, n: usize) -> Result<CursorPos> {
        if n == 0 || self.gap_start == 0 {
            return Ok(self.cursor_pos());
        }

        let delta_codeunits = if self.effective_combining() {
            let before = self.content_before_gap().to_vec();
            let boundaries = grapheme::grapheme_boundaries(&before);
            let total_g = boundaries.len() - 1;
            let clamped = n.min(total_g);
            self.content_before_gap_grpm_len -= clamped;
            before.len() - boundaries[total_g - clamped]
        } else {
            let clamped = n.min(self.content_before_gap_grpm_len);
            self.content_before_gap_grpm_len -= clamped;
            clamped.min(self.gap_start)
        };

        self.gap_start -= delta_codeunits;
        Ok(self.cursor_pos())
    }

    /// Deletes up to `n` graphemes to the right of the cursor. No data
    /// movement: only `gap_end` changes.
    pub fn delete_right(&mut self, n: usize) -> Result<CursorPos> {
        if n == 0 || self.gap_end == self.buffer.len() {
            return Ok(self.cursor_pos());
        }

        let after_len = self.buffer.len() - self.gap_end;
        let delta_codeunits = if self.effective_combining() {
            let after = self.content_after_gap().to_vec();
            let boundaries = grapheme::grapheme_boundaries(&after);
            let total_g = boundaries.len() - 1;
            let clamped = n.min(total_g);
            self.content_after_gap_grpm_len -= clamped;
            boundaries[clamped]
        } else {
            let clamped = n.min(self.content_after_gap_grpm_len);
            self.content_after_gap_grpm_len -= clamped;
            clamped.min(after_len)
        };

        self.gap_end += delta_codeunits;
        Ok(self.cursor_pos())
    }

    // -------------------------------------------------------------- insert

    /// Inserts `text` at the cursor, reallocating if it doesn't fit in the
    /// current gap.
    pub fn add_text(&mut self, text: &str) -> Result<CursorPos> {
        let text_chars: Vec<char> = text.chars().collect();

        if text_chars.len() < self.current_gap_size() {
            let text_has_combining = grapheme::has_combining_graphemes(&text_chars);
            let inc = if !self.has_combining_graphemes && !text_has_combining {
                text_chars.len()
            } else {
                self.has_combining_graphemes = true;
                grapheme::grapheme_count(&text_chars)
            };

            self.buffer[self.gap_start..self.gap_start + text_chars.len()]
                .copy_from_slice(&text_chars);
            self.gap_start += text_chars.len();
            self.content_before_gap_grpm_len += inc;

            Ok(self.cursor_pos())
        } else {
            self.reallocate(Some(text))?;
            Ok(self.cursor_pos())
        }
    }

    /// Ensures the gap is at least `configured_gap_size` large, optionally
    /// splicing `text_to_add` just before the (possibly enlarged) gap.
    pub fn reallocate(&mut self, text_to_add: Option<&str>) -> Result<()> {
        let text_chars: Vec<char> = text_to_add.map(|t| t.chars().collect()).unwrap_or_default();

        let old_gap_size = self.current_gap_size();
        let filler_len = self.configured_gap_size.saturating_sub(old_gap_size);
        if filler_len > 0 {
            self.gap_extension_count += 1;
        }
        let new_gap_size = old_gap_size + filler_len;

        let before = self.content_before_gap().to_vec();
        let after = self.content_after_gap().to_vec();

        let mut new_buffer =
            Vec::with_capacity(before.len() + text_chars.len() + new_gap_size + after.len());
        new_buffer.extend_from_slice(&before);
        new_buffer.extend_from_slice(&text_chars);
        new_buffer.resize(new_buffer.len() + new_gap_size, GAP_FILLER);
        new_buffer.extend_from_slice(&after);

        self.gap_start = before.len() + text_chars.len();
        self.gap_end = self.gap_start + new_gap_size;
        self.buffer = new_buffer;
        self.realloc_count += 1;

        let before_side = self.content_before_gap().to_vec();
        let after_side = self.content_after_gap().to_vec();
        self.content_before_gap_grpm_len = grapheme::grapheme_count(&before_side);
        self.content_after_gap_grpm_len = grapheme::grapheme_count(&after_side);
        self.has_combining_graphemes = grapheme::has_combining_graphemes(&before_side)
            || grapheme::has_combining_graphemes(&after_side);

        tracing::trace!(
            target: "core_text.buffer",
            old_gap_size,
            new_gap_size,
            realloc_count = self.realloc_count,
            gap_extension_count = self.gap_extension_count,
            "buffer_reallocated"
        );

        Ok(())
    }

    /// Sets the configured gap size, immediately reallocating to enforce it.
    ///
    /// # Errors
    /// Returns [`GapBufferError::InvalidConfiguration`] if `size <= 1`.
    pub fn set_configured_gap_size(&mut self, size: usize) -> Result<usize> {
        if size <= 1 {
            return Err(GapBufferError::InvalidConfiguration { gap_size: size });
        }
        self.configured_gap_size = size;
        self.reallocate(None)?;
        Ok(size)
    }

    /// `false` triggers a full rescan for combining graphemes (§4.1 state
    /// machine); `true` is a pure flag flip with no rescan.
    pub fn set_force_fast_mode(&mut self, value: bool) {
        self.force_fast_mode = value;
        if !value {
            let content = self.content();
            self.has_combining_graphemes = grapheme::has_combining_graphemes(&content);
            tracing::trace!(
                target: "core_text.buffer",
                has_combining_graphemes = self.has_combining_graphemes,
                "combining_recheck_complete"
            );
        }
    }

    /// Discards all state and reinitializes with `text` (default: empty).
    pub fn clear(&mut self, text: Option<&str>, move_cursor_to_end: bool) -> Result<CursorPos> {
        let text_chars: Vec<char> = text.map(|t| t.chars().collect()).unwrap_or_default();
        let gap_size = self.configured_gap_size;

        let mut buffer = Vec::with_capacity(gap_size + text_chars.len());
        if move_cursor_to_end {
            buffer.extend_from_slice(&text_chars);
            buffer.resize(buffer.len() + gap_size, GAP_FILLER);
            self.gap_start = text_chars.len();
            self.gap_end = text_chars.len() + gap_size;
        } else {
            buffer.resize(gap_size, GAP_FILLER);
            buffer.extend_from_slice(&text_chars);
            self.gap_start = 0;
            self.gap_end = gap_size;
        }
        self.buffer = buffer;

        let before_side = self.content_before_gap().to_vec();
        let after_side = self.content_after_gap().to_vec();
        self.content_before_gap_grpm_len = grapheme::grapheme_count(&before_side);
        self.content_after_gap_grpm_len = grapheme::grapheme_count(&after_side);
        self.has_combining_graphemes = grapheme::has_combining_graphemes(&before_side)
            || grapheme::has_combining_graphemes(&after_side);

        tracing::debug!(target: "core_text.buffer", move_cursor_to_end, "buffer_cleared");

        Ok(self.cursor_pos())
    }

    // ------------------------------------------------------- index / slice

    /// The grapheme at 0-based grapheme index `i`, as its component code units.
    ///
    /// # Errors
    /// Returns [`GapBufferError::OutOfBounds`] if `i >= self.len()`.
    pub fn grapheme_at(&self, i: usize) -> Result<Vec<char>> {
        let total = self.len();
        if i >= total {
            return Err(GapBufferError::OutOfBounds { index: i, len: total });
        }

        if self.effective_combining() {
            let content = self.content();
            let boundaries = grapheme::grapheme_boundaries(&content);
            Ok(content[boundaries[i]..boundaries[i + 1]].to_vec())
        } else {
            let before_len = self.content_before_gap_grpm_len;
            let c = if i < before_len {
                self.buffer[i]
            } else {
                self.buffer[self.gap_end + (i - before_len)]
            };
            Ok(vec![c])
        }
    }

    /// The code units covering graphemes `[start, end)`.
    ///
    /// # Errors
    /// Returns [`GapBufferError::OutOfBounds`] if the range exceeds `self.len()`.
    pub fn grapheme_slice(&self, start: usize, end: usize) -> Result<Vec<char>> {
        let total = self.len();
        if start > end || end > total {
            return Err(GapBufferError::OutOfBounds { index: end, len: total });
        }
        if start == end {
            return Ok(Vec::new());
        }

        if self.effective_combining() {
            let content = self.content();
            let boundaries = grapheme::grapheme_boundaries(&content);
            Ok(content[boundaries[start]..boundaries[end]].to_vec())
        } else {
            let before_len = self.content_before_gap_grpm_len;
            if end <= before_len {
                Ok(self.buffer[start..end].to_vec())
            } else if start >= before_len {
                let base = self.gap_end;
                Ok(self.buffer[base + (start - before_len)..base + (end - before_len)].to_vec())
            } else {
                let mut v = self.buffer[start..before_len].to_vec();
                v.extend_from_slice(&self.buffer[self.gap_end..self.gap_end + (end - before_len)]);
                Ok(v)
            }
        }
    }

    /// An independently owned deep copy, suitable for snapshotting.
    pub fn save(&self) -> GapBuffer {
        self.clone()
    }

    /// Human-readable dump showing the gap's location; a development aid,
    /// not a stable format.
    pub fn debug_content(&self) -> String {
        let before: String = self.content_before_gap().iter().collect();
        let after: String = self.content_after_gap().iter().collect();
        format!("{before}[gap:{}]{after}", self.current_gap_size())
    }

    // ---------------------------------------------------------- line math

    /// Maps a grapheme index to its code-point position in the logical
    /// content (1 code unit == 1 code point in this design, so this is an
    /// identity on the fast path and a grapheme-stride walk on the slow path).
    pub fn grpm_idx_to_cp_pos(&self, g: GrpmIdx) -> CpPos {
        if self.effective_combining() {
            let content = self.content();
            let boundaries = grapheme::grapheme_boundaries(&content);
            let idx = g.get().min(boundaries.len() - 1);
            CpPos::new(boundaries[idx])
        } else {
            CpPos::new(g.get())
        }
    }

    /// 1-based line ordinal containing code-point position `cp_pos`, counted
    /// by `'\n'` occurrences up to that position.
    pub fn line_num_at_pos(&self, cp_pos: CpPos) -> usize {
        let content = self.content();
        let p = cp_pos.get().min(content.len());
        1 + content[..p].iter().filter(|&&c| c == '\n').count()
    }

    /// Total number of lines: one more than the number of `'\n'` in the
    /// content, so a trailing newline yields one trailing empty line.
    pub fn num_lines(&self) -> usize {
        let content = self.content();
        1 + content.iter().filter(|&&c| c == '\n').count()
    }

    /// The `Subject` bounding 1-based line `line_no`, or `None` if it falls
    /// outside `[1, num_lines()]`. The terminating `'\n'`, if any, is
    /// included as part of the line it ends (matching the convention the
    /// donor crate's rope-backed `Buffer::line` uses).
    pub fn line_subject(&self, line_no: usize) -> Option<Subject> {
        if line_no < 1 {
            return None;
        }

        let content = self.content();
        let boundaries = grapheme::grapheme_boundaries(&content);
        let total_graphemes = boundaries.len() - 1;

        let mut current_line = 1usize;
        let mut start_g: Option<usize> = None;
        let mut chars: Vec<char> = Vec::new();

        for g in 0..total_graphemes {
            let cu = &content[boundaries[g]..boundaries[g + 1]];
            if current_line == line_no {
                if start_g.is_none() {
                    start_g = Some(g);
                }
                chars.extend_from_slice(cu);
            } else if current_line > line_no {
                break;
            }

            if cu == ['\n'] {
                if current_line == line_no {
                    return Some(Subject::new(GrpmIdx::new(start_g.unwrap()), chars.len(), chars));
                }
                current_line += 1;
            }
        }

        if current_line == line_no {
            let start = start_g.unwrap_or(total_graphemes);
            return Some(Subject::new(GrpmIdx::new(start), chars.len(), chars));
        }

        None
    }
}
